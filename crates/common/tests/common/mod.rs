//! Shared fixtures for agent integration tests
#![allow(dead_code)]

use common::prelude::*;

pub const WEB_ID: &str = "https://alice.example/profile/card#me";
pub const CARD: &str = "https://alice.example/profile/card";
pub const STORAGE: &str = "https://alice.example/storage/";
pub const BOB: &str = "https://bob.example/profile/card#me";
pub const BOB_CARD: &str = "https://bob.example/profile/card";

pub const ALICE_PROFILE: &str = r#"
@prefix foaf: <http://xmlns.com/foaf/0.1/> .
@prefix pim: <http://www.w3.org/ns/pim/space#> .
@prefix dc: <http://purl.org/dc/terms/> .

<> a foaf:PersonalProfileDocument ;
   dc:title "WebID profile of Alice" ;
   foaf:primaryTopic <#me> .

<#me> a foaf:Person ;
   foaf:name "Alice" ;
   pim:storage <../storage/> .
"#;

pub const BOB_PROFILE: &str = r#"
@prefix foaf: <http://xmlns.com/foaf/0.1/> .

<#me> a foaf:Person ;
   foaf:name "Bob" .
"#;

/// An agent signed in as Alice, with Alice's and Bob's profiles in the store.
/// Returns the store handle for assertions and the receiving end of the
/// agent's event channel.
pub fn setup_agent() -> (
    GraphAgent<MemoryLdpStore>,
    MemoryLdpStore,
    flume::Receiver<GraphEvent>,
) {
    let store = MemoryLdpStore::new();
    store.insert_turtle(CARD, ALICE_PROFILE);
    store.insert_turtle(BOB_CARD, BOB_PROFILE);

    let (dispatcher, rx) = ChannelDispatcher::new();
    let agent = GraphAgent::new(store.clone())
        .with_dispatcher(dispatcher)
        .with_session(Session::new(WEB_ID));

    (agent, store, rx)
}

pub fn center() -> CenterNode {
    CenterNode {
        uri: WEB_ID.to_string(),
        storage: STORAGE.to_string(),
    }
}

pub fn text_node(title: &str, description: &str) -> NodeInfo {
    NodeInfo {
        title: Some(title.to_string()),
        description: Some(description.to_string()),
        kind: NodeKind::Text,
        ..NodeInfo::default()
    }
}
