//! Drive the graph agent over real HTTP against the local server

use common::ldp::{HttpLdpClientConfig, Resource, ResourceStore};
use common::prelude::*;
use local::http::LocalState;
use reqwest::StatusCode;
use tokio::sync::watch;
use url::Url;

const WEB_ID: &str = "https://alice.example/profile/card#me";
const CARD: &str = "https://alice.example/profile/card";
const STORAGE: &str = "https://alice.example/storage/";

const ALICE_PROFILE: &str = r#"
@prefix foaf: <http://xmlns.com/foaf/0.1/> .
@prefix pim: <http://www.w3.org/ns/pim/space#> .

<#me> a foaf:Person ;
   foaf:name "Alice" ;
   pim:storage <../storage/> .
"#;

struct TestServer {
    base: Url,
    resources: ResourceStore,
    _shutdown: watch::Sender<()>,
}

async fn start() -> TestServer {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let base = Url::parse(&format!("http://{}/", listener.local_addr().unwrap())).unwrap();

    let resources = ResourceStore::new();
    resources.put(CARD, Resource::turtle(ALICE_PROFILE));

    let (shutdown_tx, shutdown_rx) = watch::channel(());
    let state = LocalState::new(resources.clone(), base.clone());
    tokio::spawn(local::http::run(listener, state, shutdown_rx));

    TestServer {
        base,
        resources,
        _shutdown: shutdown_tx,
    }
}

fn agent(server: &TestServer) -> (GraphAgent<HttpLdpClient>, flume::Receiver<GraphEvent>) {
    let client = HttpLdpClient::new(HttpLdpClientConfig {
        proxy: Proxy::new(server.base.clone()),
        timeout: Some(std::time::Duration::from_secs(5)),
    })
    .unwrap();
    let (dispatcher, rx) = ChannelDispatcher::new();
    let agent = GraphAgent::new(client)
        .with_dispatcher(dispatcher)
        .with_session(Session::new(WEB_ID));
    (agent, rx)
}

#[tokio::test]
async fn test_node_lifecycle_through_proxy() {
    let server = start().await;
    let (agent, rx) = agent(&server);

    let center = agent.center_node(WEB_ID).await.unwrap();
    assert_eq!(center.storage, STORAGE);

    let info = NodeInfo {
        title: Some("Trip".to_string()),
        description: Some("Summer 2016".to_string()),
        ..NodeInfo::default()
    };
    let uri = agent.create_node(WEB_ID, &center, &info).await.unwrap();
    assert!(uri.starts_with(STORAGE));
    assert!(server.resources.contains(&format!("{}.acl", uri)));

    let map = agent.get_graph_map_at_uri(WEB_ID).await.unwrap();
    assert_eq!(map.nodes.len(), 2);
    assert_eq!(map.nodes[1].uri, uri);
    assert!(map.errors.is_empty());

    let model = agent.get_file_model(&uri).await.unwrap();
    assert_eq!(model.title.as_deref(), Some("Trip"));
    assert_eq!(model.node_type, NodeType::Document);

    agent.delete_file(&uri).await.unwrap();
    let err = agent.store().head(&uri).await.unwrap_err();
    assert_eq!(err.status(), Some(StatusCode::NOT_FOUND));

    let events: Vec<_> = rx.try_iter().collect();
    assert_eq!(
        events,
        vec![
            GraphEvent::NodeCreated { uri: uri.clone() },
            GraphEvent::NodeDeleted { uri },
        ]
    );
}

#[tokio::test]
async fn test_duplicate_link_is_rejected() {
    let server = start().await;
    let (agent, _rx) = agent(&server);
    let bob = "https://bob.example/profile/card#me";
    server.resources.put(bob, Resource::turtle("<#me> a <http://xmlns.com/foaf/0.1/Person> ."));

    agent
        .link_nodes(WEB_ID, LinkType::Knows, bob, false)
        .await
        .unwrap();
    let err = agent
        .link_nodes(WEB_ID, LinkType::Knows, bob, false)
        .await
        .unwrap_err();
    assert!(err.is_duplicate());

    let friends = agent.find_friends(WEB_ID).await.unwrap();
    assert_eq!(friends.len(), 1);
    assert_eq!(friends[0].object.value(), bob);
}

#[tokio::test]
async fn test_direct_paths_and_status() {
    let server = start().await;
    let client = reqwest::Client::new();

    let response = client
        .get(server.base.join("_status/livez").unwrap())
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let doc = server.base.join("notes/today").unwrap();
    let response = client
        .put(doc.clone())
        .header("content-type", "text/plain")
        .body("hello")
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    let response = client.get(doc.clone()).send().await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers()["content-type"], "text/plain");
    assert_eq!(response.text().await.unwrap(), "hello");
    assert!(server.resources.contains(doc.as_str()));

    let response = client
        .get(server.base.join("nothing/here").unwrap())
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
