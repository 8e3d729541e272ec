//! Integration tests for graph map assembly

mod common;

use ::common::prelude::*;
use self::common::{setup_agent, BOB, CARD, STORAGE, WEB_ID};
use reqwest::StatusCode;

fn link(store: &MemoryLdpStore, predicate: &str, target: &str) {
    store
        .resources()
        .patch(
            CARD,
            &::common::ldp::SparqlPatch::insert(vec![Triple::new(WEB_ID, predicate, target)]),
        )
        .unwrap();
}

#[tokio::test]
async fn test_graph_map_of_lonely_profile() {
    let (agent, _, _) = setup_agent();

    let map = agent.get_graph_map_at_web_id(WEB_ID).await.unwrap();
    assert_eq!(map.nodes.len(), 1);
    assert!(map.errors.is_empty());

    let center = map.center().unwrap();
    assert_eq!(center.uri, WEB_ID);
    assert!(center.connection.is_none());
    assert_eq!(center.prefixes.len(), 3);
}

#[tokio::test]
async fn test_neighbours_follow_allow_list_only() {
    let (agent, store, _) = setup_agent();
    link(&store, PRED.knows, BOB);
    link(&store, PRED.maker, "https://carol.example/profile/card#me");
    store.insert_turtle(
        "https://carol.example/profile/card",
        "<#me> <http://xmlns.com/foaf/0.1/name> \"Carol\" .",
    );

    let map = agent.get_graph_map_at_uri(WEB_ID).await.unwrap();
    assert_eq!(map.nodes.len(), 2);

    let bob = &map.neighbours()[0];
    assert_eq!(bob.uri, BOB);
    assert_eq!(bob.connection.as_deref(), Some(PRED.knows));
    assert!(!bob.is_unavailable());
    assert_eq!(bob.value(PRED.name), Some("Bob"));
}

#[tokio::test]
async fn test_unavailable_neighbours() {
    let (agent, store, _) = setup_agent();
    let forbidden = format!("{}forbidden", STORAGE);
    let missing = format!("{}missing", STORAGE);
    let broken = format!("{}broken", STORAGE);
    let unreachable = "https://offline.example/doc";

    link(&store, PRED.passport, &forbidden);
    link(&store, PRED.is_related_to, &missing);
    link(&store, PRED.is_related_to_http, &broken);
    link(&store, PRED.is_related_to, unreachable);
    link(&store, PRED.knows, BOB);

    store.insert_turtle(&forbidden, "");
    store.set_status(&forbidden, StatusCode::FORBIDDEN);
    store.set_status(&broken, StatusCode::INTERNAL_SERVER_ERROR);
    store.set_unreachable(unreachable);

    let map = agent.get_graph_map_at_uri(WEB_ID).await.unwrap();

    let mut errors = map.errors.clone();
    errors.sort();
    let mut expected = vec![
        forbidden.clone(),
        missing.clone(),
        broken.clone(),
        unreachable.to_string(),
    ];
    expected.sort();
    assert_eq!(errors, expected);

    let neighbours = map.neighbours();
    assert_eq!(neighbours.len(), 3);
    assert!(neighbours.iter().all(|n| n.uri != forbidden));
    assert!(neighbours.iter().all(|n| n.uri != unreachable));

    let missing_node = neighbours.iter().find(|n| n.uri == missing).unwrap();
    assert_eq!(missing_node.status(), Some(StatusCode::NOT_FOUND));
    assert_eq!(missing_node.connection.as_deref(), Some(PRED.is_related_to));

    let broken_node = neighbours.iter().find(|n| n.uri == broken).unwrap();
    assert_eq!(broken_node.unavailable, Some(500));
    assert_eq!(
        broken_node.connection.as_deref(),
        Some(PRED.is_related_to_http)
    );

    assert!(neighbours.iter().any(|n| n.uri == BOB && !n.is_unavailable()));
}

#[tokio::test]
async fn test_unavailable_center_is_an_error() {
    let (agent, store, _) = setup_agent();
    store.set_status(CARD, StatusCode::UNAUTHORIZED);

    let err = agent.get_graph_map_at_uri(WEB_ID).await.unwrap_err();
    assert!(matches!(
        err,
        GraphError::Unavailable { status, .. } if status == StatusCode::UNAUTHORIZED
    ));

    store.set_unreachable(CARD);
    assert!(matches!(
        agent.get_graph_map_at_uri(WEB_ID).await,
        Err(GraphError::Ldp(LdpError::Unreachable(_)))
    ));
}

#[tokio::test]
async fn test_find_friends_and_center_node() {
    let (agent, store, _) = setup_agent();
    link(&store, PRED.knows, BOB);

    let friends = agent.find_friends(WEB_ID).await.unwrap();
    assert_eq!(friends, vec![Triple::new(WEB_ID, PRED.knows, BOB)]);

    let center = agent.center_node(WEB_ID).await.unwrap();
    assert_eq!(center.uri, WEB_ID);
    assert_eq!(center.storage, STORAGE);

    assert!(matches!(
        agent.center_node(BOB).await,
        Err(GraphError::MissingStorage(_))
    ));
}
