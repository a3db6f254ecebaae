// transfer.rs — Moving nodes across a process boundary.
//
// Identity and metadata serialize; connector handles do not. A node read
// back from JSON is unbound until the receiving side rehydrates it.

mod common;

use chrono::{TimeZone, Utc};

use common::{load_node, MemoryConnector};
use cycle_node::{same_connector, FetchState, NodeError, NodeKind, RepositoryNode};

#[test]
fn identity_and_metadata_survive_transfer() {
    let backend = MemoryConnector::new("signavio")
        .with_artifact("abc", "Invoice")
        .shared();
    let mut node = load_node(&backend, NodeKind::Artifact, "abc").unwrap();
    let created = Utc.with_ymd_and_hms(2024, 5, 17, 9, 0, 0).unwrap();
    node.metadata_mut().set_created(created);
    node.metadata_mut().set("owner", "alice");

    let json = serde_json::to_string(&node).unwrap();
    let received: RepositoryNode = serde_json::from_str(&json).unwrap();

    assert_eq!(received.kind(), NodeKind::Artifact);
    assert_eq!(received.id(), "abc");
    assert_eq!(received.client_url(), node.client_url());
    assert_eq!(received.metadata(), node.metadata());
    assert_eq!(received.metadata().created(), Some(created));
    assert_eq!(received.metadata().fetch_state(), FetchState::HeaderOnly);
    assert_eq!(received.to_string(), node.to_string());
}

#[test]
fn connectors_are_not_serialized() {
    let backend = MemoryConnector::new("signavio").shared();
    let node = RepositoryNode::with_connector(NodeKind::Folder, backend).with_id("root");

    let value = serde_json::to_value(&node).unwrap();
    let fields: Vec<&str> = value
        .as_object()
        .unwrap()
        .keys()
        .map(String::as_str)
        .collect();
    assert!(fields.iter().all(|f| !f.contains("connector") && *f != "bindings"));

    let received: RepositoryNode = serde_json::from_value(value).unwrap();
    assert!(!received.is_connected());
    assert!(received.original_connector().is_none());
    assert!(matches!(
        received.connector().unwrap_err(),
        NodeError::NotConnected { .. }
    ));
}

#[test]
fn rehydrate_reconnects_received_node() {
    let local = MemoryConnector::new("local")
        .with_artifact("abc", "Invoice")
        .shared();
    let json = r#"{"kind":"artifact","id":"abc","metadata":{"entries":{"name":{"type":"text","value":"Invoice"}},"fetch_state":"header_only"}}"#;

    let received: RepositoryNode = serde_json::from_str(json).unwrap();
    assert_eq!(received.metadata().name(), Some("Invoice"));
    assert!(received.client_url().is_none());

    received.rehydrate(local.clone()).unwrap();
    assert!(same_connector(&received.connector().unwrap(), &local));
    assert!(same_connector(&received.original_connector().unwrap(), &local));

    // A second rehydration would replace the original; it is refused.
    let other = MemoryConnector::new("other").shared();
    let err = received.rehydrate(other).unwrap_err();
    assert!(matches!(err, NodeError::OriginalAlreadyBound { .. }));
    assert!(same_connector(&received.connector().unwrap(), &local));
}

#[test]
fn minimal_payload_deserializes_with_defaults() {
    let received: RepositoryNode = serde_json::from_str(r#"{"kind":"folder"}"#).unwrap();
    assert!(received.is_folder());
    assert_eq!(received.id(), "");
    assert!(received.metadata().is_empty());
    assert_eq!(received.metadata().fetch_state(), FetchState::NotFetched);
}
