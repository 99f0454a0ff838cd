//! Tests for `Linker`.

use std::sync::Arc;

use super::{Connector, ConnectorType, INPUT_NAME, IdAllocator, Linker, OUTPUT_NAME};
use crate::error::GraphError;

fn peer_id(linker: &Linker, connector: &Connector) -> Option<u64> {
  linker
    .connection(Some(connector))
    .map(|(l, _)| l.id().get())
}

#[test]
fn defaults_and_lookups() {
  let l1 = Linker::new();
  let l2 = Linker::new();
  assert_ne!(l1.id(), l2.id());

  let c = l1.output(OUTPUT_NAME).unwrap();
  assert_eq!(c.name(), OUTPUT_NAME);
  assert_eq!(c.kind(), ConnectorType::Output);
  assert!(c.target().is_none());

  assert!(l1.input("aux").is_none());
  assert!(l1.connector(OUTPUT_NAME, ConnectorType::Input).is_none());
  assert_eq!(l1.connectors(ConnectorType::Input).len(), 1);
  assert_eq!(l1.connectors(ConnectorType::Output).len(), 1);
  assert!(l1.connection(Some(&c)).is_none());
}

#[test]
fn link_sets_both_sides() {
  let l1 = Linker::new();
  let l2 = Linker::new();
  l1.link(&l2).unwrap();

  let out = l1.output(OUTPUT_NAME).unwrap();
  let (t, o) = out.target().unwrap();
  assert_eq!(t.id(), l2.id());
  assert!(Arc::ptr_eq(&o, &l2.input(INPUT_NAME).unwrap()));

  let input = l2.input(INPUT_NAME).unwrap();
  let (t, o) = input.target().unwrap();
  assert_eq!(t.id(), l1.id());
  assert!(Arc::ptr_eq(&o, &out));

  let (t, _) = l2.connection(None).unwrap();
  assert_eq!(t.id(), l1.id());
  assert!(l2.connection(Some(&l2.output(OUTPUT_NAME).unwrap())).is_none());
  assert_eq!(l1.consumers().len(), 1);
}

#[test]
fn connect_resolves_by_name_and_type() {
  let l1 = Linker::new();
  let l2 = Linker::new();
  l2.add_input("aux").unwrap();

  // Handles not owned by either linker resolve to the owned connectors.
  l1.connect(&l2, &Connector::output(OUTPUT_NAME), &Connector::input("aux"))
    .unwrap();
  let aux = l2.input("aux").unwrap();
  assert_eq!(peer_id(&l2, &aux), Some(l1.id().get()));
  assert!(!l2.input(INPUT_NAME).unwrap().is_connected());
}

#[test]
fn connect_fails_for_unknown_connector() {
  let l1 = Linker::new();
  let l2 = Linker::new();
  let err = l1
    .connect(&l2, &Connector::output("missing"), &Connector::input(INPUT_NAME))
    .unwrap_err();
  assert!(matches!(err, GraphError::InvalidConnector));
  let err = l1
    .connect(&l2, &Connector::output(OUTPUT_NAME), &Connector::input("missing"))
    .unwrap_err();
  assert!(matches!(err, GraphError::InvalidConnector));
  assert!(!l1.output(OUTPUT_NAME).unwrap().is_connected());
}

#[test]
fn same_type_leaves_prior_links_unchanged() {
  let l1 = Linker::new();
  let l2 = Linker::new();
  let l3 = Linker::new();
  l1.link(&l2).unwrap();
  l3.add_output("extra").unwrap();

  let out = l1.output(OUTPUT_NAME).unwrap();
  let extra = l3.output("extra").unwrap();
  let err = l1.connect(&l3, &out, &extra).unwrap_err();
  assert!(matches!(err, GraphError::SameConnectorType));

  assert_eq!(peer_id(&l1, &out), Some(l2.id().get()));
  assert_eq!(
    l2.connection(None).map(|(l, _)| l.id()),
    Some(l1.id())
  );
  assert!(!extra.is_connected());
}

#[test]
fn relinking_detaches_stale_peer() {
  let l1 = Linker::new();
  let l2 = Linker::new();
  let l3 = Linker::new();
  l1.link(&l2).unwrap();
  l1.link(&l3).unwrap();

  assert!(l2.connection(None).is_none());
  assert_eq!(
    l3.connection(None).map(|(l, _)| l.id()),
    Some(l1.id())
  );

  // Relinking the same pair keeps it intact.
  l1.link(&l3).unwrap();
  assert!(l3.connection(None).is_some());
  assert!(l1.output(OUTPUT_NAME).unwrap().is_connected());
}

#[test]
fn disconnect_and_unlink() {
  let l1 = Linker::new();
  let l2 = Linker::new();
  l1.link(&l2).unwrap();

  l2.disconnect(&l2.input(INPUT_NAME).unwrap());
  assert!(!l1.output(OUTPUT_NAME).unwrap().is_connected());
  assert!(l2.connection(None).is_none());

  l1.link(&l2).unwrap();
  l1.unlink();
  assert!(!l1.output(OUTPUT_NAME).unwrap().is_connected());
  assert!(!l2.input(INPUT_NAME).unwrap().is_connected());

  // Idempotent on unlinked connectors.
  l1.unlink();
  l2.disconnect(&l2.input(INPUT_NAME).unwrap());
  assert!(!l2.input(INPUT_NAME).unwrap().is_connected());
}

#[test]
fn duplicate_connector_names_rejected_per_direction() {
  let l = Linker::with_allocator(&IdAllocator::new());
  assert!(l.add_input("aux").is_ok());
  assert!(l.add_output("aux").is_ok());
  let err = l.add_input("aux").unwrap_err();
  assert!(matches!(
    err,
    GraphError::DuplicateConnector { ref name, kind: ConnectorType::Input } if name == "aux"
  ));
  assert!(matches!(
    l.add_output(OUTPUT_NAME),
    Err(GraphError::DuplicateConnector { .. })
  ));
  let names: Vec<_> = l
    .connectors(ConnectorType::Input)
    .iter()
    .map(|c| c.name().to_string())
    .collect();
  assert_eq!(names, vec!["aux".to_string(), INPUT_NAME.to_string()]);
}

#[test]
fn self_link_is_allowed() {
  let l = Linker::new();
  l.link(&l).unwrap();
  let (t, _) = l.connection(None).unwrap();
  assert_eq!(t.id(), l.id());
}
