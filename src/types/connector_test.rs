//! Tests for `Connector`.

use super::{Connector, ConnectorType, INPUT_NAME, Linker, OUTPUT_NAME};
use crate::error::GraphError;

#[test]
fn default_names_and_types() {
  assert_eq!(ConnectorType::Input.default_name(), INPUT_NAME);
  assert_eq!(ConnectorType::Output.default_name(), OUTPUT_NAME);
  assert_eq!(ConnectorType::Input.opposite(), ConnectorType::Output);
  assert_eq!(ConnectorType::Output.opposite(), ConnectorType::Input);

  let c = Connector::input("aux");
  assert_eq!(c.name(), "aux");
  assert_eq!(c.kind(), ConnectorType::Input);

  let c = Connector::output("aux");
  assert_eq!(c.name(), "aux");
  assert_eq!(c.kind(), ConnectorType::Output);
  assert!(c.target().is_none());
  assert!(!c.is_connected());
}

#[test]
fn connect_records_one_side_only() {
  let l = Linker::new();
  let c = Connector::output("aux");
  let sink = l.input(INPUT_NAME).unwrap();

  c.connect(&l, Some(&sink)).unwrap();

  let (linker, connector) = c.target().unwrap();
  assert_eq!(linker.id(), l.id());
  assert!(std::sync::Arc::ptr_eq(&connector, &sink));
  assert!(!sink.is_connected());

  c.disconnect();
  assert!(c.target().is_none());
}

#[test]
fn connect_rejects_same_type() {
  let l = Linker::new();
  let c = Connector::output("aux");
  let err = c
    .connect(&l, Some(&Connector::output("test")))
    .unwrap_err();
  assert!(matches!(err, GraphError::SameConnectorType));
  assert!(c.target().is_none());
}

#[test]
fn connect_rejects_missing_connector() {
  let l = Linker::new();
  let c = Connector::output("aux");
  assert!(matches!(
    c.connect(&l, None),
    Err(GraphError::InvalidConnector)
  ));
}

#[test]
fn target_vanishes_with_its_linker() {
  let c = Connector::output("aux");
  {
    let l = Linker::new();
    let sink = l.input(INPUT_NAME).unwrap();
    c.connect(&l, Some(&sink)).unwrap();
    assert!(c.is_connected());
  }
  assert!(c.target().is_none());
}

#[test]
fn connector_type_serde_and_display() {
  assert_eq!(
    serde_json::to_string(&ConnectorType::Output).unwrap(),
    "\"output\""
  );
  assert_eq!(ConnectorType::Input.to_string(), "input");
}
