//! Tests for `WalkerConfig`.

use super::config::WalkerConfig;
use crate::error::GraphError;

#[test]
fn default_capacity_is_one() {
  assert_eq!(WalkerConfig::default().channel_capacity, 1);
}

#[test]
fn from_json_fills_defaults() {
  let cfg = WalkerConfig::from_json("{}").unwrap();
  assert_eq!(cfg, WalkerConfig::default());
  let cfg = WalkerConfig::from_json(r#"{"channel_capacity": 8}"#).unwrap();
  assert_eq!(cfg.channel_capacity, 8);
}

#[test]
fn from_json_rejects_garbage() {
  let err = WalkerConfig::from_json(r#"{"channel_capacity": "many"}"#).unwrap_err();
  assert!(matches!(err, GraphError::Config(_)));
}

#[test]
fn builder_sets_capacity() {
  let cfg = WalkerConfig::default().with_channel_capacity(4);
  assert_eq!(cfg.channel_capacity, 4);
}
