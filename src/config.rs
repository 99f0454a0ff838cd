//! Walker configuration.

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Tunables for [`Walker`](crate::Walker).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WalkerConfig {
  /// Capacity of the walk output channel. 0 is treated as 1.
  ///
  /// The default of 1 is a one-slot buffer rather than a rendezvous: one item
  /// can be emitted before the consumer asks for it, and the next emitting
  /// task waits until that slot is taken. Join ordering does not depend on
  /// the capacity, since gates open on release, not on receipt.
  pub channel_capacity: usize,
}

impl Default for WalkerConfig {
  fn default() -> Self {
    Self {
      channel_capacity: 1,
    }
  }
}

impl WalkerConfig {
  /// Parses a JSON document; missing fields keep their defaults.
  pub fn from_json(source: &str) -> Result<Self> {
    Ok(serde_json::from_str(source)?)
  }

  pub fn with_channel_capacity(mut self, capacity: usize) -> Self {
    self.channel_capacity = capacity;
    self
  }
}
