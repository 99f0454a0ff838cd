//! Join gates: hold a node back until every distinct producer has released it.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::Semaphore;
use tracing::warn;

use crate::types::Id;

/// Counts down releases from a fixed number of producers.
#[derive(Debug)]
pub(crate) struct JoinGate {
  required: u32,
  released: Semaphore,
}

impl JoinGate {
  pub(crate) fn new(required: u32) -> Self {
    Self {
      required,
      released: Semaphore::new(0),
    }
  }

  /// One producer is done.
  pub(crate) fn release(&self) {
    self.released.add_permits(1);
  }

  /// Resolves once `required` releases have happened.
  pub(crate) async fn wait(&self) {
    match self.released.acquire_many(self.required).await {
      Ok(permits) => permits.forget(),
      Err(err) => warn!(error = %err, "join gate closed"),
    }
  }
}

/// Fresh gates for one walk, one per node with producers.
pub(crate) fn gates(requirements: &HashMap<Id, u32>) -> HashMap<Id, Arc<JoinGate>> {
  requirements
    .iter()
    .map(|(id, required)| (*id, Arc::new(JoinGate::new(*required))))
    .collect()
}
