//! Drives a walk through the nodes' [`Processable`](crate::types::Processable) capability.

use std::panic::AssertUnwindSafe;

use futures::{FutureExt, StreamExt};
use tokio::task::JoinSet;
use tracing::{debug, instrument, warn};

use super::Walker;
use crate::error::{GraphError, ProcessError, Result};
use crate::types::Id;

impl Walker {
  /// Walks the graph and processes every node that can be processed.
  ///
  /// Each item is handed to its node's processing capability in its own task
  /// and released when processing returns, whether it succeeded, failed or
  /// panicked. Items whose node cannot be processed are released right away.
  /// Returns the number of items walked, or the first failure once the walk
  /// is over.
  #[instrument(level = "debug", skip_all, fields(start = %self.start().id(), total = self.total()))]
  pub async fn run(&self) -> Result<usize> {
    let mut stream = self.walk();
    let mut tasks: JoinSet<Option<(Id, ProcessError)>> = JoinSet::new();
    let mut walked = 0;

    while let Some(data) = stream.next().await {
      walked += 1;
      if data.node.as_processable().is_none() {
        data.close();
        continue;
      }
      tasks.spawn(async move {
        let node = data.node.clone();
        let outcome = match node.as_processable() {
          Some(p) => AssertUnwindSafe(p.process(&data))
            .catch_unwind()
            .await
            .unwrap_or_else(|_| Err("processing panicked".into())),
          None => Ok(()),
        };
        let id = data.id();
        data.close();
        outcome.err().map(|err| (id, err))
      });
    }

    let mut first_error = None;
    while let Some(joined) = tasks.join_next().await {
      let failure = match joined {
        Ok(None) => continue,
        Ok(Some((node, source))) => GraphError::Process { node, source },
        Err(err) => GraphError::Task(err),
      };
      warn!(error = %failure, "processing failed");
      first_error.get_or_insert(failure);
    }

    match first_error {
      Some(err) => Err(err),
      None => {
        debug!(walked, "run complete");
        Ok(walked)
      }
    }
  }
}
