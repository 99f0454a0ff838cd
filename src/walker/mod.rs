//! Dependency-respecting concurrent traversal of a linker graph.
//!
//! [`Walker::new`] discovers the component around a start linker once;
//! [`Walker::walk`] then visits every node of it exactly once, holding nodes
//! with producers back until all of them have been released.

mod discovery;
mod join;
mod run;
mod walk;

use std::fmt;
use std::sync::Arc;

use tracing::instrument;

use crate::config::WalkerConfig;
use crate::types::{Id, Linker, Node};
use discovery::Topology;

pub use walk::WalkStream;

/// Traverses the graph component containing a start linker.
///
/// The topology is captured at construction; build a new walker after
/// rewiring the graph. A walker keeps every linker it discovered alive.
#[derive(Clone)]
pub struct Walker {
  start: Arc<Linker>,
  topology: Arc<Topology>,
  config: WalkerConfig,
}

impl Walker {
  pub fn new(start: &Arc<Linker>) -> Self {
    Self::with_config(start, WalkerConfig::default())
  }

  #[instrument(level = "trace", skip_all, fields(start = %start.id()))]
  pub fn with_config(start: &Arc<Linker>, config: WalkerConfig) -> Self {
    Self {
      start: start.clone(),
      topology: Arc::new(discovery::discover(start)),
      config,
    }
  }

  pub fn start(&self) -> &Arc<Linker> {
    &self.start
  }

  pub fn config(&self) -> &WalkerConfig {
    &self.config
  }

  /// Number of nodes in the component; every walk yields exactly this many items.
  pub fn total(&self) -> usize {
    self.topology.members.len()
  }

  /// Linkers the walk starts from, start first.
  pub fn roots(&self) -> &[Arc<Linker>] {
    &self.topology.roots
  }

  pub fn root_nodes(&self) -> Vec<Arc<dyn Node>> {
    self
      .topology
      .roots
      .iter()
      .map(|l| l.node().clone())
      .collect()
  }

  /// How many distinct producers must release `id` before it is emitted.
  /// `None` for nodes without producers.
  pub fn join_requirement(&self, id: Id) -> Option<u32> {
    self.topology.joins.get(&id).copied()
  }

  /// Starts walking all roots at once.
  ///
  /// Every item must be [closed](crate::WalkData::close) for its descendants
  /// to proceed. Must be called from within a tokio runtime.
  pub fn walk(&self) -> WalkStream {
    walk::start(
      &self.topology.roots,
      &self.topology.members,
      &self.topology.joins,
      self.total(),
      self.config.channel_capacity,
    )
  }
}

impl fmt::Debug for Walker {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("Walker")
      .field("start", &self.start.id())
      .field(
        "roots",
        &self.topology.roots.iter().map(|l| l.id()).collect::<Vec<_>>(),
      )
      .field("total", &self.total())
      .field("config", &self.config)
      .finish()
  }
}
