//! Concurrency-safe record of visited nodes.

use std::collections::HashSet;

use parking_lot::RwLock;

use crate::types::{Id, Node};

/// Append-only set of visited node ids.
#[derive(Debug, Default)]
pub struct Visitor {
  visited: RwLock<HashSet<Id>>,
}

impl Visitor {
  pub fn new() -> Self {
    Self::default()
  }

  /// Marks `node` as visited. Returns `false` if it already was, so exactly one
  /// of several racing callers gets `true`.
  pub fn add(&self, node: &dyn Node) -> bool {
    self.add_id(node.id())
  }

  pub fn add_id(&self, id: Id) -> bool {
    self.visited.write().insert(id)
  }

  pub fn visited(&self, node: &dyn Node) -> bool {
    self.visited_id(node.id())
  }

  pub fn visited_id(&self, id: Id) -> bool {
    self.visited.read().contains(&id)
  }

  pub fn len(&self) -> usize {
    self.visited.read().len()
  }

  pub fn is_empty(&self) -> bool {
    self.len() == 0
  }
}
