//! Node identity and the optional processing capability.
//!
//! A node only knows its [`Id`]. Payload types wrap a [`BaseNode`] (or carry
//! their own id) and implement [`Node`]; the ones that do work during a walk
//! also implement [`Processable`] and advertise it through
//! [`Node::as_processable`].

use std::any::Any;
use std::fmt;

use async_trait::async_trait;

use super::{Id, IdAllocator};
use crate::error::ProcessError;
use crate::walk_data::WalkData;

/// A unit of work within a graph.
pub trait Node: Any + Send + Sync + fmt::Debug {
  fn id(&self) -> Id;

  /// Access to the concrete payload type, for downcasting.
  fn as_any(&self) -> &dyn Any;

  /// Capability query: `Some` when the node knows how to process walk items.
  fn as_processable(&self) -> Option<&dyn Processable> {
    None
  }
}

/// Work a node performs when the walker reaches it.
///
/// The driver releases the item once `process` returns, whatever the outcome.
#[async_trait]
pub trait Processable: Send + Sync {
  async fn process(&self, data: &WalkData) -> Result<(), ProcessError>;
}

/// Identity-only node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BaseNode {
  id: Id,
}

impl BaseNode {
  /// Creates a node with the next id from the global allocator.
  pub fn new() -> Self {
    Self::with_allocator(IdAllocator::global())
  }

  pub fn with_allocator(ids: &IdAllocator) -> Self {
    Self { id: ids.next_id() }
  }

  pub fn with_id(id: Id) -> Self {
    Self { id }
  }
}

impl Default for BaseNode {
  fn default() -> Self {
    Self::new()
  }
}

impl Node for BaseNode {
  fn id(&self) -> Id {
    self.id
  }

  fn as_any(&self) -> &dyn Any {
    self
  }
}
