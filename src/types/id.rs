//! Node identifiers and the allocator that hands them out.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

use serde::{Deserialize, Serialize};

/// Opaque identifier of a node, unique among the nodes of one allocator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Id(u64);

impl Id {
  pub const fn new(raw: u64) -> Self {
    Self(raw)
  }

  pub const fn get(self) -> u64 {
    self.0
  }
}

impl fmt::Display for Id {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.0)
  }
}

/// Monotonic id source. Wraps around to zero after `u64::MAX`.
///
/// Owned by whoever builds nodes; [`IdAllocator::global`] backs the
/// convenience constructors that do not take one.
#[derive(Debug, Default)]
pub struct IdAllocator {
  next: AtomicU64,
}

static GLOBAL: IdAllocator = IdAllocator::new();

impl IdAllocator {
  pub const fn new() -> Self {
    Self::starting_at(0)
  }

  pub const fn starting_at(first: u64) -> Self {
    Self {
      next: AtomicU64::new(first),
    }
  }

  /// The process-wide allocator.
  pub fn global() -> &'static IdAllocator {
    &GLOBAL
  }

  pub fn next_id(&self) -> Id {
    Id(self.next.fetch_add(1, Ordering::Relaxed))
  }

  /// Restarts the sequence at zero. Ids handed out before the reset may repeat.
  pub fn reset(&self) {
    self.next.store(0, Ordering::Relaxed);
  }
}
