//! Items delivered by a walk and the one-shot release that gates descendants.

use std::fmt;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};

use tokio::sync::oneshot;

use crate::types::{Connector, Id, Node};

/// One incoming link of a visited node.
#[derive(Debug, Clone)]
pub struct Parent {
  /// Name of the parent's output connector.
  pub from: String,
  /// Name of this node's input connector.
  pub to: String,
  /// The parent node.
  pub node: Arc<dyn Node>,
}

/// A node reached by the walker.
///
/// Descendants waiting on this node are held back until [`WalkData::close`]
/// is called. `close` consumes the item, so it can only happen once; an item
/// dropped without closing keeps its dependents blocked.
pub struct WalkData {
  pub node: Arc<dyn Node>,
  /// Incoming links, ordered by input connector name.
  pub parents: Vec<Parent>,
  release: Release,
}

impl WalkData {
  pub(crate) fn new(node: Arc<dyn Node>, inputs: &[Arc<Connector>], release: Release) -> Self {
    let parents = inputs
      .iter()
      .filter_map(|input| {
        let (linker, peer) = input.target()?;
        Some(Parent {
          from: peer.name().to_string(),
          to: input.name().to_string(),
          node: linker.node().clone(),
        })
      })
      .collect();
    Self {
      node,
      parents,
      release,
    }
  }

  /// An item nobody waits on, for exercising node payloads outside a walk.
  pub fn detached(node: Arc<dyn Node>) -> Self {
    let (release, _) = latch();
    Self {
      node,
      parents: Vec::new(),
      release,
    }
  }

  pub fn id(&self) -> Id {
    self.node.id()
  }

  /// The parent linked into the input connector named `to`.
  pub fn parent(&self, to: &str) -> Option<&Parent> {
    self.parents.iter().find(|p| p.to == to)
  }

  /// Signals that work on this node is complete; its descendants may proceed.
  pub fn close(self) {
    self.release.fire();
  }
}

impl fmt::Debug for WalkData {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("WalkData")
      .field("node", &self.node.id())
      .field("parents", &self.parents.iter().map(|p| p.node.id()).collect::<Vec<_>>())
      .finish()
  }
}

/// Firing side of a single-use latch.
pub(crate) struct Release(oneshot::Sender<()>);

impl Release {
  fn fire(self) {
    // The waiter is gone only when nobody depends on this item.
    let _ = self.0.send(());
  }
}

/// Waiting side of a single-use latch. Resolves to `true` when fired, `false`
/// when the firing side was dropped instead.
pub(crate) struct Released(oneshot::Receiver<()>);

impl Future for Released {
  type Output = bool;

  fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<bool> {
    Pin::new(&mut self.0).poll(cx).map(|r| r.is_ok())
  }
}

pub(crate) fn latch() -> (Release, Released) {
  let (tx, rx) = oneshot::channel();
  (Release(tx), Released(rx))
}
