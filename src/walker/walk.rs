//! The concurrent walk: one task per traversed edge, join gates in front of
//! nodes with producers, and a closer that ends the stream after `total`
//! emissions.

use std::collections::{HashMap, HashSet};
use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};

use futures::Stream;
use futures::future::BoxFuture;
use parking_lot::Mutex;
use tokio::sync::mpsc;
use tokio_stream::wrappers::ReceiverStream;
use tracing::{debug, trace, warn};

use super::join::{self, JoinGate};
use crate::types::{ConnectorType, Id, Linker};
use crate::visitor::Visitor;
use crate::walk_data::{WalkData, latch};

/// Live stream of [`WalkData`], one item per node. Ends after
/// [`WalkStream::total`] items have been emitted.
pub struct WalkStream {
  inner: ReceiverStream<WalkData>,
  total: usize,
}

impl WalkStream {
  /// Number of items this stream will yield.
  pub fn total(&self) -> usize {
    self.total
  }

  pub async fn recv(&mut self) -> Option<WalkData> {
    self.inner.as_mut().recv().await
  }
}

impl Stream for WalkStream {
  type Item = WalkData;

  fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<WalkData>> {
    Pin::new(&mut self.inner).poll_next(cx)
  }
}

/// State shared by every task of one walk.
struct WalkContext {
  visitor: Visitor,
  /// Nodes discovered for this walk; links to anything else are not parents.
  members: HashSet<Id>,
  gates: HashMap<Id, Arc<JoinGate>>,
  /// Taken by the closer once `total` items went out; the stream ends when
  /// the last in-flight clone is dropped.
  output: Arc<Mutex<Option<mpsc::Sender<WalkData>>>>,
  emitted: mpsc::UnboundedSender<Id>,
}

impl WalkContext {
  fn sender(&self) -> Option<mpsc::Sender<WalkData>> {
    self.output.lock().clone()
  }
}

/// Starts a walk from `roots`. Must be called from within a tokio runtime.
pub(crate) fn start(
  roots: &[Arc<Linker>],
  members: &[Arc<Linker>],
  joins: &HashMap<Id, u32>,
  total: usize,
  capacity: usize,
) -> WalkStream {
  let (tx, rx) = mpsc::channel(capacity.max(1));
  let (emitted_tx, emitted_rx) = mpsc::unbounded_channel();
  let output = Arc::new(Mutex::new(Some(tx)));

  let ctx = Arc::new(WalkContext {
    visitor: Visitor::new(),
    members: members.iter().map(|l| l.id()).collect(),
    gates: join::gates(joins),
    output: output.clone(),
    emitted: emitted_tx,
  });

  for root in roots {
    tokio::spawn(visit(ctx.clone(), root.clone()));
  }
  tokio::spawn(close_after(output, emitted_rx, total));

  WalkStream {
    inner: ReceiverStream::new(rx),
    total,
  }
}

fn visit(ctx: Arc<WalkContext>, linker: Arc<Linker>) -> BoxFuture<'static, ()> {
  Box::pin(async move {
    let id = linker.id();
    if !ctx.visitor.add(linker.node().as_ref()) {
      trace!(node = %id, "already visited");
      return;
    }

    if let Some(gate) = ctx.gates.get(&id) {
      trace!(node = %id, "waiting for producers");
      gate.wait().await;
    }

    let Some(output) = ctx.sender() else {
      warn!(node = %id, "walk already complete; node was not part of the discovered topology");
      return;
    };
    let (release, released) = latch();
    let inbound: Vec<_> = linker
      .connectors(ConnectorType::Input)
      .into_iter()
      .filter(|input| {
        input
          .target()
          .is_some_and(|(producer, _)| ctx.members.contains(&producer.id()))
      })
      .collect();
    let data = WalkData::new(linker.node().clone(), &inbound, release);
    if output.send(data).await.is_err() {
      debug!(node = %id, "walk stream dropped");
      return;
    }
    drop(output);
    trace!(node = %id, "emitted");
    let _ = ctx.emitted.send(id);

    let consumers = linker.consumers();
    for consumer in &consumers {
      tokio::spawn(visit(ctx.clone(), consumer.clone()));
    }

    tokio::spawn(async move {
      if !released.await {
        warn!(node = %id, "walk item dropped without close; dependents stay blocked");
        return;
      }
      trace!(node = %id, "released");
      let mut seen = HashSet::new();
      for consumer in consumers {
        if seen.insert(consumer.id())
          && let Some(gate) = ctx.gates.get(&consumer.id())
        {
          gate.release();
        }
      }
    });
  })
}

async fn close_after(
  output: Arc<Mutex<Option<mpsc::Sender<WalkData>>>>,
  mut emitted: mpsc::UnboundedReceiver<Id>,
  total: usize,
) {
  let mut remaining = total;
  while remaining > 0 {
    if emitted.recv().await.is_none() {
      break;
    }
    remaining -= 1;
  }
  output.lock().take();
  debug!(total, "walk stream closed");
}
