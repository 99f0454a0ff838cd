//! Root discovery: find every root of the component around a start linker,
//! count its nodes and the producers each node must wait for.
//!
//! A single pass over a work stack, keyed by one [`Visitor`]:
//!
//! - forward steps follow output links and discover consumers;
//! - backtrack steps follow input links of nodes that may join several
//!   branches, discovering producers a forward-only pass from the start would
//!   never reach. A backtracked node with no producer at all is a root.
//!
//! Every discovered node is also stepped forward, so branches hanging off a
//! recovered producer are counted too.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use tracing::{debug, instrument, trace};

use crate::types::{ConnectorType, Id, Linker};
use crate::visitor::Visitor;

/// Shape of a component as seen from one start linker.
#[derive(Debug)]
pub(crate) struct Topology {
  /// Start first, then recovered roots in discovery order.
  pub(crate) roots: Vec<Arc<Linker>>,
  /// Every discovered linker, start first.
  pub(crate) members: Vec<Arc<Linker>>,
  /// Distinct producers per consumer, for consumers that have any.
  pub(crate) joins: HashMap<Id, u32>,
}

enum Step {
  Forward(Arc<Linker>),
  Backtrack(Arc<Linker>),
}

struct Discovery {
  visitor: Visitor,
  edges: HashSet<(Id, Id)>,
  topology: Topology,
  pending: Vec<Step>,
}

impl Discovery {
  /// Records a linker the first time it is seen.
  fn discover(&mut self, linker: &Arc<Linker>) -> bool {
    if !self.visitor.add(linker.node().as_ref()) {
      return false;
    }
    self.topology.members.push(linker.clone());
    true
  }

  /// Counts `producer -> consumer` once, however often it is observed.
  fn record_edge(&mut self, producer: Id, consumer: Id) {
    if self.edges.insert((producer, consumer)) {
      *self.topology.joins.entry(consumer).or_default() += 1;
    }
  }

  fn forward(&mut self, linker: &Arc<Linker>) {
    for consumer in linker.consumers() {
      self.record_edge(linker.id(), consumer.id());
      if !self.discover(&consumer) {
        continue;
      }
      trace!(node = %consumer.id(), from = %linker.id(), "discovered consumer");
      if consumer.connectors(ConnectorType::Input).len() > 1 {
        self.pending.push(Step::Backtrack(consumer.clone()));
      }
      self.pending.push(Step::Forward(consumer));
    }
  }

  fn backtrack(&mut self, linker: &Arc<Linker>) {
    let mut producers = 0;
    for input in linker.connectors(ConnectorType::Input) {
      let Some((producer, _)) = input.target() else {
        continue;
      };
      producers += 1;
      self.record_edge(producer.id(), linker.id());
      if !self.discover(&producer) {
        continue;
      }
      trace!(node = %producer.id(), to = %linker.id(), "discovered producer");
      self.pending.push(Step::Backtrack(producer.clone()));
      self.pending.push(Step::Forward(producer));
    }
    if producers == 0 {
      debug!(node = %linker.id(), "recovered root");
      self.topology.roots.push(linker.clone());
    }
  }
}

/// Discovers the component reachable from `start`. `start` is always a root;
/// its own producers only count if a join elsewhere leads back to them.
///
/// A recovered producer becomes a root only when it has no live producer at
/// all. A producer whose own inputs were already visited is not a root, so a
/// diamond reached from its apex reports the apex alone.
#[instrument(level = "trace", skip_all, fields(start = %start.id()))]
pub(crate) fn discover(start: &Arc<Linker>) -> Topology {
  let mut discovery = Discovery {
    visitor: Visitor::new(),
    edges: HashSet::new(),
    topology: Topology {
      roots: vec![start.clone()],
      members: Vec::new(),
      joins: HashMap::new(),
    },
    pending: vec![Step::Forward(start.clone())],
  };
  discovery.discover(start);

  while let Some(step) = discovery.pending.pop() {
    match step {
      Step::Forward(linker) => discovery.forward(&linker),
      Step::Backtrack(linker) => discovery.backtrack(&linker),
    }
  }

  let topology = discovery.topology;
  debug!(
    roots = topology.roots.len(),
    total = topology.members.len(),
    joins = topology.joins.len(),
    "topology discovered"
  );
  topology
}
