//! A node wrapped with named input and output connectors.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use parking_lot::RwLock;
use tracing::{instrument, trace};

use super::connector::Target;
use super::{BaseNode, Connector, ConnectorType, INPUT_NAME, Id, IdAllocator, Node, OUTPUT_NAME};
use crate::error::{GraphError, Result};

type ConnectorMap = RwLock<BTreeMap<String, Arc<Connector>>>;

/// Couples a [`Node`] to its input and output connectors.
///
/// Every linker starts with one input connector named [`INPUT_NAME`] and one
/// output connector named [`OUTPUT_NAME`]. Linkers are always handed out as
/// `Arc<Linker>`; links between them are weak, so whoever builds the graph
/// owns it.
pub struct Linker {
  node: Arc<dyn Node>,
  inputs: ConnectorMap,
  outputs: ConnectorMap,
}

impl Linker {
  /// Creates a linker around a [`BaseNode`] from the global allocator.
  pub fn new() -> Arc<Self> {
    Self::with_node(Arc::new(BaseNode::new()))
  }

  pub fn with_allocator(ids: &IdAllocator) -> Arc<Self> {
    Self::with_node(Arc::new(BaseNode::with_allocator(ids)))
  }

  pub fn with_node(node: Arc<dyn Node>) -> Arc<Self> {
    let input = Connector::input(INPUT_NAME);
    let output = Connector::output(OUTPUT_NAME);
    Arc::new(Self {
      node,
      inputs: RwLock::new(BTreeMap::from([(INPUT_NAME.to_string(), input)])),
      outputs: RwLock::new(BTreeMap::from([(OUTPUT_NAME.to_string(), output)])),
    })
  }

  pub fn node(&self) -> &Arc<dyn Node> {
    &self.node
  }

  pub fn id(&self) -> Id {
    self.node.id()
  }

  fn map(&self, kind: ConnectorType) -> &ConnectorMap {
    match kind {
      ConnectorType::Input => &self.inputs,
      ConnectorType::Output => &self.outputs,
    }
  }

  /// Adds an extra connector. Names are unique per direction.
  pub fn add_connector(&self, connector: Arc<Connector>) -> Result<Arc<Connector>> {
    let mut map = self.map(connector.kind()).write();
    if map.contains_key(connector.name()) {
      return Err(GraphError::DuplicateConnector {
        name: connector.name().to_string(),
        kind: connector.kind(),
      });
    }
    map.insert(connector.name().to_string(), connector.clone());
    Ok(connector)
  }

  pub fn add_input(&self, name: impl Into<String>) -> Result<Arc<Connector>> {
    self.add_connector(Connector::input(name))
  }

  pub fn add_output(&self, name: impl Into<String>) -> Result<Arc<Connector>> {
    self.add_connector(Connector::output(name))
  }

  pub fn connector(&self, name: &str, kind: ConnectorType) -> Option<Arc<Connector>> {
    self.map(kind).read().get(name).cloned()
  }

  pub fn input(&self, name: &str) -> Option<Arc<Connector>> {
    self.connector(name, ConnectorType::Input)
  }

  pub fn output(&self, name: &str) -> Option<Arc<Connector>> {
    self.connector(name, ConnectorType::Output)
  }

  /// All connectors of one direction, ordered by name.
  pub fn connectors(&self, kind: ConnectorType) -> Vec<Arc<Connector>> {
    self.map(kind).read().values().cloned().collect()
  }

  /// Linkers reached through live output links, in connector order.
  pub fn consumers(&self) -> Vec<Arc<Linker>> {
    self
      .connectors(ConnectorType::Output)
      .iter()
      .filter_map(|c| c.target())
      .map(|(linker, _)| linker)
      .collect()
  }

  /// Links `source` on this linker to `sink` on `target`.
  ///
  /// Both connectors are looked up again by name and type, so stale handles
  /// resolve to the connectors the linkers currently own. Either both sides
  /// are linked or neither changes. Links the two connectors held before are
  /// torn down on their far ends.
  #[instrument(level = "trace", skip_all, fields(source = %self.id(), sink = %target.id()))]
  pub fn connect(
    self: &Arc<Self>,
    target: &Arc<Linker>,
    source: &Connector,
    sink: &Connector,
  ) -> Result<()> {
    let source = self
      .connector(source.name(), source.kind())
      .ok_or(GraphError::InvalidConnector)?;
    let sink = target
      .connector(sink.name(), sink.kind())
      .ok_or(GraphError::InvalidConnector)?;

    let source_before = source.raw_target();
    let sink_before = sink.raw_target();

    source.connect(target, Some(&sink))?;
    if let Err(err) = sink.connect(self, Some(&source)) {
      source.restore_target(source_before);
      return Err(err);
    }

    detach_stale(source_before, &source, &sink);
    detach_stale(sink_before, &sink, &source);
    trace!(from = source.name(), to = sink.name(), "connected");
    Ok(())
  }

  /// Breaks the link held by `source`, on both ends. No-op when unlinked.
  #[instrument(level = "trace", skip_all, fields(linker = %self.id(), connector = source.name()))]
  pub fn disconnect(&self, source: &Connector) {
    if let Some((_, peer)) = source.target() {
      peer.disconnect_from(source);
    }
    source.disconnect();
  }

  /// Connects the default output to `target`'s default input.
  pub fn link(self: &Arc<Self>, target: &Arc<Linker>) -> Result<()> {
    let source = self
      .output(OUTPUT_NAME)
      .ok_or(GraphError::InvalidConnector)?;
    let sink = target
      .input(INPUT_NAME)
      .ok_or(GraphError::InvalidConnector)?;
    self.connect(target, &source, &sink)
  }

  /// Disconnects whatever is linked to the default output.
  pub fn unlink(&self) {
    if let Some(output) = self.output(OUTPUT_NAME) {
      self.disconnect(&output);
    }
  }

  /// The peer reached through `source`, or through the default input when `None`.
  ///
  /// Only connectors owned by this linker are followed.
  pub fn connection(&self, source: Option<&Connector>) -> Option<(Arc<Linker>, Arc<Connector>)> {
    let owned = match source {
      Some(c) => self.connector(c.name(), c.kind())?,
      None => self.input(INPUT_NAME)?,
    };
    if let Some(c) = source
      && !std::ptr::eq(Arc::as_ptr(&owned), c)
    {
      return None;
    }
    owned.target()
  }
}

/// Clears the far side of a link `owner` held before it was relinked to `current`.
fn detach_stale(before: Option<Target>, owner: &Arc<Connector>, current: &Arc<Connector>) {
  if let Some((_, peer)) = before.and_then(|t| t.peer())
    && !Arc::ptr_eq(&peer, current)
  {
    peer.disconnect_from(owner);
  }
}

impl fmt::Debug for Linker {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let names = |kind: ConnectorType| {
      self
        .map(kind)
        .read()
        .keys()
        .cloned()
        .collect::<Vec<_>>()
    };
    f.debug_struct("Linker")
      .field("node", &self.node.id())
      .field("inputs", &names(ConnectorType::Input))
      .field("outputs", &names(ConnectorType::Output))
      .finish()
  }
}
