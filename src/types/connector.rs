//! Named, directional attachment points of a linker.

use std::fmt;
use std::sync::{Arc, Weak};

use parking_lot::RwLock;
use serde::{Deserialize, Serialize};

use super::Linker;
use crate::error::{GraphError, Result};

/// Name of the connector every linker starts with on its input side.
pub const INPUT_NAME: &str = "input";
/// Name of the connector every linker starts with on its output side.
pub const OUTPUT_NAME: &str = "output";

/// Direction of a connector relative to its linker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConnectorType {
  Input,
  Output,
}

impl ConnectorType {
  pub fn opposite(self) -> Self {
    match self {
      ConnectorType::Input => ConnectorType::Output,
      ConnectorType::Output => ConnectorType::Input,
    }
  }

  /// Name of the connector a linker creates for this direction.
  pub fn default_name(self) -> &'static str {
    match self {
      ConnectorType::Input => INPUT_NAME,
      ConnectorType::Output => OUTPUT_NAME,
    }
  }
}

impl fmt::Display for ConnectorType {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      ConnectorType::Input => write!(f, "input"),
      ConnectorType::Output => write!(f, "output"),
    }
  }
}

/// The far end of a link. Held weakly: the graph's owners keep linkers alive.
#[derive(Clone)]
pub(crate) struct Target {
  linker: Weak<Linker>,
  connector: Weak<Connector>,
}

impl Target {
  pub(crate) fn peer(&self) -> Option<(Arc<Linker>, Arc<Connector>)> {
    Some((self.linker.upgrade()?, self.connector.upgrade()?))
  }

  fn points_to(&self, connector: &Connector) -> bool {
    std::ptr::eq(self.connector.as_ptr(), connector)
  }
}

/// An input or output point through which at most one link passes.
///
/// [`Connector::connect`] and [`Connector::disconnect`] only touch this side
/// of a link; [`Linker`] keeps both sides consistent.
pub struct Connector {
  name: String,
  kind: ConnectorType,
  target: RwLock<Option<Target>>,
}

impl Connector {
  pub fn new(kind: ConnectorType, name: impl Into<String>) -> Arc<Self> {
    Arc::new(Self {
      name: name.into(),
      kind,
      target: RwLock::new(None),
    })
  }

  pub fn input(name: impl Into<String>) -> Arc<Self> {
    Self::new(ConnectorType::Input, name)
  }

  pub fn output(name: impl Into<String>) -> Arc<Self> {
    Self::new(ConnectorType::Output, name)
  }

  pub fn name(&self) -> &str {
    &self.name
  }

  pub fn kind(&self) -> ConnectorType {
    self.kind
  }

  /// The linker and connector on the other end, if linked and still alive.
  pub fn target(&self) -> Option<(Arc<Linker>, Arc<Connector>)> {
    self.target.read().as_ref().and_then(Target::peer)
  }

  pub fn is_connected(&self) -> bool {
    self.target().is_some()
  }

  /// Records `connector` on `linker` as this connector's peer.
  pub fn connect(&self, linker: &Arc<Linker>, connector: Option<&Arc<Connector>>) -> Result<()> {
    let connector = connector.ok_or(GraphError::InvalidConnector)?;
    if connector.kind() == self.kind {
      return Err(GraphError::SameConnectorType);
    }
    *self.target.write() = Some(Target {
      linker: Arc::downgrade(linker),
      connector: Arc::downgrade(connector),
    });
    Ok(())
  }

  pub fn disconnect(&self) {
    self.target.write().take();
  }

  pub(crate) fn raw_target(&self) -> Option<Target> {
    self.target.read().clone()
  }

  pub(crate) fn restore_target(&self, target: Option<Target>) {
    *self.target.write() = target;
  }

  /// Clears this side only if it still points at `peer`.
  pub(crate) fn disconnect_from(&self, peer: &Connector) {
    let mut target = self.target.write();
    if target.as_ref().is_some_and(|t| t.points_to(peer)) {
      target.take();
    }
  }
}

impl fmt::Debug for Connector {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let target = self
      .target()
      .map(|(linker, connector)| format!("{}:{}", linker.id(), connector.name()));
    f.debug_struct("Connector")
      .field("name", &self.name)
      .field("kind", &self.kind)
      .field("target", &target)
      .finish()
  }
}
