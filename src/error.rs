//! Errors returned by graph wiring, walker configuration and the processing driver.

use thiserror::Error;

use crate::types::{ConnectorType, Id};

/// Failure reported by a node's [`Processable`](crate::types::Processable) capability.
pub type ProcessError = Box<dyn std::error::Error + Send + Sync>;

/// Crate-wide error type.
#[derive(Debug, Error)]
pub enum GraphError {
  /// A connector was missing, or could not be resolved on its linker.
  #[error("the given connector is invalid")]
  InvalidConnector,

  /// Both ends of a link have the same direction.
  #[error("two connectors of the same type cannot be linked together")]
  SameConnectorType,

  /// A linker already has a connector with this name in this direction.
  #[error("{kind} connector '{name}' already exists")]
  DuplicateConnector { name: String, kind: ConnectorType },

  /// The walker configuration document could not be parsed.
  #[error("invalid walker configuration: {0}")]
  Config(#[from] serde_json::Error),

  /// A node failed while being processed by [`Walker::run`](crate::Walker::run).
  #[error("processing node {node} failed: {source}")]
  Process {
    node: Id,
    #[source]
    source: ProcessError,
  },

  /// A processing task panicked or was cancelled.
  #[error("processing task failed: {0}")]
  Task(#[from] tokio::task::JoinError),
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, GraphError>;
