//! # streamweave-walker
//!
//! Multi-port dataflow graphs and a concurrent walker that visits every node
//! once, in dependency order.
//!
//! ## Architecture
//!
//! - [`types`]: node identity, connectors and the [`Linker`] that ties a node
//!   to its named inputs and outputs.
//! - [`walker`]: root discovery and the concurrent walk. Items arrive on a
//!   [`WalkStream`]; each must be [closed](WalkData::close) before the nodes
//!   depending on it are emitted.
//! - [`Walker::run`] drives a walk through nodes implementing [`Processable`].

pub mod config;
#[cfg(test)]
mod config_test;
pub mod error;
pub mod types;
pub mod visitor;
pub mod walk_data;
pub mod walker;

pub use config::WalkerConfig;
pub use error::{GraphError, ProcessError, Result};
pub use types::{
  BaseNode, Connector, ConnectorType, INPUT_NAME, Id, IdAllocator, Linker, Node, OUTPUT_NAME,
  Processable,
};
pub use visitor::Visitor;
pub use walk_data::{Parent, WalkData};
pub use walker::{WalkStream, Walker};
