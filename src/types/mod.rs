//! Graph primitives: identifiers, nodes, connectors and linkers.
//!
//! Graphs are assembled by creating [`Linker`]s and wiring their
//! [`Connector`]s with [`Linker::connect`] / [`Linker::link`].

mod connector;
#[cfg(test)]
mod connector_test;
mod id;
mod linker;
#[cfg(test)]
mod linker_test;
mod node;

pub use connector::{Connector, ConnectorType, INPUT_NAME, OUTPUT_NAME};
pub use id::{Id, IdAllocator};
pub use linker::Linker;
pub use node::{BaseNode, Node, Processable};
