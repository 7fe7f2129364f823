//! Core types for the diagram editing core.

pub mod link;
pub mod node;
pub mod snapshot;

pub use link::{Link, LinkKind};
pub use node::{Node, NodeId, NodeKind};
pub use snapshot::GraphSnapshot;
