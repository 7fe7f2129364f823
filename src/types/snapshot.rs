//! Whole-graph snapshots for the history stack.

use serde::{Deserialize, Serialize};

use super::link::Link;
use super::node::Node;

/// An immutable deep copy of the graph at a point in time.
///
/// Snapshots are owned exclusively by the history stack and are never
/// aliased with the live graph; restoring one clones its contents back
/// out. Equality is structural (deep value equality over nodes and
/// links), which is what history deduplication keys on.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphSnapshot {
    nodes: Vec<Node>,
    links: Vec<Link>,
}

impl GraphSnapshot {
    /// Capture a snapshot from node and link slices.
    pub fn capture(nodes: &[Node], links: &[Link]) -> Self {
        Self {
            nodes: nodes.to_vec(),
            links: links.to_vec(),
        }
    }

    /// The captured nodes.
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    /// The captured links.
    pub fn links(&self) -> &[Link] {
        &self.links
    }

    /// Consume the snapshot, yielding owned node and link sequences.
    pub fn into_parts(self) -> (Vec<Node>, Vec<Link>) {
        (self.nodes, self.links)
    }
}
