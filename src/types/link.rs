//! Link types for the diagram editing core.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::node::NodeId;

/// Kind of relationship a link represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LinkKind {
    /// Directed path (regression), source -> target.
    Directed,
    /// Covariance, symmetric between the two endpoints.
    Covariance,
}

impl LinkKind {
    /// Parse link kind from string.
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "directed" => Some(Self::Directed),
            "covariance" => Some(Self::Covariance),
            _ => None,
        }
    }
}

impl Default for LinkKind {
    fn default() -> Self {
        Self::Directed
    }
}

impl fmt::Display for LinkKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Directed => write!(f, "directed"),
            Self::Covariance => write!(f, "covariance"),
        }
    }
}

/// A relationship between two nodes.
///
/// Links carry no independent identity; they are addressed positionally
/// within the graph's link sequence. Covariance links are stored exactly
/// as drawn (no endpoint canonicalization); symmetry is handled at
/// comparison time by [`Link::connects`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Link {
    /// Source node id.
    pub source: NodeId,
    /// Target node id.
    pub target: NodeId,
    /// Directed or covariance.
    pub kind: LinkKind,
}

impl Link {
    /// Create a new link.
    pub fn new(source: NodeId, target: NodeId, kind: LinkKind) -> Self {
        Self {
            source,
            target,
            kind,
        }
    }

    /// Directed link, source -> target.
    pub fn directed(source: NodeId, target: NodeId) -> Self {
        Self::new(source, target, LinkKind::Directed)
    }

    /// Covariance link between two nodes.
    pub fn covariance(a: NodeId, b: NodeId) -> Self {
        Self::new(a, b, LinkKind::Covariance)
    }

    /// True if either endpoint is `id`.
    pub fn touches(&self, id: NodeId) -> bool {
        self.source == id || self.target == id
    }

    /// True if this link joins `a` and `b`, in either direction.
    pub fn connects(&self, a: NodeId, b: NodeId) -> bool {
        (self.source == a && self.target == b) || (self.source == b && self.target == a)
    }

    /// Given the endpoint `id`, the node at the other end.
    ///
    /// Returns `None` when `id` is not an endpoint of this link.
    pub fn other_end(&self, id: NodeId) -> Option<NodeId> {
        if self.source == id {
            Some(self.target)
        } else if self.target == id {
            Some(self.source)
        } else {
            None
        }
    }

    /// Duplicate-edge rule: would adding a link (`source`, `target`, `kind`)
    /// collide with this existing link?
    ///
    /// A directed addition collides with any existing link on the same
    /// ordered pair. A covariance addition is symmetric and collides with
    /// any existing link on the pair in either direction.
    pub fn blocks(&self, source: NodeId, target: NodeId, kind: LinkKind) -> bool {
        match kind {
            LinkKind::Directed => self.source == source && self.target == target,
            LinkKind::Covariance => self.connects(source, target),
        }
    }
}
