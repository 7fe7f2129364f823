//! Node types for the diagram editing core.

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Unique identifier for a node on the canvas.
///
/// Wraps a UUID and implements `Ord` for deterministic ordering.
/// The id is assigned at creation and never changes for the lifetime
/// of the node, across moves, layout runs, and undo/redo replay.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct NodeId(Uuid);

impl NodeId {
    /// Create a NodeId from a UUID.
    pub fn new(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Generate a fresh random NodeId.
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }

    /// Parse a NodeId from a UUID string.
    pub fn parse(s: &str) -> Result<Self, uuid::Error> {
        Ok(Self(Uuid::parse_str(s)?))
    }

    /// Get the inner UUID.
    pub fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<Uuid> for NodeId {
    fn from(uuid: Uuid) -> Self {
        Self(uuid)
    }
}

/// Kind of variable a node represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeKind {
    /// Latent (unobserved) variable, drawn as an ellipse.
    Latent,
    /// Observed (measured) variable, drawn as a rectangle.
    Observed,
}

impl NodeKind {
    /// Parse node kind from string.
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "latent" => Some(Self::Latent),
            "observed" => Some(Self::Observed),
            _ => None,
        }
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Latent => write!(f, "latent"),
            Self::Observed => write!(f, "observed"),
        }
    }
}

/// A variable node on the canvas.
///
/// Position (`x`, `y`) is the top-left corner of the node's shape in
/// canvas coordinates. Position is the only attribute mutated in place;
/// everything else changes only through wholesale graph replacement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    /// Immutable unique identity.
    pub id: NodeId,
    /// User-visible label.
    pub label: String,
    /// Latent or observed.
    pub kind: NodeKind,
    /// Canvas x coordinate (top-left).
    pub x: f64,
    /// Canvas y coordinate (top-left).
    pub y: f64,
}

impl Node {
    /// Create a node with an explicit id and position.
    pub fn new(id: NodeId, label: impl Into<String>, kind: NodeKind, x: f64, y: f64) -> Self {
        Self {
            id,
            label: label.into(),
            kind,
            x,
            y,
        }
    }

    /// Node with this position.
    pub fn at(mut self, x: f64, y: f64) -> Self {
        self.x = x;
        self.y = y;
        self
    }
}
