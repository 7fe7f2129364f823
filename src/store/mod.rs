//! Saved-model storage backends.
//!
//! The core only requires that save/list/delete/load move `(nodes, links)`
//! pairs in and out of a durable mapping keyed by id under a fixed
//! namespace; the storage medium is a collaborator's concern.

pub mod memory;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

use crate::types::{Link, Node};

/// Namespace key prefix under which saved models live.
pub const STORE_NAMESPACE: &str = "sem_canvas/models";

/// Identifier of a saved model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct SavedId(Uuid);

impl SavedId {
    /// Generate a fresh id.
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }

    /// Parse from a UUID string.
    pub fn parse(s: &str) -> Result<Self, uuid::Error> {
        Ok(Self(Uuid::parse_str(s)?))
    }
}

impl fmt::Display for SavedId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One named, timestamped saved model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavedModel {
    /// Store-assigned identity.
    pub id: SavedId,
    /// User-chosen name.
    pub name: String,
    /// When the model was saved.
    pub saved_at: DateTime<Utc>,
    /// Saved nodes.
    pub nodes: Vec<Node>,
    /// Saved links.
    pub links: Vec<Link>,
}

/// Trait for saved-model storage backends.
///
/// Implementations must keep listing order stable (newest last) and must
/// recover from corrupt persisted state by treating it as empty rather
/// than failing the editor.
pub trait SnapshotStore {
    /// Error type for store operations.
    type Error: std::error::Error;

    /// All saved models, oldest first.
    fn list(&self) -> Result<Vec<SavedModel>, Self::Error>;

    /// Persist `(nodes, links)` under `name`, returning the new id.
    fn save(&mut self, name: &str, nodes: &[Node], links: &[Link]) -> Result<SavedId, Self::Error>;

    /// Fetch one saved model by id.
    fn load(&self, id: SavedId) -> Result<Option<SavedModel>, Self::Error> {
        Ok(self.list()?.into_iter().find(|m| m.id == id))
    }

    /// Delete a saved model. No-op on unknown id.
    fn delete(&mut self, id: SavedId) -> Result<(), Self::Error>;
}

pub use memory::MemoryStore;
