//! In-memory saved-model store.
//!
//! Backed by a raw string mapping, mimicking the key-value stores this
//! core is deployed against. The whole model list serializes to one JSON
//! document under the namespace key, so the corrupt-state recovery path
//! is exercised the same way it would be against a real backend.

use std::collections::BTreeMap;

use chrono::Utc;

use crate::types::{Link, Node};

use super::{SavedId, SavedModel, SnapshotStore, STORE_NAMESPACE};

/// Error type for the in-memory store.
#[derive(Debug, thiserror::Error)]
pub enum MemoryStoreError {
    /// A model list failed to serialize.
    #[error("failed to serialize saved-model list: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// In-memory saved-model store.
///
/// Uses a BTreeMap keyed by namespace for deterministic iteration.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    backend: BTreeMap<String, String>,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Overwrite the raw persisted document.
    ///
    /// Exists so the corrupt-state recovery path can be driven directly;
    /// also how a real backend would hand its bytes to this store.
    pub fn put_raw(&mut self, raw: impl Into<String>) {
        self.backend.insert(STORE_NAMESPACE.to_string(), raw.into());
    }

    /// The raw persisted document, if any.
    pub fn raw(&self) -> Option<&str> {
        self.backend.get(STORE_NAMESPACE).map(String::as_str)
    }

    fn read_list(&self) -> Vec<SavedModel> {
        let Some(raw) = self.backend.get(STORE_NAMESPACE) else {
            return Vec::new();
        };
        match serde_json::from_str(raw) {
            Ok(list) => list,
            Err(e) => {
                tracing::warn!(error = %e, "unparsable saved-model list, falling back to empty");
                Vec::new()
            }
        }
    }

    fn write_list(&mut self, list: &[SavedModel]) -> Result<(), MemoryStoreError> {
        let raw = serde_json::to_string(list)?;
        self.backend.insert(STORE_NAMESPACE.to_string(), raw);
        Ok(())
    }
}

impl SnapshotStore for MemoryStore {
    type Error = MemoryStoreError;

    fn list(&self) -> Result<Vec<SavedModel>, Self::Error> {
        Ok(self.read_list())
    }

    fn save(&mut self, name: &str, nodes: &[Node], links: &[Link]) -> Result<SavedId, Self::Error> {
        let mut list = self.read_list();
        let id = SavedId::generate();
        list.push(SavedModel {
            id,
            name: name.to_string(),
            saved_at: Utc::now(),
            nodes: nodes.to_vec(),
            links: links.to_vec(),
        });
        self.write_list(&list)?;
        tracing::debug!(%id, name, "saved model");
        Ok(id)
    }

    fn delete(&mut self, id: SavedId) -> Result<(), Self::Error> {
        let mut list = self.read_list();
        let before = list.len();
        list.retain(|m| m.id != id);
        if list.len() != before {
            self.write_list(&list)?;
        }
        Ok(())
    }
}
