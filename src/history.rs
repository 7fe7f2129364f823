//! Bounded, deduplicating undo/redo history.
//!
//! The stack holds whole-graph snapshots and a cursor. A fresh edit
//! recorded while the cursor sits before the end discards the redo tail
//! (standard branching-history discard). The stack is bounded at
//! [`HISTORY_LIMIT`] entries; the oldest entry is evicted first.

use crate::graph::Graph;
use crate::types::GraphSnapshot;

/// Maximum number of snapshots the history stack retains.
pub const HISTORY_LIMIT: usize = 20;

/// Where a graph mutation originated.
///
/// Passed through the session's commit path so that applying an
/// undo/redo result back into the graph cannot re-enter [`History::record`]
/// and corrupt the stack. An explicit parameter instead of a shared
/// mutable flag: the replay origin is consumed exactly where it is
/// introduced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditOrigin {
    /// A fresh edit by the user; must be offered to history.
    UserEdit,
    /// Replay of a stored snapshot (undo/redo); must skip recording.
    HistoryReplay,
}

/// Bounded snapshot stack with undo/redo and structural deduplication.
#[derive(Debug, Clone, Default)]
pub struct History {
    entries: Vec<GraphSnapshot>,
    cursor: usize,
}

impl History {
    /// Create an empty history.
    pub fn new() -> Self {
        Self::default()
    }

    /// Reset to a single-entry stack containing exactly `snapshot`.
    ///
    /// Used at session start (so the first undo has a baseline), and when
    /// loading a saved model or starting a new one; prior entries are
    /// discarded entirely, so a load is not undoable past the load
    /// boundary.
    pub fn seed(&mut self, snapshot: GraphSnapshot) {
        self.entries = vec![snapshot];
        self.cursor = 0;
    }

    /// Offer the current graph state to the stack.
    ///
    /// No-op when the state is structurally identical to the latest
    /// stored snapshot, so gestures that end where they began (a drag
    /// back to the same spot) do not pollute history.
    pub fn record(&mut self, graph: &Graph) {
        let snapshot = graph.snapshot();
        if self.entries.last() == Some(&snapshot) {
            return;
        }
        // Invalidate the redo tail, then append.
        self.entries.truncate(self.cursor + 1);
        self.entries.push(snapshot);
        if self.entries.len() > HISTORY_LIMIT {
            self.entries.remove(0);
            tracing::debug!(len = self.entries.len(), "history full, evicted oldest snapshot");
        }
        self.cursor = self.entries.len() - 1;
    }

    /// Step back one entry.
    ///
    /// Returns the snapshot to apply as a full replacement, or `None`
    /// when already at the oldest entry.
    pub fn undo(&mut self) -> Option<GraphSnapshot> {
        if self.cursor == 0 {
            return None;
        }
        self.cursor -= 1;
        tracing::debug!(cursor = self.cursor, "undo");
        Some(self.entries[self.cursor].clone())
    }

    /// Step forward one entry.
    ///
    /// Returns the snapshot to apply, or `None` when already at the
    /// newest entry.
    pub fn redo(&mut self) -> Option<GraphSnapshot> {
        if self.cursor + 1 >= self.entries.len() {
            return None;
        }
        self.cursor += 1;
        tracing::debug!(cursor = self.cursor, "redo");
        Some(self.entries[self.cursor].clone())
    }

    /// Number of stored snapshots.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when no snapshots are stored.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// True when an undo step is available.
    pub fn can_undo(&self) -> bool {
        self.cursor > 0
    }

    /// True when a redo step is available.
    pub fn can_redo(&self) -> bool {
        self.cursor + 1 < self.entries.len()
    }
}
