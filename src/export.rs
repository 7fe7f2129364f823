//! Boundary traits toward the rendering-side collaborators.
//!
//! The diagram-notation exporter and the confirmation dialogs live
//! outside the editing core; the core only needs to notify the one and
//! ask the other. Both seams are traits so the core is testable without
//! any rendering environment.

use std::collections::HashMap;
use std::sync::Mutex;

use crate::types::{Link, Node, NodeId};

/// Produces a textual graph description for the read-only alternate view.
///
/// Node shapes are keyed by node kind and edges by link kind; directed
/// links get arrow notation, covariance links bidirectional notation.
/// Implemented outside the core.
pub trait DiagramExporter {
    /// Render `(nodes, links)` to the notation text.
    fn export(&self, nodes: &[Node], links: &[Link], dark_mode: bool) -> String;
}

/// Observer notified after every applied change to nodes or links.
///
/// Called once per settled state, never mid-gesture (link previews and
/// pointer movement do not notify).
pub trait ChangeListener {
    /// The graph has changed; `nodes` and `links` are the new state.
    fn graph_changed(&self, nodes: &[Node], links: &[Link]);
}

/// Listener that ignores all notifications.
#[derive(Debug, Default)]
pub struct NoOpListener;

impl ChangeListener for NoOpListener {
    fn graph_changed(&self, _nodes: &[Node], _links: &[Link]) {
        // No-op
    }
}

/// In-memory listener for tests: counts notifications and remembers the
/// shape of the last one.
#[derive(Debug, Default)]
pub struct RecordingListener {
    inner: Mutex<RecordedChanges>,
}

#[derive(Debug, Default, Clone)]
struct RecordedChanges {
    notifications: usize,
    last_node_count: usize,
    last_link_count: usize,
}

impl ChangeListener for RecordingListener {
    fn graph_changed(&self, nodes: &[Node], links: &[Link]) {
        let mut inner = self.inner.lock().unwrap();
        inner.notifications += 1;
        inner.last_node_count = nodes.len();
        inner.last_link_count = links.len();
    }
}

impl RecordingListener {
    /// Number of notifications received so far.
    pub fn notifications(&self) -> usize {
        self.inner.lock().unwrap().notifications
    }

    /// (node count, link count) of the most recent notification.
    pub fn last_counts(&self) -> (usize, usize) {
        let inner = self.inner.lock().unwrap();
        (inner.last_node_count, inner.last_link_count)
    }
}

/// A destructive or replacing action awaiting user confirmation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConfirmAction {
    /// Remove a node and its incident links.
    DeleteNode(NodeId),
    /// Remove a single link, by index.
    DeleteLink(usize),
    /// Delete a saved model from the store.
    DeleteSaved,
    /// Replace the canvas with a saved model.
    LoadModel,
    /// Discard the canvas and start empty.
    NewModel,
}

/// Asks the user to confirm a destructive action.
///
/// Declining is a normal cancellation path: the caller must leave all
/// state untouched.
pub trait ConfirmationPrompt {
    /// True to proceed, false to cancel.
    fn confirm(&self, action: ConfirmAction) -> bool;
}

/// Prompt that approves everything. Useful in tests and headless runs.
#[derive(Debug, Default)]
pub struct AlwaysConfirm;

impl ConfirmationPrompt for AlwaysConfirm {
    fn confirm(&self, _action: ConfirmAction) -> bool {
        true
    }
}

/// Prompt that declines everything.
#[derive(Debug, Default)]
pub struct AlwaysDecline;

impl ConfirmationPrompt for AlwaysDecline {
    fn confirm(&self, _action: ConfirmAction) -> bool {
        false
    }
}

/// Test prompt with a per-action answer table; unlisted actions are
/// approved and every request is tallied.
#[derive(Debug, Default)]
pub struct ScriptedPrompt {
    answers: HashMap<ConfirmAction, bool>,
    asked: Mutex<Vec<ConfirmAction>>,
}

impl ScriptedPrompt {
    /// Answer `action` with `approve` when asked.
    pub fn with_answer(mut self, action: ConfirmAction, approve: bool) -> Self {
        self.answers.insert(action, approve);
        self
    }

    /// Every action the core asked about, in order.
    pub fn asked(&self) -> Vec<ConfirmAction> {
        self.asked.lock().unwrap().clone()
    }
}

impl ConfirmationPrompt for ScriptedPrompt {
    fn confirm(&self, action: ConfirmAction) -> bool {
        self.asked.lock().unwrap().push(action);
        self.answers.get(&action).copied().unwrap_or(true)
    }
}
