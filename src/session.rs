//! One editor session: graph, history, and interaction state under a
//! single owner.
//!
//! Every user action runs to completion here; history capture is an
//! explicit commit step taken after a logical edit settles, tagged with
//! its origin so undo/redo replay never re-records itself.

use std::sync::Arc;

use crate::export::{ChangeListener, ConfirmAction, ConfirmationPrompt};
use crate::graph::Graph;
use crate::history::{EditOrigin, History};
use crate::interaction::{drop_to_top_left, InteractionState, Mode, Selection};
use crate::layout::layout;
use crate::store::{SavedId, SavedModel, SnapshotStore};
use crate::types::{GraphSnapshot, LinkKind, NodeId, NodeKind};

/// The editing core's session object.
///
/// Owns the live graph, the undo stack, and the transient interaction
/// state. There is exactly one writer; no ambient globals.
pub struct EditorSession {
    graph: Graph,
    history: History,
    interaction: InteractionState,
    listener: Option<Arc<dyn ChangeListener>>,
}

impl Default for EditorSession {
    fn default() -> Self {
        Self::new()
    }
}

impl EditorSession {
    /// Start a session with an empty canvas.
    pub fn new() -> Self {
        Self::with_graph(Graph::new())
    }

    /// Start a session over an existing graph.
    ///
    /// History is seeded with the initial state so the first undo has a
    /// baseline to return to.
    pub fn with_graph(graph: Graph) -> Self {
        let mut history = History::new();
        history.seed(graph.snapshot());
        Self {
            graph,
            history,
            interaction: InteractionState::new(),
            listener: None,
        }
    }

    /// Attach the change listener notified after every applied graph change.
    pub fn set_listener(&mut self, listener: Arc<dyn ChangeListener>) {
        self.listener = Some(listener);
    }

    /// The live graph.
    pub fn graph(&self) -> &Graph {
        &self.graph
    }

    /// The transient interaction state.
    pub fn interaction(&self) -> &InteractionState {
        &self.interaction
    }

    /// The undo stack.
    pub fn history(&self) -> &History {
        &self.history
    }

    /// Current selection.
    pub fn selection(&self) -> Selection {
        self.interaction.selection
    }

    // ── mode and link-kind switches ─────────────────────────────────────

    /// Switch editing mode. Leaving link mode cancels any pending link.
    pub fn set_mode(&mut self, mode: Mode) {
        self.interaction.set_mode(mode);
    }

    /// Choose the kind applied to the next completed link gesture.
    pub fn set_link_kind(&mut self, kind: LinkKind) {
        self.interaction.link_kind = kind;
    }

    // ── canvas events ───────────────────────────────────────────────────

    /// Add a node and commit.
    pub fn add_node(&mut self, label: impl Into<String>, kind: NodeKind) -> NodeId {
        let id = self.graph.add_node(label, kind);
        self.commit(EditOrigin::UserEdit);
        id
    }

    /// A node was clicked.
    ///
    /// In link mode this advances the two-click gesture: first click arms
    /// the pending source, re-clicking the source cancels, clicking a
    /// second node attempts the link once and clears the pending source
    /// whether or not the link was accepted. In move mode it selects the
    /// node.
    pub fn click_node(&mut self, id: NodeId) {
        if self.graph.node(id).is_none() {
            return;
        }
        match self.interaction.mode {
            Mode::Link => match self.interaction.pending_source {
                None => self.interaction.pending_source = Some(id),
                Some(source) if source == id => self.interaction.cancel_pending_link(),
                Some(source) => {
                    let added = self.graph.add_link(source, id, self.interaction.link_kind);
                    self.interaction.cancel_pending_link();
                    if added {
                        self.commit(EditOrigin::UserEdit);
                    }
                }
            },
            Mode::Move => self.interaction.selection = Selection::Node(id),
        }
    }

    /// A link was clicked (move mode); selects it by index.
    pub fn click_link(&mut self, index: usize) {
        if self.interaction.mode == Mode::Move && index < self.graph.links().len() {
            self.interaction.selection = Selection::Link(index);
        }
    }

    /// Empty canvas was clicked; clears any selection.
    pub fn click_canvas(&mut self) {
        self.interaction.clear_selection();
    }

    /// The pointer moved. Only feeds the link preview; never commits.
    pub fn pointer_moved(&mut self, x: f64, y: f64) {
        if self.interaction.pending_source.is_some() {
            self.interaction.preview = Some((x, y));
        }
    }

    /// A node drag finished at `(drop_x, drop_y)`.
    ///
    /// The drop point anchors the node's shape; the stored position is
    /// the resulting top-left corner.
    pub fn drop_node(&mut self, id: NodeId, drop_x: f64, drop_y: f64) {
        let Some(kind) = self.graph.node(id).map(|n| n.kind) else {
            return;
        };
        let (x, y) = drop_to_top_left(kind, drop_x, drop_y);
        self.graph.move_node(id, x, y);
        self.commit(EditOrigin::UserEdit);
    }

    /// Delete whatever is selected, after confirmation.
    ///
    /// A selected node takes its incident links with it. No-op when
    /// nothing is selected or the confirmation is declined.
    pub fn delete_selected(&mut self, prompt: &dyn ConfirmationPrompt) {
        match self.interaction.selection {
            Selection::Node(id) => {
                if !prompt.confirm(ConfirmAction::DeleteNode(id)) {
                    return;
                }
                self.graph.remove_node(id);
                self.interaction.clear_selection();
                self.commit(EditOrigin::UserEdit);
            }
            Selection::Link(index) => {
                if !prompt.confirm(ConfirmAction::DeleteLink(index)) {
                    return;
                }
                self.graph.remove_link_at(index);
                self.interaction.clear_selection();
                self.commit(EditOrigin::UserEdit);
            }
            Selection::None => {}
        }
    }

    // ── history ─────────────────────────────────────────────────────────

    /// Undo one step. Returns true when a snapshot was applied.
    pub fn undo(&mut self) -> bool {
        match self.history.undo() {
            Some(snapshot) => {
                self.apply_replay(snapshot);
                true
            }
            None => false,
        }
    }

    /// Redo one step. Returns true when a snapshot was applied.
    pub fn redo(&mut self) -> bool {
        match self.history.redo() {
            Some(snapshot) => {
                self.apply_replay(snapshot);
                true
            }
            None => false,
        }
    }

    fn apply_replay(&mut self, snapshot: GraphSnapshot) {
        self.graph.restore(snapshot);
        self.interaction.clear_selection();
        self.commit(EditOrigin::HistoryReplay);
    }

    // ── layout ──────────────────────────────────────────────────────────

    /// Run auto-layout over the current graph.
    ///
    /// The whole repositioning lands as one history entry.
    pub fn auto_layout(&mut self) {
        let nodes = layout(self.graph.nodes(), self.graph.links());
        let links = self.graph.links().to_vec();
        self.graph.restore(GraphSnapshot::capture(&nodes, &links));
        self.commit(EditOrigin::UserEdit);
    }

    // ── persistence boundary ────────────────────────────────────────────

    /// Save the current graph under `name`.
    pub fn save_model<S: SnapshotStore>(
        &self,
        store: &mut S,
        name: &str,
    ) -> Result<SavedId, S::Error> {
        store.save(name, self.graph.nodes(), self.graph.links())
    }

    /// Replace the canvas with a saved model, after confirmation.
    ///
    /// Resets history to the loaded state; the load boundary is not
    /// undoable. Returns true when the replacement happened.
    pub fn load_model(&mut self, model: SavedModel, prompt: &dyn ConfirmationPrompt) -> bool {
        if !prompt.confirm(ConfirmAction::LoadModel) {
            return false;
        }
        self.replace_graph(Graph::from_parts(model.nodes, model.links));
        true
    }

    /// Discard the canvas and start empty, after confirmation.
    pub fn new_model(&mut self, prompt: &dyn ConfirmationPrompt) -> bool {
        if !prompt.confirm(ConfirmAction::NewModel) {
            return false;
        }
        self.replace_graph(Graph::new());
        true
    }

    /// Delete a saved model from the store, after confirmation.
    pub fn delete_saved<S: SnapshotStore>(
        &self,
        store: &mut S,
        id: SavedId,
        prompt: &dyn ConfirmationPrompt,
    ) -> Result<bool, S::Error> {
        if !prompt.confirm(ConfirmAction::DeleteSaved) {
            return Ok(false);
        }
        store.delete(id)?;
        Ok(true)
    }

    fn replace_graph(&mut self, graph: Graph) {
        self.graph = graph;
        self.interaction.cancel_pending_link();
        self.interaction.clear_selection();
        self.history.seed(self.graph.snapshot());
        self.notify();
    }

    // ── commit path ─────────────────────────────────────────────────────

    /// Explicit history-capture step, taken once per settled logical edit.
    ///
    /// Replay-origin commits skip recording so undo/redo cannot corrupt
    /// the stack; both origins notify the exporter boundary.
    fn commit(&mut self, origin: EditOrigin) {
        if origin == EditOrigin::UserEdit {
            self.history.record(&self.graph);
        }
        self.notify();
    }

    fn notify(&self) {
        if let Some(listener) = &self.listener {
            listener.graph_changed(self.graph.nodes(), self.graph.links());
        }
    }
}
