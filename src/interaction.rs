//! Transient interaction state: editing mode, pending link, selection.
//!
//! None of this state is part of the graph; it is never snapshotted and
//! never survives undo/redo replay.

use serde::{Deserialize, Serialize};

use crate::types::{LinkKind, NodeId, NodeKind};

/// Drawn width of a latent node's shape.
pub const LATENT_WIDTH: f64 = 100.0;
/// Drawn width of an observed node's shape.
pub const OBSERVED_WIDTH: f64 = 120.0;
/// Vertical anchor used when converting a drop point to a top-left position.
pub const ANCHOR_DROP: f64 = 30.0;

/// Editing mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    /// Clicks select, drags reposition.
    Move,
    /// Two-click gesture draws a link.
    Link,
}

/// What is currently selected on the canvas.
///
/// Node and link selection are mutually exclusive by construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Selection {
    /// Nothing selected.
    #[default]
    None,
    /// A node, by id.
    Node(NodeId),
    /// A link, by position in the link sequence.
    Link(usize),
}

impl Selection {
    /// The selected node id, if a node is selected.
    pub fn node(&self) -> Option<NodeId> {
        match self {
            Self::Node(id) => Some(*id),
            _ => None,
        }
    }

    /// The selected link index, if a link is selected.
    pub fn link(&self) -> Option<usize> {
        match self {
            Self::Link(index) => Some(*index),
            _ => None,
        }
    }

    /// True when nothing is selected.
    pub fn is_none(&self) -> bool {
        matches!(self, Self::None)
    }
}

/// Transient per-session interaction state.
#[derive(Debug, Clone)]
pub struct InteractionState {
    /// Current editing mode.
    pub mode: Mode,
    /// Kind applied to the next completed link gesture.
    pub link_kind: LinkKind,
    /// First endpoint of an in-progress link gesture.
    pub pending_source: Option<NodeId>,
    /// Pointer position for the in-progress link preview, canvas-local.
    pub preview: Option<(f64, f64)>,
    /// Current selection.
    pub selection: Selection,
}

impl Default for InteractionState {
    fn default() -> Self {
        Self {
            mode: Mode::Move,
            link_kind: LinkKind::default(),
            pending_source: None,
            preview: None,
            selection: Selection::None,
        }
    }
}

impl InteractionState {
    /// Fresh state: move mode, directed links, nothing pending or selected.
    pub fn new() -> Self {
        Self::default()
    }

    /// Drop any in-progress link gesture and its preview.
    pub fn cancel_pending_link(&mut self) {
        self.pending_source = None;
        self.preview = None;
    }

    /// Clear node and link selection.
    pub fn clear_selection(&mut self) {
        self.selection = Selection::None;
    }

    /// Switch editing mode. Leaving link mode cancels a pending link.
    pub fn set_mode(&mut self, mode: Mode) {
        if self.mode == Mode::Link && mode != Mode::Link {
            self.cancel_pending_link();
        }
        self.mode = mode;
    }
}

/// Convert a drop point to the node's new top-left position.
///
/// The pointer anchors the node at half its shape width horizontally and
/// at a fixed vertical offset.
pub fn drop_to_top_left(kind: NodeKind, drop_x: f64, drop_y: f64) -> (f64, f64) {
    let half_width = match kind {
        NodeKind::Latent => LATENT_WIDTH / 2.0,
        NodeKind::Observed => OBSERVED_WIDTH / 2.0,
    };
    (drop_x - half_width, drop_y - ANCHOR_DROP)
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    fn id(n: u128) -> NodeId {
        NodeId::new(Uuid::from_u128(n))
    }

    #[test]
    fn leaving_link_mode_cancels_pending_link() {
        let mut state = InteractionState::new();
        state.set_mode(Mode::Link);
        state.pending_source = Some(id(1));
        state.preview = Some((10.0, 10.0));

        state.set_mode(Mode::Move);
        assert_eq!(state.pending_source, None);
        assert_eq!(state.preview, None);
    }

    #[test]
    fn reentering_link_mode_keeps_pending_link() {
        let mut state = InteractionState::new();
        state.set_mode(Mode::Link);
        state.pending_source = Some(id(1));
        state.set_mode(Mode::Link);
        assert_eq!(state.pending_source, Some(id(1)));
    }

    #[test]
    fn selection_accessors_are_exclusive() {
        let selection = Selection::Node(id(3));
        assert_eq!(selection.node(), Some(id(3)));
        assert_eq!(selection.link(), None);

        let selection = Selection::Link(2);
        assert_eq!(selection.node(), None);
        assert_eq!(selection.link(), Some(2));
    }

    #[test]
    fn drop_anchors_at_half_shape_width() {
        assert_eq!(drop_to_top_left(NodeKind::Latent, 200.0, 100.0), (150.0, 70.0));
        assert_eq!(drop_to_top_left(NodeKind::Observed, 200.0, 100.0), (140.0, 70.0));
    }
}
