//! # sem-canvas
//!
//! Editing core for structural equation model path diagrams.
//!
//! The core answers one question:
//!
//! > Given a stream of user actions, what is the canvas state — and can
//! > every state the user saw be returned to?
//!
//! ## Core Contract
//!
//! 1. Mutations never leave the graph inconsistent (no dangling links,
//!    no duplicate edges, no half-finished gestures in history)
//! 2. Every settled edit is offered to a bounded, deduplicating undo
//!    stack; replaying history never re-records itself
//! 3. Auto-layout is a pure function of topology, so a layout run is one
//!    undoable edit and repeated runs are idempotent
//!
//! ## Architecture
//!
//! ```text
//! User Action → EditorSession → Graph mutation → commit → History
//!                     │                             │
//!                     └── InteractionState          └── ChangeListener
//!                                                       (exporter view)
//! ```
//!
//! Rendering, theming, the notation exporter itself, and durable storage
//! media are collaborators behind the trait seams in [`export`] and
//! [`store`].

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod export;
pub mod graph;
pub mod history;
pub mod interaction;
pub mod layout;
pub mod session;
pub mod store;
pub mod types;

// Re-exports
pub use export::{
    AlwaysConfirm, AlwaysDecline, ChangeListener, ConfirmAction, ConfirmationPrompt,
    DiagramExporter, NoOpListener, RecordingListener, ScriptedPrompt,
};
pub use graph::Graph;
pub use history::{EditOrigin, History, HISTORY_LIMIT};
pub use interaction::{drop_to_top_left, InteractionState, Mode, Selection};
pub use layout::layout;
pub use session::EditorSession;
pub use store::{MemoryStore, SavedId, SavedModel, SnapshotStore};
pub use types::{GraphSnapshot, Link, LinkKind, Node, NodeId, NodeKind};
