//! MindMesh Core - editing history and sync engine for mindmaps
//!
//! This is the Rust core of MindMesh, compiled to both native and WASM.
//! It implements:
//! - The mindmap document model (nodes, edges, document-wide customization)
//! - A linear append-only editing history with snapshot reconstruction
//! - Minimal-diff broadcasting as idempotent create/update/delete records
//! - Peer-side application of broadcast records
//!
//! # Examples
//!
//! ```rust
//! use mindmesh_core::{EditAction, EditorSession, Node, Position};
//!
//! let mut session = EditorSession::new("doc-123");
//! session.apply(EditAction::AddNode {
//!     nodes: Some(vec![Node::new("Central topic", Position { x: 0.0, y: 0.0 })]),
//! });
//! session.apply(EditAction::UpdateTitle {
//!     label: Some("Trip planning".to_string()),
//! });
//!
//! // Walk back to the empty document, then forward again.
//! session.jump_to_history(-1);
//! assert!(session.state().nodes.is_empty());
//! session.jump_to_history(1);
//! assert_eq!(session.state().nodes.len(), 1);
//! assert_eq!(session.state().title, "Trip planning");
//! ```

pub mod document;
pub mod diff;
pub mod history;
pub mod sync;
pub mod session;
pub mod error;

#[cfg(feature = "wasm")]
pub mod wasm;

// Re-exports for convenience
pub use diff::{diff_documents, ChangeRecord};
pub use document::{
    Customization, CustomizationUpdate, DocumentState, Edge, EdgeKind, EdgeStyle, Node, NodeData,
    NodeKind, Position, RenderStyle, Snapshot,
};
pub use error::{Result, SyncError};
pub use history::{EditAction, History, HistoryAction, HistoryLog};
pub use session::EditorSession;
pub use sync::{
    apply_record, BufferPublisher, ChannelPublisher, NullPublisher, RecordAction, RecordKind,
    SyncPublisher, SyncRecord,
};

/// Node identifier type
pub type NodeID = String;

/// Edge identifier type
pub type EdgeID = String;

/// Document identifier type
pub type DocumentID = String;
