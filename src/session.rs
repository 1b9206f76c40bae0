//! Editor session: one open document with its history and its outbound feed
//!
//! [`EditorSession`] ties the pieces together. Every local edit flows
//! through [`apply`]: the pre-edit snapshot goes into the history log, the
//! edit's effect is simulated, the minimal diff goes out to the publisher,
//! and the simulated state becomes the live document. Remote records from
//! collaborators come in through [`apply_remote`] and bypass the history
//! entirely, since only local edits are undoable.
//!
//! [`apply`]: EditorSession::apply
//! [`apply_remote`]: EditorSession::apply_remote
//!
//! # Example
//!
//! ```
//! use mindmesh_core::{EditAction, EditorSession};
//!
//! let mut session = EditorSession::new("doc-1");
//! session.apply(EditAction::UpdateTitle {
//!     label: Some("Roadmap".to_string()),
//! });
//! assert_eq!(session.state().title, "Roadmap");
//! assert!(session.history().can_undo());
//!
//! session.jump_to_history(-1);
//! assert_eq!(session.state().title, "");
//! assert!(session.history().can_redo());
//! ```

use crate::diff::{diff_documents, ChangeRecord};
use crate::document::{DocumentState, Snapshot};
use crate::history::replay::replay;
use crate::history::{EditAction, History};
use crate::sync::{apply_record, publish_changes, SyncPublisher, SyncRecord};
use crate::{DocumentID, Result};

/// One open document: live state, editing history, outbound sync feed
pub struct EditorSession {
    document_id: DocumentID,
    state: DocumentState,
    history: History,
    publisher: Option<Box<dyn SyncPublisher>>,
}

impl EditorSession {
    /// Open a session on an empty document
    pub fn new(document_id: impl Into<DocumentID>) -> Self {
        Self {
            document_id: document_id.into(),
            state: DocumentState::default(),
            history: History::new(),
            publisher: None,
        }
    }

    /// Attach the outbound record sink
    ///
    /// Records produced before a publisher is attached are dropped, not
    /// queued.
    pub fn set_publisher(&mut self, publisher: Box<dyn SyncPublisher>) {
        self.publisher = Some(publisher);
    }

    pub fn document_id(&self) -> &str {
        &self.document_id
    }

    pub fn state(&self) -> &DocumentState {
        &self.state
    }

    /// Mutable access for ephemeral flags (selection, dragging)
    ///
    /// Persistent edits must go through [`apply`] or they will be invisible
    /// to the history and to collaborators.
    ///
    /// [`apply`]: EditorSession::apply
    pub fn state_mut(&mut self) -> &mut DocumentState {
        &mut self.state
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    /// Apply a local edit: record it, broadcast its diff, update the state
    ///
    /// The snapshot enters the log before the edit takes effect, so every
    /// entry's `previous` equals the state its predecessor produced. Unlike
    /// a history jump, a fresh edit does write the live font family.
    pub fn apply(&mut self, edit: EditAction) {
        let before = Snapshot::capture(&self.state);
        let mut target = before.clone();
        replay(&edit, &mut target);
        self.history.record(edit, before);

        if let Some(publisher) = self.publisher.as_deref_mut() {
            let records = diff_documents(
                &self.state.nodes,
                &self.state.edges,
                &target.nodes,
                &target.edges,
            );
            publish_changes(publisher, &self.document_id, records);
        }

        let previous_customization = self.state.customization.clone();
        target.restore(&mut self.state);
        if let Some(font_family) = &target.font_family {
            self.state.customization.font_family = font_family.clone();
        }

        if let Some(update) = previous_customization.diff(&self.state.customization) {
            if let Some(publisher) = self.publisher.as_deref_mut() {
                publish_changes(
                    publisher,
                    &self.document_id,
                    vec![ChangeRecord::CustomizationChanged(update)],
                );
            }
        }
    }

    /// Move the live document to a history position
    ///
    /// Delegates to [`History::jump_to`]; out-of-range, already-current,
    /// and below-watermark targets are ignored silently.
    pub fn jump_to_history(&mut self, target: i64) {
        // The cast shortens the box's 'static object lifetime to this
        // borrow; `Option` blocks the coercion from happening on its own.
        let publisher = self
            .publisher
            .as_deref_mut()
            .map(|p| p as &mut dyn SyncPublisher);
        self.history
            .jump_to(target, &mut self.state, &self.document_id, publisher);
    }

    /// Fold a collaborator's record into the live state
    ///
    /// Remote changes are not local edits: they never enter the history
    /// log and never produce outbound records.
    pub fn apply_remote(&mut self, record: &SyncRecord) -> Result<()> {
        apply_record(&mut self.state, record)
    }

    /// Mark the current history position as durably saved
    pub fn mark_saved(&mut self) {
        self.history.mark_saved();
    }

    /// Replace the document wholesale and start history over (reload)
    pub fn load(&mut self, state: DocumentState) {
        self.state = state;
        self.history.clear();
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    pub fn has_unsaved_changes(&self) -> bool {
        self.history.has_unsaved_changes()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::{CustomizationUpdate, Edge, EdgeKind, Node, Position};
    use crate::sync::{ChannelPublisher, NullPublisher, RecordAction, RecordKind};
    use std::collections::{BTreeMap, BTreeSet};
    use std::sync::mpsc;

    fn node(id: &str, label: &str) -> Node {
        let mut n = Node::new(label, Position::default());
        n.id = id.to_string();
        n
    }

    fn channel_session(document_id: &str) -> (EditorSession, mpsc::Receiver<SyncRecord>) {
        let mut session = EditorSession::new(document_id);
        let (publisher, receiver) = ChannelPublisher::new();
        session.set_publisher(Box::new(publisher));
        (session, receiver)
    }

    #[test]
    fn test_apply_publishes_create_records() {
        let (mut session, receiver) = channel_session("doc-1");

        session.apply(EditAction::AddNode {
            nodes: Some(vec![node("a", "alpha")]),
        });

        let records: Vec<SyncRecord> = receiver.try_iter().collect();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].kind, RecordKind::Node);
        assert_eq!(records[0].action, RecordAction::Create);
        assert_eq!(records[0].id, "a");
    }

    #[test]
    fn test_apply_without_publisher_still_updates_state_and_history() {
        let mut session = EditorSession::new("doc-1");

        session.apply(EditAction::UpdateTitle {
            label: Some("quiet".to_string()),
        });

        assert_eq!(session.state().title, "quiet");
        assert_eq!(session.history().len(), 1);
    }

    #[test]
    fn test_null_publisher_drops_records_without_affecting_edits() {
        let mut session = EditorSession::new("doc-1");
        session.set_publisher(Box::new(NullPublisher));

        session.apply(EditAction::AddNode {
            nodes: Some(vec![node("a", "alpha")]),
        });

        assert_eq!(session.state().nodes.len(), 1);
        assert!(session.can_undo());
    }

    #[test]
    fn test_fresh_font_edit_updates_live_state() {
        let mut session = EditorSession::new("doc-1");

        session.apply(EditAction::UpdateCustomization(CustomizationUpdate {
            font_family: Some("monospace".to_string()),
            ..Default::default()
        }));

        assert_eq!(session.state().customization.font_family, "monospace");
    }

    #[test]
    fn test_jump_hands_the_attached_publisher_the_rewind_diff() {
        let (mut session, receiver) = channel_session("doc-1");
        session.apply(EditAction::AddNode {
            nodes: Some(vec![node("a", "alpha"), node("b", "beta")]),
        });
        receiver.try_iter().count();

        session.jump_to_history(-1);

        let records: Vec<SyncRecord> = receiver.try_iter().collect();
        assert_eq!(records.len(), 2);
        assert!(records
            .iter()
            .all(|r| r.kind == RecordKind::Node && r.action == RecordAction::Delete));
        assert!(session.state().nodes.is_empty());
    }

    #[test]
    fn test_history_jump_leaves_live_font_alone_but_broadcasts_the_revert() {
        let (mut session, receiver) = channel_session("doc-1");

        session.apply(EditAction::UpdateCustomization(CustomizationUpdate {
            font_family: Some("monospace".to_string()),
            background: Some("#101010".to_string()),
            ..Default::default()
        }));
        receiver.try_iter().count();

        session.jump_to_history(-1);

        // Background reverts locally; the font quirk keeps the live font.
        assert_eq!(session.state().customization.background, "#ffffff");
        assert_eq!(session.state().customization.font_family, "monospace");

        // The outbound record still carries both reverted fields, so peers
        // converge on the reconstructed state.
        let records: Vec<SyncRecord> = receiver.try_iter().collect();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].kind, RecordKind::Customization);
        let payload = records[0].payload.as_ref().unwrap();
        assert_eq!(payload["background"], "#ffffff");
        assert_eq!(payload["font_family"], "sans-serif");
    }

    #[test]
    fn test_customization_record_key_uses_the_document_id() {
        let (mut session, receiver) = channel_session("doc-42");

        session.apply(EditAction::UpdateCustomization(CustomizationUpdate {
            dot_color: Some("#333333".to_string()),
            ..Default::default()
        }));

        let records: Vec<SyncRecord> = receiver.try_iter().collect();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].id, "customization-doc-42");
    }

    #[test]
    fn test_peer_following_the_feed_converges_after_a_jump() {
        let (mut session, receiver) = channel_session("doc-1");
        let mut peer = DocumentState::default();

        session.apply(EditAction::AddNode {
            nodes: Some(vec![node("a", "alpha"), node("b", "beta")]),
        });
        session.apply(EditAction::ConnectNodes {
            edge: {
                let mut e = Edge::new("a", "b", EdgeKind::Default);
                e.id = "e1".to_string();
                e
            },
            replaced_edge_id: None,
        });
        session.apply(EditAction::DeleteNode {
            node_id: "b".to_string(),
            affected_nodes: None,
        });
        for record in receiver.try_iter() {
            apply_record(&mut peer, &record).unwrap();
        }

        // Undo the delete, then undo the connect.
        session.jump_to_history(1);
        session.jump_to_history(0);
        for record in receiver.try_iter() {
            apply_record(&mut peer, &record).unwrap();
        }

        let local: BTreeMap<&str, &Node> = session
            .state()
            .nodes
            .iter()
            .map(|n| (n.id.as_str(), n))
            .collect();
        let remote: BTreeMap<&str, &Node> = peer.nodes.iter().map(|n| (n.id.as_str(), n)).collect();
        assert_eq!(local, remote);

        let local_edges: BTreeSet<&str> = session
            .state()
            .edges
            .iter()
            .map(|e| e.id.as_str())
            .collect();
        let remote_edges: BTreeSet<&str> = peer.edges.iter().map(|e| e.id.as_str()).collect();
        assert_eq!(local_edges, remote_edges);
        assert!(local_edges.is_empty());
    }

    #[test]
    fn test_selection_set_through_state_mut_does_not_survive_a_jump() {
        let mut session = EditorSession::new("doc-1");
        session.apply(EditAction::AddNode {
            nodes: Some(vec![node("a", "alpha")]),
        });
        session.apply(EditAction::UpdateTitle {
            label: Some("named".to_string()),
        });

        session.state_mut().nodes[0].selected = true;
        session.jump_to_history(0);

        assert!(session.state().nodes.iter().all(|n| !n.selected));
    }

    #[test]
    fn test_apply_remote_bypasses_history() {
        let mut session = EditorSession::new("doc-1");
        let record = SyncRecord::from_change(
            ChangeRecord::NodeCreated(node("r1", "from afar")),
            "doc-1",
        )
        .unwrap();

        session.apply_remote(&record).unwrap();

        assert_eq!(session.state().nodes.len(), 1);
        assert!(session.history().is_empty());
        assert!(!session.can_undo());
    }

    #[test]
    fn test_load_replaces_state_and_clears_history() {
        let mut session = EditorSession::new("doc-1");
        session.apply(EditAction::UpdateTitle {
            label: Some("scratch".to_string()),
        });
        session.mark_saved();

        let mut loaded = DocumentState::default();
        loaded.title = "from the server".to_string();
        loaded.nodes.push(node("a", "alpha"));
        session.load(loaded.clone());

        assert_eq!(session.state(), &loaded);
        assert!(session.history().is_empty());
        assert!(!session.has_unsaved_changes());
        assert!(!session.can_redo());
    }

    #[test]
    fn test_save_flags_track_the_watermark() {
        let mut session = EditorSession::new("doc-1");
        session.apply(EditAction::UpdateTitle {
            label: Some("one".to_string()),
        });
        assert!(session.has_unsaved_changes());

        session.mark_saved();
        assert!(!session.has_unsaved_changes());
        assert!(!session.can_undo());

        session.apply(EditAction::UpdateTitle {
            label: Some("two".to_string()),
        });
        assert!(session.can_undo());
    }

    mod properties {
        use super::*;
        use proptest::prelude::*;

        fn arb_position() -> impl Strategy<Value = Position> {
            (-500.0..500.0f64, -500.0..500.0f64).prop_map(|(x, y)| Position { x, y })
        }

        fn arb_nodes() -> impl Strategy<Value = Vec<Node>> {
            prop::sample::subsequence(vec!["a", "b", "c", "d", "e"], 0..=5).prop_flat_map(|ids| {
                let count = ids.len();
                prop::collection::vec(("[a-z]{1,8}", arb_position()), count).prop_map(
                    move |specs| {
                        ids.iter()
                            .zip(specs)
                            .map(|(id, (label, position))| {
                                let mut n = Node::new(label, position);
                                n.id = id.to_string();
                                n
                            })
                            .collect()
                    },
                )
            })
        }

        fn arb_edit() -> impl Strategy<Value = EditAction> {
            prop_oneof![
                arb_nodes().prop_map(|nodes| EditAction::AddNode { nodes: Some(nodes) }),
                (prop::sample::select(vec!["a", "b", "c"]), arb_position()).prop_map(
                    |(id, position)| EditAction::MoveNode {
                        positions: [(id.to_string(), position)].into_iter().collect(),
                    }
                ),
                "[a-z]{0,10}".prop_map(|label| EditAction::UpdateTitle { label: Some(label) }),
                ("#[0-9a-f]{6}", "[a-z]{3,10}").prop_map(|(background, font_family)| {
                    EditAction::UpdateCustomization(CustomizationUpdate {
                        background: Some(background),
                        font_family: Some(font_family),
                        ..Default::default()
                    })
                }),
            ]
        }

        proptest! {
            /// Rewinding to the beginning and fast-forwarding to the newest
            /// entry must land exactly on the sequentially-built state.
            #[test]
            fn prop_rewind_and_fast_forward_is_lossless(
                edits in prop::collection::vec(arb_edit(), 1..12)
            ) {
                let mut session = EditorSession::new("doc-prop");
                for edit in edits {
                    session.apply(edit);
                }
                let expected = session.state().clone();
                let newest = session.history().len() as i64 - 1;

                session.jump_to_history(-1);
                session.jump_to_history(newest);

                prop_assert_eq!(session.state(), &expected);
                prop_assert_eq!(session.history().current_index(), newest);
            }
        }
    }
}
