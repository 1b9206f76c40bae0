//! History reconstruction engine
//!
//! Owns the append-only log and the two position pointers, and derives the
//! document state at any log index on demand. Reconstruction is
//! compute-then-swap: the full target state is resolved before the live
//! document is touched, so a jump can never leave the document half
//! mutated.
//!
//! # Position model
//!
//! Positions run from `-1` (before anything happened) to `len - 1` (fully
//! caught up). `current` is where the live document sits; `last_saved` is
//! the most recent position durably persisted by the external save routine
//! and acts as a floor: navigation never crosses below it, because that
//! would revert data collaborators already received as the saved baseline.
//!
//! # Reconstruction rule
//!
//! Every entry stores the document snapshot captured immediately before its
//! action ran. The state *at* position `i` is therefore the snapshot of
//! entry `i + 1`, except at the newest position, where no later entry
//! exists and the newest action's effect is re-simulated over its own
//! snapshot instead.
//!
//! # Example
//!
//! ```
//! use mindmesh_core::{DocumentState, EditAction, History, Snapshot};
//!
//! let mut state = DocumentState::default();
//! let mut history = History::new();
//!
//! let before = Snapshot::capture(&state);
//! state.title = "Trip plan".to_string();
//! history.record(
//!     EditAction::UpdateTitle { label: Some("Trip plan".to_string()) },
//!     before,
//! );
//!
//! history.jump_to(-1, &mut state, "doc-1", None);
//! assert_eq!(state.title, "");
//! assert!(history.can_redo());
//! ```

use crate::diff::{diff_documents, ChangeRecord};
use crate::document::{DocumentState, Snapshot};
use crate::history::replay::replay;
use crate::history::{EditAction, HistoryAction, HistoryLog};
use crate::sync::{publish_changes, SyncPublisher};
use tracing::{debug, warn};

/// Append-only editing history with snapshot-based reconstruction
#[derive(Debug, Clone)]
pub struct History {
    log: HistoryLog,

    /// Log position the live document currently reflects
    current: i64,

    /// Most recent position durably persisted; the navigation floor
    last_saved: i64,
}

impl History {
    /// Create an empty history at position `-1`
    pub fn new() -> Self {
        Self {
            log: HistoryLog::new(),
            current: -1,
            last_saved: -1,
        }
    }

    /// Append an edit with its pre-edit snapshot, returning the new index
    ///
    /// The current position always moves to the appended entry. Entries are
    /// never truncated: recording after an undo keeps the old tail
    /// addressable, since every index resolves through stored snapshots.
    pub fn record(&mut self, edit: EditAction, previous: Snapshot) -> usize {
        let index = self.log.push(HistoryAction::new(edit, previous));
        self.current = index as i64;
        index
    }

    /// Mark the current position as durably saved
    pub fn mark_saved(&mut self) {
        self.last_saved = self.current;
    }

    /// Drop the whole log and reset both pointers (document reload)
    pub fn clear(&mut self) {
        self.log.clear();
        self.current = -1;
        self.last_saved = -1;
    }

    /// The underlying log
    pub fn log(&self) -> &HistoryLog {
        &self.log
    }

    /// Number of recorded entries
    pub fn len(&self) -> usize {
        self.log.len()
    }

    /// True when nothing has been recorded
    pub fn is_empty(&self) -> bool {
        self.log.is_empty()
    }

    /// Log position the live document currently reflects
    pub fn current_index(&self) -> i64 {
        self.current
    }

    /// The save watermark
    pub fn last_saved_index(&self) -> i64 {
        self.last_saved
    }

    /// True when stepping back one position is allowed
    pub fn can_undo(&self) -> bool {
        self.current > self.last_saved
    }

    /// True when the live document sits behind the newest entry
    pub fn can_redo(&self) -> bool {
        self.current < self.log.len() as i64 - 1
    }

    /// True when the current position differs from the saved one
    pub fn has_unsaved_changes(&self) -> bool {
        self.current != self.last_saved
    }

    /// Move the live document to the state at `target`
    ///
    /// Rejected silently (nothing changes, nothing is published) when the
    /// log is empty, `target` is outside `[-1, len - 1]`, `target` equals
    /// the current position, `target` lies below the save watermark, or the
    /// entry needed for reconstruction has no snapshot. Callers that need
    /// to know whether a jump happened compare [`current_index`] before and
    /// after.
    ///
    /// On success: the prev-to-target diff is handed to `publisher` (node
    /// deletes, node creates/updates, edge deletes, edge creates), the
    /// target state is written into `state`, the current position moves,
    /// one consolidated customization record keyed by `document_id` is
    /// published if any of the four style fields changed, and any node
    /// selection is cleared.
    ///
    /// [`current_index`]: History::current_index
    pub fn jump_to(
        &mut self,
        target: i64,
        state: &mut DocumentState,
        document_id: &str,
        mut publisher: Option<&mut dyn SyncPublisher>,
    ) {
        if self.log.is_empty() {
            debug!("history jump ignored: log is empty");
            return;
        }
        let last = self.log.len() as i64 - 1;
        if target < -1 || target > last {
            debug!("history jump ignored: index {} out of range", target);
            return;
        }
        if target == self.current {
            debug!("history jump ignored: already at index {}", target);
            return;
        }
        if target < self.last_saved {
            debug!(
                "history jump ignored: index {} is below the save watermark {}",
                target, self.last_saved
            );
            return;
        }

        let target_state = match self.resolve_target(target) {
            Some(snapshot) => snapshot,
            None => {
                warn!(
                    "history entry for index {} has no snapshot; jump aborted",
                    target
                );
                return;
            }
        };

        if let Some(publisher) = publisher.as_deref_mut() {
            let records = diff_documents(
                &state.nodes,
                &state.edges,
                &target_state.nodes,
                &target_state.edges,
            );
            publish_changes(publisher, document_id, records);
        }

        let previous_customization = state.customization.clone();
        target_state.restore(state);
        self.current = target;

        let next_customization = target_state.customization(&previous_customization);
        if let Some(update) = previous_customization.diff(&next_customization) {
            if let Some(publisher) = publisher.as_deref_mut() {
                publish_changes(
                    publisher,
                    document_id,
                    vec![ChangeRecord::CustomizationChanged(update)],
                );
            }
        }

        state.clear_selection();
        debug!("history jumped to index {}", target);
    }

    /// Resolve the document state at `target`
    ///
    /// Position `-1` is the snapshot of the first entry; the newest
    /// position replays the newest action over its own snapshot; every
    /// other position is the snapshot of the following entry. `None` when
    /// the entry involved has no snapshot.
    fn resolve_target(&self, target: i64) -> Option<Snapshot> {
        let last = self.log.len() as i64 - 1;

        if target == -1 {
            return self.log.get(0)?.previous.clone();
        }

        if target == last {
            let entry = self.log.get(target as usize)?;
            let mut working = entry.previous.clone()?;
            replay(&entry.edit, &mut working);
            return Some(working);
        }

        self.log.get((target + 1) as usize)?.previous.clone()
    }
}

impl Default for History {
    fn default() -> Self {
        Self::new()
    }
}
