//! Append-only history log

use crate::history::HistoryAction;
use serde::{Deserialize, Serialize};

/// Ordered, append-only sequence of history entries
///
/// Indices run from `0` to `len - 1`; position `-1` (before anything
/// happened) exists only in the engine's pointer arithmetic, never here.
/// Entries are never mutated or removed individually; the whole log is
/// dropped at once when the document reloads.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HistoryLog {
    entries: Vec<HistoryAction>,
}

impl HistoryLog {
    /// Create an empty log
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an entry, returning its index
    pub fn push(&mut self, entry: HistoryAction) -> usize {
        self.entries.push(entry);
        self.entries.len() - 1
    }

    /// Entry at `index`, if present
    pub fn get(&self, index: usize) -> Option<&HistoryAction> {
        self.entries.get(index)
    }

    /// The most recent entry
    pub fn last(&self) -> Option<&HistoryAction> {
        self.entries.last()
    }

    /// Number of entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when no entry has been recorded
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate over entries in order
    pub fn iter(&self) -> impl Iterator<Item = &HistoryAction> {
        self.entries.iter()
    }

    /// Drop every entry (document reload)
    pub fn clear(&mut self) {
        self.entries.clear();
    }
}
