//! Editing history: the action log and the reconstruction engine
//!
//! History is linear and append-only. Each entry pairs the edit that
//! happened with a snapshot of the document taken just before it, which
//! makes any position in the log reconstructible without inverse
//! operations: the engine reads a stored snapshot (or re-simulates the
//! newest action over its own snapshot) and swaps it in wholesale.
//!
//! # Properties
//!
//! - Entries are never rewritten or truncated; recording after an undo
//!   appends past the stale tail
//! - Navigation is clamped to `[-1, len - 1]` and floored at the save
//!   watermark
//! - A rejected jump changes nothing and publishes nothing
//! - A successful jump publishes the minimal prev-to-target diff before
//!   the live document is swapped

mod action;
mod engine;
mod log;
pub(crate) mod replay;

pub use action::{EditAction, HistoryAction};
pub use engine::History;
pub use log::HistoryLog;
