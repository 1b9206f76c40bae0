//! Error types for mindmesh-core
//!
//! Only the sync boundary produces errors: encoding a record for the wire,
//! or applying a received record to a local document. History navigation
//! never fails; rejected jumps are silent no-ops, observable only through
//! the unchanged history index.

use thiserror::Error;

/// Errors produced at the sync boundary
#[derive(Error, Debug)]
pub enum SyncError {
    /// JSON (de)serialization failed
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// A record was structurally valid JSON but violated the record contract
    #[error("protocol error: {0}")]
    Protocol(String),
}

/// Convenience result type for sync operations
pub type Result<T> = std::result::Result<T, SyncError>;
