//! Wire shape of outbound sync records
//!
//! Every change a client makes is broadcast as a [`SyncRecord`]: an
//! idempotent create/update/delete instruction for one entity, addressed by
//! the entity's id. Node and edge records use the entity id directly;
//! customization records are addressed per document as
//! `customization-<documentId>`, so repeated style changes overwrite one
//! logical record instead of accumulating.

use crate::diff::ChangeRecord;
use crate::error::Result;
use serde::{Deserialize, Serialize};

/// Entity class a record refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecordKind {
    Node,
    Edge,
    Customization,
}

/// What to do with the entity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecordAction {
    Create,
    Update,
    Delete,
}

/// One idempotent change record for transmission to peers
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SyncRecord {
    /// Entity id, or `customization-<documentId>` for style records
    pub id: String,

    /// Entity class
    pub kind: RecordKind,

    /// Create, update, or delete
    pub action: RecordAction,

    /// Full entity payload; absent for deletes
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payload: Option<serde_json::Value>,
}

impl SyncRecord {
    /// The record id used for a document's customization record
    pub fn customization_id(document_id: &str) -> String {
        format!("customization-{}", document_id)
    }

    /// Convert a diff record into its wire form
    pub fn from_change(change: ChangeRecord, document_id: &str) -> Result<Self> {
        let record = match change {
            ChangeRecord::NodeCreated(node) => SyncRecord {
                id: node.id.clone(),
                kind: RecordKind::Node,
                action: RecordAction::Create,
                payload: Some(serde_json::to_value(&node)?),
            },
            ChangeRecord::NodeUpdated(node) => SyncRecord {
                id: node.id.clone(),
                kind: RecordKind::Node,
                action: RecordAction::Update,
                payload: Some(serde_json::to_value(&node)?),
            },
            ChangeRecord::NodeDeleted(id) => SyncRecord {
                id,
                kind: RecordKind::Node,
                action: RecordAction::Delete,
                payload: None,
            },
            ChangeRecord::EdgeCreated(edge) => SyncRecord {
                id: edge.id.clone(),
                kind: RecordKind::Edge,
                action: RecordAction::Create,
                payload: Some(serde_json::to_value(&edge)?),
            },
            ChangeRecord::EdgeDeleted(id) => SyncRecord {
                id,
                kind: RecordKind::Edge,
                action: RecordAction::Delete,
                payload: None,
            },
            ChangeRecord::CustomizationChanged(update) => SyncRecord {
                id: Self::customization_id(document_id),
                kind: RecordKind::Customization,
                action: RecordAction::Update,
                payload: Some(serde_json::to_value(&update)?),
            },
        };

        Ok(record)
    }

    /// Encode the record as a JSON string
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Decode a record from a JSON string
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}
