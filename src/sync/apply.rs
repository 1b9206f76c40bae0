//! Applying received records to a local document
//!
//! The receiving side of the record contract. [`apply_record`] folds one
//! [`SyncRecord`] into a [`DocumentState`]: creates and updates are upserts,
//! deletes of absent entities are no-ops, and applying the same record twice
//! leaves the state unchanged. This idempotence is what lets a transport
//! redeliver records without coordination.

use crate::document::{CustomizationUpdate, DocumentState, Edge, Node};
use crate::error::{Result, SyncError};
use crate::sync::{RecordAction, RecordKind, SyncRecord};

/// Fold one record into a local document
pub fn apply_record(state: &mut DocumentState, record: &SyncRecord) -> Result<()> {
    match record.kind {
        RecordKind::Node => match record.action {
            RecordAction::Create | RecordAction::Update => {
                let node: Node = parse_payload(record)?;
                if node.id != record.id {
                    return Err(SyncError::Protocol(format!(
                        "record {} carries payload for node {}",
                        record.id, node.id
                    )));
                }
                match state.nodes.iter_mut().find(|n| n.id == record.id) {
                    Some(existing) => *existing = node,
                    None => state.nodes.push(node),
                }
            }
            RecordAction::Delete => {
                state.nodes.retain(|n| n.id != record.id);
            }
        },

        RecordKind::Edge => match record.action {
            RecordAction::Create | RecordAction::Update => {
                let edge: Edge = parse_payload(record)?;
                if edge.id != record.id {
                    return Err(SyncError::Protocol(format!(
                        "record {} carries payload for edge {}",
                        record.id, edge.id
                    )));
                }
                match state.edges.iter_mut().find(|e| e.id == record.id) {
                    Some(existing) => *existing = edge,
                    None => state.edges.push(edge),
                }
            }
            RecordAction::Delete => {
                state.edges.retain(|e| e.id != record.id);
            }
        },

        RecordKind::Customization => {
            // A customization record is only ever an upsert of the changed
            // fields; deleting one has no meaning and is ignored.
            if record.action != RecordAction::Delete {
                let update: CustomizationUpdate = parse_payload(record)?;
                state.customization.apply(&update);
            }
        }
    }

    Ok(())
}

fn parse_payload<T: serde::de::DeserializeOwned>(record: &SyncRecord) -> Result<T> {
    let payload = record
        .payload
        .as_ref()
        .ok_or_else(|| SyncError::Protocol(format!("record {} has no payload", record.id)))?;
    Ok(serde_json::from_value(payload.clone())?)
}
