//! History actions
//!
//! [`EditAction`] is the closed set of user edits the engine understands,
//! one variant per action type, each carrying only the payload that type
//! needs. The serialized form is adjacently tagged (`type` + `data`) so a
//! persisted log stays readable, and any tag this version does not know
//! deserializes to [`EditAction::Unknown`] instead of failing, since newer
//! editors may write action types older ones cannot replay.

use crate::document::{CustomizationUpdate, Edge, Node, Position, Snapshot};
use crate::{EdgeID, NodeID};
use serde::{de, Deserialize, Serialize};
use std::collections::HashMap;

/// One user edit, tagged by action type
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", content = "data", rename_all = "snake_case")]
pub enum EditAction {
    /// Move one or more nodes to new positions
    MoveNode { positions: HashMap<NodeID, Position> },

    /// Resize a single node
    ResizeNode {
        node_id: NodeID,
        width: f64,
        height: f64,
    },

    /// Connect two nodes, optionally superseding an existing edge
    ConnectNodes {
        edge: Edge,
        #[serde(skip_serializing_if = "Option::is_none")]
        replaced_edge_id: Option<EdgeID>,
    },

    /// Remove every edge touching a node
    DisconnectNodes { node_id: NodeID },

    /// Delete a node and its descendants
    ///
    /// When `affected_nodes` is present it is the complete removal set;
    /// otherwise the replay derives descendants from the edge list.
    DeleteNode {
        node_id: NodeID,
        #[serde(skip_serializing_if = "Option::is_none")]
        affected_nodes: Option<Vec<NodeID>>,
    },

    /// Relabel a node, optionally as part of a grouped rename
    UpdateNode {
        node_id: NodeID,
        label: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        affected_nodes: Option<Vec<NodeID>>,
    },

    /// Adopt a full replacement node list
    ///
    /// Insertion position matters for rendering, so adds are captured as
    /// the whole list rather than a delta.
    AddNode {
        #[serde(skip_serializing_if = "Option::is_none")]
        nodes: Option<Vec<Node>>,
    },

    /// Change the document title
    UpdateTitle {
        #[serde(skip_serializing_if = "Option::is_none")]
        label: Option<String>,
    },

    /// Change one or more document-wide style fields
    UpdateCustomization(CustomizationUpdate),

    /// Replace the drawing overlay
    DrawingChange {
        #[serde(skip_serializing_if = "Option::is_none")]
        drawing: Option<serde_json::Value>,
    },

    /// Move a drawing stroke (stored as a full overlay replacement)
    MoveStroke {
        #[serde(skip_serializing_if = "Option::is_none")]
        drawing: Option<serde_json::Value>,
    },

    /// Any action type this version does not know
    Unknown,
}

/// The action set this version can parse, [`EditAction`] minus the
/// catch-all
///
/// Deserialization goes through this mirror so that field attributes stay
/// derive-generated while the top-level tag dispatch is hand-written.
#[derive(Deserialize)]
#[serde(tag = "type", content = "data", rename_all = "snake_case")]
enum Recognized {
    MoveNode {
        positions: HashMap<NodeID, Position>,
    },
    ResizeNode {
        node_id: NodeID,
        width: f64,
        height: f64,
    },
    ConnectNodes {
        edge: Edge,
        #[serde(default)]
        replaced_edge_id: Option<EdgeID>,
    },
    DisconnectNodes {
        node_id: NodeID,
    },
    DeleteNode {
        node_id: NodeID,
        #[serde(default)]
        affected_nodes: Option<Vec<NodeID>>,
    },
    UpdateNode {
        node_id: NodeID,
        label: String,
        #[serde(default)]
        affected_nodes: Option<Vec<NodeID>>,
    },
    AddNode {
        #[serde(default)]
        nodes: Option<Vec<Node>>,
    },
    UpdateTitle {
        #[serde(default)]
        label: Option<String>,
    },
    UpdateCustomization(CustomizationUpdate),
    DrawingChange {
        #[serde(default)]
        drawing: Option<serde_json::Value>,
    },
    MoveStroke {
        #[serde(default)]
        drawing: Option<serde_json::Value>,
    },
}

impl Recognized {
    /// Wire tags of every parseable variant; any other tag is
    /// [`EditAction::Unknown`]
    const TAGS: [&'static str; 11] = [
        "move_node",
        "resize_node",
        "connect_nodes",
        "disconnect_nodes",
        "delete_node",
        "update_node",
        "add_node",
        "update_title",
        "update_customization",
        "drawing_change",
        "move_stroke",
    ];
}

impl From<Recognized> for EditAction {
    fn from(value: Recognized) -> Self {
        match value {
            Recognized::MoveNode { positions } => Self::MoveNode { positions },
            Recognized::ResizeNode {
                node_id,
                width,
                height,
            } => Self::ResizeNode {
                node_id,
                width,
                height,
            },
            Recognized::ConnectNodes {
                edge,
                replaced_edge_id,
            } => Self::ConnectNodes {
                edge,
                replaced_edge_id,
            },
            Recognized::DisconnectNodes { node_id } => Self::DisconnectNodes { node_id },
            Recognized::DeleteNode {
                node_id,
                affected_nodes,
            } => Self::DeleteNode {
                node_id,
                affected_nodes,
            },
            Recognized::UpdateNode {
                node_id,
                label,
                affected_nodes,
            } => Self::UpdateNode {
                node_id,
                label,
                affected_nodes,
            },
            Recognized::AddNode { nodes } => Self::AddNode { nodes },
            Recognized::UpdateTitle { label } => Self::UpdateTitle { label },
            Recognized::UpdateCustomization(update) => Self::UpdateCustomization(update),
            Recognized::DrawingChange { drawing } => Self::DrawingChange { drawing },
            Recognized::MoveStroke { drawing } => Self::MoveStroke { drawing },
        }
    }
}

// Hand-written because the derived `#[serde(other)]` fallback only accepts
// a bare unknown tag, and foreign tags arrive with a `data` payload
// attached.
impl<'de> Deserialize<'de> for EditAction {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let value = serde_json::Value::deserialize(deserializer)?;
        let tag = match value.get("type") {
            Some(serde_json::Value::String(tag)) => tag.as_str(),
            Some(_) => return Err(de::Error::custom("action `type` must be a string")),
            None => return Err(de::Error::missing_field("type")),
        };
        if !Recognized::TAGS.contains(&tag) {
            return Ok(EditAction::Unknown);
        }
        serde_json::from_value::<Recognized>(value)
            .map(EditAction::from)
            .map_err(de::Error::custom)
    }
}

/// One immutable history log entry
///
/// `previous` is the full document snapshot captured synchronously before
/// the edit ran, so it always equals the state the preceding entry produced.
/// Entries missing their snapshot cannot be replayed and are skipped by the
/// engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryAction {
    /// The edit that was applied
    pub edit: EditAction,

    /// Document state immediately before the edit
    pub previous: Option<Snapshot>,
}

impl HistoryAction {
    /// Create an entry from an edit and the state it was applied over
    pub fn new(edit: EditAction, previous: Snapshot) -> Self {
        Self {
            edit,
            previous: Some(previous),
        }
    }
}
