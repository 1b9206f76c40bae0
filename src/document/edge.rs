//! Edge model for mindmap documents
//!
//! An edge connects a source node to a target node. Its routing type is a
//! document-wide style choice (see [`Customization`](crate::Customization)),
//! so every edge in a document normally carries the same [`EdgeKind`]; the
//! history engine re-stamps all edges whenever the document-wide type
//! changes. The stroke color is derived from the source node's background at
//! connection time, it is not an independent per-edge setting.

use crate::document::Node;
use crate::{EdgeID, NodeID};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Visual routing type of an edge
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EdgeKind {
    #[default]
    Default,
    Straight,
    Step,
    SmoothStep,
}

/// Rendered style of an edge
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct EdgeStyle {
    /// Stroke color, derived from the source node's background
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stroke: Option<String>,

    /// Arbitrary style attributes
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// One edge of a mindmap document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Edge {
    /// Unique edge identifier
    pub id: EdgeID,

    /// Source node id
    pub source: NodeID,

    /// Target node id
    pub target: NodeID,

    /// Visual routing type
    #[serde(rename = "type", default)]
    pub kind: EdgeKind,

    /// Rendered style
    #[serde(default)]
    pub style: EdgeStyle,
}

impl Edge {
    /// Create an edge with a fresh id between two node ids
    pub fn new(source: impl Into<NodeID>, target: impl Into<NodeID>, kind: EdgeKind) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            source: source.into(),
            target: target.into(),
            kind,
            style: EdgeStyle::default(),
        }
    }

    /// Create an edge out of `source`, inheriting its stroke color
    ///
    /// The stroke is copied from the source node's background so the edge
    /// visually belongs to its origin branch.
    pub fn connecting(source: &Node, target: impl Into<NodeID>, kind: EdgeKind) -> Self {
        let mut edge = Edge::new(source.id.clone(), target, kind);
        edge.style.stroke = source.data.background.clone();
        edge
    }
}
