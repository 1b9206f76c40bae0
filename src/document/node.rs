//! Node model for mindmap documents
//!
//! A node is one box on the canvas: a position, optional dimensions, a
//! free-form data payload, and a few renderer-local flags. The renderer-local
//! flags (`selected`, `dragging`, `position_absolute`) exist only for the
//! editing surface and are excluded from the content comparison used by the
//! diff engine, so selecting a node never broadcasts an update.
//!
//! # Example
//!
//! ```
//! use mindmesh_core::{Node, Position};
//!
//! let a = Node::new("Central topic", Position { x: 0.0, y: 0.0 });
//! let mut b = a.clone();
//! b.selected = true;
//!
//! // Selection is ephemeral: the two nodes still carry the same content.
//! assert!(a.content_eq(&b));
//!
//! b.position = Position { x: 40.0, y: 0.0 };
//! assert!(!a.content_eq(&b));
//! ```

use crate::NodeID;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A 2D canvas position
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

/// Node type tag
///
/// `Topic` nodes are the connectable mindmap boxes; `Drawing` nodes host
/// freehand stroke content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeKind {
    #[default]
    Topic,
    Drawing,
}

/// User-editable node payload
///
/// Carries the label and background color plus any render-time attributes
/// the editing surface attaches (icons, collapse state, etc.). Unrecognized
/// attributes are preserved through the flattened `extra` map.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct NodeData {
    /// Display label
    #[serde(default)]
    pub label: String,

    /// Background color (also the stroke color of outgoing edges)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub background: Option<String>,

    /// Arbitrary render-time attributes
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// Rendered style of a node
///
/// Mirrors the numeric dimensions so the renderer can consume them without
/// reading the top-level fields; resize operations keep both in lockstep.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct RenderStyle {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<f64>,

    /// Arbitrary style attributes
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// One node of a mindmap document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    /// Unique node identifier
    pub id: NodeID,

    /// Node type tag
    #[serde(rename = "type", default)]
    pub kind: NodeKind,

    /// Canvas position
    pub position: Position,

    /// Width in canvas units
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<f64>,

    /// Height in canvas units
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<f64>,

    /// User-editable payload
    #[serde(default)]
    pub data: NodeData,

    /// Rendered style, kept in lockstep with the numeric dimensions
    #[serde(default)]
    pub style: RenderStyle,

    /// Renderer-local: node is currently selected
    #[serde(default)]
    pub selected: bool,

    /// Renderer-local: node is mid-drag
    #[serde(default)]
    pub dragging: bool,

    /// Renderer-local: cached absolute position
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position_absolute: Option<Position>,
}

impl Node {
    /// Create a topic node with a fresh id at the given position
    pub fn new(label: impl Into<String>, position: Position) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            kind: NodeKind::Topic,
            position,
            width: None,
            height: None,
            data: NodeData {
                label: label.into(),
                background: None,
                extra: serde_json::Map::new(),
            },
            style: RenderStyle::default(),
            selected: false,
            dragging: false,
            position_absolute: None,
        }
    }

    /// Structural equality over meaningful content
    ///
    /// Compares everything except the renderer-local fields (`selected`,
    /// `dragging`, `position_absolute`). This is the comparison the diff
    /// engine uses to decide whether a node update should be broadcast.
    pub fn content_eq(&self, other: &Node) -> bool {
        self.id == other.id
            && self.kind == other.kind
            && self.position == other.position
            && self.width == other.width
            && self.height == other.height
            && self.data == other.data
            && self.style == other.style
    }
}
