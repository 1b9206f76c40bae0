//! Live document state and history snapshots
//!
//! [`DocumentState`] is the one live copy of a document, owned by the
//! surrounding editor session. [`Snapshot`] is the deep copy stored on every
//! history entry: it captures the node list, edge list, title, the four
//! document-wide customization fields, and the drawing overlay. Snapshot
//! fields other than nodes/edges are optional so that partially populated
//! entries (older persisted logs) stay loadable; restoring a snapshot only
//! overwrites the fields it actually defines.

use crate::document::{Edge, EdgeKind, Node};
use serde::{Deserialize, Serialize};

/// Document-wide style settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Customization {
    /// Routing type stamped onto every edge
    pub edge_kind: EdgeKind,

    /// Canvas background color
    pub background: String,

    /// Accent color of the background dot grid
    pub dot_color: String,

    /// Document font family
    pub font_family: String,
}

impl Default for Customization {
    fn default() -> Self {
        Self {
            edge_kind: EdgeKind::Default,
            background: "#ffffff".to_string(),
            dot_color: "#cfcfcf".to_string(),
            font_family: "sans-serif".to_string(),
        }
    }
}

/// Partial customization change
///
/// One consolidated record covering whichever of the four fields changed.
/// Used as the `update_customization` action payload, as the diff between
/// two customization states, and as the payload of outbound customization
/// sync records.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct CustomizationUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub edge_kind: Option<EdgeKind>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub background: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dot_color: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font_family: Option<String>,
}

impl CustomizationUpdate {
    /// True when no field is set
    pub fn is_empty(&self) -> bool {
        self.edge_kind.is_none()
            && self.background.is_none()
            && self.dot_color.is_none()
            && self.font_family.is_none()
    }
}

impl Customization {
    /// Field-by-field diff against `next`
    ///
    /// Returns a single consolidated update listing only the fields that
    /// changed, or `None` when the two states match.
    pub fn diff(&self, next: &Customization) -> Option<CustomizationUpdate> {
        let update = CustomizationUpdate {
            edge_kind: (self.edge_kind != next.edge_kind).then_some(next.edge_kind),
            background: (self.background != next.background).then(|| next.background.clone()),
            dot_color: (self.dot_color != next.dot_color).then(|| next.dot_color.clone()),
            font_family: (self.font_family != next.font_family).then(|| next.font_family.clone()),
        };

        if update.is_empty() {
            None
        } else {
            Some(update)
        }
    }

    /// Overwrite the fields an update defines
    pub fn apply(&mut self, update: &CustomizationUpdate) {
        if let Some(kind) = update.edge_kind {
            self.edge_kind = kind;
        }
        if let Some(background) = &update.background {
            self.background = background.clone();
        }
        if let Some(dot_color) = &update.dot_color {
            self.dot_color = dot_color.clone();
        }
        if let Some(font_family) = &update.font_family {
            self.font_family = font_family.clone();
        }
    }
}

/// The live, externally owned document
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct DocumentState {
    /// All nodes, in render order
    pub nodes: Vec<Node>,

    /// All edges
    pub edges: Vec<Edge>,

    /// Document title
    #[serde(default)]
    pub title: String,

    /// Document-wide style settings
    #[serde(default)]
    pub customization: Customization,

    /// Freehand drawing overlay, opaque to this crate
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub drawing: Option<serde_json::Value>,
}

impl DocumentState {
    /// Drop the selection flag from every node
    ///
    /// Selection never survives a history jump: the selected id may not
    /// exist in the restored state.
    pub fn clear_selection(&mut self) {
        for node in &mut self.nodes {
            node.selected = false;
        }
    }
}

/// Deep copy of a document at one moment in time
///
/// Stored on every history entry as the state immediately before that
/// entry's action ran.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Snapshot {
    #[serde(default)]
    pub nodes: Vec<Node>,

    #[serde(default)]
    pub edges: Vec<Edge>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub edge_kind: Option<EdgeKind>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub background: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dot_color: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font_family: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub drawing: Option<serde_json::Value>,
}

impl Snapshot {
    /// Capture the full current state of a document
    pub fn capture(state: &DocumentState) -> Self {
        Self {
            nodes: state.nodes.clone(),
            edges: state.edges.clone(),
            title: Some(state.title.clone()),
            edge_kind: Some(state.customization.edge_kind),
            background: Some(state.customization.background.clone()),
            dot_color: Some(state.customization.dot_color.clone()),
            font_family: Some(state.customization.font_family.clone()),
            drawing: state.drawing.clone(),
        }
    }

    /// Write this snapshot back into a live document
    ///
    /// Nodes and edges are always replaced; the scalar fields are written
    /// only when the snapshot defines them, so a partial snapshot never
    /// clobbers unrelated live state. The font family is left untouched
    /// here: it travels only in the customization record.
    pub fn restore(&self, state: &mut DocumentState) {
        state.nodes = self.nodes.clone();
        state.edges = self.edges.clone();
        if let Some(title) = &self.title {
            state.title = title.clone();
        }
        if let Some(kind) = self.edge_kind {
            state.customization.edge_kind = kind;
        }
        if let Some(background) = &self.background {
            state.customization.background = background.clone();
        }
        if let Some(dot_color) = &self.dot_color {
            state.customization.dot_color = dot_color.clone();
        }
        if let Some(drawing) = &self.drawing {
            state.drawing = Some(drawing.clone());
        }
    }

    /// The customization this snapshot describes
    ///
    /// Fields the snapshot leaves undefined fall back to the given live
    /// values.
    pub fn customization(&self, fallback: &Customization) -> Customization {
        Customization {
            edge_kind: self.edge_kind.unwrap_or(fallback.edge_kind),
            background: self
                .background
                .clone()
                .unwrap_or_else(|| fallback.background.clone()),
            dot_color: self
                .dot_color
                .clone()
                .unwrap_or_else(|| fallback.dot_color.clone()),
            font_family: self
                .font_family
                .clone()
                .unwrap_or_else(|| fallback.font_family.clone()),
        }
    }
}
