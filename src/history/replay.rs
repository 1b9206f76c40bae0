//! Forward replay of one action over a snapshot
//!
//! Reconstruction resolves almost every history index by snapshot lookup;
//! only the newest entry needs its action re-simulated, because the stored
//! snapshot predates that action's own effect. [`replay`] is that
//! simulation: one exhaustive match applying an action's forward effect to a
//! working copy of its "before" snapshot. The same table drives fresh edits
//! in [`EditorSession::apply`](crate::EditorSession::apply), so live editing
//! and reconstruction cannot drift apart.

use crate::document::{Edge, Snapshot};
use crate::history::EditAction;
use crate::NodeID;
use std::collections::{HashMap, HashSet, VecDeque};
use tracing::debug;

/// Apply one action's forward effect to a working snapshot
pub(crate) fn replay(edit: &EditAction, snapshot: &mut Snapshot) {
    match edit {
        EditAction::MoveNode { positions } => {
            for node in &mut snapshot.nodes {
                if let Some(position) = positions.get(&node.id) {
                    node.position = *position;
                }
            }
        }

        EditAction::ResizeNode {
            node_id,
            width,
            height,
        } => {
            if let Some(node) = snapshot.nodes.iter_mut().find(|n| &n.id == node_id) {
                // Numeric dimensions and rendered style move in lockstep.
                node.width = Some(*width);
                node.height = Some(*height);
                node.style.width = Some(*width);
                node.style.height = Some(*height);
            }
        }

        EditAction::ConnectNodes {
            edge,
            replaced_edge_id,
        } => {
            if let Some(replaced) = replaced_edge_id {
                snapshot.edges.retain(|e| &e.id != replaced);
            }
            snapshot.edges.push(edge.clone());
            // Routing type is a document-wide style; every edge carries it.
            if let Some(kind) = snapshot.edge_kind {
                for edge in &mut snapshot.edges {
                    edge.kind = kind;
                }
            }
        }

        EditAction::DisconnectNodes { node_id } => {
            snapshot
                .edges
                .retain(|e| &e.source != node_id && &e.target != node_id);
        }

        EditAction::DeleteNode {
            node_id,
            affected_nodes,
        } => {
            let removed: HashSet<NodeID> = match affected_nodes {
                Some(ids) => ids.iter().cloned().collect(),
                None => descendants(node_id, &snapshot.edges),
            };
            snapshot.nodes.retain(|n| !removed.contains(&n.id));
            snapshot
                .edges
                .retain(|e| !removed.contains(&e.source) && !removed.contains(&e.target));
        }

        EditAction::UpdateNode {
            node_id,
            label,
            affected_nodes,
        } => {
            let mut targets: HashSet<&str> = HashSet::new();
            targets.insert(node_id.as_str());
            if let Some(ids) = affected_nodes {
                targets.extend(ids.iter().map(String::as_str));
            }
            for node in &mut snapshot.nodes {
                if targets.contains(node.id.as_str()) {
                    node.data.label = label.clone();
                }
            }
        }

        EditAction::AddNode { nodes } => {
            if let Some(nodes) = nodes {
                snapshot.nodes = nodes.clone();
            }
        }

        EditAction::UpdateTitle { label } => {
            snapshot.title = Some(label.clone().unwrap_or_default());
        }

        EditAction::UpdateCustomization(update) => {
            if let Some(kind) = update.edge_kind {
                snapshot.edge_kind = Some(kind);
                for edge in &mut snapshot.edges {
                    edge.kind = kind;
                }
            }
            if let Some(background) = &update.background {
                snapshot.background = Some(background.clone());
            }
            if let Some(dot_color) = &update.dot_color {
                snapshot.dot_color = Some(dot_color.clone());
            }
            if let Some(font_family) = &update.font_family {
                snapshot.font_family = Some(font_family.clone());
            }
        }

        EditAction::DrawingChange { drawing } | EditAction::MoveStroke { drawing } => {
            if let Some(drawing) = drawing {
                snapshot.drawing = Some(drawing.clone());
            }
        }

        EditAction::Unknown => {
            // Newer editors may log types this version cannot replay; the
            // snapshot passes through unchanged.
            debug!("unknown action type, snapshot passed through unchanged");
        }
    }
}

/// Breadth-first descendant set over the source-to-target adjacency
///
/// Includes `root` itself. Cycles are handled by the visited set.
fn descendants(root: &str, edges: &[Edge]) -> HashSet<NodeID> {
    let mut adjacency: HashMap<&str, Vec<&str>> = HashMap::new();
    for edge in edges {
        adjacency
            .entry(edge.source.as_str())
            .or_default()
            .push(edge.target.as_str());
    }

    let mut visited: HashSet<NodeID> = HashSet::new();
    visited.insert(root.to_string());
    let mut queue: VecDeque<&str> = VecDeque::new();
    queue.push_back(root);

    while let Some(id) = queue.pop_front() {
        if let Some(children) = adjacency.get(id) {
            for &child in children {
                if visited.insert(child.to_string()) {
                    queue.push_back(child);
                }
            }
        }
    }

    visited
}
