//! State-diff engine
//!
//! Pure functions that compare two document states and emit the minimal set
//! of [`ChangeRecord`]s describing the transition. No state of their own and
//! no side effects; callers decide whether and where the records go.
//!
//! Record order is part of the contract: deletes come before creates and
//! updates, and node changes come before edge changes, so a peer applying
//! records in arrival order never creates an edge whose endpoints do not
//! exist yet.
//!
//! # Example
//!
//! ```
//! use mindmesh_core::diff::{diff_nodes, ChangeRecord};
//! use mindmesh_core::{Node, Position};
//!
//! let a = Node::new("topic", Position { x: 0.0, y: 0.0 });
//! let mut moved = a.clone();
//! moved.position = Position { x: 50.0, y: 0.0 };
//!
//! let records = diff_nodes(&[a], &[moved.clone()]);
//! assert_eq!(records, vec![ChangeRecord::NodeUpdated(moved)]);
//! ```

mod record;

pub use record::ChangeRecord;

use crate::document::{Edge, Node};
use std::collections::{HashMap, HashSet};

/// Diff two node lists
///
/// Emits `NodeDeleted` for ids only in `prev` (in `prev` order), then
/// `NodeCreated` and `NodeUpdated` for new or changed ids (in `next`
/// order). Updates are detected with [`Node::content_eq`], so changes to
/// renderer-local fields never produce a record.
pub fn diff_nodes(prev: &[Node], next: &[Node]) -> Vec<ChangeRecord> {
    let prev_by_id: HashMap<&str, &Node> = prev.iter().map(|n| (n.id.as_str(), n)).collect();
    let next_ids: HashSet<&str> = next.iter().map(|n| n.id.as_str()).collect();

    let mut records = Vec::new();

    for node in prev {
        if !next_ids.contains(node.id.as_str()) {
            records.push(ChangeRecord::NodeDeleted(node.id.clone()));
        }
    }

    for node in next {
        match prev_by_id.get(node.id.as_str()) {
            None => records.push(ChangeRecord::NodeCreated(node.clone())),
            Some(existing) if !existing.content_eq(node) => {
                records.push(ChangeRecord::NodeUpdated(node.clone()))
            }
            Some(_) => {}
        }
    }

    records
}

/// Diff two edge lists by id-set difference
///
/// Emits `EdgeDeleted` for ids only in `prev` (in `prev` order), then
/// `EdgeCreated` for ids only in `next` (in `next` order). No update
/// detection: edge identity is invariant once created.
pub fn diff_edges(prev: &[Edge], next: &[Edge]) -> Vec<ChangeRecord> {
    let prev_ids: HashSet<&str> = prev.iter().map(|e| e.id.as_str()).collect();
    let next_ids: HashSet<&str> = next.iter().map(|e| e.id.as_str()).collect();

    let mut records = Vec::new();

    for edge in prev {
        if !next_ids.contains(edge.id.as_str()) {
            records.push(ChangeRecord::EdgeDeleted(edge.id.clone()));
        }
    }

    for edge in next {
        if !prev_ids.contains(edge.id.as_str()) {
            records.push(ChangeRecord::EdgeCreated(edge.clone()));
        }
    }

    records
}

/// Diff a full document transition
///
/// Concatenates node and edge diffs in publish order: node deletes, node
/// creates/updates, edge deletes, edge creates. Customization is diffed
/// separately (see [`Customization::diff`](crate::Customization::diff))
/// because it is one consolidated record, not per-entity.
pub fn diff_documents(
    prev_nodes: &[Node],
    prev_edges: &[Edge],
    next_nodes: &[Node],
    next_edges: &[Edge],
) -> Vec<ChangeRecord> {
    let mut records = diff_nodes(prev_nodes, next_nodes);
    records.extend(diff_edges(prev_edges, next_edges));
    records
}
