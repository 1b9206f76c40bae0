//! Change records emitted by the diff engine

use crate::document::{CustomizationUpdate, Edge, Node};
use crate::{EdgeID, NodeID};
use serde::{Deserialize, Serialize};

/// One minimal change between two document states
///
/// Node changes carry the full node so a peer can apply them without the
/// rest of the document. Edge changes are create/delete only: an edge's
/// identity is fixed once created, so a changed edge is modeled as
/// delete-plus-create at the call site.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ChangeRecord {
    NodeCreated(Node),
    NodeUpdated(Node),
    NodeDeleted(NodeID),
    EdgeCreated(Edge),
    EdgeDeleted(EdgeID),
    CustomizationChanged(CustomizationUpdate),
}

impl ChangeRecord {
    /// True for the delete variants
    pub fn is_delete(&self) -> bool {
        matches!(
            self,
            ChangeRecord::NodeDeleted(_) | ChangeRecord::EdgeDeleted(_)
        )
    }
}
