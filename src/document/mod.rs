//! Document model: nodes, edges, document-wide style, snapshots
//!
//! The live [`DocumentState`] is owned by the surrounding editor session;
//! the history log stores only [`Snapshot`] copies of it.

mod edge;
mod node;
mod state;

pub use edge::{Edge, EdgeKind, EdgeStyle};
pub use node::{Node, NodeData, NodeKind, Position, RenderStyle};
pub use state::{Customization, CustomizationUpdate, DocumentState, Snapshot};
