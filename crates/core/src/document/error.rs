//! Structural errors raised by the tree model.
//!
//! Every variant is recoverable: the offending mutation is rejected and the
//! document it was applied to is left unchanged.

use super::block::BlockKind;
use super::node::NodeId;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TreeError {
    #[error("Node not found: {0}")]
    NodeNotFound(NodeId),

    #[error("Node {parent} cannot take children: {reason}")]
    InvalidParent {
        parent: NodeId,
        reason: &'static str,
    },

    #[error("Moving node {node} under {parent} would create a cycle")]
    Cycle { node: NodeId, parent: NodeId },

    #[error("Node {node} ({kind}) cannot be moved")]
    NotMoveable { node: NodeId, kind: BlockKind },

    #[error("Node {node} ({kind}) cannot be deleted")]
    NotDeletable { node: NodeId, kind: BlockKind },

    #[error("A document holds at most one {kind} block")]
    Singleton { kind: BlockKind },

    #[error("Node id {0} has already been used in this document")]
    DuplicateId(NodeId),

    #[error("Invalid props for {kind}: {message}")]
    InvalidProps { kind: BlockKind, message: String },

    #[error("Inconsistent tree: {0}")]
    Inconsistent(String),
}
