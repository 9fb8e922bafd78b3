//! Model errors.
//!
//! Absent values (unset fields, unresolved references, empty containers)
//! are `Option`s, never errors. `ModelError` covers structural misuse and
//! inconsistent trees; every variant names the offending id so a failure
//! deep in a traversal stays attributable.

use thiserror::Error;

use crate::{NodeId, RefId};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ModelError {
    /// An id that does not point into this tree's node table.
    #[error("node {0:?} is not part of this tree")]
    DanglingNode(NodeId),

    /// An id that does not point into this tree's reference table.
    #[error("reference {0:?} is not part of this tree")]
    DanglingRef(RefId),

    /// An operation that needs an enclosing parent hit a detached node.
    #[error("node {0:?} has no parent")]
    Detached(NodeId),

    /// Statement insertion relative to a node whose parent holds no
    /// statement container.
    #[error("parent of node {0:?} is not a statement context")]
    NotAStatementContext(NodeId),

    /// The parent does not actually hold the node in any of its slots;
    /// the tree is inconsistent.
    #[error("node {child:?} is recorded under parent {parent:?} but occupies none of its slots")]
    NotAChild { parent: NodeId, child: NodeId },

    /// The node's kind does not support the attempted operation.
    #[error("node {id:?} is a {kind}, which does not support this operation")]
    WrongKind { id: NodeId, kind: &'static str },
}
