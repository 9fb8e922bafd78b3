//! Arbor model — mutable code-model tree.
//!
//! This crate contains the core data structures of the Arbor code model:
//! - [`Tree`]: the arena owning every node and reference of one model
//! - [`Node`]/[`NodeKind`]: the polymorphic tree units, parent-linked
//! - [`RefEntry`]/[`RefKind`]: named handles to declarations
//! - Semantic containers with a lazily-allocated unset sentinel
//! - The clone engine ([`Tree::clone_subtree`]) and the equality engine
//!   ([`Tree::structurally_equal`])
//! - A [`Visitor`] for generic traversal
//!
//! # Design Philosophy
//!
//! - **Intern everything**: identifiers are [`Name`](crate::Name)s, 4 bytes,
//!   O(1) equality.
//! - **Flatten everything**: no boxed children; nodes address each other by
//!   [`NodeId`] into the tree's table, parents are back indices, so
//!   ownership stays acyclic and a clone occupies a disjoint id range.
//! - **Mutate through the tree**: every attach, splice and replace goes
//!   through a [`Tree`] method that re-establishes the parent invariant.
//!
//! Resolution of references to their declarations lives in the
//! `arbor_scope` crate; it is lazy and uncached by design, so it stays
//! correct across clones and tree surgery.

mod clone;
mod containers;
mod equals;
mod error;
mod ids;
mod name;
mod node;
mod reference;
mod tree;
pub mod visitor;

pub use containers::{NodeList, NodeMap, NodeSet};
pub use error::ModelError;
pub use ids::{NodeId, RefId};
pub use name::{Interner, Name, SharedInterner};
pub use node::{Node, NodeKind};
pub use reference::{ParamTypes, RefEntry, RefKind};
pub use tree::Tree;
pub use visitor::{walk_node, Visitor};
