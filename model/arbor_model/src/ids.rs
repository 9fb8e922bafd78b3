//! Node and reference IDs for the arena-backed tree.
//!
//! Nodes and references are stored in growable tables inside [`Tree`] and
//! addressed by index. Indices instead of owning pointers keep parent
//! back-links acyclic for free and make clone independence checkable: a
//! cloned subtree occupies a disjoint id range.
//!
//! [`Tree`]: crate::Tree

use std::fmt;

/// Index into the node table of a [`Tree`](crate::Tree).
///
/// - Memory: 4 bytes
/// - Equality: O(1) integer compare
/// - Cache locality: indices into a contiguous array
#[derive(Copy, Clone, Eq, PartialEq, Hash)]
#[repr(transparent)]
pub struct NodeId(u32);

impl NodeId {
    /// Invalid node ID (sentinel value).
    pub const INVALID: NodeId = NodeId(u32::MAX);

    /// Create a new `NodeId`.
    #[inline]
    pub const fn new(index: u32) -> Self {
        NodeId(index)
    }

    /// Get the index into the node table.
    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// Get the raw u32 value.
    #[inline]
    pub const fn raw(self) -> u32 {
        self.0
    }

    /// Check if this is a valid ID.
    #[inline]
    pub const fn is_valid(self) -> bool {
        self.0 != u32::MAX
    }
}

impl fmt::Debug for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_valid() {
            write!(f, "NodeId({})", self.0)
        } else {
            write!(f, "NodeId::INVALID")
        }
    }
}

impl Default for NodeId {
    fn default() -> Self {
        Self::INVALID
    }
}

/// Index into the reference table of a [`Tree`](crate::Tree).
///
/// References are kept out of the node table: a reference is a named handle
/// held by a node, not a node itself, and its holder link lives on the
/// table entry.
#[derive(Copy, Clone, Eq, PartialEq, Hash)]
#[repr(transparent)]
pub struct RefId(u32);

impl RefId {
    pub const INVALID: RefId = RefId(u32::MAX);

    #[inline]
    pub const fn new(index: u32) -> Self {
        RefId(index)
    }

    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    #[inline]
    pub const fn raw(self) -> u32 {
        self.0
    }

    #[inline]
    pub const fn is_valid(self) -> bool {
        self.0 != u32::MAX
    }
}

impl fmt::Debug for RefId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_valid() {
            write!(f, "RefId({})", self.0)
        } else {
            write!(f, "RefId::INVALID")
        }
    }
}

impl Default for RefId {
    fn default() -> Self {
        Self::INVALID
    }
}
