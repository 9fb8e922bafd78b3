//! Semantic containers for node fields.
//!
//! Every container-typed field starts out holding the `Unset` sentinel and
//! allocates a private backing store only on the first real insertion.
//! `clear()` restores the sentinel, so "was this field ever set" stays
//! distinguishable from "this field is an allocated, currently empty
//! container" — a removal against the sentinel is a guaranteed no-op that
//! allocates nothing.
//!
//! Three shapes, matching the field semantics they back:
//! - [`NodeList`]: ordered, duplicates allowed (argument lists, statements,
//!   parameters, class members).
//! - [`NodeSet`]: insertion-ordered, unique by declared name; a duplicate
//!   name coalesces silently onto the existing entry (imports).
//! - [`NodeMap`]: keyed by name, insertion-ordered (a module's types).

use crate::{Name, NodeId};

/// Ordered child list. Order is significant, duplicates are allowed.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub enum NodeList {
    /// Shared unset sentinel: no backing store has been allocated.
    Unset,
    /// Privately allocated backing store.
    Alloc(Vec<NodeId>),
}

impl NodeList {
    /// True while the field still holds the unset sentinel.
    #[inline]
    pub const fn is_unset(&self) -> bool {
        matches!(self, NodeList::Unset)
    }

    pub fn len(&self) -> usize {
        match self {
            NodeList::Unset => 0,
            NodeList::Alloc(items) => items.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// View as a slice; the sentinel reads as empty.
    pub fn as_slice(&self) -> &[NodeId] {
        match self {
            NodeList::Unset => &[],
            NodeList::Alloc(items) => items,
        }
    }

    pub fn iter(&self) -> std::slice::Iter<'_, NodeId> {
        self.as_slice().iter()
    }

    /// Position of `id`, if present.
    pub fn position(&self, id: NodeId) -> Option<usize> {
        self.as_slice().iter().position(|&item| item == id)
    }

    /// Append, allocating the private store on first use.
    pub fn push(&mut self, id: NodeId) {
        self.alloc().push(id);
    }

    /// Insert at `index`, allocating the private store on first use.
    ///
    /// # Panics
    /// Panics if `index > len`, as `Vec::insert` does.
    pub fn insert(&mut self, index: usize, id: NodeId) {
        self.alloc().insert(index, id);
    }

    /// Remove the first occurrence of `id`.
    ///
    /// A no-op returning `false` while the field holds the sentinel: the
    /// identity check avoids allocating just to discover nothing is there.
    pub fn remove_item(&mut self, id: NodeId) -> bool {
        match self {
            NodeList::Unset => false,
            NodeList::Alloc(items) => match items.iter().position(|&item| item == id) {
                Some(index) => {
                    items.remove(index);
                    true
                }
                None => false,
            },
        }
    }

    /// Drop the backing store and restore the unset sentinel.
    pub fn clear(&mut self) {
        *self = NodeList::Unset;
    }

    fn alloc(&mut self) -> &mut Vec<NodeId> {
        if self.is_unset() {
            *self = NodeList::Alloc(Vec::new());
        }
        match self {
            NodeList::Alloc(items) => items,
            NodeList::Unset => unreachable!("just allocated"),
        }
    }
}

impl Default for NodeList {
    fn default() -> Self {
        NodeList::Unset
    }
}

impl<'a> IntoIterator for &'a NodeList {
    type Item = &'a NodeId;
    type IntoIter = std::slice::Iter<'a, NodeId>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Insertion-ordered set, unique by declared name.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub enum NodeSet {
    Unset,
    Alloc(Vec<(Name, NodeId)>),
}

impl NodeSet {
    #[inline]
    pub const fn is_unset(&self) -> bool {
        matches!(self, NodeSet::Unset)
    }

    pub fn len(&self) -> usize {
        self.entries().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries().is_empty()
    }

    pub fn entries(&self) -> &[(Name, NodeId)] {
        match self {
            NodeSet::Unset => &[],
            NodeSet::Alloc(entries) => entries,
        }
    }

    pub fn iter(&self) -> std::slice::Iter<'_, (Name, NodeId)> {
        self.entries().iter()
    }

    pub fn get(&self, name: Name) -> Option<NodeId> {
        self.entries()
            .iter()
            .find(|&&(entry_name, _)| entry_name == name)
            .map(|&(_, id)| id)
    }

    /// Insert unless the name is already present.
    ///
    /// Returns `false` when the insertion coalesced onto an existing entry;
    /// the existing entry wins, matching set semantics under clone.
    pub fn insert(&mut self, name: Name, id: NodeId) -> bool {
        if self.get(name).is_some() {
            return false;
        }
        if self.is_unset() {
            *self = NodeSet::Alloc(Vec::new());
        }
        match self {
            NodeSet::Alloc(entries) => entries.push((name, id)),
            NodeSet::Unset => unreachable!("just allocated"),
        }
        true
    }

    /// Remove by name. A no-op while the field holds the sentinel.
    pub fn remove(&mut self, name: Name) -> Option<NodeId> {
        match self {
            NodeSet::Unset => None,
            NodeSet::Alloc(entries) => {
                let index = entries.iter().position(|&(entry_name, _)| entry_name == name)?;
                Some(entries.remove(index).1)
            }
        }
    }

    /// Replace the node stored under an existing name, in place.
    pub fn replace_value(&mut self, old: NodeId, new: NodeId) -> bool {
        match self {
            NodeSet::Unset => false,
            NodeSet::Alloc(entries) => {
                for entry in entries.iter_mut() {
                    if entry.1 == old {
                        entry.1 = new;
                        return true;
                    }
                }
                false
            }
        }
    }

    pub fn clear(&mut self) {
        *self = NodeSet::Unset;
    }
}

impl Default for NodeSet {
    fn default() -> Self {
        NodeSet::Unset
    }
}

/// Insertion-ordered map keyed by name.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub enum NodeMap {
    Unset,
    Alloc(Vec<(Name, NodeId)>),
}

impl NodeMap {
    #[inline]
    pub const fn is_unset(&self) -> bool {
        matches!(self, NodeMap::Unset)
    }

    pub fn len(&self) -> usize {
        self.entries().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries().is_empty()
    }

    pub fn entries(&self) -> &[(Name, NodeId)] {
        match self {
            NodeMap::Unset => &[],
            NodeMap::Alloc(entries) => entries,
        }
    }

    pub fn iter(&self) -> std::slice::Iter<'_, (Name, NodeId)> {
        self.entries().iter()
    }

    pub fn get(&self, key: Name) -> Option<NodeId> {
        self.entries()
            .iter()
            .find(|&&(entry_key, _)| entry_key == key)
            .map(|&(_, id)| id)
    }

    /// Insert under `key`, replacing and returning any previous value.
    pub fn insert(&mut self, key: Name, id: NodeId) -> Option<NodeId> {
        if self.is_unset() {
            *self = NodeMap::Alloc(Vec::new());
        }
        match self {
            NodeMap::Alloc(entries) => {
                for entry in entries.iter_mut() {
                    if entry.0 == key {
                        return Some(std::mem::replace(&mut entry.1, id));
                    }
                }
                entries.push((key, id));
                None
            }
            NodeMap::Unset => unreachable!("just allocated"),
        }
    }

    /// Remove by key. A no-op while the field holds the sentinel.
    pub fn remove(&mut self, key: Name) -> Option<NodeId> {
        match self {
            NodeMap::Unset => None,
            NodeMap::Alloc(entries) => {
                let index = entries.iter().position(|&(entry_key, _)| entry_key == key)?;
                Some(entries.remove(index).1)
            }
        }
    }

    pub fn replace_value(&mut self, old: NodeId, new: NodeId) -> bool {
        match self {
            NodeMap::Unset => false,
            NodeMap::Alloc(entries) => {
                for entry in entries.iter_mut() {
                    if entry.1 == old {
                        entry.1 = new;
                        return true;
                    }
                }
                false
            }
        }
    }

    pub fn clear(&mut self) {
        *self = NodeMap::Unset;
    }
}

impl Default for NodeMap {
    fn default() -> Self {
        NodeMap::Unset
    }
}
