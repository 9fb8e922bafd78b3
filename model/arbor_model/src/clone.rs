//! The clone engine.
//!
//! [`Tree::clone_subtree`] produces a structurally equal, fully
//! independent copy of a subtree inside the same arena. Every node and
//! reference of the copy is a fresh table entry (a disjoint id range), and
//! every parent link inside the copy points at the corresponding copied
//! ancestor, never back into the source subtree.
//!
//! References are copied by value: the handle is duplicated, the
//! declaration it names is not touched. Resolving a copied reference
//! re-walks whatever ancestor chain holds it at call time, so a reference
//! left in the source tree keeps finding the source declaration no matter
//! how often its target has been cloned.

use crate::{NodeId, NodeKind, NodeList, NodeMap, NodeSet, RefId, Tree};

impl Tree {
    /// Deep-copy the subtree rooted at `root`; the copy's root is
    /// detached (`parent: None`).
    pub fn clone_subtree(&mut self, root: NodeId) -> NodeId {
        let copy = self.clone_node(root);
        tracing::trace!(src = ?root, dst = ?copy, "cloned subtree");
        copy
    }

    fn clone_node(&mut self, src: NodeId) -> NodeId {
        let label = self.node(src).label;
        // Shallow copy of the kind: fixed attributes by value, child and
        // reference ids still pointing into the source subtree. The match
        // below rebuilds each child field with cloned ids.
        let kind = self.node(src).kind.clone();
        let new_kind = match kind {
            NodeKind::Module { types, imports } => {
                let mut new_types = NodeMap::default();
                for &(key, value) in types.entries() {
                    let cloned = self.clone_node(value);
                    // Keys copied verbatim, values cloned.
                    new_types.insert(key, cloned);
                }
                let mut new_imports = NodeSet::default();
                for &(name, value) in imports.entries() {
                    let cloned = self.clone_node(value);
                    // Re-inserting applies the set's own uniqueness policy,
                    // so a structural duplicate coalesces exactly as a
                    // direct insertion would.
                    new_imports.insert(name, cloned);
                }
                NodeKind::Module {
                    types: new_types,
                    imports: new_imports,
                }
            }
            NodeKind::Import { path } => NodeKind::Import { path },
            NodeKind::Class { name, members } => NodeKind::Class {
                name,
                members: self.clone_list(&members),
            },
            NodeKind::Field { name, ty, default } => NodeKind::Field {
                name,
                ty,
                default: self.clone_slot(default),
            },
            NodeKind::Method {
                name,
                params,
                ret,
                body,
            } => NodeKind::Method {
                name,
                params: self.clone_list(&params),
                ret,
                body: self.clone_slot(body),
            },
            NodeKind::Constructor { params, body } => NodeKind::Constructor {
                params: self.clone_list(&params),
                body: self.clone_slot(body),
            },
            NodeKind::Param { name, ty } => NodeKind::Param { name, ty },
            NodeKind::Block { stmts } => NodeKind::Block {
                stmts: self.clone_list(&stmts),
            },
            NodeKind::LocalVar { name, ty, init } => NodeKind::LocalVar {
                name,
                ty,
                init: self.clone_slot(init),
            },
            NodeKind::VarRead { variable } => NodeKind::VarRead {
                variable: self.clone_ref(variable),
            },
            NodeKind::TypeAccess { ty } => NodeKind::TypeAccess {
                ty: self.clone_ref(ty),
            },
            NodeKind::ConstructorCall {
                target,
                executable,
                arguments,
            } => NodeKind::ConstructorCall {
                target: self.clone_slot(target),
                executable: executable.map(|reference| self.clone_ref(reference)),
                arguments: self.clone_list(&arguments),
            },
            NodeKind::Literal { value } => NodeKind::Literal { value },
        };
        // alloc() re-parents every embedded clone to the new node; the new
        // node itself stays detached until its own parent is allocated.
        let new_id = self.alloc(new_kind);
        self.node_mut(new_id).label = label;
        new_id
    }

    /// Clone an ordered child list. An unset or empty field clones to the
    /// unset sentinel, not a freshly allocated empty container.
    fn clone_list(&mut self, list: &NodeList) -> NodeList {
        if list.is_empty() {
            return NodeList::Unset;
        }
        let mut out = NodeList::Unset;
        for &child in list.as_slice() {
            let cloned = self.clone_node(child);
            out.push(cloned);
        }
        out
    }

    fn clone_slot(&mut self, slot: Option<NodeId>) -> Option<NodeId> {
        slot.map(|child| self.clone_node(child))
    }

    /// Copy a reference by value: fresh table entry, same name/signature,
    /// detached until its new holder is allocated. The declaration the
    /// reference denotes is never cloned through it.
    fn clone_ref(&mut self, src: RefId) -> RefId {
        let kind = self.reference(src).kind.clone();
        self.alloc_ref(kind)
    }
}
