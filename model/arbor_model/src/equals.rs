//! The equality engine.
//!
//! Structural (deep) equality over subtrees: same kind, same fixed
//! attributes, same label, references compared by name/signature, children
//! compared recursively in the visitor's child order. Parent links are
//! excluded: equality is about subtree content, not tree position.
//!
//! Serves as the clone engine's oracle and as a general model-comparison
//! primitive. Terminates on any finite tree; structurally equal but
//! distinct sibling subtrees are fine, no global node identity is assumed.

use crate::{NodeId, NodeKind, NodeList, RefId, Tree};

impl Tree {
    pub fn structurally_equal(&self, a: NodeId, b: NodeId) -> bool {
        if a == b {
            return true;
        }
        let node_a = self.node(a);
        let node_b = self.node(b);
        if node_a.label != node_b.label {
            return false;
        }
        match (&node_a.kind, &node_b.kind) {
            (
                NodeKind::Module {
                    types: types_a,
                    imports: imports_a,
                },
                NodeKind::Module {
                    types: types_b,
                    imports: imports_b,
                },
            ) => {
                self.entries_equal(types_a.entries(), types_b.entries())
                    && self.entries_equal(imports_a.entries(), imports_b.entries())
            }
            (NodeKind::Import { path: a }, NodeKind::Import { path: b }) => a == b,
            (
                NodeKind::Class {
                    name: name_a,
                    members: members_a,
                },
                NodeKind::Class {
                    name: name_b,
                    members: members_b,
                },
            ) => name_a == name_b && self.lists_equal(members_a, members_b),
            (
                NodeKind::Field {
                    name: name_a,
                    ty: ty_a,
                    default: default_a,
                },
                NodeKind::Field {
                    name: name_b,
                    ty: ty_b,
                    default: default_b,
                },
            ) => name_a == name_b && ty_a == ty_b && self.slots_equal(*default_a, *default_b),
            (
                NodeKind::Method {
                    name: name_a,
                    params: params_a,
                    ret: ret_a,
                    body: body_a,
                },
                NodeKind::Method {
                    name: name_b,
                    params: params_b,
                    ret: ret_b,
                    body: body_b,
                },
            ) => {
                name_a == name_b
                    && ret_a == ret_b
                    && self.lists_equal(params_a, params_b)
                    && self.slots_equal(*body_a, *body_b)
            }
            (
                NodeKind::Constructor {
                    params: params_a,
                    body: body_a,
                },
                NodeKind::Constructor {
                    params: params_b,
                    body: body_b,
                },
            ) => self.lists_equal(params_a, params_b) && self.slots_equal(*body_a, *body_b),
            (
                NodeKind::Param {
                    name: name_a,
                    ty: ty_a,
                },
                NodeKind::Param {
                    name: name_b,
                    ty: ty_b,
                },
            ) => name_a == name_b && ty_a == ty_b,
            (NodeKind::Block { stmts: stmts_a }, NodeKind::Block { stmts: stmts_b }) => {
                self.lists_equal(stmts_a, stmts_b)
            }
            (
                NodeKind::LocalVar {
                    name: name_a,
                    ty: ty_a,
                    init: init_a,
                },
                NodeKind::LocalVar {
                    name: name_b,
                    ty: ty_b,
                    init: init_b,
                },
            ) => name_a == name_b && ty_a == ty_b && self.slots_equal(*init_a, *init_b),
            (
                NodeKind::VarRead { variable: var_a },
                NodeKind::VarRead { variable: var_b },
            ) => self.refs_equal(*var_a, *var_b),
            (NodeKind::TypeAccess { ty: ty_a }, NodeKind::TypeAccess { ty: ty_b }) => {
                self.refs_equal(*ty_a, *ty_b)
            }
            (
                NodeKind::ConstructorCall {
                    target: target_a,
                    executable: exec_a,
                    arguments: args_a,
                },
                NodeKind::ConstructorCall {
                    target: target_b,
                    executable: exec_b,
                    arguments: args_b,
                },
            ) => {
                self.slots_equal(*target_a, *target_b)
                    && self.ref_slots_equal(*exec_a, *exec_b)
                    && self.lists_equal(args_a, args_b)
            }
            (NodeKind::Literal { value: a }, NodeKind::Literal { value: b }) => a == b,
            _ => false,
        }
    }

    /// References are equal by value: same name and signature. Their
    /// holders are irrelevant, as parents are everywhere else.
    pub fn refs_equal(&self, a: RefId, b: RefId) -> bool {
        a == b || self.reference(a).kind == self.reference(b).kind
    }

    fn ref_slots_equal(&self, a: Option<RefId>, b: Option<RefId>) -> bool {
        match (a, b) {
            (None, None) => true,
            (Some(a), Some(b)) => self.refs_equal(a, b),
            _ => false,
        }
    }

    fn slots_equal(&self, a: Option<NodeId>, b: Option<NodeId>) -> bool {
        match (a, b) {
            (None, None) => true,
            (Some(a), Some(b)) => self.structurally_equal(a, b),
            _ => false,
        }
    }

    /// Lists compare by content: an unset field and an allocated empty
    /// container are structurally equal, only identity tells them apart.
    fn lists_equal(&self, a: &NodeList, b: &NodeList) -> bool {
        let a = a.as_slice();
        let b = b.as_slice();
        a.len() == b.len()
            && a.iter()
                .zip(b)
                .all(|(&child_a, &child_b)| self.structurally_equal(child_a, child_b))
    }

    fn entries_equal(&self, a: &[(crate::Name, NodeId)], b: &[(crate::Name, NodeId)]) -> bool {
        a.len() == b.len()
            && a.iter().zip(b).all(|(&(key_a, value_a), &(key_b, value_b))| {
                key_a == key_b && self.structurally_equal(value_a, value_b)
            })
    }
}
