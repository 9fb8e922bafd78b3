//! References: named handles to declarations.
//!
//! A reference never owns the node it denotes; the relation is purely
//! nominal (name for variables and types, name plus parameter types for
//! executables). References live in the tree's reference table so each one
//! carries its own holder link, distinct from the declaration it resolves
//! to. Copying a reference duplicates the handle, never the declaration.

use smallvec::SmallVec;

use crate::{Name, NodeId, NodeKind, Tree};

/// Parameter-type signature of an executable reference.
pub type ParamTypes = SmallVec<[Name; 4]>;

/// Entry in a tree's reference table.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct RefEntry {
    /// The node holding this reference as a field; `None` while the
    /// reference has been created or copied but not yet attached.
    pub parent: Option<NodeId>,
    pub kind: RefKind,
}

impl RefEntry {
    pub fn new(kind: RefKind) -> Self {
        RefEntry { parent: None, kind }
    }
}

/// Reference kinds, each with its own notion of a matching declaration.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub enum RefKind {
    /// Reference to a variable: parameter, local, or field.
    Variable { name: Name },

    /// Reference to an executable, matched by name and parameter types.
    ///
    /// For a constructor the name is the constructed type and `ret`
    /// equals it. `type_args` carries explicit generics arguments; they
    /// do not take part in signature matching.
    Executable {
        name: Name,
        params: ParamTypes,
        ret: Option<Name>,
        type_args: SmallVec<[Name; 2]>,
    },

    /// Reference to a type by simple name.
    Type { name: Name },
}

impl RefKind {
    /// Convenience constructor for a plain executable reference.
    pub fn executable(name: Name, params: impl IntoIterator<Item = Name>, ret: Option<Name>) -> Self {
        RefKind::Executable {
            name,
            params: params.into_iter().collect(),
            ret,
            type_args: SmallVec::new(),
        }
    }

    /// The referenced simple name.
    pub fn name(&self) -> Name {
        match self {
            RefKind::Variable { name }
            | RefKind::Executable { name, .. }
            | RefKind::Type { name } => *name,
        }
    }

    /// Does `decl` declare the symbol this reference names?
    ///
    /// This is the pluggable "what counts as a matching declaration"
    /// predicate: the scope resolver decides where to look, this decides
    /// whether a candidate binds the reference.
    pub fn matches_decl(&self, tree: &Tree, decl: NodeId) -> bool {
        let node = tree.node(decl);
        match self {
            RefKind::Variable { name } => matches!(
                node.kind,
                NodeKind::Param { name: decl_name, .. }
                | NodeKind::LocalVar { name: decl_name, .. }
                | NodeKind::Field { name: decl_name, .. }
                if decl_name == *name
            ),
            RefKind::Executable { name, params, .. } => match &node.kind {
                NodeKind::Method {
                    name: decl_name,
                    params: decl_params,
                    ..
                } => decl_name == name && param_types_match(tree, decl_params.as_slice(), params),
                NodeKind::Constructor {
                    params: decl_params,
                    ..
                } => {
                    // A constructor's declared name is its class's name.
                    tree.declared_name(decl) == Some(*name)
                        && param_types_match(tree, decl_params.as_slice(), params)
                }
                _ => false,
            },
            RefKind::Type { name } => match &node.kind {
                NodeKind::Class { name: decl_name, .. } => decl_name == name,
                NodeKind::Import { path } => {
                    // An import matches on the terminal segment of its path.
                    let Some(path_str) = tree.lookup(*path) else {
                        return false;
                    };
                    let terminal = path_str.rsplit('.').next().unwrap_or_default();
                    tree.lookup(*name).as_deref() == Some(terminal)
                }
                _ => false,
            },
        }
    }
}

fn param_types_match(tree: &Tree, decl_params: &[NodeId], want: &[Name]) -> bool {
    if decl_params.len() != want.len() {
        return false;
    }
    decl_params
        .iter()
        .zip(want)
        .all(|(&param_id, &want_ty)| match tree.node(param_id).kind {
            NodeKind::Param { ty, .. } => ty == want_ty,
            _ => false,
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Tree;

    #[test]
    fn variable_matches_param_local_and_field() {
        let mut tree = Tree::new();
        let name = tree.intern("x");
        let int_ty = tree.intern("int");
        let param = tree.alloc(NodeKind::Param { name, ty: int_ty });
        let local = tree.alloc(NodeKind::LocalVar {
            name,
            ty: int_ty,
            init: None,
        });
        let other = tree.alloc(NodeKind::Param {
            name: tree.intern("y"),
            ty: int_ty,
        });

        let var_ref = RefKind::Variable { name };
        assert!(var_ref.matches_decl(&tree, param));
        assert!(var_ref.matches_decl(&tree, local));
        assert!(!var_ref.matches_decl(&tree, other));
    }

    #[test]
    fn executable_matches_on_signature() {
        let mut tree = Tree::new();
        let int_ty = tree.intern("int");
        let method_name = tree.intern("make");
        let method = tree.alloc(NodeKind::Method {
            name: method_name,
            params: crate::NodeList::default(),
            ret: Some(int_ty),
            body: None,
        });
        let param = tree.alloc(NodeKind::Param {
            name: tree.intern("a"),
            ty: int_ty,
        });
        if let Err(err) = tree.add_param(method, param) {
            panic!("add_param failed: {err}");
        }

        let matching = RefKind::executable(method_name, [int_ty], Some(int_ty));
        let wrong_arity = RefKind::executable(method_name, [int_ty, int_ty], Some(int_ty));
        assert!(matching.matches_decl(&tree, method));
        assert!(!wrong_arity.matches_decl(&tree, method));
    }

    #[test]
    fn import_matches_terminal_segment() {
        let mut tree = Tree::new();
        let path = tree.intern("java.util.List");
        let import = tree.alloc(NodeKind::Import { path });
        let list = tree.intern("List");
        let util = tree.intern("util");
        assert!(RefKind::Type { name: list }.matches_decl(&tree, import));
        assert!(!RefKind::Type { name: util }.matches_decl(&tree, import));
    }
}
