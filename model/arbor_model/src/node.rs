//! Node types for the code model.
//!
//! A [`Node`] is one unit of the tree: a parent back-link, an optional
//! label, and a [`NodeKind`] carrying the kind-specific fields. Child
//! fields hold [`NodeId`]s (singular or in a semantic container);
//! reference fields hold [`RefId`]s into the tree's reference table.
//!
//! The catalogue here is deliberately compact: enough declaration,
//! statement and expression kinds to give references a realistic scope
//! ladder to climb, with [`NodeKind::ConstructorCall`] as the fully
//! worked composite kind.

use smallvec::SmallVec;

use crate::{Name, NodeId, NodeList, NodeMap, NodeSet, RefId};

/// A unit of the code-model tree.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct Node {
    /// Back-link to the holding node; `None` for a root or orphan.
    ///
    /// Not an ownership edge: the tree's arena owns every node. Attach
    /// operations (`add_*`, `set_*`, insert, replace, clone) re-establish
    /// the invariant that an attached child's parent is its holder.
    pub parent: Option<NodeId>,
    /// Opaque tag with no semantic effect on resolution; preserved
    /// verbatim by clone and compared by equality.
    pub label: Option<Name>,
    pub kind: NodeKind,
}

impl Node {
    pub fn new(kind: NodeKind) -> Self {
        Node {
            parent: None,
            label: None,
            kind,
        }
    }
}

/// Node kinds.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub enum NodeKind {
    /// Compilation-unit root: types keyed by name, imports unique by name.
    Module { types: NodeMap, imports: NodeSet },

    /// Import declaration; the path is a dotted qualified name.
    Import { path: Name },

    /// Class declaration: fields, methods, constructors, nested classes.
    Class { name: Name, members: NodeList },

    /// Class-level field declaration.
    Field {
        name: Name,
        ty: Name,
        default: Option<NodeId>,
    },

    /// Method declaration.
    Method {
        name: Name,
        params: NodeList,
        ret: Option<Name>,
        body: Option<NodeId>,
    },

    /// Constructor declaration; its declared name is the enclosing class's.
    Constructor { params: NodeList, body: Option<NodeId> },

    /// Formal parameter declaration.
    Param { name: Name, ty: Name },

    /// Statement block.
    Block { stmts: NodeList },

    /// Local variable declaration statement.
    LocalVar {
        name: Name,
        ty: Name,
        init: Option<NodeId>,
    },

    /// Variable read expression holding a variable reference.
    VarRead { variable: RefId },

    /// Type access expression holding a type reference, e.g. the receiver
    /// of a static access or a class literal.
    TypeAccess { ty: RefId },

    /// Constructor-call expression: `new Foo(a, b)` or `outer.new Inner()`.
    ///
    /// The expression's type is derived from `executable`, never stored.
    ConstructorCall {
        /// Target expression for qualified forms; usually `None`.
        target: Option<NodeId>,
        /// Executable reference; nullable only transiently during build-up.
        executable: Option<RefId>,
        /// Ordered argument expressions; duplicates allowed.
        arguments: NodeList,
    },

    /// Leaf literal expression.
    Literal { value: Name },
}

impl NodeKind {
    /// One-word kind tag for error messages and logging.
    pub fn tag(&self) -> &'static str {
        match self {
            NodeKind::Module { .. } => "module",
            NodeKind::Import { .. } => "import",
            NodeKind::Class { .. } => "class",
            NodeKind::Field { .. } => "field",
            NodeKind::Method { .. } => "method",
            NodeKind::Constructor { .. } => "constructor",
            NodeKind::Param { .. } => "param",
            NodeKind::Block { .. } => "block",
            NodeKind::LocalVar { .. } => "local",
            NodeKind::VarRead { .. } => "var-read",
            NodeKind::TypeAccess { .. } => "type-access",
            NodeKind::ConstructorCall { .. } => "constructor-call",
            NodeKind::Literal { .. } => "literal",
        }
    }

    /// Collect every direct child node id, in traversal order.
    ///
    /// This is the single source of child enumeration: the visitor walk,
    /// the clone engine and the equality engine all follow this order, so
    /// each child is visited exactly once everywhere.
    pub fn child_ids(&self) -> SmallVec<[NodeId; 8]> {
        let mut out = SmallVec::new();
        match self {
            NodeKind::Module { types, imports } => {
                out.extend(types.iter().map(|&(_, id)| id));
                out.extend(imports.iter().map(|&(_, id)| id));
            }
            NodeKind::Class { members, .. } => out.extend(members.iter().copied()),
            NodeKind::Field { default: child, .. }
            | NodeKind::LocalVar { init: child, .. } => out.extend(child.iter().copied()),
            NodeKind::Method { params, body, .. } | NodeKind::Constructor { params, body } => {
                out.extend(params.iter().copied());
                out.extend(body.iter().copied());
            }
            NodeKind::Block { stmts } => out.extend(stmts.iter().copied()),
            NodeKind::ConstructorCall {
                target, arguments, ..
            } => {
                out.extend(target.iter().copied());
                out.extend(arguments.iter().copied());
            }
            NodeKind::Import { .. }
            | NodeKind::Param { .. }
            | NodeKind::VarRead { .. }
            | NodeKind::TypeAccess { .. }
            | NodeKind::Literal { .. } => {}
        }
        out
    }

    /// Collect every direct reference id held by this node.
    pub fn ref_ids(&self) -> SmallVec<[RefId; 2]> {
        let mut out = SmallVec::new();
        match self {
            NodeKind::VarRead { variable: reference } | NodeKind::TypeAccess { ty: reference } => {
                out.push(*reference);
            }
            NodeKind::ConstructorCall { executable, .. } => out.extend(executable.iter().copied()),
            _ => {}
        }
        out
    }

    /// The statement container, for kinds that have one.
    pub fn stmts(&self) -> Option<&NodeList> {
        match self {
            NodeKind::Block { stmts } => Some(stmts),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn child_ids_follow_field_order() {
        let mut arguments = NodeList::default();
        arguments.push(NodeId::new(5));
        arguments.push(NodeId::new(6));
        let kind = NodeKind::ConstructorCall {
            target: Some(NodeId::new(4)),
            executable: Some(RefId::new(0)),
            arguments,
        };
        let children: Vec<NodeId> = kind.child_ids().into_iter().collect();
        assert_eq!(
            children,
            vec![NodeId::new(4), NodeId::new(5), NodeId::new(6)]
        );
        let refs: Vec<RefId> = kind.ref_ids().into_iter().collect();
        assert_eq!(refs, vec![RefId::new(0)]);
    }

    #[test]
    fn leaves_have_no_children() {
        let kind = NodeKind::Literal { value: Name::EMPTY };
        assert!(kind.child_ids().is_empty());
        assert!(kind.ref_ids().is_empty());
    }

    #[test]
    fn unset_containers_enumerate_nothing() {
        let kind = NodeKind::ConstructorCall {
            target: None,
            executable: None,
            arguments: NodeList::default(),
        };
        assert!(kind.child_ids().is_empty());
        assert!(kind.ref_ids().is_empty());
    }
}
