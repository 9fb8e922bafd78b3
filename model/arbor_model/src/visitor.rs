//! Tree visitor.
//!
//! Generic traversal over the arena-backed tree. Override `visit_*`
//! methods for custom behavior at specific nodes; call [`walk_node`] to
//! continue into children. The visitor may mutate its own state; the tree
//! stays immutable during traversal.
//!
//! Children are enumerated through [`NodeKind::child_ids`] and
//! [`NodeKind::ref_ids`], so every child of every node is visited exactly
//! once, depth-first, left-to-right — the same order the clone and
//! equality engines use.
//!
//! [`NodeKind::child_ids`]: crate::NodeKind::child_ids
//! [`NodeKind::ref_ids`]: crate::NodeKind::ref_ids

use crate::{NodeId, RefId, Tree};

pub trait Visitor {
    /// Visit a node. The default walks into its children and references.
    fn visit_node(&mut self, id: NodeId, tree: &Tree) {
        walk_node(self, id, tree);
    }

    /// Visit a reference held by a node. References have no children.
    fn visit_reference(&mut self, id: RefId, tree: &Tree) {
        let _ = (id, tree);
    }
}

/// Walk a node's references and children in field order.
pub fn walk_node<V: Visitor + ?Sized>(visitor: &mut V, id: NodeId, tree: &Tree) {
    let kind = &tree.node(id).kind;
    for reference in kind.ref_ids() {
        visitor.visit_reference(reference, tree);
    }
    for child in kind.child_ids() {
        visitor.visit_node(child, tree);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{NodeKind, NodeList, RefKind};

    /// Visitor that counts nodes.
    struct NodeCounter {
        count: usize,
    }

    impl Visitor for NodeCounter {
        fn visit_node(&mut self, id: NodeId, tree: &Tree) {
            self.count += 1;
            walk_node(self, id, tree);
        }
    }

    /// Visitor that collects every reference in traversal order.
    struct RefCollector {
        refs: Vec<RefId>,
    }

    impl Visitor for RefCollector {
        fn visit_reference(&mut self, id: RefId, _tree: &Tree) {
            self.refs.push(id);
        }
    }

    #[test]
    fn counts_whole_subtree() {
        let mut tree = Tree::new();
        let one = tree.intern("1");
        let two = tree.intern("2");
        let a = tree.alloc(NodeKind::Literal { value: one });
        let b = tree.alloc(NodeKind::Literal { value: two });
        let call = tree.alloc(NodeKind::ConstructorCall {
            target: None,
            executable: None,
            arguments: NodeList::default(),
        });
        for arg in [a, b] {
            if let Err(err) = tree.add_argument(call, Some(arg)) {
                panic!("add_argument failed: {err}");
            }
        }

        let mut counter = NodeCounter { count: 0 };
        counter.visit_node(call, &tree);
        assert_eq!(counter.count, 3); // call + both arguments
    }

    #[test]
    fn collects_references() {
        let mut tree = Tree::new();
        let x = tree.intern("x");
        let foo = tree.intern("Foo");
        let var_ref = tree.alloc_ref(RefKind::Variable { name: x });
        let read = tree.alloc(NodeKind::VarRead { variable: var_ref });
        let exec = tree.alloc_ref(RefKind::executable(foo, [], Some(foo)));
        let call = tree.alloc(NodeKind::ConstructorCall {
            target: None,
            executable: Some(exec),
            arguments: NodeList::default(),
        });
        if let Err(err) = tree.add_argument(call, Some(read)) {
            panic!("add_argument failed: {err}");
        }

        let mut collector = RefCollector { refs: vec![] };
        collector.visit_node(call, &tree);
        assert_eq!(collector.refs, vec![exec, var_ref]);
    }

    #[test]
    fn empty_block_visits_only_itself() {
        let mut tree = Tree::new();
        let block = tree.alloc(NodeKind::Block {
            stmts: NodeList::default(),
        });
        let mut counter = NodeCounter { count: 0 };
        counter.visit_node(block, &tree);
        assert_eq!(counter.count, 1);
    }
}
