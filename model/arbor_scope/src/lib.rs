//! Scope-walking reference resolution.
//!
//! [`resolve`] answers "which node declares the symbol this reference
//! names" by walking outward from the reference's holder through the
//! ancestor chain, scanning each enclosing scope for a matching
//! declaration. What counts as a match is the reference kind's own
//! predicate ([`RefKind::matches_decl`]); this crate only decides where to
//! look and in what order.
//!
//! The scope ladder, innermost first:
//!
//! - **Variable**: the enclosing block's local declarations strictly
//!   before the position the walk ascended from (nearest first, so the
//!   closest shadowing declaration wins), then the enclosing executable's
//!   parameters, then the enclosing class's fields, then outer classes.
//! - **Executable**: the enclosing class's members by signature, then the
//!   module's type of the referenced name and its members.
//! - **Type**: enclosing classes by name, then the module's type map,
//!   then imports by terminal path segment.
//!
//! Resolution is lazy, uncached and side-effect-free: every call re-walks
//! the chain that holds the reference *now*. After a clone, a reference
//! inside the copy finds the copied declaration while the original
//! reference keeps finding the original one; after tree surgery the next
//! call sees the new shape. A detached reference (freshly copied, not yet
//! attached) resolves to `None` — never a crash.

use arbor_model::{NodeId, NodeKind, RefId, RefKind, Tree};

/// Resolve a reference to its declaring node, or `None` when no matching
/// declaration is reachable from the reference's current position.
pub fn resolve(tree: &Tree, reference: RefId) -> Option<NodeId> {
    let entry = tree.try_reference(reference).ok()?;
    let holder = entry.parent?;
    let kind = &entry.kind;

    let mut from = holder;
    let mut scope = tree.parent(holder);
    while let Some(current) = scope {
        if let Some(decl) = scan_scope(tree, kind, current, from) {
            tracing::trace!(?reference, ?decl, "reference resolved");
            return Some(decl);
        }
        from = current;
        scope = tree.parent(current);
    }
    tracing::trace!(?reference, "reference unresolved");
    None
}

/// Scan one enclosing scope for a declaration matching `kind`. `from` is
/// the child the walk ascended out of, used to limit a block scan to
/// statements preceding the reference.
fn scan_scope(tree: &Tree, kind: &RefKind, scope: NodeId, from: NodeId) -> Option<NodeId> {
    match kind {
        RefKind::Variable { .. } => match &tree.node(scope).kind {
            NodeKind::Block { .. } => {
                let stmts = tree.statements(scope);
                let limit = stmts
                    .iter()
                    .position(|&stmt| stmt == from)
                    .unwrap_or(stmts.len());
                // Nearest preceding declaration wins.
                stmts[..limit]
                    .iter()
                    .rev()
                    .copied()
                    .find(|&stmt| kind.matches_decl(tree, stmt))
            }
            NodeKind::Method { .. } | NodeKind::Constructor { .. } => tree
                .params(scope)
                .iter()
                .copied()
                .find(|&param| kind.matches_decl(tree, param)),
            NodeKind::Class { .. } => tree
                .members(scope)
                .iter()
                .copied()
                .find(|&member| kind.matches_decl(tree, member)),
            _ => None,
        },
        RefKind::Executable { name, .. } => match &tree.node(scope).kind {
            NodeKind::Class { .. } => tree
                .members(scope)
                .iter()
                .copied()
                .find(|&member| kind.matches_decl(tree, member)),
            NodeKind::Module { .. } => {
                let class = tree.get_type(scope, *name)?;
                tree.members(class)
                    .iter()
                    .copied()
                    .find(|&member| kind.matches_decl(tree, member))
            }
            _ => None,
        },
        RefKind::Type { name } => match &tree.node(scope).kind {
            NodeKind::Class { .. } => kind.matches_decl(tree, scope).then_some(scope),
            NodeKind::Module { imports, .. } => tree.get_type(scope, *name).or_else(|| {
                imports
                    .iter()
                    .map(|&(_, import)| import)
                    .find(|&import| kind.matches_decl(tree, import))
            }),
            _ => None,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use arbor_model::NodeList;

    #[test]
    fn detached_reference_resolves_to_none() {
        let mut tree = Tree::new();
        let x = tree.intern("x");
        let reference = tree.alloc_ref(RefKind::Variable { name: x });
        assert_eq!(resolve(&tree, reference), None);
    }

    #[test]
    fn reference_with_orphan_holder_resolves_to_none() {
        let mut tree = Tree::new();
        let x = tree.intern("x");
        let reference = tree.alloc_ref(RefKind::Variable { name: x });
        // Holder exists but has no ancestors, so no scope declares x.
        let _read = tree.alloc(NodeKind::VarRead {
            variable: reference,
        });
        assert_eq!(resolve(&tree, reference), None);
    }

    #[test]
    fn declaring_statement_is_not_its_own_scope() {
        let mut tree = Tree::new();
        let x = tree.intern("x");
        let int_ty = tree.intern("int");
        let reference = tree.alloc_ref(RefKind::Variable { name: x });
        let read = tree.alloc(NodeKind::VarRead {
            variable: reference,
        });
        // int x = x; the init must not resolve to the declaration it
        // initializes.
        let decl = tree.alloc(NodeKind::LocalVar {
            name: x,
            ty: int_ty,
            init: Some(read),
        });
        let block = tree.alloc(NodeKind::Block {
            stmts: NodeList::default(),
        });
        if let Err(err) = tree.add_statement(block, decl) {
            panic!("add_statement failed: {err}");
        }
        assert_eq!(resolve(&tree, reference), None);
    }
}
