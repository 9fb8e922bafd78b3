//! The tree arena.
//!
//! [`Tree`] owns every node and every reference entry of one code model.
//! Children and parents are stored as ids into the two tables, so parent
//! back-links can never form an ownership cycle and a cloned subtree is a
//! fresh, disjoint id range.
//!
//! All mutation goes through `Tree` methods, each of which re-establishes
//! the parent invariant: once attached, a child's `parent` equals its
//! holder. The tree is single-writer and single-threaded; read-only
//! traversals (clone, equality, resolution) may run concurrently over a
//! tree nobody is mutating.

use std::sync::Arc;

use crate::{
    Interner, ModelError, Name, Node, NodeId, NodeKind, RefEntry, RefId, RefKind, SharedInterner,
};

pub struct Tree {
    nodes: Vec<Node>,
    refs: Vec<RefEntry>,
    interner: SharedInterner,
}

impl Tree {
    pub fn new() -> Self {
        Self::with_interner(Arc::new(Interner::new()))
    }

    /// Create a tree sharing an existing interner, keeping its names
    /// comparable with other trees built over the same interner.
    pub fn with_interner(interner: SharedInterner) -> Self {
        Tree {
            nodes: Vec::new(),
            refs: Vec::new(),
            interner,
        }
    }

    pub fn interner(&self) -> &SharedInterner {
        &self.interner
    }

    pub fn intern(&self, s: &str) -> Name {
        self.interner.intern(s)
    }

    pub fn lookup(&self, name: Name) -> Option<Arc<str>> {
        self.interner.resolve(name)
    }

    /// Number of nodes ever allocated, including orphaned ones.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    // Allocation

    /// Allocate a node.
    ///
    /// Any child ids and reference ids already embedded in `kind` are
    /// re-parented to the new node, so building bottom-up establishes the
    /// parent invariant without a separate attach step.
    pub fn alloc(&mut self, kind: NodeKind) -> NodeId {
        let id = NodeId::new(to_u32(self.nodes.len()));
        let children = kind.child_ids();
        let ref_children = kind.ref_ids();
        self.nodes.push(Node::new(kind));
        for child in children {
            self.nodes[child.index()].parent = Some(id);
        }
        for reference in ref_children {
            self.refs[reference.index()].parent = Some(id);
        }
        id
    }

    /// Allocate a reference entry. It starts detached; attaching it to a
    /// holder (via [`Tree::alloc`] or a setter) fills in its parent.
    pub fn alloc_ref(&mut self, kind: RefKind) -> RefId {
        let id = RefId::new(to_u32(self.refs.len()));
        self.refs.push(RefEntry::new(kind));
        id
    }

    // Access

    /// Get a node.
    ///
    /// # Panics
    /// Panics if `id` is not part of this tree; use [`Tree::try_node`]
    /// where an attributable error is wanted instead.
    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.index()]
    }

    pub fn try_node(&self, id: NodeId) -> Result<&Node, ModelError> {
        self.nodes.get(id.index()).ok_or(ModelError::DanglingNode(id))
    }

    pub fn reference(&self, id: RefId) -> &RefEntry {
        &self.refs[id.index()]
    }

    pub fn try_reference(&self, id: RefId) -> Result<&RefEntry, ModelError> {
        self.refs.get(id.index()).ok_or(ModelError::DanglingRef(id))
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.node(id).parent
    }

    pub fn label(&self, id: NodeId) -> Option<Name> {
        self.node(id).label
    }

    pub fn set_label(&mut self, id: NodeId, label: Option<Name>) {
        self.nodes[id.index()].label = label;
    }

    /// The name a node declares, if it is a declaration.
    ///
    /// A constructor's declared name is its enclosing class's name, so a
    /// detached constructor declares nothing.
    pub fn declared_name(&self, id: NodeId) -> Option<Name> {
        match self.node(id).kind {
            NodeKind::Class { name, .. }
            | NodeKind::Field { name, .. }
            | NodeKind::Method { name, .. }
            | NodeKind::Param { name, .. }
            | NodeKind::LocalVar { name, .. } => Some(name),
            NodeKind::Constructor { .. } => {
                let class = self.parent(id)?;
                match self.node(class).kind {
                    NodeKind::Class { name, .. } => Some(name),
                    _ => None,
                }
            }
            _ => None,
        }
    }

    pub(crate) fn node_mut(&mut self, id: NodeId) -> &mut Node {
        &mut self.nodes[id.index()]
    }

    pub(crate) fn ref_mut(&mut self, id: RefId) -> &mut RefEntry {
        &mut self.refs[id.index()]
    }

    fn wrong_kind(&self, id: NodeId) -> ModelError {
        ModelError::WrongKind {
            id,
            kind: self.node(id).kind.tag(),
        }
    }

    // Module operations

    /// Attach a class to a module, keyed by its declared name.
    pub fn add_type(&mut self, module: NodeId, class: NodeId) -> Result<(), ModelError> {
        self.try_node(module)?;
        let key = self
            .declared_name(class)
            .ok_or_else(|| self.wrong_kind(class))?;
        match &mut self.node_mut(module).kind {
            NodeKind::Module { types, .. } => {
                types.insert(key, class);
            }
            _ => return Err(self.wrong_kind(module)),
        }
        self.node_mut(class).parent = Some(module);
        Ok(())
    }

    pub fn get_type(&self, module: NodeId, name: Name) -> Option<NodeId> {
        match &self.node(module).kind {
            NodeKind::Module { types, .. } => types.get(name),
            _ => None,
        }
    }

    /// Attach an import; a duplicate path coalesces and returns `false`.
    pub fn add_import(&mut self, module: NodeId, import: NodeId) -> Result<bool, ModelError> {
        self.try_node(module)?;
        let path = match self.node(import).kind {
            NodeKind::Import { path } => path,
            _ => return Err(self.wrong_kind(import)),
        };
        let inserted = match &mut self.node_mut(module).kind {
            NodeKind::Module { imports, .. } => imports.insert(path, import),
            _ => return Err(self.wrong_kind(module)),
        };
        if inserted {
            self.node_mut(import).parent = Some(module);
        }
        Ok(inserted)
    }

    // Class operations

    pub fn add_member(&mut self, class: NodeId, member: NodeId) -> Result<(), ModelError> {
        self.try_node(class)?;
        self.try_node(member)?;
        match &mut self.node_mut(class).kind {
            NodeKind::Class { members, .. } => members.push(member),
            _ => return Err(self.wrong_kind(class)),
        }
        self.node_mut(member).parent = Some(class);
        Ok(())
    }

    /// A class's members; any other kind reads as empty.
    pub fn members(&self, class: NodeId) -> &[NodeId] {
        match &self.node(class).kind {
            NodeKind::Class { members, .. } => members.as_slice(),
            _ => &[],
        }
    }

    // Executable operations (methods and constructors)

    pub fn add_param(&mut self, executable: NodeId, param: NodeId) -> Result<(), ModelError> {
        self.try_node(executable)?;
        self.try_node(param)?;
        match &mut self.node_mut(executable).kind {
            NodeKind::Method { params, .. } | NodeKind::Constructor { params, .. } => {
                params.push(param);
            }
            _ => return Err(self.wrong_kind(executable)),
        }
        self.node_mut(param).parent = Some(executable);
        Ok(())
    }

    pub fn params(&self, executable: NodeId) -> &[NodeId] {
        match &self.node(executable).kind {
            NodeKind::Method { params, .. } | NodeKind::Constructor { params, .. } => {
                params.as_slice()
            }
            _ => &[],
        }
    }

    pub fn set_body(&mut self, executable: NodeId, body: Option<NodeId>) -> Result<(), ModelError> {
        self.try_node(executable)?;
        match &mut self.node_mut(executable).kind {
            NodeKind::Method { body: slot, .. } | NodeKind::Constructor { body: slot, .. } => {
                *slot = body;
            }
            _ => return Err(self.wrong_kind(executable)),
        }
        if let Some(body) = body {
            self.node_mut(body).parent = Some(executable);
        }
        Ok(())
    }

    pub fn body(&self, executable: NodeId) -> Option<NodeId> {
        match self.node(executable).kind {
            NodeKind::Method { body, .. } | NodeKind::Constructor { body, .. } => body,
            _ => None,
        }
    }

    // Block operations

    pub fn add_statement(&mut self, block: NodeId, stmt: NodeId) -> Result<(), ModelError> {
        self.try_node(block)?;
        self.try_node(stmt)?;
        match &mut self.node_mut(block).kind {
            NodeKind::Block { stmts } => stmts.push(stmt),
            _ => return Err(self.wrong_kind(block)),
        }
        self.node_mut(stmt).parent = Some(block);
        Ok(())
    }

    pub fn statements(&self, block: NodeId) -> &[NodeId] {
        match &self.node(block).kind {
            NodeKind::Block { stmts } => stmts.as_slice(),
            _ => &[],
        }
    }

    // Local variable / field operations

    pub fn set_init(&mut self, local: NodeId, init: Option<NodeId>) -> Result<(), ModelError> {
        self.try_node(local)?;
        match &mut self.node_mut(local).kind {
            NodeKind::LocalVar { init: slot, .. } => *slot = init,
            _ => return Err(self.wrong_kind(local)),
        }
        if let Some(init) = init {
            self.node_mut(init).parent = Some(local);
        }
        Ok(())
    }

    pub fn set_default(&mut self, field: NodeId, default: Option<NodeId>) -> Result<(), ModelError> {
        self.try_node(field)?;
        match &mut self.node_mut(field).kind {
            NodeKind::Field { default: slot, .. } => *slot = default,
            _ => return Err(self.wrong_kind(field)),
        }
        if let Some(default) = default {
            self.node_mut(default).parent = Some(field);
        }
        Ok(())
    }

    // Constructor-call operations

    pub fn set_target(&mut self, call: NodeId, target: Option<NodeId>) -> Result<(), ModelError> {
        self.try_node(call)?;
        match &mut self.node_mut(call).kind {
            NodeKind::ConstructorCall { target: slot, .. } => *slot = target,
            _ => return Err(self.wrong_kind(call)),
        }
        if let Some(target) = target {
            self.node_mut(target).parent = Some(call);
        }
        Ok(())
    }

    pub fn call_target(&self, call: NodeId) -> Option<NodeId> {
        match self.node(call).kind {
            NodeKind::ConstructorCall { target, .. } => target,
            _ => None,
        }
    }

    pub fn set_executable(
        &mut self,
        call: NodeId,
        executable: Option<RefId>,
    ) -> Result<(), ModelError> {
        self.try_node(call)?;
        if let Some(reference) = executable {
            self.try_reference(reference)?;
        }
        match &mut self.node_mut(call).kind {
            NodeKind::ConstructorCall { executable: slot, .. } => *slot = executable,
            _ => return Err(self.wrong_kind(call)),
        }
        if let Some(reference) = executable {
            self.ref_mut(reference).parent = Some(call);
        }
        Ok(())
    }

    pub fn call_executable(&self, call: NodeId) -> Option<RefId> {
        match self.node(call).kind {
            NodeKind::ConstructorCall { executable, .. } => executable,
            _ => None,
        }
    }

    /// Append an argument. `None` is a permissive no-op so optional and
    /// variadic call sites need no null checks of their own.
    pub fn add_argument(
        &mut self,
        call: NodeId,
        argument: Option<NodeId>,
    ) -> Result<(), ModelError> {
        self.try_node(call)?;
        let Some(argument) = argument else {
            return Ok(());
        };
        self.try_node(argument)?;
        match &mut self.node_mut(call).kind {
            NodeKind::ConstructorCall { arguments, .. } => arguments.push(argument),
            _ => return Err(self.wrong_kind(call)),
        }
        self.node_mut(argument).parent = Some(call);
        Ok(())
    }

    /// Remove an argument by id. While the argument list still holds the
    /// unset sentinel this is a no-op that allocates nothing.
    pub fn remove_argument(&mut self, call: NodeId, argument: NodeId) -> Result<bool, ModelError> {
        self.try_node(call)?;
        let removed = match &mut self.node_mut(call).kind {
            NodeKind::ConstructorCall { arguments, .. } => arguments.remove_item(argument),
            _ => return Err(self.wrong_kind(call)),
        };
        if removed {
            self.node_mut(argument).parent = None;
        }
        Ok(removed)
    }

    /// Replace the whole argument list. An empty replacement restores the
    /// unset sentinel.
    pub fn set_arguments(&mut self, call: NodeId, arguments: &[NodeId]) -> Result<(), ModelError> {
        self.try_node(call)?;
        match &mut self.node_mut(call).kind {
            NodeKind::ConstructorCall { arguments: slot, .. } => slot.clear(),
            _ => return Err(self.wrong_kind(call)),
        }
        for &argument in arguments {
            self.add_argument(call, Some(argument))?;
        }
        Ok(())
    }

    pub fn arguments(&self, call: NodeId) -> &[NodeId] {
        match &self.node(call).kind {
            NodeKind::ConstructorCall { arguments, .. } => arguments.as_slice(),
            _ => &[],
        }
    }

    // Derived accessors, forwarded to the executable reference.
    //
    // A constructor call's type is the executable's return type; it is
    // derived, never stored. Forwarding is null-safe in both directions:
    // reads yield a neutral absent value and writes are no-ops while the
    // executable is unset.

    pub fn call_type(&self, call: NodeId) -> Option<Name> {
        let executable = self.call_executable(call)?;
        match self.reference(executable).kind {
            RefKind::Executable { ret, .. } => ret,
            _ => None,
        }
    }

    pub fn set_call_type(&mut self, call: NodeId, ty: Name) -> Result<(), ModelError> {
        self.try_node(call)?;
        let Some(executable) = self.call_executable(call) else {
            return Ok(());
        };
        if let RefKind::Executable { ret, .. } = &mut self.ref_mut(executable).kind {
            *ret = Some(ty);
        }
        Ok(())
    }

    pub fn call_type_args(&self, call: NodeId) -> &[Name] {
        let Some(executable) = self.call_executable(call) else {
            return &[];
        };
        match &self.reference(executable).kind {
            RefKind::Executable { type_args, .. } => type_args.as_slice(),
            _ => &[],
        }
    }

    pub fn add_call_type_arg(&mut self, call: NodeId, ty: Name) -> Result<(), ModelError> {
        self.try_node(call)?;
        let Some(executable) = self.call_executable(call) else {
            return Ok(());
        };
        if let RefKind::Executable { type_args, .. } = &mut self.ref_mut(executable).kind {
            type_args.push(ty);
        }
        Ok(())
    }

    pub fn remove_call_type_arg(&mut self, call: NodeId, ty: Name) -> Result<bool, ModelError> {
        self.try_node(call)?;
        let Some(executable) = self.call_executable(call) else {
            return Ok(false);
        };
        if let RefKind::Executable { type_args, .. } = &mut self.ref_mut(executable).kind {
            if let Some(index) = type_args.iter().position(|&arg| arg == ty) {
                type_args.remove(index);
                return Ok(true);
            }
        }
        Ok(false)
    }

    // Statement surgery

    /// Splice a statement into the anchor's enclosing statement list,
    /// immediately before the anchor.
    pub fn insert_before(&mut self, anchor: NodeId, stmt: NodeId) -> Result<(), ModelError> {
        self.insert_all_at(anchor, &[stmt], 0)
    }

    /// Splice a statement in immediately after the anchor.
    pub fn insert_after(&mut self, anchor: NodeId, stmt: NodeId) -> Result<(), ModelError> {
        self.insert_all_at(anchor, &[stmt], 1)
    }

    /// Splice a run of statements in before the anchor, preserving their
    /// relative order.
    pub fn insert_all_before(&mut self, anchor: NodeId, stmts: &[NodeId]) -> Result<(), ModelError> {
        self.insert_all_at(anchor, stmts, 0)
    }

    /// Splice a run of statements in after the anchor, preserving their
    /// relative order.
    pub fn insert_all_after(&mut self, anchor: NodeId, stmts: &[NodeId]) -> Result<(), ModelError> {
        self.insert_all_at(anchor, stmts, 1)
    }

    fn insert_all_at(
        &mut self,
        anchor: NodeId,
        stmts: &[NodeId],
        offset: usize,
    ) -> Result<(), ModelError> {
        self.try_node(anchor)?;
        let parent = self.parent(anchor).ok_or(ModelError::Detached(anchor))?;
        let position = {
            let list = self
                .node(parent)
                .kind
                .stmts()
                .ok_or(ModelError::NotAStatementContext(anchor))?;
            list.position(anchor)
                .ok_or(ModelError::NotAChild { parent, child: anchor })?
        };
        match &mut self.node_mut(parent).kind {
            NodeKind::Block { stmts: list } => {
                for (extra, &stmt) in stmts.iter().enumerate() {
                    list.insert(position + offset + extra, stmt);
                }
            }
            _ => return Err(ModelError::NotAStatementContext(anchor)),
        }
        for &stmt in stmts {
            self.node_mut(stmt).parent = Some(parent);
        }
        Ok(())
    }

    /// Swap `old` for `new` at whatever slot `old` occupies in its parent:
    /// a singular child field, a list position, a set entry or a map
    /// entry. `new` is re-parented and `old` orphaned.
    pub fn replace(&mut self, old: NodeId, new: NodeId) -> Result<(), ModelError> {
        self.try_node(old)?;
        self.try_node(new)?;
        let parent = self.parent(old).ok_or(ModelError::Detached(old))?;
        let swapped = match &mut self.node_mut(parent).kind {
            NodeKind::Module { types, imports } => {
                types.replace_value(old, new) || imports.replace_value(old, new)
            }
            NodeKind::Class { members, .. } => replace_in_list(members, old, new),
            NodeKind::Field { default: slot, .. }
            | NodeKind::LocalVar { init: slot, .. } => replace_in_slot(slot, old, new),
            NodeKind::Method { params, body, .. } | NodeKind::Constructor { params, body } => {
                replace_in_list(params, old, new) || replace_in_slot(body, old, new)
            }
            NodeKind::Block { stmts } => replace_in_list(stmts, old, new),
            NodeKind::ConstructorCall {
                target, arguments, ..
            } => replace_in_slot(target, old, new) || replace_in_list(arguments, old, new),
            NodeKind::Import { .. }
            | NodeKind::Param { .. }
            | NodeKind::VarRead { .. }
            | NodeKind::TypeAccess { .. }
            | NodeKind::Literal { .. } => false,
        };
        if !swapped {
            return Err(ModelError::NotAChild { parent, child: old });
        }
        self.node_mut(new).parent = Some(parent);
        self.node_mut(old).parent = None;
        Ok(())
    }
}

impl Default for Tree {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for Tree {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Tree")
            .field("nodes", &self.nodes.len())
            .field("refs", &self.refs.len())
            .finish()
    }
}

fn replace_in_list(list: &mut crate::NodeList, old: NodeId, new: NodeId) -> bool {
    match list.position(old) {
        Some(index) => {
            list.remove_item(old);
            list.insert(index, new);
            true
        }
        None => false,
    }
}

fn replace_in_slot(slot: &mut Option<NodeId>, old: NodeId, new: NodeId) -> bool {
    if *slot == Some(old) {
        *slot = Some(new);
        true
    } else {
        false
    }
}

fn to_u32(len: usize) -> u32 {
    u32::try_from(len).unwrap_or_else(|_| panic!("tree table overflow at {len} entries"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::NodeList;
    use pretty_assertions::assert_eq;

    fn call_with_args(tree: &mut Tree, arg_names: &[&str]) -> (NodeId, Vec<NodeId>) {
        let args: Vec<NodeId> = arg_names
            .iter()
            .map(|&name| {
                let value = tree.intern(name);
                tree.alloc(NodeKind::Literal { value })
            })
            .collect();
        let call = tree.alloc(NodeKind::ConstructorCall {
            target: None,
            executable: None,
            arguments: NodeList::default(),
        });
        for &arg in &args {
            if let Err(err) = tree.add_argument(call, Some(arg)) {
                panic!("add_argument failed: {err}");
            }
        }
        (call, args)
    }

    #[test]
    fn alloc_reparents_embedded_children() {
        let mut tree = Tree::new();
        let value = tree.intern("1");
        let lit = tree.alloc(NodeKind::Literal { value });
        let mut arguments = NodeList::default();
        arguments.push(lit);
        let call = tree.alloc(NodeKind::ConstructorCall {
            target: None,
            executable: None,
            arguments,
        });
        assert_eq!(tree.parent(lit), Some(call));
    }

    #[test]
    fn add_argument_reparents() {
        let mut tree = Tree::new();
        let (call, args) = call_with_args(&mut tree, &["a", "b"]);
        assert_eq!(tree.arguments(call), &args[..]);
        for &arg in &args {
            assert_eq!(tree.parent(arg), Some(call));
        }
    }

    #[test]
    fn add_argument_none_is_noop() {
        let mut tree = Tree::new();
        let (call, _) = call_with_args(&mut tree, &["a"]);
        assert_eq!(tree.add_argument(call, None), Ok(()));
        assert_eq!(tree.arguments(call).len(), 1);
    }

    #[test]
    fn remove_argument_on_sentinel_does_not_allocate() {
        let mut tree = Tree::new();
        let (call, _) = call_with_args(&mut tree, &[]);
        let value = tree.intern("x");
        let stray = tree.alloc(NodeKind::Literal { value });
        assert_eq!(tree.remove_argument(call, stray), Ok(false));
        match &tree.node(call).kind {
            NodeKind::ConstructorCall { arguments, .. } => assert!(arguments.is_unset()),
            other => panic!("unexpected kind {other:?}"),
        }
    }

    #[test]
    fn set_arguments_empty_restores_sentinel() {
        let mut tree = Tree::new();
        let (call, _) = call_with_args(&mut tree, &["a", "b"]);
        assert_eq!(tree.set_arguments(call, &[]), Ok(()));
        match &tree.node(call).kind {
            NodeKind::ConstructorCall { arguments, .. } => assert!(arguments.is_unset()),
            other => panic!("unexpected kind {other:?}"),
        }
    }

    #[test]
    fn call_type_forwards_to_executable() {
        let mut tree = Tree::new();
        let (call, _) = call_with_args(&mut tree, &[]);
        let foo = tree.intern("Foo");
        let int_ty = tree.intern("int");

        // Unset executable: read is absent, write is a no-op.
        assert_eq!(tree.call_type(call), None);
        assert_eq!(tree.set_call_type(call, foo), Ok(()));
        assert_eq!(tree.call_type(call), None);
        assert_eq!(tree.call_type_args(call), &[]);
        assert_eq!(tree.add_call_type_arg(call, int_ty), Ok(()));
        assert_eq!(tree.remove_call_type_arg(call, int_ty), Ok(false));

        let exec = tree.alloc_ref(RefKind::executable(foo, [int_ty], None));
        assert_eq!(tree.set_executable(call, Some(exec)), Ok(()));
        assert_eq!(tree.reference(exec).parent, Some(call));

        assert_eq!(tree.set_call_type(call, foo), Ok(()));
        assert_eq!(tree.call_type(call), Some(foo));
        assert_eq!(tree.add_call_type_arg(call, int_ty), Ok(()));
        assert_eq!(tree.call_type_args(call), &[int_ty]);
        assert_eq!(tree.remove_call_type_arg(call, int_ty), Ok(true));
        assert_eq!(tree.call_type_args(call), &[]);
    }

    #[test]
    fn insert_before_and_after_preserve_order() {
        let mut tree = Tree::new();
        let names: Vec<Name> = ["a", "b", "c"].iter().map(|&s| tree.intern(s)).collect();
        let int_ty = tree.intern("int");
        let stmts: Vec<NodeId> = names
            .iter()
            .map(|&name| {
                tree.alloc(NodeKind::LocalVar {
                    name,
                    ty: int_ty,
                    init: None,
                })
            })
            .collect();
        let block = tree.alloc(NodeKind::Block {
            stmts: NodeList::default(),
        });
        if let Err(err) = tree.add_statement(block, stmts[1]) {
            panic!("add_statement failed: {err}");
        }
        assert_eq!(tree.insert_before(stmts[1], stmts[0]), Ok(()));
        assert_eq!(tree.insert_after(stmts[1], stmts[2]), Ok(()));
        assert_eq!(tree.statements(block), &stmts[..]);
        for &stmt in &stmts {
            assert_eq!(tree.parent(stmt), Some(block));
        }
    }

    #[test]
    fn insert_all_before_preserves_run_order() {
        let mut tree = Tree::new();
        let int_ty = tree.intern("int");
        let mk = |tree: &mut Tree, s: &str| {
            let name = tree.intern(s);
            tree.alloc(NodeKind::LocalVar {
                name,
                ty: int_ty,
                init: None,
            })
        };
        let anchor = mk(&mut tree, "z");
        let block = tree.alloc(NodeKind::Block {
            stmts: NodeList::default(),
        });
        if let Err(err) = tree.add_statement(block, anchor) {
            panic!("add_statement failed: {err}");
        }
        let first = mk(&mut tree, "a");
        let second = mk(&mut tree, "b");
        assert_eq!(tree.insert_all_before(anchor, &[first, second]), Ok(()));
        assert_eq!(tree.statements(block), &[first, second, anchor]);
    }

    #[test]
    fn insert_before_detached_anchor_errors() {
        let mut tree = Tree::new();
        let name = tree.intern("a");
        let int_ty = tree.intern("int");
        let loose = tree.alloc(NodeKind::LocalVar {
            name,
            ty: int_ty,
            init: None,
        });
        let other = tree.alloc(NodeKind::LocalVar {
            name,
            ty: int_ty,
            init: None,
        });
        assert_eq!(
            tree.insert_before(loose, other),
            Err(ModelError::Detached(loose))
        );
    }

    #[test]
    fn replace_in_list_slot() {
        let mut tree = Tree::new();
        let (call, args) = call_with_args(&mut tree, &["a", "b"]);
        let value = tree.intern("c");
        let replacement = tree.alloc(NodeKind::Literal { value });
        assert_eq!(tree.replace(args[0], replacement), Ok(()));
        assert_eq!(tree.arguments(call), &[replacement, args[1]]);
        assert_eq!(tree.parent(replacement), Some(call));
        assert_eq!(tree.parent(args[0]), None);
    }

    #[test]
    fn replace_in_singular_slot() {
        let mut tree = Tree::new();
        let name = tree.intern("x");
        let int_ty = tree.intern("int");
        let one = tree.intern("1");
        let two = tree.intern("2");
        let init = tree.alloc(NodeKind::Literal { value: one });
        let local = tree.alloc(NodeKind::LocalVar {
            name,
            ty: int_ty,
            init: Some(init),
        });
        let replacement = tree.alloc(NodeKind::Literal { value: two });
        assert_eq!(tree.replace(init, replacement), Ok(()));
        match tree.node(local).kind {
            NodeKind::LocalVar { init: slot, .. } => assert_eq!(slot, Some(replacement)),
            ref other => panic!("unexpected kind {other:?}"),
        }
        assert_eq!(tree.parent(replacement), Some(local));
    }

    #[test]
    fn replace_in_map_slot() {
        let mut tree = Tree::new();
        let module = tree.alloc(NodeKind::Module {
            types: crate::NodeMap::default(),
            imports: crate::NodeSet::default(),
        });
        let foo = tree.intern("Foo");
        let class = tree.alloc(NodeKind::Class {
            name: foo,
            members: NodeList::default(),
        });
        if let Err(err) = tree.add_type(module, class) {
            panic!("add_type failed: {err}");
        }
        let rewritten = tree.alloc(NodeKind::Class {
            name: foo,
            members: NodeList::default(),
        });
        assert_eq!(tree.replace(class, rewritten), Ok(()));
        assert_eq!(tree.get_type(module, foo), Some(rewritten));
        assert_eq!(tree.parent(class), None);
    }

    #[test]
    fn duplicate_import_coalesces() {
        let mut tree = Tree::new();
        let module = tree.alloc(NodeKind::Module {
            types: crate::NodeMap::default(),
            imports: crate::NodeSet::default(),
        });
        let path = tree.intern("java.util.List");
        let first = tree.alloc(NodeKind::Import { path });
        let second = tree.alloc(NodeKind::Import { path });
        assert_eq!(tree.add_import(module, first), Ok(true));
        assert_eq!(tree.add_import(module, second), Ok(false));
        // The coalesced duplicate is not adopted.
        assert_eq!(tree.parent(second), None);
    }

    #[test]
    fn try_node_attributes_dangling_ids() {
        let tree = Tree::new();
        let bogus = NodeId::new(9);
        match tree.try_node(bogus) {
            Err(ModelError::DanglingNode(id)) => assert_eq!(id, bogus),
            other => panic!("unexpected result {other:?}"),
        }
    }

    #[test]
    fn declared_name_of_constructor_is_class_name() {
        let mut tree = Tree::new();
        let foo = tree.intern("Foo");
        let class = tree.alloc(NodeKind::Class {
            name: foo,
            members: NodeList::default(),
        });
        let ctor = tree.alloc(NodeKind::Constructor {
            params: NodeList::default(),
            body: None,
        });
        assert_eq!(tree.declared_name(ctor), None);
        if let Err(err) = tree.add_member(class, ctor) {
            panic!("add_member failed: {err}");
        }
        assert_eq!(tree.declared_name(ctor), Some(foo));
    }
}
