//! Variable scopes.
//!
//! A query runs against the innermost scope of an owned chain. The resolver
//! only reads scopes, with one exception: the wormhole, a one-shot side
//! channel the caller uses to mark the assignment target of the current
//! statement. Each wormhole slot is read at most once per query and cleared
//! on read, so a stale flag can never leak into an unrelated query. Scopes
//! are owned by the calling context for the duration of one query and are
//! not meant to be shared across concurrent queries.

use crate::ast::ExprId;
use crate::interner::Atom;
use crate::member::MethodId;
use crate::types::{ClassId, TypeRef};
use rustc_hash::FxHashMap;
use std::cell::Cell;

/// What is currently known about a name at a point in the scope chain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VariableInfo {
    pub name: Atom,
    pub ty: TypeRef,
    pub declaring_type: TypeRef,
}

/// One-shot caller-to-resolver side channel.
#[derive(Debug, Default)]
pub struct Wormhole {
    lhs: Cell<Option<ExprId>>,
}

impl Wormhole {
    /// Marks `node` as the left-hand side of the enclosing assignment.
    pub fn mark_lhs(&self, node: ExprId) {
        self.lhs.set(Some(node));
    }

    /// Non-consuming read. Only declaring-type inference uses this; the
    /// evaluator consumes the flag later in the same query.
    pub fn peek_lhs(&self) -> Option<ExprId> {
        self.lhs.get()
    }

    /// Consuming read; the slot is cleared.
    pub fn take_lhs(&self) -> Option<ExprId> {
        self.lhs.take()
    }
}

/// A chained lexical/dynamic scope.
#[derive(Debug, Default)]
pub struct VariableScope {
    parent: Option<Box<VariableScope>>,
    names: FxHashMap<Atom, VariableInfo>,
    enclosing_type: Option<ClassId>,
    enclosing_method: Option<MethodId>,
    this_type: Option<TypeRef>,
    delegate_type: Option<TypeRef>,
    static_scope: bool,
    /// Argument types at the enclosing call site; `Some` iff the node under
    /// resolution sits in method-call position.
    call_argument_types: Option<Vec<ClassId>>,
    script_run_body: bool,
    /// Syntactic parent of the node under resolution, when known.
    current_node: Option<ExprId>,
    wormhole: Wormhole,
}

impl VariableScope {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a child scope, inheriting the enclosing context flags.
    pub fn child(self) -> Self {
        Self {
            enclosing_type: self.enclosing_type,
            enclosing_method: self.enclosing_method,
            this_type: self.this_type.clone(),
            delegate_type: self.delegate_type.clone(),
            static_scope: self.static_scope,
            script_run_body: self.script_run_body,
            parent: Some(Box::new(self)),
            names: FxHashMap::default(),
            call_argument_types: None,
            current_node: None,
            wormhole: Wormhole::default(),
        }
    }

    // -------------------------------------------------------------------------
    // Construction
    // -------------------------------------------------------------------------

    pub fn declare(&mut self, info: VariableInfo) {
        self.names.insert(info.name, info);
    }

    pub fn set_enclosing_type(&mut self, class: ClassId) {
        self.enclosing_type = Some(class);
    }

    pub fn set_enclosing_method(&mut self, method: MethodId) {
        self.enclosing_method = Some(method);
    }

    pub fn set_this_type(&mut self, ty: TypeRef) {
        self.this_type = Some(ty);
    }

    pub fn set_delegate_type(&mut self, ty: TypeRef) {
        self.delegate_type = Some(ty);
    }

    pub fn set_static(&mut self, static_scope: bool) {
        self.static_scope = static_scope;
    }

    pub fn set_call_argument_types(&mut self, args: Vec<ClassId>) {
        self.call_argument_types = Some(args);
    }

    pub fn set_script_run_body(&mut self, script: bool) {
        self.script_run_body = script;
    }

    pub fn set_current_node(&mut self, node: ExprId) {
        self.current_node = Some(node);
    }

    // -------------------------------------------------------------------------
    // Queries
    // -------------------------------------------------------------------------

    /// Searches the chain innermost to outermost.
    pub fn lookup_name(&self, name: Atom) -> Option<&VariableInfo> {
        if let Some(info) = self.names.get(&name) {
            return Some(info);
        }
        self.parent.as_deref()?.lookup_name(name)
    }

    /// Searches this scope only, no chain walk.
    pub fn lookup_name_in_current_scope(&self, name: Atom) -> Option<&VariableInfo> {
        self.names.get(&name)
    }

    pub fn enclosing_type_declaration(&self) -> Option<ClassId> {
        self.enclosing_type
            .or_else(|| self.parent.as_deref()?.enclosing_type_declaration())
    }

    pub fn enclosing_method_declaration(&self) -> Option<MethodId> {
        self.enclosing_method
            .or_else(|| self.parent.as_deref()?.enclosing_method_declaration())
    }

    pub fn this_type(&self) -> Option<TypeRef> {
        self.this_type
            .clone()
            .or_else(|| self.parent.as_deref()?.this_type())
    }

    pub fn delegate_type(&self) -> Option<TypeRef> {
        self.delegate_type
            .clone()
            .or_else(|| self.parent.as_deref()?.delegate_type())
    }

    pub fn delegate_or_this(&self) -> Option<TypeRef> {
        self.delegate_type().or_else(|| self.this_type())
    }

    pub fn is_static(&self) -> bool {
        self.static_scope
    }

    /// True when the node under resolution sits in method-call position.
    pub fn is_method_call(&self) -> bool {
        self.call_argument_types.is_some()
    }

    pub fn method_call_argument_types(&self) -> Option<&[ClassId]> {
        self.call_argument_types.as_deref()
    }

    pub fn method_call_argument_count(&self) -> Option<usize> {
        self.call_argument_types.as_ref().map(|args| args.len())
    }

    /// True when resolution happens in a script's run body, where dynamic
    /// variables are legitimate.
    pub fn in_script_run_body(&self) -> bool {
        self.script_run_body || self.parent.as_deref().is_some_and(|p| p.in_script_run_body())
    }

    pub fn current_node(&self) -> Option<ExprId> {
        self.current_node
    }

    pub fn wormhole(&self) -> &Wormhole {
        &self.wormhole
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn info(names: &crate::interner::Interner, name: &str, ty: ClassId) -> VariableInfo {
        VariableInfo {
            name: names.intern(name),
            ty: TypeRef::of(ty),
            declaring_type: TypeRef::of(ClassId::OBJECT),
        }
    }

    #[test]
    fn lookup_searches_innermost_first() {
        let names = crate::interner::Interner::new();
        let mut outer = VariableScope::new();
        outer.declare(info(&names, "x", ClassId::STRING));
        let mut inner = outer.child();
        inner.declare(info(&names, "x", ClassId::INTEGER));

        let x = names.intern("x");
        assert_eq!(inner.lookup_name(x).unwrap().ty, TypeRef::of(ClassId::INTEGER));
        assert!(inner.lookup_name_in_current_scope(x).is_some());
    }

    #[test]
    fn chain_walk_falls_back_to_outer() {
        let names = crate::interner::Interner::new();
        let mut outer = VariableScope::new();
        outer.declare(info(&names, "y", ClassId::STRING));
        outer.set_this_type(TypeRef::of(ClassId::OBJECT));
        let inner = outer.child();

        let y = names.intern("y");
        assert!(inner.lookup_name(y).is_some());
        assert!(inner.lookup_name_in_current_scope(y).is_none());
        assert_eq!(inner.this_type(), Some(TypeRef::of(ClassId::OBJECT)));
    }

    #[test]
    fn wormhole_is_read_once() {
        let scope = VariableScope::new();
        scope.wormhole().mark_lhs(ExprId(7));
        assert_eq!(scope.wormhole().peek_lhs(), Some(ExprId(7)));
        assert_eq!(scope.wormhole().take_lhs(), Some(ExprId(7)));
        assert_eq!(scope.wormhole().take_lhs(), None);
    }
}
