use super::*;
use gvy_model::{
    ClassFlags, ClassId, Declaration, ExprArena, ExprKind, MemberFlags, TypeRef, TypeStore,
    VarBinding, VariableInfo, VariableScope,
};

fn widget_fixture() -> (TypeStore, ClassId) {
    let mut store = TypeStore::new();
    let widget = store.add_class("Widget", ClassFlags::empty());
    store.add_property(widget, "label", ClassId::STRING, MemberFlags::empty());
    (store, widget)
}

fn variable(arena: &mut ExprArena, store: &TypeStore, name: &str, binding: VarBinding) -> gvy_model::ExprId {
    arena.alloc(
        ExprKind::Variable {
            name: store.names().intern(name),
            binding,
        },
        ClassId::OBJECT,
    )
}

#[test]
fn local_variable_takes_the_scope_type() {
    let (store, _) = widget_fixture();
    let mut arena = ExprArena::new();
    let node = variable(&mut arena, &store, "x", VarBinding::Local);
    let mut scope = VariableScope::new();
    scope.declare(VariableInfo {
        name: store.names().intern("x"),
        ty: TypeRef::of(ClassId::STRING),
        declaring_type: TypeRef::of(ClassId::OBJECT),
    });

    let resolver = TypeResolver::new(&store, &arena, "");
    let result = resolver.lookup_type(node, &scope, None, false);
    assert_eq!(result.ty, TypeRef::of(ClassId::STRING));
    assert_eq!(result.declaration, None);
    // scope types come from inference, not a declaration
    assert_eq!(result.confidence, TypeConfidence::Inferred);
}

#[test]
fn this_reference_declares_its_own_class() {
    let (store, widget) = widget_fixture();
    let mut arena = ExprArena::new();
    let node = variable(&mut arena, &store, "this", VarBinding::Unbound);
    let mut scope = VariableScope::new();
    scope.declare(VariableInfo {
        name: store.names().intern("this"),
        ty: TypeRef::of(widget),
        declaring_type: TypeRef::of(widget),
    });

    let resolver = TypeResolver::new(&store, &arena, "");
    let result = resolver.lookup_type(node, &scope, None, false);
    assert_eq!(result.ty, TypeRef::of(widget));
    assert_eq!(result.declaration, Some(Declaration::Class(widget)));
    assert_eq!(result.declaring_type, Some(TypeRef::of(widget)));
}

#[test]
fn dynamic_variable_resolves_against_the_delegate() {
    let (store, widget) = widget_fixture();
    let mut arena = ExprArena::new();
    let node = variable(&mut arena, &store, "label", VarBinding::Dynamic);
    let mut scope = VariableScope::new();
    scope.set_delegate_type(TypeRef::of(widget));

    let resolver = TypeResolver::new(&store, &arena, "");
    let result = resolver.lookup_type(node, &scope, None, false);
    assert_eq!(result.ty, TypeRef::of(ClassId::STRING));
    assert_eq!(result.declaring_type, Some(TypeRef::of(widget)));
    assert!(matches!(result.declaration, Some(Declaration::Property(_))));
    assert_eq!(result.confidence, TypeConfidence::Inferred);
}

#[test]
fn unresolvable_dynamic_variable_is_unknown() {
    let (store, _) = widget_fixture();
    let mut arena = ExprArena::new();
    let node = variable(&mut arena, &store, "mystery", VarBinding::Dynamic);
    let scope = VariableScope::new();

    let resolver = TypeResolver::new(&store, &arena, "");
    let result = resolver.lookup_type(node, &scope, None, false);
    assert_eq!(result.ty, TypeRef::of(ClassId::OBJECT));
    assert_eq!(result.confidence, TypeConfidence::Unknown);
}

#[test]
fn script_run_body_trusts_the_scope_for_dynamic_variables() {
    let (store, _) = widget_fixture();
    let mut arena = ExprArena::new();
    let node = variable(&mut arena, &store, "acc", VarBinding::Dynamic);
    let mut scope = VariableScope::new();
    scope.set_script_run_body(true);
    scope.declare(VariableInfo {
        name: store.names().intern("acc"),
        ty: TypeRef::of(ClassId::INTEGER),
        declaring_type: TypeRef::of(ClassId::OBJECT),
    });

    let resolver = TypeResolver::new(&store, &arena, "");
    let result = resolver.lookup_type(node, &scope, None, false);
    assert_eq!(result.ty, TypeRef::of(ClassId::INTEGER));
    assert_eq!(result.confidence, TypeConfidence::Inferred);
}

#[test]
fn outside_the_run_body_stale_scope_info_is_distrusted() {
    let (store, _) = widget_fixture();
    let mut arena = ExprArena::new();
    let node = variable(&mut arena, &store, "acc", VarBinding::Dynamic);
    let mut scope = VariableScope::new();
    scope.declare(VariableInfo {
        name: store.names().intern("acc"),
        ty: TypeRef::of(ClassId::INTEGER),
        declaring_type: TypeRef::of(ClassId::OBJECT),
    });

    let resolver = TypeResolver::new(&store, &arena, "");
    let result = resolver.lookup_type(node, &scope, None, false);
    assert_eq!(result.ty, TypeRef::of(ClassId::OBJECT));
    assert_eq!(result.confidence, TypeConfidence::Unknown);
}

#[test]
fn bound_field_variable_uses_the_field_declaration() {
    let (mut store, widget) = widget_fixture();
    let field = store.add_field(widget, "size", ClassId::INT_PRIM, MemberFlags::empty());
    let mut arena = ExprArena::new();
    let node = variable(&mut arena, &store, "size", VarBinding::Field(field));
    let scope = VariableScope::new();

    let resolver = TypeResolver::new(&store, &arena, "");
    let result = resolver.lookup_type(node, &scope, None, false);
    assert_eq!(result.ty, TypeRef::of(ClassId::INT_PRIM));
    assert_eq!(result.declaration, Some(Declaration::Field(field)));
    assert_eq!(result.declaring_type, Some(TypeRef::of(widget)));
    assert_eq!(result.confidence, TypeConfidence::Exact);
}

#[test]
fn object_field_is_sharpened_by_its_initializer() {
    let (mut store, widget) = widget_fixture();
    let field = store.add_field_with_initializer(
        widget,
        "payload",
        ClassId::OBJECT,
        MemberFlags::empty(),
        Some(ClassId::STRING),
    );
    let mut arena = ExprArena::new();
    let node = variable(&mut arena, &store, "payload", VarBinding::Field(field));
    let scope = VariableScope::new();

    let resolver = TypeResolver::new(&store, &arena, "");
    let result = resolver.lookup_type(node, &scope, None, false);
    assert_eq!(result.ty, TypeRef::of(ClassId::STRING));
}

#[test]
fn field_reference_node_reports_its_owner() {
    let (mut store, widget) = widget_fixture();
    let field = store.add_field(widget, "size", ClassId::INT_PRIM, MemberFlags::empty());
    let mut arena = ExprArena::new();
    let node = arena.alloc(ExprKind::FieldRef { field }, ClassId::INT_PRIM);
    let scope = VariableScope::new();

    let resolver = TypeResolver::new(&store, &arena, "");
    let result = resolver.lookup_type(node, &scope, None, false);
    assert_eq!(result.ty, TypeRef::of(ClassId::INT_PRIM));
    assert_eq!(result.declaring_type, Some(TypeRef::of(widget)));
    assert_eq!(result.confidence, TypeConfidence::Exact);
}

#[test]
fn array_length_is_the_synthetic_int_field() {
    let (mut store, _) = widget_fixture();
    let strings = store.array_of(ClassId::STRING);
    let mut arena = ExprArena::new();
    let node = arena.alloc(
        ExprKind::Constant {
            text: store.names().intern("length"),
            value: gvy_model::ConstValue::Other,
        },
        ClassId::OBJECT,
    );
    let scope = VariableScope::new();

    let resolver = TypeResolver::new(&store, &arena, "");
    let result = resolver.lookup_type(node, &scope, Some(TypeRef::of(strings)), false);
    assert_eq!(result.ty, TypeRef::of(ClassId::INT_PRIM));
    assert!(matches!(result.declaration, Some(Declaration::Field(_))));
    assert_eq!(result.confidence, TypeConfidence::Exact);
}
