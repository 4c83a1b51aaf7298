use super::*;
use gvy_model::{
    ClassFlags, ClassId, ConstValue, Declaration, ExprArena, ExprKind, MemberFlags, MethodId,
    TypeRef, TypeStore, VariableScope,
};

fn trace_init() {
    use tracing_subscriber::EnvFilter;
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

fn box_fixture() -> (TypeStore, ClassId, [MethodId; 3]) {
    let mut store = TypeStore::new();
    let class = store.add_class("Box", ClassFlags::empty());
    let nullary = store.add_constructor(class, &[], MemberFlags::empty());
    let unary = store.add_constructor(class, &[("w", ClassId::INT_PRIM)], MemberFlags::empty());
    let binary = store.add_constructor(
        class,
        &[("w", ClassId::INT_PRIM), ("h", ClassId::INT_PRIM)],
        MemberFlags::empty(),
    );
    (store, class, [nullary, unary, binary])
}

#[test]
fn constructor_call_selects_the_exact_overload() {
    trace_init();
    let (store, class, [_, _, binary]) = box_fixture();
    let mut arena = ExprArena::new();
    let node = arena.alloc(
        ExprKind::ConstructorCall {
            kind: gvy_model::CtorCallKind::New,
            spread_args: false,
        },
        class,
    );
    let mut scope = VariableScope::new();
    scope.set_call_argument_types(vec![ClassId::INT_PRIM, ClassId::INT_PRIM]);

    let resolver = TypeResolver::new(&store, &arena, "");
    let result = resolver.lookup_type(node, &scope, None, false);
    assert_eq!(result.ty, TypeRef::of(class));
    assert_eq!(result.declaration, Some(Declaration::Method(binary)));
    assert_eq!(result.confidence, TypeConfidence::Exact);
}

#[test]
fn constructor_call_narrows_by_arity_when_types_disagree() {
    let (store, class, [_, unary, _]) = box_fixture();
    let mut arena = ExprArena::new();
    let node = arena.alloc(
        ExprKind::ConstructorCall {
            kind: gvy_model::CtorCallKind::New,
            spread_args: false,
        },
        class,
    );
    let mut scope = VariableScope::new();
    scope.set_call_argument_types(vec![ClassId::STRING]);

    let resolver = TypeResolver::new(&store, &arena, "");
    let result = resolver.lookup_type(node, &scope, None, false);
    // String is not an int, but only one constructor takes one argument
    assert_eq!(result.declaration, Some(Declaration::Method(unary)));
}

#[test]
fn spread_arguments_disable_overload_selection() {
    let (store, class, [nullary, _, _]) = box_fixture();
    let mut arena = ExprArena::new();
    let node = arena.alloc(
        ExprKind::ConstructorCall {
            kind: gvy_model::CtorCallKind::New,
            spread_args: true,
        },
        class,
    );
    let mut scope = VariableScope::new();
    scope.set_call_argument_types(vec![ClassId::INT_PRIM, ClassId::INT_PRIM]);

    let resolver = TypeResolver::new(&store, &arena, "");
    let result = resolver.lookup_type(node, &scope, None, false);
    assert_eq!(result.declaration, Some(Declaration::Method(nullary)));
}

#[test]
fn super_delegation_targets_the_superclass() {
    let (mut store, class, _) = box_fixture();
    let sub = store.add_class("CubbyHole", ClassFlags::empty());
    store.set_super_class(sub, class);
    let sub_ctor = store.add_constructor(sub, &[], MemberFlags::empty());
    let mut arena = ExprArena::new();
    let node = arena.alloc(
        ExprKind::ConstructorCall {
            kind: gvy_model::CtorCallKind::Super,
            spread_args: false,
        },
        class,
    );
    let mut scope = VariableScope::new();
    scope.set_enclosing_method(sub_ctor);
    scope.set_call_argument_types(vec![]);

    let resolver = TypeResolver::new(&store, &arena, "");
    let result = resolver.lookup_type(node, &scope, None, false);
    assert_eq!(result.declaring_type, Some(TypeRef::of(class)));
}

#[test]
fn static_call_picks_the_best_static_overload() {
    let mut store = TypeStore::new();
    let util = store.add_class("Util", ClassFlags::empty());
    let parse1 = store.add_method(
        util,
        "parse",
        ClassId::INTEGER,
        &[("text", ClassId::STRING)],
        MemberFlags::STATIC,
    );
    store.add_method(
        util,
        "parse",
        ClassId::INTEGER,
        &[("text", ClassId::STRING), ("radix", ClassId::INT_PRIM)],
        MemberFlags::STATIC,
    );
    store.add_method(
        util,
        "parse",
        ClassId::OBJECT,
        &[("value", ClassId::OBJECT)],
        MemberFlags::empty(),
    );
    let mut arena = ExprArena::new();
    let node = arena.alloc(
        ExprKind::StaticCall {
            owner: util,
            method: store.names().intern("parse"),
        },
        ClassId::OBJECT,
    );
    let mut scope = VariableScope::new();
    scope.set_call_argument_types(vec![ClassId::STRING]);

    let resolver = TypeResolver::new(&store, &arena, "");
    let result = resolver.lookup_type(node, &scope, None, false);
    assert_eq!(result.ty, TypeRef::of(ClassId::INTEGER));
    assert_eq!(result.declaring_type, Some(TypeRef::of(util)));
    assert_eq!(result.declaration, Some(Declaration::Method(parse1)));
    assert_eq!(result.confidence, TypeConfidence::Inferred);
}

#[test]
fn static_call_finds_methods_declared_on_the_interface_itself() {
    let mut store = TypeStore::new();
    let factory = store.add_class("Factory", ClassFlags::INTERFACE);
    let create = store.add_method(factory, "create", ClassId::OBJECT, &[], MemberFlags::STATIC);
    let mut arena = ExprArena::new();
    let node = arena.alloc(
        ExprKind::StaticCall {
            owner: factory,
            method: store.names().intern("create"),
        },
        ClassId::OBJECT,
    );
    let mut scope = VariableScope::new();
    scope.set_call_argument_types(vec![]);

    let resolver = TypeResolver::new(&store, &arena, "");
    let result = resolver.lookup_type(node, &scope, None, false);
    assert_eq!(result.declaring_type, Some(TypeRef::of(factory)));
    assert_eq!(result.declaration, Some(Declaration::Method(create)));
    assert_eq!(result.confidence, TypeConfidence::Inferred);
}

#[test]
fn static_call_on_a_subinterface_finds_inherited_statics() {
    let mut store = TypeStore::new();
    let base = store.add_class("BaseFactory", ClassFlags::INTERFACE);
    let create = store.add_method(base, "create", ClassId::OBJECT, &[], MemberFlags::STATIC);
    let sub = store.add_class("WidgetFactory", ClassFlags::INTERFACE);
    store.add_interface_to(sub, base);
    let mut arena = ExprArena::new();
    let node = arena.alloc(
        ExprKind::StaticCall {
            owner: sub,
            method: store.names().intern("create"),
        },
        ClassId::OBJECT,
    );
    let mut scope = VariableScope::new();
    scope.set_call_argument_types(vec![]);

    let resolver = TypeResolver::new(&store, &arena, "");
    let result = resolver.lookup_type(node, &scope, None, false);
    assert_eq!(result.declaration, Some(Declaration::Method(create)));
}

#[test]
fn static_reference_without_a_call_site_is_loose() {
    let mut store = TypeStore::new();
    let util = store.add_class("Util", ClassFlags::empty());
    let parse = store.add_method(
        util,
        "parse",
        ClassId::INTEGER,
        &[("text", ClassId::STRING)],
        MemberFlags::STATIC,
    );
    let mut arena = ExprArena::new();
    let node = arena.alloc(
        ExprKind::StaticCall {
            owner: util,
            method: store.names().intern("parse"),
        },
        ClassId::OBJECT,
    );
    let scope = VariableScope::new();

    let resolver = TypeResolver::new(&store, &arena, "");
    let result = resolver.lookup_type(node, &scope, None, false);
    assert_eq!(result.declaration, Some(Declaration::Method(parse)));
    assert_eq!(result.confidence, TypeConfidence::LooselyInferred);
}

#[test]
fn static_call_with_no_candidates_degrades_to_unknown() {
    let mut store = TypeStore::new();
    let util = store.add_class("Util", ClassFlags::empty());
    let mut arena = ExprArena::new();
    let node = arena.alloc(
        ExprKind::StaticCall {
            owner: util,
            method: store.names().intern("missing"),
        },
        ClassId::OBJECT,
    );
    let mut scope = VariableScope::new();
    scope.set_call_argument_types(vec![]);

    let resolver = TypeResolver::new(&store, &arena, "");
    let result = resolver.lookup_type(node, &scope, None, false);
    assert_eq!(result.declaration, None);
    assert_eq!(result.confidence, TypeConfidence::Unknown);
}

#[test]
fn pre_resolved_call_targets_are_trusted() {
    let mut store = TypeStore::new();
    let service = store.add_class("Service", ClassFlags::empty());
    let target = store.add_method(service, "fetch", ClassId::STRING, &[], MemberFlags::empty());
    let mut arena = ExprArena::new();
    let node = arena.alloc(
        ExprKind::Constant {
            text: store.names().intern("fetch"),
            value: ConstValue::Other,
        },
        ClassId::OBJECT,
    );
    arena.meta_mut(node).call_target = Some(target);
    let mut scope = VariableScope::new();
    scope.set_call_argument_types(vec![]);

    let resolver = TypeResolver::new(&store, &arena, "");
    let result = resolver.lookup_type(node, &scope, Some(TypeRef::of(service)), false);
    assert_eq!(result.ty, TypeRef::of(ClassId::STRING));
    assert_eq!(result.declaration, Some(Declaration::Method(target)));
    assert_eq!(result.confidence, TypeConfidence::Exact);
}
