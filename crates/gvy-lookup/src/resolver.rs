//! Expression type evaluation.
//!
//! `TypeResolver` determines types using AST inspection only: no constraint
//! solving, no flow analysis. Every query returns a [`TypeLookupResult`]
//! whose confidence says how far the inspection got; an unresolvable
//! reference degrades to the Object sentinel at Unknown confidence instead
//! of failing. The resolver holds no state beyond borrowed references to the
//! compilation unit, so queries are re-entrant and may run concurrently as
//! long as the store, arena, and scopes themselves are not mutated.

use crate::compat::{Compat, args_compat};
use crate::confidence::TypeConfidence;
use crate::declarations::find_declaration;
use crate::hierarchy::collect_interfaces;
use crate::overloads::select_best_overload;
use crate::result::TypeLookupResult;
use gvy_model::{
    Atom, ClassId, ConstValue, CtorCallKind, Declaration, ExprArena, ExprId, ExprKind, FieldId,
    MethodId, TypeRef, TypeStore, VarBinding, VariableInfo, VariableScope,
};
use tracing::trace;

pub struct TypeResolver<'a> {
    store: &'a TypeStore,
    arena: &'a ExprArena,
    /// Raw text of the compilation unit, for the class-literal heuristic.
    source: &'a str,
}

impl<'a> TypeResolver<'a> {
    pub fn new(store: &'a TypeStore, arena: &'a ExprArena, source: &'a str) -> Self {
        Self {
            store,
            arena,
            source,
        }
    }

    // -------------------------------------------------------------------------
    // Entry points
    // -------------------------------------------------------------------------

    /// Resolves an expression's type and declaration.
    ///
    /// `object_expression_type` is the receiver type when the node is the
    /// member of a member access; `is_static_object_expression` marks a
    /// static receiver (e.g. the class itself).
    #[tracing::instrument(level = "trace", skip(self, scope))]
    pub fn lookup_type<'s>(
        &self,
        node: ExprId,
        scope: &'s VariableScope,
        object_expression_type: Option<TypeRef>,
        is_static_object_expression: bool,
    ) -> TypeLookupResult<'s> {
        let mut confidence = TypeConfidence::Exact;
        let receiver = object_expression_type.map(|ty| TypeRef {
            class: self.store.box_primitive(ty.class),
            args: ty.args,
        });
        let is_primary = receiver.is_none();
        let declaring = match &receiver {
            Some(ty) => ty.clone(),
            None => self.find_declaring_type(node, scope, &mut confidence),
        };
        let is_static = is_static_object_expression || (is_primary && scope.is_static());
        self.find_type(node, declaring, scope, confidence, is_static, is_primary)
    }

    /// A field declaration resolves to itself.
    pub fn lookup_field<'s>(&self, field: FieldId, scope: &'s VariableScope) -> TypeLookupResult<'s> {
        let data = self.store.field(field);
        TypeLookupResult::new(
            TypeRef::of(data.ty),
            Some(TypeRef::of(data.declaring)),
            Some(Declaration::Field(field)),
            TypeConfidence::Exact,
            scope,
        )
    }

    /// A method declaration resolves to its return type.
    pub fn lookup_method<'s>(
        &self,
        method: MethodId,
        scope: &'s VariableScope,
    ) -> TypeLookupResult<'s> {
        let data = self.store.method(method);
        TypeLookupResult::new(
            TypeRef::of(data.return_ty),
            Some(TypeRef::of(data.declaring)),
            Some(Declaration::Method(method)),
            TypeConfidence::Exact,
            scope,
        )
    }

    /// A class declaration resolves to itself, except that an anonymous
    /// inner class resolves to its supertype (superclass, or the first
    /// interface when the superclass is just Object).
    pub fn lookup_class<'s>(&self, class: ClassId, scope: &'s VariableScope) -> TypeLookupResult<'s> {
        let data = self.store.class(class);
        let mut result_type = class;
        if data.flags.contains(gvy_model::ClassFlags::ANONYMOUS) {
            result_type = data.super_class.unwrap_or(ClassId::OBJECT);
            if result_type == ClassId::OBJECT && !data.interfaces.is_empty() {
                result_type = data.interfaces[0];
            }
        }
        TypeLookupResult::new(
            TypeRef::of(result_type),
            Some(TypeRef::of(result_type)),
            Some(Declaration::Class(class)),
            TypeConfidence::Exact,
            scope,
        )
    }

    /// A parameter resolves to its declared type unless the current scope
    /// has predetermined a sharper one (e.g. for-loop variables).
    pub fn lookup_parameter<'s>(
        &self,
        method: MethodId,
        index: u32,
        scope: &'s VariableScope,
    ) -> TypeLookupResult<'s> {
        let param = &self.store.method(method).params[index as usize];
        let ty = scope
            .lookup_name_in_current_scope(param.name)
            .map(|info| info.ty.clone())
            .unwrap_or_else(|| TypeRef::of(param.ty));
        TypeLookupResult::new(
            ty,
            scope.enclosing_type_declaration().map(TypeRef::of),
            Some(Declaration::Parameter { method, index }),
            TypeConfidence::Exact,
            scope,
        )
    }

    // -------------------------------------------------------------------------
    // Declaring-type inference
    // -------------------------------------------------------------------------

    /// Default declaring type for a node with no known receiver.
    fn find_declaring_type(
        &self,
        node: ExprId,
        scope: &VariableScope,
        confidence: &mut TypeConfidence,
    ) -> TypeRef {
        let data = self.arena.get(node);
        match &data.kind {
            ExprKind::ClassLiteral | ExprKind::ConstructorCall { .. } => TypeRef::of(data.ty),

            ExprKind::FieldRef { field } => TypeRef::of(self.store.field(*field).declaring),

            ExprKind::StaticCall { owner, .. } => TypeRef::of(*owner),

            ExprKind::Constant { .. } if scope.is_method_call() => {
                // method call with an implicit this
                scope.delegate_or_this().unwrap_or(TypeRef::of(ClassId::OBJECT))
            }

            ExprKind::Variable { name, binding } => match binding {
                VarBinding::Dynamic => {
                    // search the type hierarchy for a declaration; look in
                    // the delegate first, then this
                    let is_lhs = scope.wormhole().peek_lhs() == Some(node);
                    let args = scope.method_call_argument_types();
                    let mut declaration = None;

                    let delegate = scope.delegate_type();
                    if let Some(delegate) = &delegate {
                        declaration = find_declaration(
                            self.store,
                            *name,
                            delegate.class,
                            is_lhs,
                            false,
                            args,
                        );
                    }
                    let this = scope.this_type();
                    if declaration.is_none()
                        && let Some(this) = &this
                        && delegate.as_ref() != Some(this)
                    {
                        declaration =
                            find_declaration(self.store, *name, this.class, is_lhs, false, args);
                    }

                    let ty = match declaration {
                        None => {
                            // a dynamic variable with no apparent declaration;
                            // it may be a mistake, or declared by `this`
                            this.unwrap_or(TypeRef::of(ClassId::OBJECT))
                        }
                        Some(declaration) => {
                            self.declaring_type_from_declaration(declaration, &TypeRef::of(data.ty))
                        }
                    };
                    *confidence = confidence.less_precise(TypeConfidence::Inferred);
                    ty
                }
                VarBinding::Field(field) => TypeRef::of(self.store.field(*field).declaring),
                VarBinding::Property(property) => {
                    TypeRef::of(self.store.property(*property).declaring)
                }
                _ if self.is_this_or_super(*name) => {
                    // this/super left unbound, probably because a concrete
                    // AST was requested
                    scope
                        .lookup_name(*name)
                        .map(|info| info.declaring_type.clone())
                        .unwrap_or(TypeRef::of(ClassId::OBJECT))
                }
                // local variable, no declaring type
                _ => TypeRef::of(ClassId::OBJECT),
            },

            _ => TypeRef::of(ClassId::OBJECT),
        }
    }

    // -------------------------------------------------------------------------
    // Node-kind dispatch
    // -------------------------------------------------------------------------

    fn find_type<'s>(
        &self,
        node: ExprId,
        declaring: TypeRef,
        scope: &'s VariableScope,
        confidence: TypeConfidence,
        is_static_receiver: bool,
        is_primary: bool,
    ) -> TypeLookupResult<'s> {
        let data = self.arena.get(node);

        // use the call target from node metadata if a prior pass resolved it
        if scope.is_method_call()
            && let Some(target) = data.meta.call_target
        {
            let method = self.store.method(target);
            trace!(?target, "trusting pre-resolved call target");
            return TypeLookupResult::new(
                TypeRef::of(method.return_ty),
                Some(TypeRef::of(method.declaring)),
                Some(Declaration::Method(target)),
                confidence,
                scope,
            );
        }

        if let ExprKind::Variable { .. } = data.kind {
            return self.find_type_for_variable(node, scope, confidence, declaring);
        }

        if let ExprKind::Constant { text, .. } = &data.kind
            && (!is_primary || scope.is_method_call())
        {
            let is_lhs = scope.wormhole().take_lhs() == Some(node);
            return self.find_type_for_name_with_known_receiver(
                *text,
                TypeRef::of(data.ty),
                declaring,
                scope,
                confidence,
                is_static_receiver,
                is_primary,
                is_lhs,
            );
        }

        let mut node_type = TypeRef::of(data.ty);
        match &data.kind {
            ExprKind::Constant { value, .. } => {
                return match value {
                    ConstValue::Null => TypeLookupResult::new(
                        TypeRef::of(ClassId::VOID),
                        None,
                        None,
                        confidence,
                        scope,
                    ),
                    ConstValue::True | ConstValue::False => TypeLookupResult::new(
                        TypeRef::of(ClassId::BOOLEAN),
                        None,
                        None,
                        confidence,
                        scope,
                    ),
                    _ if *value == ConstValue::EmptyString || data.ty == ClassId::STRING => {
                        TypeLookupResult::new(
                            TypeRef::of(ClassId::STRING),
                            None,
                            None,
                            confidence,
                            scope,
                        )
                    }
                    _ if self.store.is_number_type(data.ty)
                        || data.ty == ClassId::BIG_DECIMAL
                        || data.ty == ClassId::BIG_INTEGER =>
                    {
                        TypeLookupResult::new(
                            TypeRef::of(self.store.box_primitive(data.ty)),
                            None,
                            None,
                            confidence,
                            scope,
                        )
                    }
                    // a named constant with no known category; its own type
                    // is all we have, and it cannot be trusted
                    _ => TypeLookupResult::new(
                        TypeRef::of(data.ty),
                        None,
                        None,
                        TypeConfidence::Unknown,
                        scope,
                    ),
                };
            }

            ExprKind::Boolean { .. } | ExprKind::Not { .. } => {
                return TypeLookupResult::new(
                    TypeRef::of(ClassId::BOOLEAN),
                    None,
                    None,
                    confidence,
                    scope,
                );
            }

            ExprKind::GString { .. } => {
                // String, not the interpolation type, so string extension
                // methods still apply
                return TypeLookupResult::new(
                    TypeRef::of(ClassId::STRING),
                    None,
                    None,
                    confidence,
                    scope,
                );
            }

            ExprKind::BitwiseNegation { inner } => {
                let operand = self.arena.get(*inner).ty;
                // ~"..." is the literal syntax for a compiled pattern
                let ty = if operand == ClassId::STRING {
                    ClassId::PATTERN
                } else {
                    operand
                };
                return TypeLookupResult::new(TypeRef::of(ty), None, None, confidence, scope);
            }

            ExprKind::Closure => {
                // propagate an externally inferred return type into the
                // closure's signature; a one-way update, not a new lookup
                if data.ty == ClassId::CLOSURE
                    && let Some(ret) = data.meta.inferred_return
                    && ret != ClassId::VOID
                    && ret != ClassId::OBJECT
                {
                    node_type = TypeRef::with_args(ClassId::CLOSURE, [ret]);
                }
            }

            ExprKind::ClassLiteral => {
                if self.is_class_literal_expression(node, scope) {
                    return TypeLookupResult::new(
                        TypeRef::with_args(ClassId::CLASS, [data.ty]),
                        None,
                        Some(Declaration::Class(data.ty)),
                        TypeConfidence::Exact,
                        scope,
                    );
                }
                // receiver position: the bare referenced type
                return TypeLookupResult::new(
                    TypeRef::of(data.ty),
                    Some(declaring),
                    Some(Declaration::Class(data.ty)),
                    confidence,
                    scope,
                );
            }

            ExprKind::ConstructorCall { kind, spread_args } => {
                return self.find_type_for_constructor_call(
                    node, *kind, *spread_args, declaring, scope, confidence,
                );
            }

            ExprKind::StaticCall { owner, method } => {
                if let Some(result) =
                    self.find_type_for_static_call(*owner, *method, scope)
                {
                    return result;
                }
                // no static candidates; fall through to the default
            }

            ExprKind::Variable { .. }
            | ExprKind::FieldRef { .. }
            | ExprKind::MethodCall { .. }
            | ExprKind::PropertyAccess { .. }
            | ExprKind::Tuple { .. }
            | ExprKind::List { .. }
            | ExprKind::MapEntry { .. } => {}
        }

        // an unresolved Object-typed node is the "I don't know" sentinel
        let mut confidence = confidence;
        if !matches!(data.kind, ExprKind::Tuple { .. }) && node_type.class == ClassId::OBJECT {
            confidence = TypeConfidence::Unknown;
        }
        TypeLookupResult::new(node_type, Some(declaring), None, confidence, scope)
    }

    fn find_type_for_constructor_call<'s>(
        &self,
        node: ExprId,
        kind: CtorCallKind,
        spread_args: bool,
        declaring: TypeRef,
        scope: &'s VariableScope,
        confidence: TypeConfidence,
    ) -> TypeLookupResult<'s> {
        let node_type = TypeRef::of(self.arena.get(node).ty);
        let declaring = match kind {
            CtorCallKind::New => declaring,
            CtorCallKind::This => {
                // watch out for initializers with no enclosing constructor
                scope
                    .enclosing_method_declaration()
                    .map(|m| TypeRef::of(self.store.method(m).declaring))
                    .or_else(|| scope.enclosing_type_declaration().map(TypeRef::of))
                    .unwrap_or(declaring)
            }
            CtorCallKind::Super => scope
                .enclosing_method_declaration()
                .map(|m| {
                    let class = self.store.method(m).declaring;
                    TypeRef::of(
                        self.store
                            .class(class)
                            .super_class
                            .unwrap_or(ClassId::OBJECT),
                    )
                })
                .unwrap_or(declaring),
        };

        // find the best match when there is more than one constructor to
        // choose from
        let mut constructors = self.store.constructors_of(declaring.class).to_vec();
        if !spread_args && constructors.len() > 1 {
            if let Some(call_types) = scope.method_call_argument_types() {
                let mut loose_matches = Vec::new();
                for &ctor in &constructors {
                    let params = &self.store.method(ctor).params;
                    if call_types.len() == params.len() {
                        if args_compat(self.store, call_types, params) == Compat::Exact {
                            return TypeLookupResult::new(
                                node_type,
                                Some(declaring),
                                Some(Declaration::Method(ctor)),
                                confidence,
                                scope,
                            );
                        }
                        // argument types may not be fully resolved; at least
                        // the arity matched
                        loose_matches.push(ctor);
                    }
                }
                if !loose_matches.is_empty() {
                    constructors = loose_matches;
                }
            }
        }

        let declaration = constructors
            .first()
            .map(|&ctor| Declaration::Method(ctor))
            .unwrap_or(Declaration::Class(declaring.class));
        TypeLookupResult::new(node_type, Some(declaring), Some(declaration), confidence, scope)
    }

    fn find_type_for_static_call<'s>(
        &self,
        owner: ClassId,
        method: Atom,
        scope: &'s VariableScope,
    ) -> Option<TypeLookupResult<'s>> {
        let mut candidates: Vec<MethodId> = if !self.store.class(owner).is_interface() {
            self.store.methods_named(owner, method)
        } else {
            collect_interfaces(self.store, owner, true)
                .into_iter()
                .flat_map(|face| self.store.declared_methods_named(face, method))
                .collect()
        };
        candidates.retain(|&m| self.store.method(m).is_static());
        if candidates.is_empty() {
            return None;
        }

        let (closest_match, confidence) = if scope.is_method_call() {
            (
                select_best_overload(
                    self.store,
                    &candidates,
                    scope.method_call_argument_types(),
                ),
                TypeConfidence::Inferred,
            )
        } else {
            // without a call site there is nothing to match arity against
            (candidates[0], TypeConfidence::LooselyInferred)
        };
        let data = self.store.method(closest_match);
        Some(TypeLookupResult::new(
            TypeRef::of(data.return_ty),
            Some(TypeRef::of(data.declaring)),
            Some(Declaration::Method(closest_match)),
            confidence,
            scope,
        ))
    }

    // -------------------------------------------------------------------------
    // Variable classification
    // -------------------------------------------------------------------------

    fn find_type_for_variable<'s>(
        &self,
        node: ExprId,
        scope: &'s VariableScope,
        confidence: TypeConfidence,
        declaring: TypeRef,
    ) -> TypeLookupResult<'s> {
        let data = self.arena.get(node);
        let ExprKind::Variable { name, binding } = &data.kind else {
            unreachable!("caller dispatches on kind");
        };

        let mut declaring = declaring;
        let mut declaration: Option<Declaration> = None;
        let mut ty = TypeRef::of(data.ty);
        let mut new_confidence = confidence;
        let mut variable_info = scope.lookup_name(*name).cloned();

        match binding {
            VarBinding::Field(field) => {
                variable_info = None;
                let found = Declaration::Field(*field);
                ty = self.type_from_declaration(found);
                declaration = Some(found);
            }
            VarBinding::Property(property) => {
                variable_info = None;
                let found = Declaration::Property(*property);
                ty = self.type_from_declaration(found);
                declaration = Some(found);
            }
            VarBinding::Method(method) => {
                variable_info = None;
                let found = Declaration::Method(*method);
                ty = self.type_from_declaration(found);
                declaration = Some(found);
            }
            VarBinding::Dynamic => {
                // likely a reference to a member somewhere in the hierarchy
                let search_target = more_precise_type(&declaring, variable_info.as_ref());
                let is_lhs = scope.wormhole().take_lhs() == Some(node);
                let candidate = find_declaration(
                    self.store,
                    *name,
                    search_target.class,
                    is_lhs,
                    false,
                    scope.method_call_argument_types(),
                );
                match candidate {
                    Some(candidate) => {
                        declaration = Some(candidate);
                        let resolved = variable_info
                            .as_ref()
                            .map(|info| info.declaring_type.clone())
                            .unwrap_or(TypeRef::of(ClassId::OBJECT));
                        declaring = self.declaring_type_from_declaration(candidate, &resolved);
                        ty = self.type_from_declaration(candidate);
                    }
                    None => {
                        new_confidence = TypeConfidence::Unknown;
                        // dynamic variables are not allowed outside a
                        // script's run body; stale scope info is untrusted
                        if variable_info.is_some() && !scope.in_script_run_body() {
                            variable_info = None;
                        }
                    }
                }
            }
            VarBinding::Local | VarBinding::Unbound => {}
        }

        if let Some(info) = &variable_info
            && !matches!(declaration, Some(Declaration::Method(_)))
        {
            // the scope is the source of truth for local-variable narrowing
            ty = info.ty.clone();
            if self.is_this_or_super(*name) {
                declaration = Some(Declaration::Class(ty.class));
            }
            declaring = more_precise_type(&declaring, Some(info));
            new_confidence = confidence.less_precise(TypeConfidence::Inferred);
        }

        TypeLookupResult::new(ty, Some(declaring), declaration, new_confidence, scope)
    }

    // -------------------------------------------------------------------------
    // Named member with a known receiver
    // -------------------------------------------------------------------------

    /// Looks for a name within a receiver. It is either in the hierarchy, in
    /// the variable scope, or unknown.
    fn find_type_for_name_with_known_receiver<'s>(
        &self,
        name: Atom,
        node_type: TypeRef,
        declaring: TypeRef,
        scope: &'s VariableScope,
        confidence: TypeConfidence,
        is_static_receiver: bool,
        is_primary: bool,
        is_lhs: bool,
    ) -> TypeLookupResult<'s> {
        let original_confidence = confidence;
        let mut confidence = confidence;
        let mut ty = node_type;
        let args = scope.method_call_argument_types();
        let real_declaring: TypeRef;

        let mut declaration =
            find_declaration(self.store, name, declaring.class, is_lhs, is_static_receiver, args);

        if declaration.is_none() && is_primary {
            // probably inside a closure whose delegate has shifted; retry
            // against the enclosing this
            if let Some(this) = scope.this_type()
                && this != declaring
            {
                declaration =
                    find_declaration(self.store, name, this.class, is_lhs, is_static_receiver, args);
            }
        }

        if declaration.is_none() && is_static_receiver {
            // might be a property or method defined on java.lang.Class
            declaration = find_declaration(
                self.store,
                name,
                ClassId::CLASS,
                is_lhs,
                is_static_receiver,
                args,
            );
        }

        if let Some(found) = declaration {
            ty = self.type_from_declaration(found);
            real_declaring = self.declaring_type_from_declaration(found, &declaring);
        } else if name == self.store.well_known().this_kw {
            // `this` as a property of the receiver is the receiver itself
            declaration = Some(Declaration::Class(declaring.class));
            ty = declaring.clone();
            real_declaring = declaring.clone();
        } else if is_primary && let Some(info) = scope.lookup_name(name).cloned() {
            // everything tracked by the scopes is available; retry the
            // declaration search against what the scope reports
            ty = info.ty.clone();
            real_declaring = info.declaring_type.clone();
            declaration = find_declaration(
                self.store,
                name,
                real_declaring.class,
                is_lhs,
                is_static_receiver,
                args,
            );
            if declaration.is_none() {
                declaration = Some(Declaration::Class(real_declaring.class));
            }
        } else if name == self.store.well_known().call {
            // assume the implicit single-method invocation of a
            // function-typed value
            real_declaring = TypeRef::of(ClassId::CLOSURE);
            declaration = self
                .store
                .methods_named(ClassId::CLOSURE, name)
                .first()
                .map(|&m| Declaration::Method(m));
        } else {
            real_declaring = declaring.clone();
            confidence = TypeConfidence::Unknown;
            trace!(name = %self.store.names().resolve(name), "unknown member reference");
        }

        // a static receiver must resolve to a static member; Class is
        // exempt because the distinction is meaningless there
        if let Some(found) = declaration
            && real_declaring.class != ClassId::CLASS
        {
            match found {
                Declaration::Field(field) => {
                    if is_static_receiver && !self.store.field(field).is_static() {
                        confidence = TypeConfidence::Unknown;
                    }
                }
                Declaration::Property(property) => {
                    // prefer looking at the underlying field
                    let is_static = match self.store.property(property).field {
                        Some(field) => self.store.field(field).is_static(),
                        None => self.store.property(property).is_static(),
                    };
                    if is_static_receiver && !is_static {
                        confidence = TypeConfidence::Unknown;
                    }
                }
                Declaration::Method(method) => {
                    if is_static_receiver && !self.store.method(method).is_static() {
                        confidence = TypeConfidence::Unknown;
                    } else if scope.method_call_argument_count()
                        != Some(self.store.method(method).params.len())
                    {
                        // arity mismatch means a guessed overload
                        confidence = TypeConfidence::LooselyInferred;
                    }
                }
                Declaration::Parameter { .. } | Declaration::Class(_) => {}
            }
        }

        // unwrap Class<T> once and retry against T; a type parameter is
        // never itself a generic Class reference at this level, so the
        // retry cannot recurse further in the same direction
        if confidence == TypeConfidence::Unknown
            && real_declaring.class == ClassId::CLASS
            && real_declaring.args.len() == 1
        {
            let type_param = real_declaring.args[0];
            if type_param != ClassId::CLASS && type_param != ClassId::OBJECT {
                return self.find_type_for_name_with_known_receiver(
                    name,
                    ty,
                    TypeRef::of(type_param),
                    scope,
                    original_confidence,
                    is_static_receiver,
                    is_primary,
                    is_lhs,
                );
            }
        }

        TypeLookupResult::new(ty, Some(real_declaring), declaration, confidence, scope)
    }

    // -------------------------------------------------------------------------
    // Class-literal heuristic
    // -------------------------------------------------------------------------

    /// Decides whether a class expression is a genuine class literal or the
    /// receiver of a static member access, from its syntactic parent and,
    /// as a last resort, the literal source text.
    fn is_class_literal_expression(&self, node: ExprId, scope: &VariableScope) -> bool {
        let Some(parent) = scope.current_node() else {
            return true;
        };
        match &self.arena.get(parent).kind {
            ExprKind::List { .. } | ExprKind::MapEntry { .. } | ExprKind::Constant { .. } => true,
            ExprKind::MethodCall { object, .. } => *object != node,
            ExprKind::PropertyAccess { .. } => {
                let Some(span) = self.arena.get(node).span else {
                    return false;
                };
                if span.end == 0 {
                    return false;
                }
                // out-of-range or mid-character spans degrade to "not a
                // literal" instead of failing the query
                self.source
                    .get(span.start as usize..span.end as usize)
                    .is_some_and(|text| text.ends_with(".class"))
            }
            _ => false,
        }
    }

    // -------------------------------------------------------------------------
    // Declaration helpers
    // -------------------------------------------------------------------------

    /// The type a declaration gives to a reference.
    fn type_from_declaration(&self, declaration: Declaration) -> TypeRef {
        match declaration {
            Declaration::Property(property) => {
                // prefer the backing field when the property has one
                match self.store.property(property).field {
                    Some(field) => self.field_type(field),
                    None => TypeRef::of(self.store.property(property).ty),
                }
            }
            Declaration::Field(field) => self.field_type(field),
            Declaration::Method(method) => TypeRef::of(self.store.method(method).return_ty),
            Declaration::Parameter { method, index } => {
                TypeRef::of(self.store.method(method).params[index as usize].ty)
            }
            Declaration::Class(_) => TypeRef::of(ClassId::OBJECT),
        }
    }

    fn field_type(&self, field: FieldId) -> TypeRef {
        let data = self.store.field(field);
        let mut ty = data.ty;
        if ty == ClassId::OBJECT {
            // an Object-typed field may be sharpened by its initializer
            if let Some(init) = data.initializer_ty {
                ty = init;
            }
        }
        TypeRef::of(ty)
    }

    /// The type that introduces a declaration. When the declaring class and
    /// the resolved receiver-side type agree by name, the resolved one wins
    /// because it carries the generics.
    fn declaring_type_from_declaration(
        &self,
        declaration: Declaration,
        resolved: &TypeRef,
    ) -> TypeRef {
        let owner = match declaration {
            Declaration::Field(field) => self.store.field(field).declaring,
            Declaration::Method(method) => self.store.method(method).declaring,
            Declaration::Property(property) => self.store.property(property).declaring,
            Declaration::Parameter { .. } | Declaration::Class(_) => ClassId::OBJECT,
        };
        if owner == resolved.class {
            resolved.clone()
        } else {
            TypeRef::of(owner)
        }
    }

    fn is_this_or_super(&self, name: Atom) -> bool {
        name == self.store.well_known().this_kw || name == self.store.well_known().super_kw
    }
}

/// Prefers a scope-tracked declaring type over the ambient one, unless the
/// scope only knows the Object sentinel and the ambient type is sharper.
fn more_precise_type(declaring: &TypeRef, info: Option<&VariableInfo>) -> TypeRef {
    let maybe = info
        .map(|info| info.declaring_type.clone())
        .unwrap_or(TypeRef::of(ClassId::OBJECT));
    if maybe.class == ClassId::OBJECT && declaring.class != ClassId::OBJECT {
        declaring.clone()
    } else {
        maybe
    }
}
