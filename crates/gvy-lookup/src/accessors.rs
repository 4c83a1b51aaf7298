//! Canonical accessor conventions.
//!
//! Language convention exposes a property `foo` through `getFoo`/`isFoo`
//! readers and a `setFoo` writer. Accessors are searched before raw
//! properties and fields because an accessor pair may diverge in type from
//! its backing field.

use crate::hierarchy::class_hierarchy;
use gvy_model::{ClassId, MethodId, MethodOrigin, TypeStore};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessorKind {
    Getter,
    Isser,
    Setter,
}

/// Read context: getters, then "is"-prefixed accessors.
pub const READER: &[AccessorKind] = &[AccessorKind::Getter, AccessorKind::Isser];
/// Write context: setters only.
pub const WRITER: &[AccessorKind] = &[AccessorKind::Setter];

impl AccessorKind {
    fn prefix(self) -> &'static str {
        match self {
            AccessorKind::Getter => "get",
            AccessorKind::Isser => "is",
            AccessorKind::Setter => "set",
        }
    }

    /// Shape check: does this method look like an accessor of this kind?
    fn matches_shape(self, store: &TypeStore, method: MethodId) -> bool {
        let data = store.method(method);
        match self {
            AccessorKind::Getter => data.params.is_empty() && data.return_ty != ClassId::VOID,
            AccessorKind::Isser => {
                data.params.is_empty()
                    && matches!(data.return_ty, ClassId::BOOLEAN | ClassId::BOOLEAN_PRIM)
            }
            AccessorKind::Setter => data.params.len() == 1,
        }
    }
}

/// Accessor method name for a property name: `foo` becomes `getFoo`.
pub fn accessor_name(kind: AccessorKind, property: &str) -> String {
    let mut name = String::with_capacity(kind.prefix().len() + property.len());
    name.push_str(kind.prefix());
    let mut chars = property.chars();
    if let Some(first) = chars.next() {
        name.extend(first.to_uppercase());
        name.push_str(chars.as_str());
    }
    name
}

/// Finds the first method in the hierarchy of `class` that is a canonical
/// accessor for `property`, trying each kind in order.
pub fn find_accessor_for_property(
    store: &TypeStore,
    property: &str,
    class: ClassId,
    kinds: &[AccessorKind],
) -> Option<MethodId> {
    for &kind in kinds {
        let method_name = accessor_name(kind, property);
        let Some(name) = store.names().lookup(&method_name) else {
            continue;
        };
        for ty in class_hierarchy(store, class) {
            for method in store.declared_methods_named(ty, name) {
                if kind.matches_shape(store, method) {
                    return Some(method);
                }
            }
        }
    }
    None
}

/// A method that must not satisfy genuine source-level resolution: marked
/// synthetic, declared on the Closure type, or backed by a binding the host
/// has only lazily resolved.
pub fn is_synthetic(store: &TypeStore, method: MethodId) -> bool {
    let data = store.method(method);
    if data.is_synthetic() || data.declaring == ClassId::CLOSURE {
        return true;
    }
    match &data.origin {
        MethodOrigin::Source => false,
        MethodOrigin::Binding(node) => node.is_lazily_resolved(),
    }
}
