//! Declaration resolution.
//!
//! Finds the declaration a named member reference points at, searching the
//! declaring type and its supertypes. The result can be a field, property,
//! accessor method, or plain method; the precedence order below is load
//! bearing and first match wins.

use crate::accessors::{READER, WRITER, find_accessor_for_property, is_synthetic};
use crate::hierarchy::{class_hierarchy, collect_interfaces};
use crate::overloads::find_method_declaration;
use gvy_model::{Atom, ClassId, Declaration, TypeStore};
use tracing::trace;

/// Looks for the named member in `declaring` and its supertypes.
///
/// * `is_lhs` - the member is being assigned a value
/// * `is_static_expr` - the member is accessed statically
/// * `call_argument_types` - argument types when the reference is
///   call-shaped, `None` otherwise
pub fn find_declaration(
    store: &TypeStore,
    name: Atom,
    declaring: ClassId,
    is_lhs: bool,
    is_static_expr: bool,
    call_argument_types: Option<&[ClassId]>,
) -> Option<Declaration> {
    if store.class(declaring).is_array() {
        // only length exists on arrays; array classes come from
        // TypeStore::array_of, which installs the field at creation
        if name == store.well_known().length {
            let length = store.declared_field(declaring, name)?;
            return Some(Declaration::Field(length));
        }
        // otherwise search on Object
        return find_declaration(
            store,
            name,
            ClassId::OBJECT,
            is_lhs,
            is_static_expr,
            call_argument_types,
        );
    }

    if call_argument_types.is_some() {
        if let Some(method) = find_method_declaration(store, name, declaring, call_argument_types) {
            trace!(method = ?method, "call-shaped reference resolved as method");
            return Some(Declaration::Method(method));
        }
        // name may still map to something that is callable; keep looking
    }

    // look for canonical accessor method
    let property_name = store.names().resolve(name);
    let accessor = find_accessor_for_property(
        store,
        &property_name,
        declaring,
        if is_lhs { WRITER } else { READER },
    );
    if let Some(method) = accessor
        && !is_synthetic(store, method)
        && store.method(method).is_static() == is_static_expr
    {
        return Some(Declaration::Method(method));
    }

    // look for property
    for ty in class_hierarchy(store, declaring) {
        if let Some(property) = store.declared_property(ty, name) {
            return Some(Declaration::Property(property));
        }
    }

    // look for field, on the declaring type only
    if let Some(field) = store.declared_field(declaring, name) {
        return Some(Declaration::Field(field));
    }

    // look for constant in interfaces
    for ty in collect_interfaces(store, declaring, true) {
        if ty == declaring {
            continue;
        }
        if let Some(field) = store.declared_field(ty, name) {
            let data = store.field(field);
            if data.is_final() && data.is_static() {
                return Some(Declaration::Field(field));
            }
        }
    }

    // fall back to the static or synthetic accessor rejected above
    if let Some(method) = accessor {
        return Some(Declaration::Method(method));
    }

    if call_argument_types.is_none() {
        // reference may be a method pointer or static import; look for a
        // method as last resort
        return find_method_declaration(store, name, declaring, None).map(Declaration::Method);
    }

    None
}

#[cfg(test)]
#[path = "tests/declaration_tests.rs"]
mod tests;
