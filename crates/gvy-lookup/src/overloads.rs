//! Overload disambiguation.

use crate::compat::{Compat, args_compat};
use crate::hierarchy::collect_interfaces;
use gvy_model::{Atom, ClassId, MethodId, TypeStore};
use indexmap::IndexSet;

/// Finds a method with the given name in `declaring`, preferring candidates
/// whose arity and argument types match the call site.
///
/// Concrete types answer all their methods in one hierarchy query. Abstract
/// types and interfaces do not reliably surface inherited members that way,
/// so candidates are unioned across the type itself, its transitive
/// interface closure, and the implicit Object supertype, tracking a running
/// outer candidate as the fallback while scanning for an exact match.
pub fn find_method_declaration(
    store: &TypeStore,
    name: Atom,
    declaring: ClassId,
    arguments: Option<&[ClassId]>,
) -> Option<MethodId> {
    let data = store.class(declaring);
    if !data.is_interface() && !data.is_abstract() {
        let candidates = store.methods_named(declaring, name);
        if candidates.is_empty() {
            return None;
        }
        return Some(select_best_overload(store, &candidates, arguments));
    }

    let mut types: IndexSet<ClassId> = IndexSet::new();
    if !data.is_interface() {
        types.insert(declaring);
    }
    types.extend(collect_interfaces(store, declaring, true));
    types.insert(ClassId::OBJECT); // implicit super type

    let mut outer_candidate: Option<MethodId> = None;
    for &ty in &types {
        let candidates = store.methods_named(ty, name);
        let mut inner_candidate = None;
        if !candidates.is_empty() {
            inner_candidate = Some(select_best_overload(store, &candidates, arguments));
            if outer_candidate.is_none() {
                outer_candidate = inner_candidate;
            }
        }
        if let (Some(inner), Some(arguments)) = (inner_candidate, arguments) {
            let params = &store.method(inner).params;
            if arguments.is_empty() && params.is_empty() {
                return Some(inner);
            }
            if arguments.len() == params.len() {
                outer_candidate = Some(inner);
                match args_compat(store, arguments, params) {
                    Compat::Incompatible => continue,
                    Compat::Exact => return Some(inner),
                    Compat::Fuzzy => {}
                }
            }
        }
    }
    outer_candidate
}

/// Picks the best of a non-empty candidate set for the given argument types.
///
/// An exact arity-and-type match wins immediately; a zero-argument call site
/// matched by a zero-parameter candidate is unambiguous; a fuzzy same-arity
/// candidate is remembered as the best guess. When no candidate matches the
/// arity at all, the first candidate in declaration order is returned — a
/// conscious better-a-guess-than-nothing fallback, not a true match.
pub fn select_best_overload(
    store: &TypeStore,
    candidates: &[MethodId],
    arguments: Option<&[ClassId]>,
) -> MethodId {
    let mut closest_match = candidates[0];
    let Some(arguments) = arguments else {
        return closest_match;
    };

    for &candidate in candidates {
        let params = &store.method(candidate).params;
        if params.is_empty() && arguments.is_empty() {
            return candidate;
        }
        if params.len() == arguments.len() {
            match args_compat(store, arguments, params) {
                Compat::Exact => return candidate,
                Compat::Fuzzy => closest_match = candidate,
                Compat::Incompatible => {}
            }
        }
    }
    closest_match
}
