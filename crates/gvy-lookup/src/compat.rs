//! Argument/parameter compatibility.
//!
//! A three-valued test: an argument either matches a parameter exactly, is
//! definitely incompatible, or falls in between — assignable, but the host's
//! dynamic typing may have erased precision, so the match cannot be trusted
//! as exact.

use gvy_model::{ClassId, ParamInfo, TypeStore};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Compat {
    Exact,
    /// Assignable, but not a guaranteed match.
    Fuzzy,
    Incompatible,
}

/// Compatibility of one argument against one parameter.
pub fn arg_compat(store: &TypeStore, argument: ClassId, parameter: ClassId) -> Compat {
    if argument == parameter {
        return Compat::Exact;
    }
    if argument == ClassId::NULL && !store.class(parameter).is_primitive() {
        return Compat::Exact;
    }
    if argument == ClassId::CLOSURE && store.is_sam_type(parameter) {
        return Compat::Exact;
    }
    if store.is_assignable(argument, parameter) {
        Compat::Fuzzy
    } else {
        Compat::Incompatible
    }
}

/// Folds [`arg_compat`] across an argument list. Any incompatible pair makes
/// the whole list incompatible (short-circuits); otherwise any fuzzy pair
/// makes the list fuzzy. Callers must have checked arity already.
pub fn args_compat(store: &TypeStore, arguments: &[ClassId], parameters: &[ParamInfo]) -> Compat {
    let mut overall = Compat::Exact;
    for (&argument, parameter) in arguments.iter().zip(parameters) {
        match arg_compat(store, argument, parameter.ty) {
            Compat::Exact => {}
            Compat::Fuzzy => overall = Compat::Fuzzy,
            Compat::Incompatible => return Compat::Incompatible,
        }
    }
    overall
}
