//! Lookup results.

use crate::confidence::TypeConfidence;
use gvy_model::{Declaration, TypeRef, VariableScope};

/// The sole output of every resolution entry point. Freshly constructed per
/// call; borrows the scope the query ran against so callers can continue
/// from where the resolution left off.
#[derive(Debug)]
pub struct TypeLookupResult<'s> {
    /// The expression's type.
    pub ty: TypeRef,
    /// The type that introduces whatever the expression refers to, when one
    /// is known. May be less derived than the receiver's own type.
    pub declaring_type: Option<TypeRef>,
    /// The specific declaration, when resolution found one.
    pub declaration: Option<Declaration>,
    pub confidence: TypeConfidence,
    pub scope: &'s VariableScope,
}

impl<'s> TypeLookupResult<'s> {
    pub fn new(
        ty: TypeRef,
        declaring_type: Option<TypeRef>,
        declaration: Option<Declaration>,
        confidence: TypeConfidence,
        scope: &'s VariableScope,
    ) -> Self {
        Self {
            ty,
            declaring_type,
            declaration,
            confidence,
            scope,
        }
    }
}
