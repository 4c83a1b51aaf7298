//! Data model consumed by the gvy type resolver.
//!
//! This crate provides the host-side entities the resolution engine reads:
//! - Name interning (`Atom`, `Interner`)
//! - The class store (`TypeStore`, `ClassId`, `TypeRef`, sentinel types)
//! - Member records (`FieldData`, `PropertyData`, `MethodData`, `Declaration`)
//! - Expression nodes (`ExprArena`, `ExprId`, `ExprKind`)
//! - Variable scopes (`VariableScope`, `VariableInfo`, the wormhole channel)
//! - Immutable binding wrappers (`BoundMethodNode`)
//!
//! The engine in `gvy-lookup` never mutates any of these during a query,
//! apart from consuming single-use wormhole entries.

pub mod ast;
pub mod binding;
pub mod interner;
pub mod member;
pub mod scope;
pub mod types;

pub use ast::{ConstValue, CtorCallKind, ExprArena, ExprId, ExprKind, ExprNode, NodeMeta, Span, VarBinding};
pub use binding::{Annotation, BoundMethodNode, MethodBinding, ModelError};
pub use interner::{Atom, Interner};
pub use member::{
    Declaration, FieldData, FieldId, MemberFlags, MethodData, MethodId, MethodOrigin, ParamInfo,
    PropertyData, PropertyId,
};
pub use scope::{VariableInfo, VariableScope, Wormhole};
pub use types::{ClassData, ClassFlags, ClassId, TypeRef, TypeStore, WellKnownNames};
