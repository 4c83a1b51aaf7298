//! Member records: fields, properties, methods, constructors.
//!
//! Members live in parallel arenas on the [`TypeStore`](crate::types::TypeStore)
//! and are referenced by id everywhere else. A `Declaration` is what a
//! resolution query ultimately points at.

use crate::binding::BoundMethodNode;
use crate::interner::Atom;
use crate::types::ClassId;
use bitflags::bitflags;
use smallvec::SmallVec;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FieldId(pub u32);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PropertyId(pub u32);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MethodId(pub u32);

bitflags! {
    /// Modifier bits shared by all member kinds.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct MemberFlags: u8 {
        const STATIC    = 1 << 0;
        const FINAL     = 1 << 1;
        /// Compiler- or runtime-generated; deprioritized during resolution.
        const SYNTHETIC = 1 << 2;
    }
}

/// Where a method record came from.
///
/// Methods materialized from an external compiler binding keep the wrapper
/// around; a lazily resolved binding is treated as synthetic by accessor
/// resolution because its signature cannot be trusted yet.
#[derive(Debug, Default)]
pub enum MethodOrigin {
    #[default]
    Source,
    Binding(BoundMethodNode),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParamInfo {
    pub name: Atom,
    pub ty: ClassId,
}

#[derive(Debug)]
pub struct FieldData {
    pub name: Atom,
    pub declaring: ClassId,
    pub ty: ClassId,
    pub flags: MemberFlags,
    /// Static type of the initializer expression, when one exists. Used to
    /// sharpen fields declared as plain Object.
    pub initializer_ty: Option<ClassId>,
}

#[derive(Debug)]
pub struct PropertyData {
    pub name: Atom,
    pub declaring: ClassId,
    pub ty: ClassId,
    pub flags: MemberFlags,
    /// Backing field, when the property is field-backed.
    pub field: Option<FieldId>,
}

#[derive(Debug)]
pub struct MethodData {
    pub name: Atom,
    pub declaring: ClassId,
    pub return_ty: ClassId,
    pub params: SmallVec<[ParamInfo; 4]>,
    pub flags: MemberFlags,
    pub is_constructor: bool,
    pub origin: MethodOrigin,
}

impl MethodData {
    pub fn is_static(&self) -> bool {
        self.flags.contains(MemberFlags::STATIC)
    }

    pub fn is_synthetic(&self) -> bool {
        self.flags.contains(MemberFlags::SYNTHETIC)
    }
}

impl FieldData {
    pub fn is_static(&self) -> bool {
        self.flags.contains(MemberFlags::STATIC)
    }

    pub fn is_final(&self) -> bool {
        self.flags.contains(MemberFlags::FINAL)
    }
}

impl PropertyData {
    pub fn is_static(&self) -> bool {
        self.flags.contains(MemberFlags::STATIC)
    }
}

/// What a name resolved to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Declaration {
    Field(FieldId),
    Property(PropertyId),
    Method(MethodId),
    Parameter { method: MethodId, index: u32 },
    /// The type itself stands in for its declaration (class literals,
    /// `this`/`super`, constructor calls with no declared constructors).
    Class(ClassId),
}
