//! Expression nodes.
//!
//! The host AST is modeled as an arena of immutable expression nodes indexed
//! by `ExprId`. The kind set is a closed tagged union so the resolver's
//! dispatch is exhaustive; adding a kind is a compile-time-visible change.
//! Nodes are never mutated during resolution; per-node metadata (pre-resolved
//! call target, externally inferred closure return type) is attached by
//! earlier passes, before resolution starts.

use crate::interner::Atom;
use crate::member::{FieldId, MethodId, PropertyId};
use crate::types::ClassId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ExprId(pub u32);

/// Source range, in byte offsets into the compilation unit's text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Span {
    pub start: u32,
    pub end: u32,
}

/// What a variable reference is bound to, per the host's binding resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VarBinding {
    /// A lexically declared local (parameter or local variable).
    Local,
    /// A dynamic name with no known declaration; needs hierarchy search.
    Dynamic,
    Field(FieldId),
    Property(PropertyId),
    Method(MethodId),
    /// No binding recorded at all (e.g. a concrete AST was requested).
    Unbound,
}

/// Literal category of a constant node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConstValue {
    Null,
    True,
    False,
    EmptyString,
    /// Anything else; the node's own type decides the category.
    Other,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CtorCallKind {
    New,
    /// `this(...)` constructor delegation.
    This,
    /// `super(...)` constructor delegation.
    Super,
}

#[derive(Debug)]
pub enum ExprKind {
    Variable {
        name: Atom,
        binding: VarBinding,
    },
    Constant {
        text: Atom,
        value: ConstValue,
    },
    /// Class expression; the node's type is the referenced class.
    ClassLiteral,
    FieldRef {
        field: FieldId,
    },
    ConstructorCall {
        kind: CtorCallKind,
        /// True when the argument list is a spread, not a literal list.
        spread_args: bool,
    },
    StaticCall {
        owner: ClassId,
        method: Atom,
    },
    MethodCall {
        object: ExprId,
        args: Vec<ExprId>,
    },
    PropertyAccess {
        object: ExprId,
        property: ExprId,
    },
    Closure,
    /// String interpolation.
    GString,
    Boolean {
        inner: ExprId,
    },
    Not {
        inner: ExprId,
    },
    BitwiseNegation {
        inner: ExprId,
    },
    Tuple {
        exprs: Vec<ExprId>,
    },
    List {
        exprs: Vec<ExprId>,
    },
    MapEntry {
        key: ExprId,
        value: ExprId,
    },
}

/// Metadata attached to a node by earlier passes.
#[derive(Debug, Default)]
pub struct NodeMeta {
    /// Call target pre-resolved by a heavier type-checking pass. When
    /// present and the node sits in method-call position, the resolver
    /// trusts it verbatim.
    pub call_target: Option<MethodId>,
    /// Return type inferred for a closure literal by an external pass.
    pub inferred_return: Option<ClassId>,
}

#[derive(Debug)]
pub struct ExprNode {
    pub kind: ExprKind,
    /// The node's own static type as recorded by the parser/resolver phase.
    pub ty: ClassId,
    pub span: Option<Span>,
    pub meta: NodeMeta,
}

/// Arena of expression nodes.
#[derive(Default)]
pub struct ExprArena {
    nodes: Vec<ExprNode>,
}

impl ExprArena {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn alloc(&mut self, kind: ExprKind, ty: ClassId) -> ExprId {
        self.push(ExprNode {
            kind,
            ty,
            span: None,
            meta: NodeMeta::default(),
        })
    }

    pub fn alloc_spanned(&mut self, kind: ExprKind, ty: ClassId, span: Span) -> ExprId {
        self.push(ExprNode {
            kind,
            ty,
            span: Some(span),
            meta: NodeMeta::default(),
        })
    }

    pub fn push(&mut self, node: ExprNode) -> ExprId {
        let id = ExprId(self.nodes.len() as u32);
        self.nodes.push(node);
        id
    }

    pub fn get(&self, id: ExprId) -> &ExprNode {
        &self.nodes[id.0 as usize]
    }

    /// Mutable access for the passes that attach metadata; resolution never
    /// uses this.
    pub fn meta_mut(&mut self, id: ExprId) -> &mut NodeMeta {
        &mut self.nodes[id.0 as usize].meta
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}
