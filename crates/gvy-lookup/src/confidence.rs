//! Resolution confidence.

/// How certain a resolution result is, from most to least certain.
///
/// Within one top-level query confidence only ever degrades; a sub-resolution
/// may reset it explicitly but never silently raises it past the ceiling it
/// was handed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum TypeConfidence {
    /// The declaration is known for sure.
    Exact,
    /// Inferred from context; almost certainly right.
    Inferred,
    /// A guess that is better than nothing (e.g. an overload picked by
    /// arity alone).
    LooselyInferred,
    /// No idea; the result type is a sentinel.
    Unknown,
}

impl TypeConfidence {
    /// Combines two confidences, keeping the less precise one.
    pub fn less_precise(self, other: TypeConfidence) -> TypeConfidence {
        self.max(other)
    }
}
