//! Wrappers over externally resolved compiler bindings.
//!
//! Some method records are not parsed from source but materialized from a
//! host compiler's binding. Those records must behave as read-only: derived
//! data (annotations) is reconstructed lazily from the binding on first
//! access, and mutation attempts are rejected with a typed error rather than
//! silently applied. Callers that keep trying to mutate are reported loudly,
//! since that indicates a caller bug rather than bad input.

use once_cell::sync::OnceCell;
use std::sync::atomic::{AtomicU32, Ordering};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ModelError {
    #[error("cannot add annotation `{annotation}` to immutable method node `{node}`")]
    ImmutableNode { node: String, annotation: String },
}

/// Raw external binding a [`BoundMethodNode`] wraps.
#[derive(Debug, Default)]
pub struct MethodBinding {
    pub name: String,
    /// Annotation type names carried by the binding.
    pub annotation_types: Vec<String>,
    /// True when the host has only lazily resolved this binding; its
    /// signature is a placeholder and must not satisfy accessor resolution.
    pub lazily_resolved: bool,
    pub deprecated: bool,
}

/// An annotation reconstructed from the underlying binding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Annotation {
    pub type_name: String,
}

/// Immutable method node backed by an external binding.
///
/// Annotations are materialized at most once, on first read. The node never
/// mutates after construction; `add_annotation` exists only to satisfy the
/// host's node surface and always fails.
#[derive(Debug)]
pub struct BoundMethodNode {
    binding: MethodBinding,
    annotations: OnceCell<Vec<Annotation>>,
    mutation_attempts: AtomicU32,
}

impl BoundMethodNode {
    pub fn new(binding: MethodBinding) -> Self {
        Self {
            binding,
            annotations: OnceCell::new(),
            mutation_attempts: AtomicU32::new(0),
        }
    }

    pub fn binding(&self) -> &MethodBinding {
        &self.binding
    }

    pub fn is_lazily_resolved(&self) -> bool {
        self.binding.lazily_resolved
    }

    pub fn is_deprecated(&self) -> bool {
        self.binding.deprecated
    }

    /// Annotations, reconstructed from the binding on first access.
    pub fn annotations(&self) -> &[Annotation] {
        self.annotations.get_or_init(|| {
            self.binding
                .annotation_types
                .iter()
                .map(|type_name| Annotation {
                    type_name: type_name.clone(),
                })
                .collect()
        })
    }

    /// Always fails: the node is immutable. A repeated attempt is escalated
    /// in the log since it indicates the caller is ignoring the contract.
    pub fn add_annotation(&self, annotation: Annotation) -> Result<(), ModelError> {
        let attempts = self.mutation_attempts.fetch_add(1, Ordering::Relaxed);
        if attempts == 0 {
            tracing::warn!(
                node = %self.binding.name,
                annotation = %annotation.type_name,
                "attempt to add an annotation to an immutable method node"
            );
        } else {
            tracing::error!(
                node = %self.binding.name,
                annotation = %annotation.type_name,
                attempts = attempts + 1,
                "repeated mutation of an immutable method node"
            );
        }
        Err(ModelError::ImmutableNode {
            node: self.binding.name.clone(),
            annotation: annotation.type_name,
        })
    }
}
