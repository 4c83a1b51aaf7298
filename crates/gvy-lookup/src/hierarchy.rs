//! Ordered hierarchy closures.
//!
//! Resolution correctness depends on first-match-wins scans, so the closure
//! of a type is always built as an insertion-ordered, de-duplicated set:
//! the type itself, then its superclass chain, then implemented interfaces
//! breadth-wise. Every hierarchy-scanning operation consumes one of these
//! sets instead of doing ad hoc recursive walks.

use gvy_model::{ClassId, TypeStore};
use indexmap::IndexSet;
use std::collections::VecDeque;

/// The full superclass-and-interface closure of `class`, starting with the
/// class itself.
pub fn class_hierarchy(store: &TypeStore, class: ClassId) -> IndexSet<ClassId> {
    let mut closure = IndexSet::new();
    let mut current = Some(class);
    while let Some(c) = current {
        if !closure.insert(c) {
            break;
        }
        current = store.class(c).super_class;
    }
    // interfaces of everything collected so far, breadth-first
    let mut queue: VecDeque<ClassId> = closure
        .iter()
        .flat_map(|&c| store.class(c).interfaces.iter().copied())
        .collect();
    while let Some(face) = queue.pop_front() {
        if closure.insert(face) {
            queue.extend(store.class(face).interfaces.iter().copied());
        }
    }
    closure
}

/// All interfaces implemented by `class`, directly or transitively, in
/// breadth-first declaration order. With `include_self` the class itself
/// leads the set (callers that want "interfaces other than me" skip it).
pub fn collect_interfaces(
    store: &TypeStore,
    class: ClassId,
    include_self: bool,
) -> IndexSet<ClassId> {
    let mut closure = IndexSet::new();
    if include_self {
        closure.insert(class);
    }
    let mut queue = VecDeque::new();
    let mut current = Some(class);
    while let Some(c) = current {
        queue.extend(store.class(c).interfaces.iter().copied());
        current = store.class(c).super_class;
    }
    while let Some(face) = queue.pop_front() {
        if closure.insert(face) {
            queue.extend(store.class(face).interfaces.iter().copied());
        }
    }
    closure
}
