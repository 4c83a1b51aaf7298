//! Name interning.
//!
//! Identifier and member names are deduplicated into `Atom`s so the rest of
//! the model compares names by id instead of by string. The interner is
//! append-only and shared read-mostly; resolution clones the backing string
//! out of the lock rather than handing out references.

use rustc_hash::FxHashMap;
use std::sync::RwLock;

/// An interned name. Compare with `==`; resolve through the [`Interner`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Atom(pub u32);

#[derive(Default)]
struct InternerInner {
    map: FxHashMap<String, Atom>,
    strings: Vec<String>,
}

/// Append-only string interner.
#[derive(Default)]
pub struct Interner {
    inner: RwLock<InternerInner>,
}

impl Interner {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn intern(&self, name: &str) -> Atom {
        if let Some(&atom) = self.inner.read().unwrap().map.get(name) {
            return atom;
        }
        let mut inner = self.inner.write().unwrap();
        // re-check under the write lock; another thread may have raced us
        if let Some(&atom) = inner.map.get(name) {
            return atom;
        }
        let atom = Atom(inner.strings.len() as u32);
        inner.strings.push(name.to_string());
        inner.map.insert(name.to_string(), atom);
        atom
    }

    pub fn resolve(&self, atom: Atom) -> String {
        self.inner.read().unwrap().strings[atom.0 as usize].clone()
    }

    pub fn lookup(&self, name: &str) -> Option<Atom> {
        self.inner.read().unwrap().map.get(name).copied()
    }
}
