//! Per-run cache of value triples.

use std::cell::RefCell;
use std::rc::Rc;

use eqv_types::TypeDescriptor;
use rustc_hash::FxHashMap;

use crate::tuple::Tuple;

/// Triples keyed by type descriptor.
///
/// Entries are shared `Rc<Tuple>` handles; a cached triple is never mutated,
/// only replaced (a cycle placeholder is replaced by the finished triple, or
/// removed when synthesis fails).
#[derive(Default)]
pub struct ValueCache {
    entries: RefCell<FxHashMap<TypeDescriptor, Rc<Tuple>>>,
}

impl ValueCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store `tuple` for `ty`, replacing any earlier entry.
    pub fn put(&self, ty: TypeDescriptor, tuple: Tuple) -> Rc<Tuple> {
        let tuple = Rc::new(tuple);
        self.entries.borrow_mut().insert(ty, Rc::clone(&tuple));
        tuple
    }

    /// Drop the entry for `ty`, returning it.
    pub fn remove(&self, ty: &TypeDescriptor) -> Option<Rc<Tuple>> {
        self.entries.borrow_mut().remove(ty)
    }

    pub fn get(&self, ty: &TypeDescriptor) -> Option<Rc<Tuple>> {
        self.entries.borrow().get(ty).cloned()
    }

    pub fn contains(&self, ty: &TypeDescriptor) -> bool {
        self.entries.borrow().contains_key(ty)
    }

    pub fn len(&self) -> usize {
        self.entries.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.borrow().is_empty()
    }
}

#[cfg(test)]
mod tests;
