//! Prefabricated values.
//!
//! Two kinds of entries:
//! - exact triples per type descriptor, registered either as built-ins or as
//!   caller overrides (overrides win)
//! - factories per type kind, used for generic containers whose triples
//!   depend on their element types
//!
//! Anything not covered here is left to the `FallbackFactory`.

mod builtin;
mod time;

use std::rc::Rc;

use eqv_types::{TypeDescriptor, TypeKind};
use rustc_hash::FxHashMap;

use crate::context::SynthesisContext;
use crate::errors::SynthesisResult;
use crate::provider::ValueProvider;
use crate::tuple::Tuple;

/// Produces the triple for a type on demand.
pub trait PrefabFactory {
    /// Build red, blue and red copy values for `ty`.
    ///
    /// Implementations realize the types they depend on through `provider`,
    /// passing along `ctx` extended with `ty`.
    fn create_values(
        &self,
        ty: &TypeDescriptor,
        provider: &ValueProvider<'_>,
        ctx: &SynthesisContext,
    ) -> SynthesisResult<Tuple>;
}

/// Registry of prefab triples and container factories.
#[derive(Clone, Default)]
pub struct PrefabRegistry {
    overrides: FxHashMap<TypeDescriptor, Tuple>,
    builtins: FxHashMap<TypeDescriptor, Tuple>,
    factories: FxHashMap<TypeKind, Rc<dyn PrefabFactory>>,
}

impl PrefabRegistry {
    /// An empty registry: every type goes to the fallback.
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry with the built-in triples for primitives, boxed primitives,
    /// strings and date/time types, plus the container factories.
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        builtin::register(&mut registry);
        time::register(&mut registry);
        registry
    }

    /// Register a caller supplied triple for exactly `ty`.
    ///
    /// Takes precedence over a built-in triple and over any factory.
    pub fn put(&mut self, ty: TypeDescriptor, tuple: Tuple) {
        self.overrides.insert(ty, tuple);
    }

    pub(crate) fn put_builtin(&mut self, ty: TypeDescriptor, tuple: Tuple) {
        self.builtins.insert(ty, tuple);
    }

    /// Register a factory for every type of the given kind.
    pub fn put_factory(&mut self, kind: TypeKind, factory: impl PrefabFactory + 'static) {
        self.factories.insert(kind, Rc::new(factory));
    }

    /// Is there an exact triple for `ty`?
    pub fn contains(&self, ty: &TypeDescriptor) -> bool {
        self.overrides.contains_key(ty) || self.builtins.contains_key(ty)
    }

    /// The exact triple for `ty`, overrides first.
    pub fn get(&self, ty: &TypeDescriptor) -> Option<&Tuple> {
        self.overrides.get(ty).or_else(|| self.builtins.get(ty))
    }

    /// The factory responsible for the kind of `ty`, if any.
    pub fn factory_for(&self, ty: &TypeDescriptor) -> Option<Rc<dyn PrefabFactory>> {
        self.factories.get(&ty.kind()).cloned()
    }
}
