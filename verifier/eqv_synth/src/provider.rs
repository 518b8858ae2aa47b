//! The value provider: prefabs, fallback and cache behind one interface.

use std::rc::Rc;

use eqv_runtime::{Allocator, ClassRegistry, ObjRef, Value};
use eqv_types::TypeDescriptor;

use crate::cache::ValueCache;
use crate::context::SynthesisContext;
use crate::errors::{SynthesisError, SynthesisResult};
use crate::fallback::FallbackFactory;
use crate::prefab::{PrefabFactory, PrefabRegistry};
use crate::tuple::{Color, Tuple};

/// Source of sample values for one verification run.
///
/// Owns the run's cache; construct a new provider per run.
pub struct ValueProvider<'a> {
    registry: &'a ClassRegistry,
    prefabs: PrefabRegistry,
    cache: ValueCache,
    fallback: FallbackFactory,
}

impl<'a> ValueProvider<'a> {
    pub fn new(registry: &'a ClassRegistry, prefabs: PrefabRegistry) -> Self {
        Self::with_fallback(registry, prefabs, FallbackFactory::default())
    }

    /// A provider that allocates class instances with `allocator`.
    pub fn with_allocator(
        registry: &'a ClassRegistry,
        prefabs: PrefabRegistry,
        allocator: Rc<dyn Allocator>,
    ) -> Self {
        Self::with_fallback(registry, prefabs, FallbackFactory::new(allocator))
    }

    fn with_fallback(
        registry: &'a ClassRegistry,
        prefabs: PrefabRegistry,
        fallback: FallbackFactory,
    ) -> Self {
        ValueProvider {
            registry,
            prefabs,
            cache: ValueCache::new(),
            fallback,
        }
    }

    #[inline]
    pub fn registry(&self) -> &'a ClassRegistry {
        self.registry
    }

    #[inline]
    pub fn prefabs(&self) -> &PrefabRegistry {
        &self.prefabs
    }

    #[inline]
    pub fn cache(&self) -> &ValueCache {
        &self.cache
    }

    /// Ensure the cache holds a triple for `ty` and return it.
    ///
    /// Lookup order: cache, exact prefab, kind factory, fallback. Before a
    /// factory or the fallback runs, a placeholder of nulls is cached under
    /// `ty` so that self-references terminate. The placeholder is dropped
    /// again when synthesis fails.
    #[tracing::instrument(level = "debug", skip_all, fields(ty = %ty, depth = ctx.depth()))]
    pub fn realize(
        &self,
        ty: &TypeDescriptor,
        ctx: &SynthesisContext,
    ) -> SynthesisResult<Rc<Tuple>> {
        if let Some(tuple) = self.cache.get(ty) {
            if ctx.contains(ty) {
                tracing::debug!(path = %ctx, "recursive type; using placeholder values");
            }
            return Ok(tuple);
        }
        if let Some(tuple) = self.prefabs.get(ty) {
            return Ok(self.cache.put(ty.clone(), tuple.clone()));
        }

        tracing::debug!("cache miss");
        self.cache.put(ty.clone(), Tuple::nulls());
        let created = match self.prefabs.factory_for(ty) {
            Some(factory) => factory.create_values(ty, self, ctx),
            None => self.fallback.create_values(ty, self, ctx),
        };
        match created {
            Ok(tuple) => Ok(self.cache.put(ty.clone(), tuple)),
            Err(e) => {
                self.cache.remove(ty);
                Err(e)
            }
        }
    }

    /// `realize` for callers that only need the side effect.
    pub fn realize_cache_for(
        &self,
        ty: &TypeDescriptor,
        ctx: &SynthesisContext,
    ) -> SynthesisResult<()> {
        self.realize(ty, ctx).map(|_| ())
    }

    /// The cached triple for `ty`, if realized.
    pub fn get(&self, ty: &TypeDescriptor) -> Option<Rc<Tuple>> {
        self.cache.get(ty)
    }

    /// One member of the cached triple for `ty`.
    ///
    /// Fails with `NotRealized` when `realize` never ran for `ty`.
    pub fn give(&self, ty: &TypeDescriptor, color: Color) -> SynthesisResult<Value> {
        self.cache
            .get(ty)
            .map(|tuple| tuple.pick(color).clone())
            .ok_or_else(|| SynthesisError::NotRealized(ty.clone()))
    }

    pub fn give_red(&self, ty: &TypeDescriptor) -> SynthesisResult<Value> {
        self.give(ty, Color::Red)
    }

    pub fn give_blue(&self, ty: &TypeDescriptor) -> SynthesisResult<Value> {
        self.give(ty, Color::Blue)
    }

    pub fn give_red_copy(&self, ty: &TypeDescriptor) -> SynthesisResult<Value> {
        self.give(ty, Color::RedCopy)
    }

    /// A fresh instance of the class type `ty` whose instance fields hold
    /// the `color` values of their types.
    ///
    /// A red copy is filled with red field values: it is a separate object
    /// sharing the red object's field values.
    pub fn give_object(
        &self,
        ty: &TypeDescriptor,
        color: Color,
        ctx: &SynthesisContext,
    ) -> SynthesisResult<ObjRef> {
        let class = ty
            .class_id()
            .ok_or_else(|| SynthesisError::Unsupported(ty.clone()))?;
        let obj = self.fallback.allocate(self.registry, class)?;
        let field_color = match color {
            Color::Blue => Color::Blue,
            Color::Red | Color::RedCopy => Color::Red,
        };
        for field in self.registry.fields_of(obj.class()) {
            if field.is_static() {
                continue;
            }
            let field_ty = field.ty.resolve(ty);
            self.realize_cache_for(&field_ty, ctx)?;
            let value = self.give(&field_ty, field_color)?;
            tracing::trace!(field = %field.name, %value, "filling field");
            self.registry.write_field(&obj, &field, value)?;
        }
        Ok(obj)
    }
}
