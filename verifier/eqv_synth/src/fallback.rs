//! Synthesis by force.
//!
//! Used for every type that has neither a prefab triple nor a factory: user
//! classes, enums and arrays. Classes are allocated without running any
//! construction logic and filled field by field with values from the cache.

use std::rc::Rc;

use eqv_runtime::{Allocator, ClassRegistry, ForcedAllocator, ObjRef, RuntimeResult, Value};
use eqv_types::{ClassId, TypeDescriptor, TypeKind};

use crate::context::SynthesisContext;
use crate::errors::{SynthesisError, SynthesisResult};
use crate::prefab::PrefabFactory;
use crate::provider::ValueProvider;
use crate::tuple::Tuple;

/// Factory of last resort.
#[derive(Clone)]
pub struct FallbackFactory {
    allocator: Rc<dyn Allocator>,
}

impl Default for FallbackFactory {
    fn default() -> Self {
        Self::new(Rc::new(ForcedAllocator))
    }
}

impl FallbackFactory {
    pub fn new(allocator: Rc<dyn Allocator>) -> Self {
        FallbackFactory { allocator }
    }

    /// A blank instance of `class`.
    pub fn allocate(&self, registry: &ClassRegistry, class: ClassId) -> RuntimeResult<ObjRef> {
        self.allocator.allocate(registry, class)
    }

    fn give_array_instances(
        ty: &TypeDescriptor,
        provider: &ValueProvider<'_>,
        ctx: &SynthesisContext,
    ) -> SynthesisResult<Tuple> {
        let component = ty.component().cloned().unwrap_or_else(TypeDescriptor::any);
        provider.realize_cache_for(&component, ctx)?;
        Tuple::from_fn(|color| {
            let item = provider.give(&component, color)?;
            Ok(Value::array(component.clone(), vec![item]))
        })
    }

    /// Make sure every field type of `ty` is in the cache before any
    /// instance gets filled.
    fn traverse_fields(
        ty: &TypeDescriptor,
        class: ClassId,
        provider: &ValueProvider<'_>,
        ctx: &SynthesisContext,
    ) -> SynthesisResult<()> {
        for field in provider.registry().fields_of(class) {
            if !field.flags.is_constant() {
                provider.realize_cache_for(&field.ty.resolve(ty), ctx)?;
            }
        }
        Ok(())
    }
}

/// Enum triple: the first two constants, or whatever exists.
///
/// The red copy is the red constant itself; constants are singletons.
fn give_enum_instances(constants: &[Value]) -> Tuple {
    match constants {
        [] => Tuple::nulls(),
        [only] => Tuple::new(only.clone(), only.clone(), only.clone()),
        [first, second, ..] => Tuple::new(first.clone(), second.clone(), first.clone()),
    }
}

impl PrefabFactory for FallbackFactory {
    #[tracing::instrument(level = "debug", skip_all, fields(ty = %ty))]
    fn create_values(
        &self,
        ty: &TypeDescriptor,
        provider: &ValueProvider<'_>,
        ctx: &SynthesisContext,
    ) -> SynthesisResult<Tuple> {
        let ctx = ctx.clone_and_add(ty);
        match ty.kind() {
            TypeKind::Array => Self::give_array_instances(ty, provider, &ctx),
            TypeKind::Class(class) => {
                let def = provider.registry().class(class)?;
                if def.is_enum() {
                    return Ok(give_enum_instances(def.constants()));
                }
                Self::traverse_fields(ty, class, provider, &ctx)?;
                Tuple::from_fn(|color| {
                    provider
                        .give_object(ty, color, &ctx)
                        .map(Value::Object)
                })
            }
            _ => Err(SynthesisError::Unsupported(ty.clone())),
        }
    }
}

#[cfg(test)]
mod tests;
