//! Configuration of a verification run.

use std::fmt;
use std::rc::Rc;

use eqv_runtime::{getter_name, ClassRegistry, InvokeResult, ObjRef, Thrown, Value};
use eqv_synth::{PrefabRegistry, Tuple};
use eqv_types::{ClassId, TypeDescriptor};
use rustc_hash::FxHashSet;

use crate::annotations::{AnnotationCache, MarkerTable};
use crate::errors::{CheckError, CheckResult};
use crate::warning::{Warning, Warnings};

/// Maps a field name to the name of its accessor.
pub type GetterNameFn = Rc<dyn Fn(&str) -> String>;

/// A class that caches its own hash code in a field.
///
/// Before such an object is hashed, the cache field is refreshed by calling
/// the recompute method, so that objects built by force (whose cache field
/// is only defaulted) report their real hash.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CachedHashCodeInitializer {
    cache_field: String,
    recompute_method: String,
}

impl CachedHashCodeInitializer {
    pub fn new(cache_field: impl Into<String>, recompute_method: impl Into<String>) -> Self {
        CachedHashCodeInitializer {
            cache_field: cache_field.into(),
            recompute_method: recompute_method.into(),
        }
    }

    pub fn cache_field(&self) -> &str {
        &self.cache_field
    }

    /// Refresh the cache field of `obj`, then hash it.
    pub fn initialized_hash_code(
        &self,
        registry: &ClassRegistry,
        obj: &ObjRef,
    ) -> InvokeResult<u64> {
        let field = registry
            .find_field(obj.class(), &self.cache_field)
            .ok_or_else(|| Thrown::NoSuchField {
                class: registry.name_of(obj.class()),
                field: self.cache_field.clone(),
            })?;
        let recomputed = registry.invoke(obj, &self.recompute_method)?;
        registry.write_field(obj, &field, recomputed)?;
        registry.hash_code(&Value::Object(obj.clone()))
    }
}

/// Everything a verification run needs besides the class registry.
#[derive(Clone)]
pub struct Configuration {
    ty: TypeDescriptor,
    class: ClassId,
    warnings: Warnings,
    annotations: Rc<dyn AnnotationCache>,
    getter_name: GetterNameFn,
    nonnull_fields: FxHashSet<String>,
    prefabs: PrefabRegistry,
    cached_hash_code: Option<CachedHashCodeInitializer>,
}

impl Configuration {
    /// Start configuring a run for `ty`.
    pub fn builder(ty: TypeDescriptor) -> ConfigurationBuilder {
        ConfigurationBuilder::new(ty)
    }

    /// The type under test.
    #[inline]
    pub fn type_descriptor(&self) -> &TypeDescriptor {
        &self.ty
    }

    /// The class of the type under test.
    #[inline]
    pub fn class(&self) -> ClassId {
        self.class
    }

    #[inline]
    pub fn warnings(&self) -> Warnings {
        self.warnings
    }

    #[inline]
    pub fn suppresses(&self, warning: Warning) -> bool {
        self.warnings.suppresses(warning)
    }

    pub fn annotations(&self) -> &dyn AnnotationCache {
        self.annotations.as_ref()
    }

    /// Accessor name for `field`.
    pub fn getter_for(&self, field: &str) -> String {
        (self.getter_name)(field)
    }

    /// Was `field` declared nonnull by the caller?
    pub fn is_nonnull_field(&self, field: &str) -> bool {
        self.nonnull_fields.contains(field)
    }

    pub fn prefabs(&self) -> &PrefabRegistry {
        &self.prefabs
    }

    pub fn cached_hash_code(&self) -> Option<&CachedHashCodeInitializer> {
        self.cached_hash_code.as_ref()
    }

    /// Hash of `obj`, refreshing a cached hash code first if configured.
    pub fn initialized_hash_code(
        &self,
        registry: &ClassRegistry,
        obj: &ObjRef,
    ) -> InvokeResult<u64> {
        match &self.cached_hash_code {
            Some(init) => init.initialized_hash_code(registry, obj),
            None => registry.hash_code(&Value::Object(obj.clone())),
        }
    }
}

impl fmt::Debug for Configuration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Configuration")
            .field("ty", &self.ty)
            .field("warnings", &self.warnings)
            .field("nonnull_fields", &self.nonnull_fields)
            .field("cached_hash_code", &self.cached_hash_code)
            .finish_non_exhaustive()
    }
}

/// Fluent construction of a `Configuration`.
pub struct ConfigurationBuilder {
    ty: TypeDescriptor,
    warnings: Warnings,
    annotations: Rc<dyn AnnotationCache>,
    getter_name: GetterNameFn,
    nonnull_fields: FxHashSet<String>,
    prefabs: PrefabRegistry,
    cached_hash_code: Option<CachedHashCodeInitializer>,
}

impl ConfigurationBuilder {
    pub fn new(ty: TypeDescriptor) -> Self {
        ConfigurationBuilder {
            ty,
            warnings: Warnings::empty(),
            annotations: Rc::new(MarkerTable::new()),
            getter_name: Rc::new(getter_name),
            nonnull_fields: FxHashSet::default(),
            prefabs: PrefabRegistry::with_builtins(),
            cached_hash_code: None,
        }
    }

    /// Suppress the given warnings.
    #[must_use]
    pub fn suppress(mut self, warnings: impl IntoIterator<Item = Warning>) -> Self {
        self.warnings |= warnings.into_iter().collect::<Warnings>();
        self
    }

    #[must_use]
    pub fn annotations(mut self, annotations: impl AnnotationCache + 'static) -> Self {
        self.annotations = Rc::new(annotations);
        self
    }

    /// Replace the default `name -> getName` accessor mapping.
    #[must_use]
    pub fn field_name_to_getter(mut self, mapping: impl Fn(&str) -> String + 'static) -> Self {
        self.getter_name = Rc::new(mapping);
        self
    }

    /// Declare fields that never hold null.
    #[must_use]
    pub fn nonnull_fields<S: Into<String>>(mut self, fields: impl IntoIterator<Item = S>) -> Self {
        self.nonnull_fields.extend(fields.into_iter().map(Into::into));
        self
    }

    /// Supply red, blue and red copy values for `ty`.
    #[must_use]
    pub fn with_prefab_values(mut self, ty: TypeDescriptor, tuple: Tuple) -> Self {
        self.prefabs.put(ty, tuple);
        self
    }

    #[must_use]
    pub fn with_cached_hash_code(mut self, initializer: CachedHashCodeInitializer) -> Self {
        self.cached_hash_code = Some(initializer);
        self
    }

    /// Finish; fails when the type under test is not a class type.
    pub fn build(self) -> CheckResult<Configuration> {
        let class = self.ty.class_id().ok_or_else(|| {
            CheckError::Configuration(format!("{} is not a class type", self.ty))
        })?;
        Ok(Configuration {
            ty: self.ty,
            class,
            warnings: self.warnings,
            annotations: self.annotations,
            getter_name: self.getter_name,
            nonnull_fields: self.nonnull_fields,
            prefabs: self.prefabs,
            cached_hash_code: self.cached_hash_code,
        })
    }
}

#[cfg(test)]
mod tests;
