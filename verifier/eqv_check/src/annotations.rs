//! Annotation queries.
//!
//! How markers get attached to classes and fields is up to the caller; the
//! checks only ask whether a marker is present.

use eqv_types::ClassId;
use rustc_hash::{FxHashMap, FxHashSet};

/// Markers the checks understand.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum SupportedAnnotation {
    /// Class is a persistent entity.
    Entity,
    /// Field is excluded from persistent state.
    Transient,
    /// Field (or every field of a class) is never null.
    Nonnull,
    /// Field is a lazily fetched association.
    JpaLazyField,
    /// Field is a mapped relation (one-to-many, many-to-one, ...).
    JpaLinkedField,
}

/// Capability query for markers on classes and fields.
pub trait AnnotationCache {
    fn has_class_annotation(&self, class: ClassId, annotation: SupportedAnnotation) -> bool;

    fn has_field_annotation(
        &self,
        class: ClassId,
        field: &str,
        annotation: SupportedAnnotation,
    ) -> bool;
}

/// A field is nonnull when it, or its declaring class, is marked `Nonnull`.
pub fn field_is_nonnull(cache: &dyn AnnotationCache, class: ClassId, field: &str) -> bool {
    cache.has_field_annotation(class, field, SupportedAnnotation::Nonnull)
        || cache.has_class_annotation(class, SupportedAnnotation::Nonnull)
}

/// Table of markers filled in by the caller.
#[derive(Clone, Debug, Default)]
pub struct MarkerTable {
    classes: FxHashMap<ClassId, FxHashSet<SupportedAnnotation>>,
    fields: FxHashMap<(ClassId, String), FxHashSet<SupportedAnnotation>>,
}

impl MarkerTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark a class.
    #[must_use]
    pub fn class(mut self, class: ClassId, annotation: SupportedAnnotation) -> Self {
        self.classes.entry(class).or_default().insert(annotation);
        self
    }

    /// Mark a field of its declaring class.
    #[must_use]
    pub fn field(
        mut self,
        class: ClassId,
        field: impl Into<String>,
        annotation: SupportedAnnotation,
    ) -> Self {
        self.fields
            .entry((class, field.into()))
            .or_default()
            .insert(annotation);
        self
    }
}

impl AnnotationCache for MarkerTable {
    fn has_class_annotation(&self, class: ClassId, annotation: SupportedAnnotation) -> bool {
        self.classes
            .get(&class)
            .is_some_and(|set| set.contains(&annotation))
    }

    fn has_field_annotation(
        &self,
        class: ClassId,
        field: &str,
        annotation: SupportedAnnotation,
    ) -> bool {
        self.fields
            .get(&(class, field.to_string()))
            .is_some_and(|set| set.contains(&annotation))
    }
}
