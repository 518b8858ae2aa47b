//! Fixture classes for synthesis unit tests.

#![allow(clippy::unwrap_used)]

use eqv_runtime::{ClassBuilder, ClassRegistry, FieldFlags};
use eqv_types::{ClassId, Primitive, TypeDescriptor};

use crate::{PrefabRegistry, ValueProvider};

pub(crate) fn int() -> TypeDescriptor {
    TypeDescriptor::prim(Primitive::Int)
}

/// `Point { x: int, y: int, label: Str }` with derived value semantics and a
/// static counter.
pub(crate) fn point(registry: &ClassRegistry) -> ClassId {
    registry
        .define(
            ClassBuilder::new("Point")
                .field("x", int())
                .field("y", int())
                .field("label", TypeDescriptor::string())
                .field_with("CREATED", int(), FieldFlags::STATIC)
                .derive_value_semantics(),
        )
        .unwrap()
}

/// `Node { value: int, next: Node }`.
pub(crate) fn node(registry: &ClassRegistry) -> ClassId {
    let id = registry.next_id();
    registry
        .define(
            ClassBuilder::new("Node")
                .field("value", int())
                .field("next", TypeDescriptor::class(id))
                .derive_value_semantics(),
        )
        .unwrap()
}

/// `Holder<T> { content: T }`.
pub(crate) fn holder(registry: &ClassRegistry) -> ClassId {
    registry
        .define(
            ClassBuilder::new("Holder")
                .type_params(1)
                .field("content", TypeDescriptor::var(0))
                .derive_value_semantics(),
        )
        .unwrap()
}

pub(crate) fn enumeration(registry: &ClassRegistry, name: &str, constants: &[&str]) -> ClassId {
    registry
        .define(ClassBuilder::enumeration(name, constants))
        .unwrap()
}

pub(crate) fn provider(registry: &ClassRegistry) -> ValueProvider<'_> {
    ValueProvider::new(registry, PrefabRegistry::with_builtins())
}
