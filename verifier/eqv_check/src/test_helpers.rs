//! Fixture classes for check unit tests.

#![allow(clippy::unwrap_used)]

use eqv_runtime::{ClassBuilder, ClassRegistry, FieldFlags, Receiver, Value};
use eqv_synth::{PrefabRegistry, SubjectCreator, ValueProvider};
use eqv_types::{ClassId, Primitive, TypeDescriptor};

use crate::config::Configuration;

pub(crate) fn int() -> TypeDescriptor {
    TypeDescriptor::prim(Primitive::Int)
}

/// `Point { x: int, y: int, label: Str }` with derived value semantics.
pub(crate) fn point(registry: &ClassRegistry) -> ClassId {
    registry
        .define(
            ClassBuilder::new("Point")
                .field("x", int())
                .field("y", int())
                .field("label", TypeDescriptor::string())
                .derive_value_semantics(),
        )
        .unwrap()
}

/// `Session { id: int, transient cache: int }` whose `equals` also compares
/// the transient field.
pub(crate) fn leaky_session(registry: &ClassRegistry) -> ClassId {
    registry
        .define(
            ClassBuilder::new("Session")
                .field("id", int())
                .field_with("cache", int(), FieldFlags::TRANSIENT)
                .equals(|this, other| fields_equal(this, other, &["id", "cache"]))
                .hash(|this| this.hash(&this.field("id")?)),
        )
        .unwrap()
}

/// `Tag { name: Str }` comparing `name` by reference.
pub(crate) fn identity_tag(registry: &ClassRegistry) -> ClassId {
    registry
        .define(
            ClassBuilder::new("Tag")
                .field("name", TypeDescriptor::string())
                .equals(|this, other| {
                    let Some(that) = this.peer(other) else {
                        return Ok(false);
                    };
                    Ok(this.field("name")?.same_ref(&that.field("name")?))
                })
                .hash(|_| Ok(0)),
        )
        .unwrap()
}

/// Field-wise `equals` over the given fields, read directly.
pub(crate) fn fields_equal(
    this: &Receiver<'_>,
    other: &Value,
    fields: &[&str],
) -> eqv_runtime::InvokeResult<bool> {
    let Some(that) = this.peer(other) else {
        return Ok(false);
    };
    for name in fields {
        if !this.eq(&this.field(name)?, &that.field(name)?)? {
            return Ok(false);
        }
    }
    Ok(true)
}

pub(crate) fn config(class: ClassId) -> Configuration {
    Configuration::builder(TypeDescriptor::class(class))
        .build()
        .unwrap()
}

pub(crate) fn provider(registry: &ClassRegistry) -> ValueProvider<'_> {
    ValueProvider::new(registry, PrefabRegistry::with_builtins())
}

pub(crate) fn creator<'a>(provider: &'a ValueProvider<'a>, class: ClassId) -> SubjectCreator<'a> {
    SubjectCreator::new(provider, TypeDescriptor::class(class)).unwrap()
}
