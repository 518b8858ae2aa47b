//! Built-in triples and container factories.

use std::rc::Rc;

use eqv_runtime::Value;
use eqv_types::{Primitive, TypeDescriptor, TypeKind};

use super::{PrefabFactory, PrefabRegistry};
use crate::context::SynthesisContext;
use crate::errors::SynthesisResult;
use crate::provider::ValueProvider;
use crate::tuple::Tuple;

pub(super) fn register(registry: &mut PrefabRegistry) {
    for p in Primitive::ALL {
        let (red, blue) = scalar_samples(p);
        let tuple = Tuple::new(red.clone(), blue, red);
        registry.put_builtin(TypeDescriptor::boxed(p), tuple.clone());
        registry.put_builtin(TypeDescriptor::prim(p), tuple);
    }

    registry.put_builtin(
        TypeDescriptor::string(),
        Tuple::new(Value::string("one"), Value::string("two"), Value::string("one")),
    );
    registry.put_builtin(
        TypeDescriptor::any(),
        Tuple::new(Value::string("red"), Value::string("blue"), Value::string("red")),
    );

    registry.put_factory(TypeKind::List, ListFactory);
    registry.put_factory(TypeKind::Set, SetFactory);
    registry.put_factory(TypeKind::Optional, OptionalFactory);
    registry.put_factory(TypeKind::Map, MapFactory);
}

fn scalar_samples(p: Primitive) -> (Value, Value) {
    match p {
        Primitive::Bool => (Value::Bool(true), Value::Bool(false)),
        Primitive::Byte => (Value::Byte(1), Value::Byte(2)),
        Primitive::Short => (Value::Short(1), Value::Short(2)),
        Primitive::Int => (Value::Int(1), Value::Int(2)),
        Primitive::Long => (Value::Long(1), Value::Long(2)),
        Primitive::Float => (Value::Float(0.5), Value::Float(1.0)),
        Primitive::Double => (Value::Double(0.5), Value::Double(1.0)),
        Primitive::Char => (Value::Char('a'), Value::Char('b')),
    }
}

/// Element triple of a single-argument container.
fn element_values(
    ty: &TypeDescriptor,
    index: usize,
    provider: &ValueProvider<'_>,
    ctx: &SynthesisContext,
) -> SynthesisResult<Rc<Tuple>> {
    provider.realize(&ty.arg(index), &ctx.clone_and_add(ty))
}

/// `List<T>`: one-element lists.
struct ListFactory;

impl PrefabFactory for ListFactory {
    fn create_values(
        &self,
        ty: &TypeDescriptor,
        provider: &ValueProvider<'_>,
        ctx: &SynthesisContext,
    ) -> SynthesisResult<Tuple> {
        let element = element_values(ty, 0, provider, ctx)?;
        Ok(Tuple::new(
            Value::list(vec![element.red().clone()]),
            Value::list(vec![element.blue().clone()]),
            Value::list(vec![element.red().clone()]),
        ))
    }
}

/// `Set<T>`: one-element sets.
struct SetFactory;

impl PrefabFactory for SetFactory {
    fn create_values(
        &self,
        ty: &TypeDescriptor,
        provider: &ValueProvider<'_>,
        ctx: &SynthesisContext,
    ) -> SynthesisResult<Tuple> {
        let element = element_values(ty, 0, provider, ctx)?;
        Ok(Tuple::new(
            Value::set(vec![element.red().clone()]),
            Value::set(vec![element.blue().clone()]),
            Value::set(vec![element.red().clone()]),
        ))
    }
}

/// `Optional<T>`: present values.
struct OptionalFactory;

impl PrefabFactory for OptionalFactory {
    fn create_values(
        &self,
        ty: &TypeDescriptor,
        provider: &ValueProvider<'_>,
        ctx: &SynthesisContext,
    ) -> SynthesisResult<Tuple> {
        let element = element_values(ty, 0, provider, ctx)?;
        Ok(Tuple::new(
            Value::optional(Some(element.red().clone())),
            Value::optional(Some(element.blue().clone())),
            Value::optional(Some(element.red().clone())),
        ))
    }
}

/// `Map<K, V>`: single-entry maps that differ in their key.
struct MapFactory;

impl PrefabFactory for MapFactory {
    fn create_values(
        &self,
        ty: &TypeDescriptor,
        provider: &ValueProvider<'_>,
        ctx: &SynthesisContext,
    ) -> SynthesisResult<Tuple> {
        let key = element_values(ty, 0, provider, ctx)?;
        let value = element_values(ty, 1, provider, ctx)?;
        Ok(Tuple::new(
            Value::map(vec![(key.red().clone(), value.blue().clone())]),
            Value::map(vec![(key.blue().clone(), value.blue().clone())]),
            Value::map(vec![(key.red().clone(), value.blue().clone())]),
        ))
    }
}
