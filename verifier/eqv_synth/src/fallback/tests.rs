use eqv_runtime::{ClassBuilder, ClassFlags, FieldFlags};
use eqv_types::Primitive;
use pretty_assertions::assert_eq;

use super::*;
use crate::test_helpers::{enumeration, int, provider};

fn create(provider: &ValueProvider<'_>, ty: &TypeDescriptor) -> SynthesisResult<Tuple> {
    FallbackFactory::default().create_values(ty, provider, &SynthesisContext::empty())
}

#[test]
fn test_enum_without_constants_gives_nulls() {
    let registry = ClassRegistry::new();
    let empty = enumeration(&registry, "Empty", &[]);
    let provider = provider(&registry);
    let tuple = create(&provider, &TypeDescriptor::class(empty)).unwrap();
    assert!(tuple.red().is_null());
    assert!(tuple.blue().is_null());
    assert!(tuple.red_copy().is_null());
}

#[test]
fn test_enum_with_one_constant_repeats_it() {
    let registry = ClassRegistry::new();
    let single = enumeration(&registry, "Single", &["ONLY"]);
    let provider = provider(&registry);
    let tuple = create(&provider, &TypeDescriptor::class(single)).unwrap();
    assert!(tuple.red().same_ref(tuple.blue()));
    assert!(tuple.red().same_ref(tuple.red_copy()));
}

#[test]
fn test_enum_uses_first_two_constants() {
    let registry = ClassRegistry::new();
    let color = enumeration(&registry, "Color", &["RED", "GREEN", "BLUE"]);
    let provider = provider(&registry);
    let tuple = create(&provider, &TypeDescriptor::class(color)).unwrap();
    assert_eq!(tuple.red().to_string(), "RED");
    assert_eq!(tuple.blue().to_string(), "GREEN");
    assert!(tuple.red().same_ref(tuple.red_copy()));
}

#[test]
fn test_array_wraps_component_values() {
    let registry = ClassRegistry::new();
    let provider = provider(&registry);
    let ty = TypeDescriptor::array_of(TypeDescriptor::prim(Primitive::Char));
    let tuple = create(&provider, &ty).unwrap();
    assert_eq!(tuple.red().to_string(), "['a']");
    assert_eq!(tuple.blue().to_string(), "['b']");
    assert_eq!(tuple.red_copy().to_string(), "['a']");
    assert!(!tuple.red().same_ref(tuple.red_copy()));
}

#[test]
fn test_static_constants_are_not_synthesized() {
    let registry = ClassRegistry::new();
    let handle = registry
        .define(ClassBuilder::new("Handle").flags(ClassFlags::OPAQUE))
        .unwrap();
    let holder = registry
        .define(
            ClassBuilder::new("Service")
                .field("port", int())
                .field_with(
                    "DEFAULT",
                    TypeDescriptor::class(handle),
                    FieldFlags::STATIC | FieldFlags::FINAL,
                ),
        )
        .unwrap();
    let provider = provider(&registry);
    let tuple = create(&provider, &TypeDescriptor::class(holder)).unwrap();
    assert!(tuple.red().as_object().is_some());
    assert!(provider.get(&TypeDescriptor::class(handle)).is_none());
}

#[test]
fn test_non_class_types_are_unsupported() {
    let registry = ClassRegistry::new();
    let provider = provider(&registry);
    let ty = TypeDescriptor::var(0);
    assert_eq!(
        create(&provider, &ty).unwrap_err(),
        SynthesisError::Unsupported(ty)
    );
}
