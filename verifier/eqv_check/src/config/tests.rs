use eqv_runtime::{Allocator, ClassBuilder, ClassRegistry, ForcedAllocator};
use eqv_types::Primitive;
use pretty_assertions::assert_eq;

use super::*;
use crate::annotations::SupportedAnnotation;
use crate::test_helpers::{int, point};

#[test]
fn test_defaults() {
    let registry = ClassRegistry::new();
    let class = point(&registry);
    let config = Configuration::builder(TypeDescriptor::class(class))
        .build()
        .unwrap();

    assert_eq!(config.class(), class);
    assert_eq!(config.warnings(), Warnings::empty());
    assert_eq!(config.getter_for("label"), "getLabel");
    assert!(!config.is_nonnull_field("label"));
    assert!(config.prefabs().contains(&TypeDescriptor::string()));
    assert!(config.cached_hash_code().is_none());
    assert!(!config
        .annotations()
        .has_class_annotation(class, SupportedAnnotation::Entity));
}

#[test]
fn test_builder_settings() {
    let registry = ClassRegistry::new();
    let class = point(&registry);
    let config = Configuration::builder(TypeDescriptor::class(class))
        .suppress([Warning::NullFields, Warning::StrictHashcode])
        .suppress([Warning::JpaGetter])
        .field_name_to_getter(|name| format!("read_{name}"))
        .nonnull_fields(["label"])
        .annotations(MarkerTable::new().class(class, SupportedAnnotation::Entity))
        .build()
        .unwrap();

    assert!(config.suppresses(Warning::NullFields));
    assert!(config.suppresses(Warning::StrictHashcode));
    assert!(config.suppresses(Warning::JpaGetter));
    assert!(!config.suppresses(Warning::ZeroFields));
    assert_eq!(config.getter_for("label"), "read_label");
    assert!(config.is_nonnull_field("label"));
    assert!(config
        .annotations()
        .has_class_annotation(class, SupportedAnnotation::Entity));
}

#[test]
fn test_prefab_values_override_builtins() {
    let registry = ClassRegistry::new();
    let class = point(&registry);
    let config = Configuration::builder(TypeDescriptor::class(class))
        .with_prefab_values(
            TypeDescriptor::string(),
            Tuple::new(Value::string("a"), Value::string("b"), Value::string("a")),
        )
        .build()
        .unwrap();

    let tuple = config.prefabs().get(&TypeDescriptor::string()).unwrap();
    assert_eq!(tuple.red().as_str(), Some("a"));
    assert_eq!(tuple.blue().as_str(), Some("b"));
}

#[test]
fn test_build_rejects_non_class_type() {
    let err = Configuration::builder(TypeDescriptor::prim(Primitive::Int))
        .build()
        .unwrap_err();
    assert!(matches!(err, CheckError::Configuration(_)));
    assert_eq!(err.to_string(), "invalid configuration: int is not a class type");
}

fn cached_hash_class(registry: &ClassRegistry) -> ClassId {
    registry
        .define(
            ClassBuilder::new("Cached")
                .field("cachedHash", int())
                .method("calcHash", |_| Ok(Value::Int(42)))
                .hash(|this| match this.field("cachedHash")? {
                    Value::Int(n) => Ok(u64::from(n.unsigned_abs())),
                    _ => Ok(0),
                }),
        )
        .unwrap()
}

#[test]
fn test_initialized_hash_code_refreshes_cache_field() {
    let registry = ClassRegistry::new();
    let class = cached_hash_class(&registry);
    let obj = ForcedAllocator.allocate(&registry, class).unwrap();

    let plain = Configuration::builder(TypeDescriptor::class(class))
        .build()
        .unwrap();
    assert_eq!(plain.initialized_hash_code(&registry, &obj).unwrap(), 0);

    let cached = Configuration::builder(TypeDescriptor::class(class))
        .with_cached_hash_code(CachedHashCodeInitializer::new("cachedHash", "calcHash"))
        .build()
        .unwrap();
    assert_eq!(cached.cached_hash_code().unwrap().cache_field(), "cachedHash");
    assert_eq!(cached.initialized_hash_code(&registry, &obj).unwrap(), 42);
}

#[test]
fn test_initialized_hash_code_unknown_cache_field() {
    let registry = ClassRegistry::new();
    let class = cached_hash_class(&registry);
    let obj = ForcedAllocator.allocate(&registry, class).unwrap();

    let init = CachedHashCodeInitializer::new("missing", "calcHash");
    let err = init.initialized_hash_code(&registry, &obj).unwrap_err();
    assert!(matches!(err, Thrown::NoSuchField { .. }));
}
