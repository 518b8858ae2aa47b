use eqv_runtime::ClassRegistry;
use pretty_assertions::assert_eq;
use proptest::prelude::*;

use super::*;
use crate::test_helpers::{enumeration, int, node, point, provider};

fn render(registry: &ClassRegistry, obj: &ObjRef) -> String {
    registry.render(&Value::Object(obj.clone()))
}

#[test]
fn test_plain_is_fresh_each_time() {
    let registry = ClassRegistry::new();
    let class = point(&registry);
    let provider = provider(&registry);
    let creator = SubjectCreator::new(&provider, TypeDescriptor::class(class)).unwrap();

    let a = creator.plain().unwrap();
    let b = creator.plain().unwrap();
    assert!(!eqv_runtime::Heap::ptr_eq(&a, &b));
    assert_eq!(render(&registry, &a), "Point{x=1, y=1, label=\"one\"}");
    assert!(registry
        .equals(&Value::Object(a), &Value::Object(b))
        .unwrap());
}

#[test]
fn test_with_field_changed() {
    let registry = ClassRegistry::new();
    let class = point(&registry);
    let provider = provider(&registry);
    let creator = SubjectCreator::new(&provider, TypeDescriptor::class(class)).unwrap();
    let y = registry.find_field(class, "y").unwrap();

    let changed = creator.with_field_changed(&y).unwrap();
    assert_eq!(render(&registry, &changed), "Point{x=1, y=2, label=\"one\"}");
}

#[test]
fn test_with_field_defaulted() {
    let registry = ClassRegistry::new();
    let class = point(&registry);
    let provider = provider(&registry);
    let creator = SubjectCreator::new(&provider, TypeDescriptor::class(class)).unwrap();
    let label = registry.find_field(class, "label").unwrap();
    let x = registry.find_field(class, "x").unwrap();

    let no_label = creator.with_field_defaulted(&label).unwrap();
    assert_eq!(render(&registry, &no_label), "Point{x=1, y=1, label=null}");
    let zero_x = creator.with_field_defaulted(&x).unwrap();
    assert_eq!(render(&registry, &zero_x), "Point{x=0, y=1, label=\"one\"}");
}

#[test]
fn test_with_field_set_to_rejects_incompatible_value() {
    let registry = ClassRegistry::new();
    let class = point(&registry);
    let provider = provider(&registry);
    let creator = SubjectCreator::new(&provider, TypeDescriptor::class(class)).unwrap();
    let x = registry.find_field(class, "x").unwrap();

    let err = creator
        .with_field_set_to(&x, Value::string("nope"))
        .unwrap_err();
    assert!(matches!(err, SynthesisError::Runtime(_)));
    let ok = creator.with_field_set_to(&x, Value::Int(40)).unwrap();
    assert!(matches!(registry.read_field(&ok, &x), Value::Int(40)));
}

#[test]
fn test_static_fields_are_never_written() {
    let registry = ClassRegistry::new();
    let class = point(&registry);
    let provider = provider(&registry);
    let creator = SubjectCreator::new(&provider, TypeDescriptor::class(class)).unwrap();
    let created = registry.find_field(class, "CREATED").unwrap();
    let obj = creator.plain().unwrap();
    registry.write_field(&obj, &created, Value::Int(7)).unwrap();

    let err = creator.with_field_defaulted(&created).unwrap_err();
    assert_eq!(err, SynthesisError::StaticField("CREATED".into()));
    assert!(creator.with_field_changed(&created).is_err());
    assert!(matches!(registry.read_field(&obj, &created), Value::Int(7)));
}

#[test]
fn test_single_constant_enum_changes_to_default() {
    let registry = ClassRegistry::new();
    let single = enumeration(&registry, "Single", &["ONLY"]);
    let class = registry
        .define(
            eqv_runtime::ClassBuilder::new("Tagged")
                .field("tag", TypeDescriptor::class(single))
                .field("n", int()),
        )
        .unwrap();
    let provider = provider(&registry);
    let creator = SubjectCreator::new(&provider, TypeDescriptor::class(class)).unwrap();
    let tag = registry.find_field(class, "tag").unwrap();

    let changed = creator.with_field_changed(&tag).unwrap();
    assert!(registry.read_field(&changed, &tag).is_null());
}

#[test]
fn test_field_values_of_recursive_field() {
    let registry = ClassRegistry::new();
    let class = node(&registry);
    let provider = provider(&registry);
    let creator = SubjectCreator::new(&provider, TypeDescriptor::class(class)).unwrap();
    let value = registry.find_field(class, "value").unwrap();

    let tuple = creator.field_values(&value).unwrap();
    assert!(matches!(tuple.blue(), Value::Int(2)));
}

proptest! {
    #[test]
    fn changing_one_field_leaves_the_others_red(index in 0usize..3) {
        let registry = ClassRegistry::new();
        let class = point(&registry);
        let provider = provider(&registry);
        let creator = SubjectCreator::new(&provider, TypeDescriptor::class(class)).unwrap();
        let fields: Vec<_> = registry
            .fields_of(class)
            .into_iter()
            .filter(|f| !f.is_static())
            .collect();
        let target = &fields[index];

        let plain = creator.plain().unwrap();
        let changed = creator.with_field_changed(target).unwrap();
        for field in &fields {
            let before = registry.read_field(&plain, field);
            let after = registry.read_field(&changed, field);
            let same = registry.equals(&before, &after).unwrap();
            prop_assert_eq!(same, field.name != target.name, "{}", field.name);
        }
    }
}
