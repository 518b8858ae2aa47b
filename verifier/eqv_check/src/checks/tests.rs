use eqv_runtime::{ClassBuilder, ClassFlags, Thrown, Value};
use eqv_types::{ClassId, TypeDescriptor};
use pretty_assertions::assert_eq;

use super::*;
use crate::annotations::{MarkerTable, SupportedAnnotation};
use crate::config::Configuration;
use crate::errors::CheckError;
use crate::test_helpers::{config, creator, identity_tag, leaky_session, point, provider};
use crate::warning::Warning;

fn probe(registry: &ClassRegistry, class: ClassId, field: &str) -> FieldProbe {
    FieldProbe::new(
        registry.find_field(class, field).unwrap(),
        &TypeDescriptor::class(class),
    )
}

fn violation(result: CheckResult<()>) -> String {
    match result {
        Err(CheckError::Violation(message)) => message,
        other => panic!("expected a violation, got {other:?}"),
    }
}

#[test]
fn test_sentinel_raised() {
    assert!(!sentinel_raised(Ok::<_, Thrown>(1)).unwrap());
    assert!(sentinel_raised::<()>(Err(Thrown::Sentinel {
        method: "getName".into()
    }))
    .unwrap());
    let err = sentinel_raised::<()>(Err(Thrown::Raised("boom".into()))).unwrap_err();
    assert_eq!(err, CheckError::Thrown(Thrown::Raised("boom".into())));
}

// Reflexivity

#[test]
fn test_reflexivity_passes_for_value_class() {
    let registry = ClassRegistry::new();
    let class = point(&registry);
    let provider = provider(&registry);
    let creator = creator(&provider, class);
    let config = config(class);
    let check = ReflexivityFieldCheck::new(&creator, &config);

    for field in ["x", "y", "label"] {
        check.execute(&probe(&registry, class, field)).unwrap();
    }
}

#[test]
fn test_reflexivity_detects_reference_comparison() {
    let registry = ClassRegistry::new();
    let class = identity_tag(&registry);
    let provider = provider(&registry);
    let creator = creator(&provider, class);
    let config = config(class);
    let check = ReflexivityFieldCheck::new(&creator, &config);

    let message = violation(check.execute(&probe(&registry, class, "name")));
    assert_eq!(
        message,
        "Reflexivity: == used instead of .equals() on field: name\
         \nIf this is intentional, consider suppressing Warning.REFERENCE_EQUALITY"
    );
}

#[test]
fn test_reflexivity_reference_comparison_suppressed() {
    let registry = ClassRegistry::new();
    let class = identity_tag(&registry);
    let provider = provider(&registry);
    let creator = creator(&provider, class);
    let config = Configuration::builder(TypeDescriptor::class(class))
        .suppress([Warning::ReferenceEquality])
        .build()
        .unwrap();

    ReflexivityFieldCheck::new(&creator, &config)
        .execute(&probe(&registry, class, "name"))
        .unwrap();
}

#[test]
fn test_reflexivity_unnecessary_identical_copy_suppression() {
    let registry = ClassRegistry::new();
    let class = point(&registry);
    let provider = provider(&registry);
    let creator = creator(&provider, class);
    let config = Configuration::builder(TypeDescriptor::class(class))
        .suppress([Warning::IdenticalCopy])
        .build()
        .unwrap();

    let message = violation(
        ReflexivityFieldCheck::new(&creator, &config).execute(&probe(&registry, class, "x")),
    );
    assert_eq!(
        message,
        "Unnecessary suppression: IDENTICAL_COPY. Two identical copies are equal."
    );
}

#[test]
fn test_reflexivity_null_probe_fails_on_null_unsafe_equals() {
    let registry = ClassRegistry::new();
    let class = registry
        .define(
            ClassBuilder::new("Label")
                .field("text", TypeDescriptor::string())
                .equals(|this, other| {
                    let Some(that) = this.peer(other) else {
                        return Ok(false);
                    };
                    let (a, b) = (this.field("text")?, that.field("text")?);
                    // Null text never equals anything.
                    Ok(!a.is_null() && this.eq(&a, &b)?)
                })
                .hash(|_| Ok(0)),
        )
        .unwrap();
    let provider = provider(&registry);
    let creator = creator(&provider, class);
    let text = probe(&registry, class, "text");

    let message = violation(ReflexivityFieldCheck::new(&creator, &config(class)).execute(&text));
    assert!(message.starts_with(
        "Reflexivity: object does not equal an identical copy of itself:\n  Label{text=null}"
    ));

    let nonnull = Configuration::builder(TypeDescriptor::class(class))
        .nonnull_fields(["text"])
        .build()
        .unwrap();
    ReflexivityFieldCheck::new(&creator, &nonnull)
        .execute(&text)
        .unwrap();

    let annotated = Configuration::builder(TypeDescriptor::class(class))
        .annotations(MarkerTable::new().field(class, "text", SupportedAnnotation::Nonnull))
        .build()
        .unwrap();
    ReflexivityFieldCheck::new(&creator, &annotated)
        .execute(&text)
        .unwrap();
}

// Transient

#[test]
fn test_transient_field_in_equals_is_reported() {
    let registry = ClassRegistry::new();
    let class = leaky_session(&registry);
    let provider = provider(&registry);
    let creator = creator(&provider, class);
    let config = config(class);
    let check = TransientFieldsCheck::new(&creator, &config);

    check.execute(&probe(&registry, class, "id")).unwrap();
    let message = violation(check.execute(&probe(&registry, class, "cache")));
    assert_eq!(
        message,
        "Transient field cache should not be included in equals/hashCode contract."
    );
}

#[test]
fn test_transient_annotation_counts_as_transient() {
    let registry = ClassRegistry::new();
    let class = point(&registry);
    let provider = provider(&registry);
    let creator = creator(&provider, class);
    let config = Configuration::builder(TypeDescriptor::class(class))
        .annotations(MarkerTable::new().field(class, "y", SupportedAnnotation::Transient))
        .build()
        .unwrap();
    let check = TransientFieldsCheck::new(&creator, &config);

    check.execute(&probe(&registry, class, "x")).unwrap();
    let message = violation(check.execute(&probe(&registry, class, "y")));
    assert!(message.starts_with("Transient field y "));
}

// String

fn case_insensitive_name(registry: &ClassRegistry, upper_case_hash: bool) -> ClassId {
    registry
        .define(
            ClassBuilder::new("Name")
                .field("value", TypeDescriptor::string())
                .equals(|this, other| {
                    let Some(that) = this.peer(other) else {
                        return Ok(false);
                    };
                    let (a, b) = (this.field("value")?, that.field("value")?);
                    Ok(match (a.as_str(), b.as_str()) {
                        (Some(a), Some(b)) => a.eq_ignore_ascii_case(b),
                        (None, None) => true,
                        _ => false,
                    })
                })
                .hash(move |this| {
                    let value = this.field("value")?;
                    match value.as_str() {
                        Some(s) if upper_case_hash => this.hash(&Value::string(s.to_uppercase())),
                        _ => this.hash(&value),
                    }
                }),
        )
        .unwrap()
}

#[test]
fn test_string_case_sensitive_hash_is_reported() {
    let registry = ClassRegistry::new();
    let class = case_insensitive_name(&registry, false);
    let provider = provider(&registry);
    let creator = creator(&provider, class);
    let config = config(class);

    let message = violation(
        StringFieldCheck::new(&creator, &config).execute(&probe(&registry, class, "value")),
    );
    assert_eq!(
        message,
        "String equality: class uses equalsIgnoreCase to compare String field value, \
         but hashCode is case-sensitive. Use toUpperCase() to determine the hashCode."
    );
}

#[test]
fn test_string_case_insensitive_hash_passes() {
    let registry = ClassRegistry::new();
    let class = case_insensitive_name(&registry, true);
    let provider = provider(&registry);
    let creator = creator(&provider, class);
    let config = config(class);

    StringFieldCheck::new(&creator, &config)
        .execute(&probe(&registry, class, "value"))
        .unwrap();
}

#[test]
fn test_string_check_ignores_other_fields() {
    let registry = ClassRegistry::new();
    let class = point(&registry);
    let provider = provider(&registry);
    let creator = creator(&provider, class);
    let config = config(class);
    let check = StringFieldCheck::new(&creator, &config);

    check.execute(&probe(&registry, class, "x")).unwrap();
    check.execute(&probe(&registry, class, "label")).unwrap();
}

// Lazy accessors

enum Access {
    Direct,
    Accessors,
    AccessorEqualsConstantHash,
}

fn order(registry: &ClassRegistry, access: Access, flags: ClassFlags) -> ClassId {
    let builder = ClassBuilder::new("Order")
        .flags(flags)
        .field("customer", TypeDescriptor::string())
        .getter("getCustomer", "customer");
    let builder = match access {
        Access::Direct => builder.derive_value_semantics(),
        Access::Accessors => builder.derive_value_semantics_via_accessors(),
        Access::AccessorEqualsConstantHash => builder
            .hash(|_| Ok(7))
            .derive_value_semantics_via_accessors(),
    };
    registry.define(builder).unwrap()
}

fn lazy_config(class: ClassId, suppress: &[Warning]) -> Configuration {
    Configuration::builder(TypeDescriptor::class(class))
        .annotations(MarkerTable::new().field(class, "customer", SupportedAnnotation::JpaLazyField))
        .suppress(suppress.iter().copied())
        .build()
        .unwrap()
}

#[test]
fn test_lazy_direct_reference_in_equals() {
    let registry = ClassRegistry::new();
    let class = order(&registry, Access::Direct, ClassFlags::empty());
    let provider = provider(&registry);
    let creator = creator(&provider, class);
    let config = lazy_config(class, &[]);

    let message = violation(
        JpaLazyGetterFieldCheck::new(&creator, &config)
            .execute(&probe(&registry, class, "customer")),
    );
    assert_eq!(
        message,
        "JPA Entity: direct reference to field customer used in equals instead of getter getCustomer()."
    );
}

#[test]
fn test_lazy_read_through_accessors_passes() {
    let registry = ClassRegistry::new();
    let class = order(&registry, Access::Accessors, ClassFlags::empty());
    let provider = provider(&registry);
    let creator = creator(&provider, class);
    let config = lazy_config(class, &[]);

    JpaLazyGetterFieldCheck::new(&creator, &config)
        .execute(&probe(&registry, class, "customer"))
        .unwrap();
}

#[test]
fn test_lazy_hash_without_accessor() {
    let registry = ClassRegistry::new();
    let class = order(&registry, Access::AccessorEqualsConstantHash, ClassFlags::empty());
    let provider = provider(&registry);
    let creator = creator(&provider, class);
    let customer = probe(&registry, class, "customer");

    let message = violation(
        JpaLazyGetterFieldCheck::new(&creator, &lazy_config(class, &[])).execute(&customer),
    );
    assert!(message.contains("used in hashCode instead of getter getCustomer()"));

    // The hash does not depend on the field at all.
    let strict = lazy_config(class, &[Warning::StrictHashcode]);
    JpaLazyGetterFieldCheck::new(&creator, &strict)
        .execute(&customer)
        .unwrap();
}

#[test]
fn test_lazy_check_skips_final_and_plain_fields() {
    let registry = ClassRegistry::new();
    let class = order(&registry, Access::Direct, ClassFlags::FINAL);
    let provider = provider(&registry);
    let creator = creator(&provider, class);
    let customer = probe(&registry, class, "customer");

    JpaLazyGetterFieldCheck::new(&creator, &lazy_config(class, &[]))
        .execute(&customer)
        .unwrap();
    JpaLazyGetterFieldCheck::new(&creator, &config(class))
        .execute(&customer)
        .unwrap();
}
