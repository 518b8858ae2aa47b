//! Reflexivity: an object equals an identical copy of itself.

use eqv_runtime::{ClassRegistry, ObjRef, Value};
use eqv_synth::{FieldProbe, SubjectCreator};
use eqv_types::{TypeDescriptor, TypeKind};

use super::{registry_of, FieldCheck};
use crate::annotations::{field_is_nonnull, SupportedAnnotation};
use crate::config::Configuration;
use crate::errors::{assert_equals, assert_false, CheckResult};
use crate::formatter::Formatter;
use crate::warning::Warning;

/// An object must equal an identical copy of itself: as built, with a field
/// holding a content-equal copy, and with a field defaulted.
pub struct ReflexivityFieldCheck<'a> {
    creator: &'a SubjectCreator<'a>,
    config: &'a Configuration,
}

impl<'a> ReflexivityFieldCheck<'a> {
    pub fn new(creator: &'a SubjectCreator<'a>, config: &'a Configuration) -> Self {
        ReflexivityFieldCheck { creator, config }
    }

    fn registry(&self) -> &'a ClassRegistry {
        registry_of(self.creator)
    }

    /// Reflexivity of a type that has no fields to probe.
    pub fn check_type(&self) -> CheckResult<()> {
        if self
            .config
            .suppresses(Warning::IdenticalCopyForVersionedEntity)
        {
            return Ok(());
        }
        self.check_reference_reflexivity()
    }

    fn check_reference_reflexivity(&self) -> CheckResult<()> {
        let left = self.creator.plain()?;
        let right = self.creator.plain()?;
        self.check_reflexivity_for(&left, &right)
    }

    fn check_value_reflexivity(&self, probe: &FieldProbe) -> CheckResult<()> {
        if self.config.suppresses(Warning::ReferenceEquality) || probe.is_static() {
            return Ok(());
        }
        if !self.declares_equals(probe.ty()) {
            return Ok(());
        }

        let values = self.creator.field_values(probe.field())?;
        let left = self
            .creator
            .with_field_set_to(probe.field(), values.red().clone())?;
        let right = self
            .creator
            .with_field_set_to(probe.field(), values.red_copy().clone())?;

        let f = Formatter::of(
            "Reflexivity: == used instead of .equals() on field: %%\
             \nIf this is intentional, consider suppressing Warning.%%",
        )
        .arg(probe.name())
        .arg(Warning::ReferenceEquality);
        assert_equals(
            &f,
            self.registry(),
            &Value::Object(left),
            &Value::Object(right),
        )
    }

    /// Does `ty` have value equality of its own, so that comparing a value
    /// with its copy tells `equals` from `==`?
    fn declares_equals(&self, ty: &TypeDescriptor) -> bool {
        match ty.kind() {
            TypeKind::Any | TypeKind::Var(_) | TypeKind::Prim(_) | TypeKind::Array => false,
            TypeKind::Class(id) => self.registry().get(id).is_some_and(|def| {
                !def.is_interface() && !def.is_synthetic() && !def.is_enum() && def.defines_equals()
            }),
            _ => true,
        }
    }

    fn check_null_reflexivity(&self, probe: &FieldProbe) -> CheckResult<()> {
        if probe.is_static() {
            return Ok(());
        }
        if probe.is_primitive() && self.config.suppresses(Warning::ZeroFields) {
            return Ok(());
        }
        let annotations = self.config.annotations();
        let is_nonnull = field_is_nonnull(annotations, probe.field().declaring, probe.name())
            || annotations.has_class_annotation(self.config.class(), SupportedAnnotation::Nonnull);
        if self.config.suppresses(Warning::NullFields)
            || is_nonnull
            || self.config.is_nonnull_field(probe.name())
        {
            return Ok(());
        }

        let left = self.creator.with_field_defaulted(probe.field())?;
        let right = self.creator.with_field_defaulted(probe.field())?;
        self.check_reflexivity_for(&left, &right)
    }

    fn check_reflexivity_for(&self, left: &ObjRef, right: &ObjRef) -> CheckResult<()> {
        let registry = self.registry();
        let left = Value::Object(left.clone());
        let right = Value::Object(right.clone());

        if self.config.suppresses(Warning::IdenticalCopy) {
            let f = Formatter::of("Unnecessary suppression: %%. Two identical copies are equal.")
                .arg(Warning::IdenticalCopy);
            return assert_false(&f, registry.equals(&left, &right)?);
        }

        // Identity equality is accepted when reference equality is suppressed.
        if self.config.suppresses(Warning::ReferenceEquality)
            && !registry.declares_equals(self.config.class())
        {
            return Ok(());
        }

        let is_entity = self
            .config
            .annotations()
            .has_class_annotation(self.config.class(), SupportedAnnotation::Entity);
        let f = if is_entity {
            Formatter::of(
                "Reflexivity: entity does not equal an identical copy of itself:\n  %%\
                 \nIf this is intentional, consider suppressing Warning.%%.",
            )
            .arg(registry.render(&left))
            .arg(Warning::IdenticalCopyForVersionedEntity)
        } else {
            Formatter::of(
                "Reflexivity: object does not equal an identical copy of itself:\n  %%\
                 \nIf this is intentional, consider suppressing Warning.%%.",
            )
            .arg(registry.render(&left))
            .arg(Warning::IdenticalCopy)
        };
        assert_equals(&f, registry, &left, &right)
    }
}

impl FieldCheck for ReflexivityFieldCheck<'_> {
    fn name(&self) -> &'static str {
        "reflexivity"
    }

    fn execute(&self, field: &FieldProbe) -> CheckResult<()> {
        if self
            .config
            .suppresses(Warning::IdenticalCopyForVersionedEntity)
        {
            return Ok(());
        }
        self.check_reference_reflexivity()?;
        self.check_value_reflexivity(field)?;
        self.check_null_reflexivity(field)
    }
}
