//! Lazily loaded fields read through their accessor.

use std::rc::Rc;

use eqv_runtime::{ClassId, MethodFn, Receiver, Thrown, Value};
use eqv_synth::{FieldProbe, SubjectCreator, SynthesisError};
use eqv_types::{TypeDescriptor, TypeKind};

use super::{registry_of, sentinel_raised, FieldCheck};
use crate::annotations::SupportedAnnotation;
use crate::config::Configuration;
use crate::errors::{assert_true, CheckResult};
use crate::formatter::Formatter;
use crate::warning::Warning;

/// Lazily loaded fields must be read through their accessor in `equals` and
/// `hash`, so that a loading proxy gets the chance to fetch them.
///
/// Detection: a subclass overrides the accessor to raise the sentinel. If
/// `equals` on two instances of that subclass does not raise it, the field
/// was read directly.
pub struct JpaLazyGetterFieldCheck<'a> {
    creator: &'a SubjectCreator<'a>,
    config: &'a Configuration,
    strict_hashcode: bool,
}

impl<'a> JpaLazyGetterFieldCheck<'a> {
    pub fn new(creator: &'a SubjectCreator<'a>, config: &'a Configuration) -> Self {
        JpaLazyGetterFieldCheck {
            creator,
            config,
            strict_hashcode: config.suppresses(Warning::StrictHashcode),
        }
    }

    /// Does changing `field` change the outcome of `equals` (or of `hash`)?
    fn field_is_used(&self, field: &FieldProbe, for_equals: bool) -> CheckResult<bool> {
        let registry = registry_of(self.creator);
        let red = Value::Object(self.creator.plain()?);
        let blue = Value::Object(self.creator.with_field_changed(field.field())?);
        if for_equals {
            Ok(!registry.equals(&red, &blue)?)
        } else {
            Ok(registry.hash_code(&red)? != registry.hash_code(&blue)?)
        }
    }

    fn field_is_lazy(&self, field: &FieldProbe) -> bool {
        let annotations = self.config.annotations();
        let declaring = field.field().declaring;
        annotations.has_field_annotation(declaring, field.name(), SupportedAnnotation::JpaLinkedField)
            || annotations.has_field_annotation(
                declaring,
                field.name(),
                SupportedAnnotation::JpaLazyField,
            )
    }

    /// Subclass of the type under test whose `getter` raises the sentinel.
    fn throwing_getter_subclass(&self, getter: &str) -> CheckResult<ClassId> {
        let method = getter.to_string();
        let throwing: MethodFn = Rc::new(move |_: &Receiver<'_>| {
            Err(Thrown::Sentinel {
                method: method.clone(),
            })
        });
        let sub = registry_of(self.creator)
            .derive_subclass(self.config.class(), getter, vec![(getter.to_string(), throwing)])
            .map_err(SynthesisError::from)?;
        Ok(sub)
    }
}

fn assert_entity(field: &str, method: &str, getter: &str, assertion: bool) -> CheckResult<()> {
    assert_true(
        &Formatter::of("JPA Entity: direct reference to field %% used in %% instead of getter %%().")
            .arg(field)
            .arg(method)
            .arg(getter),
        assertion,
    )
}

impl FieldCheck for JpaLazyGetterFieldCheck<'_> {
    fn name(&self) -> &'static str {
        "lazy accessor"
    }

    fn execute(&self, field: &FieldProbe) -> CheckResult<()> {
        let registry = registry_of(self.creator);
        let class = self.config.class();
        let name = field.name();
        let getter = self.config.getter_for(name);

        if field.is_static() || !self.field_is_lazy(field) {
            return Ok(());
        }
        if registry.class(class).map_err(SynthesisError::from)?.is_final() {
            return Ok(());
        }
        if !self.field_is_used(field, true)? {
            return Ok(());
        }

        assert_entity(name, "equals", &getter, registry.has_method(class, &getter))?;
        let sub = self.throwing_getter_subclass(&getter)?;
        let sub_ty = TypeDescriptor::with_args(
            TypeKind::Class(sub),
            self.config.type_descriptor().args().to_vec(),
        );
        let red1 = Value::Object(self.creator.plain_of(&sub_ty)?);
        let red2 = Value::Object(self.creator.plain_of(&sub_ty)?);

        let equals_caught = sentinel_raised(registry.equals(&red1, &red2))?;
        assert_entity(name, "equals", &getter, equals_caught)?;

        let used_in_hash = !self.strict_hashcode || self.field_is_used(field, false)?;
        let hash_caught = sentinel_raised(registry.hash_code(&red1))?;
        assert_entity(name, "hashCode", &getter, hash_caught || !used_in_hash)
    }
}
