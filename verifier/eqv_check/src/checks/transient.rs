//! Transient fields stay out of equality.

use eqv_runtime::Value;
use eqv_synth::{FieldProbe, SubjectCreator};

use super::{registry_of, FieldCheck};
use crate::annotations::SupportedAnnotation;
use crate::config::Configuration;
use crate::errors::{fail, CheckResult};
use crate::formatter::Formatter;

/// Transient state must not take part in equality.
pub struct TransientFieldsCheck<'a> {
    creator: &'a SubjectCreator<'a>,
    config: &'a Configuration,
}

impl<'a> TransientFieldsCheck<'a> {
    pub fn new(creator: &'a SubjectCreator<'a>, config: &'a Configuration) -> Self {
        TransientFieldsCheck { creator, config }
    }
}

impl FieldCheck for TransientFieldsCheck<'_> {
    fn name(&self) -> &'static str {
        "transient"
    }

    fn execute(&self, field: &FieldProbe) -> CheckResult<()> {
        let has_annotation = self.config.annotations().has_field_annotation(
            field.field().declaring,
            field.name(),
            SupportedAnnotation::Transient,
        );
        if field.is_static() || (!field.is_transient() && !has_annotation) {
            return Ok(());
        }

        let reference = Value::Object(self.creator.plain()?);
        let changed = Value::Object(self.creator.with_field_changed(field.field())?);
        let equals_changed = !registry_of(self.creator).equals(&reference, &changed)?;
        if equals_changed {
            return fail(
                &Formatter::of(
                    "Transient field %% should not be included in equals/hashCode contract.",
                )
                .arg(field.name()),
            );
        }
        Ok(())
    }
}
