//! Case-insensitive string equality.

use eqv_runtime::{RuntimeError, Value};
use eqv_synth::{FieldProbe, SubjectCreator, SynthesisContext, SynthesisError};
use eqv_types::TypeDescriptor;

use super::{registry_of, FieldCheck};
use crate::config::Configuration;
use crate::errors::{fail, CheckResult};
use crate::formatter::Formatter;

/// Case-insensitive string equality needs a case-insensitive hash.
pub struct StringFieldCheck<'a> {
    creator: &'a SubjectCreator<'a>,
    config: &'a Configuration,
}

impl<'a> StringFieldCheck<'a> {
    pub fn new(creator: &'a SubjectCreator<'a>, config: &'a Configuration) -> Self {
        StringFieldCheck { creator, config }
    }
}

impl FieldCheck for StringFieldCheck<'_> {
    fn name(&self) -> &'static str {
        "string"
    }

    fn execute(&self, field: &FieldProbe) -> CheckResult<()> {
        if !field.ty().is_string() || field.is_static() {
            return Ok(());
        }
        let strings = self
            .creator
            .provider()
            .realize(&TypeDescriptor::string(), &SynthesisContext::empty())?;
        let Some(red) = strings.red().as_str() else {
            return Ok(());
        };

        let reference = self
            .creator
            .with_field_set_to(field.field(), Value::string(red.to_lowercase()));
        let copy = self
            .creator
            .with_field_set_to(field.field(), Value::string(red.to_uppercase()));
        let (reference, copy) = match (reference, copy) {
            (Ok(reference), Ok(copy)) => (reference, copy),
            // The field does not accept a differently cased string.
            (Err(SynthesisError::Runtime(RuntimeError::IncompatibleValue { .. })), _)
            | (_, Err(SynthesisError::Runtime(RuntimeError::IncompatibleValue { .. }))) => {
                return Ok(());
            }
            (Err(e), _) | (_, Err(e)) => return Err(e.into()),
        };

        let registry = registry_of(self.creator);
        let they_are_equal = registry.equals(
            &Value::Object(reference.clone()),
            &Value::Object(copy.clone()),
        )?;
        let hash_codes_are_equal = self.config.initialized_hash_code(registry, &reference)?
            == self.config.initialized_hash_code(registry, &copy)?;

        if they_are_equal && !hash_codes_are_equal {
            return fail(
                &Formatter::of(
                    "String equality: class uses equalsIgnoreCase to compare String field %%, \
                     but hashCode is case-sensitive. Use toUpperCase() to determine the hashCode.",
                )
                .arg(field.name()),
            );
        }
        Ok(())
    }
}
