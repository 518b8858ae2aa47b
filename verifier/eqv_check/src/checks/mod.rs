//! Field checks.
//!
//! Each check probes one declared field of the type under test at a time.
//! Checks build their own subjects and never modify cached values.

mod lazy;
mod reflexivity;
mod string;
mod transient;

use eqv_runtime::{ClassRegistry, InvokeResult};
use eqv_synth::FieldProbe;

use crate::errors::CheckResult;

pub use lazy::JpaLazyGetterFieldCheck;
pub use reflexivity::ReflexivityFieldCheck;
pub use string::StringFieldCheck;
pub use transient::TransientFieldsCheck;

/// A probe run once per declared field.
pub trait FieldCheck {
    /// Short name for logs.
    fn name(&self) -> &'static str;

    /// Probe `field`; a contract violation is returned as
    /// `CheckError::Violation`.
    fn execute(&self, field: &FieldProbe) -> CheckResult<()>;
}

/// Did `result` fail with the sentinel? Other failures are passed on.
fn sentinel_raised<T>(result: InvokeResult<T>) -> CheckResult<bool> {
    match result {
        Ok(_) => Ok(false),
        Err(thrown) if thrown.is_sentinel() => Ok(true),
        Err(thrown) => Err(thrown.into()),
    }
}

fn registry_of<'a>(creator: &eqv_synth::SubjectCreator<'a>) -> &'a ClassRegistry {
    creator.provider().registry()
}

#[cfg(test)]
mod tests;
