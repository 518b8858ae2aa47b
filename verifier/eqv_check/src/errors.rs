//! Check errors and the assertion helpers that raise them.

use eqv_runtime::{ClassRegistry, Thrown, Value};
use eqv_synth::SynthesisError;
use thiserror::Error;

use crate::formatter::Formatter;

/// Result of running a check.
pub type CheckResult<T> = Result<T, CheckError>;

#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum CheckError {
    /// The type under test breaks the equals/hash contract.
    #[error("{0}")]
    Violation(String),

    /// The configuration cannot describe a verification run.
    #[error("invalid configuration: {0}")]
    Configuration(String),

    /// Values for the type could not be synthesized.
    #[error(transparent)]
    Synthesis(#[from] SynthesisError),

    /// `equals`, `hash` or an accessor of the type under test raised.
    #[error("{0}")]
    Thrown(#[from] Thrown),
}

impl CheckError {
    pub fn is_violation(&self) -> bool {
        matches!(self, CheckError::Violation(_))
    }
}

/// Fail with the formatted message.
pub fn fail(message: &Formatter) -> CheckResult<()> {
    Err(CheckError::Violation(message.format()))
}

pub fn assert_true(message: &Formatter, condition: bool) -> CheckResult<()> {
    if condition {
        Ok(())
    } else {
        fail(message)
    }
}

pub fn assert_false(message: &Formatter, condition: bool) -> CheckResult<()> {
    assert_true(message, !condition)
}

/// Fail unless `expected.equals(actual)` holds.
pub fn assert_equals(
    message: &Formatter,
    registry: &ClassRegistry,
    expected: &Value,
    actual: &Value,
) -> CheckResult<()> {
    assert_true(message, registry.equals(expected, actual)?)
}
