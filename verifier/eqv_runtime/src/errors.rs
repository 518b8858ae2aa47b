//! Error types of the object model.
//!
//! Two families:
//! - `Thrown`: what a running `equals` / `hash` / method raises. The sentinel
//!   variant is how intercepted accessors signal that they were reached.
//! - `RuntimeError`: failures of the model itself (allocation, assignment,
//!   unknown classes). These are never raised by code under test.

use eqv_types::ClassId;
use thiserror::Error;

/// Result of invoking behaviour of a class.
pub type InvokeResult<T> = Result<T, Thrown>;

/// Result of an object-model operation.
pub type RuntimeResult<T> = Result<T, RuntimeError>;

/// Failure raised while running class behaviour.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum Thrown {
    /// An intercepted method was reached.
    #[error("intercepted method `{method}` was invoked")]
    Sentinel { method: String },

    #[error("no field `{field}` on {class}")]
    NoSuchField { class: String, field: String },

    #[error("no method `{method}` on {class}")]
    NoSuchMethod { class: String, method: String },

    /// Raised explicitly by user behaviour.
    #[error("{0}")]
    Raised(String),

    #[error(transparent)]
    Runtime(#[from] RuntimeError),
}

impl Thrown {
    /// Did an intercepted method signal that it was reached?
    pub fn is_sentinel(&self) -> bool {
        matches!(self, Thrown::Sentinel { .. })
    }
}

/// Failure of the object model itself.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum RuntimeError {
    #[error("unknown class {0}")]
    UnknownClass(ClassId),

    #[error("cannot instantiate {class}: {reason}")]
    Uninstantiable { class: String, reason: &'static str },

    #[error("cannot subclass final class {0}")]
    FinalClass(String),

    #[error("no field `{field}` on {class}")]
    NoSuchField { class: String, field: String },

    #[error("cannot assign {value} to field `{field}` of type {ty}")]
    IncompatibleValue {
        field: String,
        ty: String,
        value: String,
    },
}
