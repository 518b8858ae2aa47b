//! Synthesis errors.
//!
//! None of these describe a defect in the type under test: they either mean
//! the type cannot be synthesized at all, or that the engine itself is broken.

use eqv_runtime::{RuntimeError, Thrown};
use eqv_types::TypeDescriptor;
use thiserror::Error;

/// Result of a synthesis operation.
pub type SynthesisResult<T> = Result<T, SynthesisError>;

#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum SynthesisError {
    /// A triple was requested before `realize` ran for its type.
    #[error("internal error: no values realized for {0}; call realize first")]
    NotRealized(TypeDescriptor),

    /// No prefab, factory or fallback can produce values of this type.
    #[error("no way to synthesize values of {0}")]
    Unsupported(TypeDescriptor),

    /// Subjects never write static fields; their storage is shared by
    /// every instance of the class.
    #[error("cannot build a subject by writing static field `{0}`")]
    StaticField(String),

    /// The object model refused an allocation or assignment.
    #[error(transparent)]
    Runtime(#[from] RuntimeError),

    /// Behaviour of the type under test raised while building a subject.
    #[error("{0}")]
    Thrown(#[from] Thrown),
}
