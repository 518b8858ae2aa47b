//! eqv check - field checks of the equals/hash contract.
//!
//! For every declared field of the type under test, each enabled check builds
//! subjects that differ in a controlled way and compares how `equals` and
//! `hash` react:
//!
//! - reflexivity: an object equals an identical copy of itself
//! - transient fields do not take part in equality
//! - case-insensitive string equality comes with a case-insensitive hash
//! - lazily loaded fields are read through their accessor
//!
//! # Usage
//!
//! ```text
//! let config = Configuration::builder(TypeDescriptor::class(person))
//!     .suppress([Warning::NullFields])
//!     .build()?;
//! eqv_check::verify(&registry, &config)?;
//! ```

mod annotations;
mod checks;
mod config;
mod driver;
mod errors;
mod formatter;
mod warning;

#[cfg(test)]
mod test_helpers;

use std::sync::Once;

pub use annotations::{field_is_nonnull, AnnotationCache, MarkerTable, SupportedAnnotation};
pub use checks::{
    FieldCheck, JpaLazyGetterFieldCheck, ReflexivityFieldCheck, StringFieldCheck,
    TransientFieldsCheck,
};
pub use config::{CachedHashCodeInitializer, Configuration, ConfigurationBuilder, GetterNameFn};
pub use driver::{verify, FieldsChecker};
pub use errors::{assert_equals, assert_false, assert_true, fail, CheckError, CheckResult};
pub use formatter::Formatter;
pub use warning::{Warning, Warnings};

static TRACING_INIT: Once = Once::new();

/// Initialize tracing from `RUST_LOG`.
///
/// Does nothing when `RUST_LOG` is unset. Safe to call more than once.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, prelude::*, EnvFilter};

        if std::env::var("RUST_LOG").is_ok() {
            let filter = EnvFilter::from_default_env();
            tracing_subscriber::registry()
                .with(fmt::layer().with_target(true).with_level(true))
                .with(filter)
                .init();
        }
    });
}
