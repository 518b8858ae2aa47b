//! eqv synth - synthesis of distinguishable sample values.
//!
//! Every type under test needs three sample values: `red`, `blue` and
//! `red_copy` (see [`Tuple`]). This crate produces them:
//!
//! - [`PrefabRegistry`] holds explicit triples (built-in and caller supplied)
//!   and factories for generic containers
//! - [`FallbackFactory`] builds instances of user classes by force, filling
//!   every field recursively
//! - [`ValueCache`] remembers every triple of a run and breaks cycles in
//!   self-referential types
//! - [`ValueProvider`] ties the three together
//! - [`SubjectCreator`] builds the instances of the type under test that the
//!   field checks compare
//!
//! # Cycles
//!
//! Before a type is synthesized, a placeholder triple of nulls is stored under
//! its descriptor. A field that refers back to a type still being synthesized
//! therefore finds the placeholder instead of recursing forever.

mod cache;
mod context;
mod errors;
mod fallback;
mod prefab;
mod probe;
mod provider;
mod subject;
mod tuple;

#[cfg(test)]
mod test_helpers;

pub use cache::ValueCache;
pub use context::SynthesisContext;
pub use errors::{SynthesisError, SynthesisResult};
pub use fallback::FallbackFactory;
pub use prefab::{PrefabFactory, PrefabRegistry};
pub use probe::FieldProbe;
pub use provider::ValueProvider;
pub use subject::SubjectCreator;
pub use tuple::{Color, Tuple};
