//! eqv types - type descriptors for the eqv contract verifier.
//!
//! This crate contains the vocabulary shared by every other eqv crate:
//! - `Primitive` and `TypeKind` for the shapes a field type can take
//! - `TypeDescriptor` for a type together with its generic arguments
//! - `ClassId` handles into a class registry
//! - `FieldFlags` / `ClassFlags` modifier sets
//!
//! # Design
//!
//! Descriptors are plain data with structural `Eq + Hash`, so they can be used
//! directly as cache keys. `List<Str>` and `List<Int>` are different keys.

mod class_id;
mod descriptor;
mod flags;
mod primitive;

pub use class_id::ClassId;
pub use descriptor::{TypeDescriptor, TypeKind};
pub use flags::{ClassFlags, FieldFlags};
pub use primitive::Primitive;
