//! eqv runtime - the reflective object model the verifier operates on.
//!
//! This crate provides:
//! - Runtime values (`Value`, `Heap`, `ObjRef`, `Temporal`, ...)
//! - Class definitions and the `ClassRegistry` that owns them
//! - Equality / hash / method dispatch with virtual overrides
//! - Derived value semantics for classes that want field-wise equality
//! - Forced instantiation that bypasses any construction logic
//!
//! # Architecture
//!
//! A type under test is described once with a `ClassBuilder` and registered.
//! Its `equals` and `hash` behaviour are closures that receive a `Receiver`,
//! a view of `this` that can read fields directly or go through accessors.
//! Going through `Receiver::call` is virtual: a subclass override (for
//! example one that raises `Thrown::Sentinel`) is what actually runs.
//!
//! # Single Threaded
//!
//! Heap values are reference counted with `Rc` and objects use `RefCell`
//! slots. Each verification run owns its own registry; nothing here is
//! shared across threads.

mod class;
mod derive;
mod dispatch;
mod errors;
mod heap;
mod instantiate;
mod object;
mod registry;
mod value;

pub use class::{ClassBuilder, ClassDef, EqualsFn, FieldDef, HashFn, MethodFn, Storage};
pub use derive::getter_name;
pub use dispatch::{combine_hashes, Receiver};
pub use errors::{InvokeResult, RuntimeError, RuntimeResult, Thrown};
pub use heap::Heap;
pub use instantiate::{Allocator, ForcedAllocator};
pub use object::{Instance, ObjRef};
pub use registry::ClassRegistry;
pub use value::{ArrayValue, EnumConstant, Temporal, Value};

pub use eqv_types::{ClassFlags, ClassId, FieldFlags, Primitive, TypeDescriptor, TypeKind};
