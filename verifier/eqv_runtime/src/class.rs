//! Class definitions and the builder used to declare them.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use eqv_types::{ClassFlags, ClassId, FieldFlags, TypeDescriptor};
use rustc_hash::FxHashMap;

use crate::dispatch::Receiver;
use crate::errors::InvokeResult;
use crate::value::Value;

/// `equals(this, other)` behaviour of a class.
pub type EqualsFn = Rc<dyn Fn(&Receiver<'_>, &Value) -> InvokeResult<bool>>;

/// `hash(this)` behaviour of a class.
pub type HashFn = Rc<dyn Fn(&Receiver<'_>) -> InvokeResult<u64>>;

/// A zero-argument method (accessors, recompute methods).
pub type MethodFn = Rc<dyn Fn(&Receiver<'_>) -> InvokeResult<Value>>;

/// Where a field's value lives.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Storage {
    /// Slot index in every instance.
    Instance(usize),
    /// Slot index in the declaring class's static storage.
    Static(usize),
}

/// A declared field.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct FieldDef {
    /// Field name.
    pub name: String,
    /// Declared type; may mention type variables of the declaring class.
    pub ty: TypeDescriptor,
    /// Modifiers.
    pub flags: FieldFlags,
    /// Class that declares the field.
    pub declaring: ClassId,
    /// Storage location.
    pub storage: Storage,
}

impl FieldDef {
    #[inline]
    pub fn is_static(&self) -> bool {
        self.flags.contains(FieldFlags::STATIC)
    }

    #[inline]
    pub fn is_final(&self) -> bool {
        self.flags.contains(FieldFlags::FINAL)
    }

    #[inline]
    pub fn is_transient(&self) -> bool {
        self.flags.contains(FieldFlags::TRANSIENT)
    }
}

/// How a class wants its equality derived, if at all.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum DeriveMode {
    /// Field-wise over direct field reads.
    Fields,
    /// Field-wise through `get<Field>` accessors.
    Accessors,
}

/// A registered class.
pub struct ClassDef {
    pub(crate) id: ClassId,
    pub(crate) name: String,
    pub(crate) superclass: Option<ClassId>,
    pub(crate) flags: ClassFlags,
    pub(crate) type_params: u8,
    /// Fields declared by this class only (not inherited).
    pub(crate) fields: Vec<FieldDef>,
    /// Total instance slots including inherited ones.
    pub(crate) slot_count: usize,
    pub(crate) statics: RefCell<Vec<Value>>,
    pub(crate) constants: Vec<Value>,
    pub(crate) methods: FxHashMap<String, MethodFn>,
    pub(crate) equals: Option<EqualsFn>,
    pub(crate) hash: Option<HashFn>,
}

impl ClassDef {
    #[inline]
    pub fn id(&self) -> ClassId {
        self.id
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    pub fn superclass(&self) -> Option<ClassId> {
        self.superclass
    }

    #[inline]
    pub fn flags(&self) -> ClassFlags {
        self.flags
    }

    /// Number of generic type parameters.
    #[inline]
    pub fn type_params(&self) -> u8 {
        self.type_params
    }

    /// Fields declared directly on this class.
    #[inline]
    pub fn declared_fields(&self) -> &[FieldDef] {
        &self.fields
    }

    /// Enum constants in declaration order; empty for non-enums.
    #[inline]
    pub fn constants(&self) -> &[Value] {
        &self.constants
    }

    #[inline]
    pub fn slot_count(&self) -> usize {
        self.slot_count
    }

    pub fn is_final(&self) -> bool {
        self.flags.contains(ClassFlags::FINAL)
    }

    pub fn is_interface(&self) -> bool {
        self.flags.contains(ClassFlags::INTERFACE)
    }

    pub fn is_abstract(&self) -> bool {
        self.flags
            .intersects(ClassFlags::ABSTRACT | ClassFlags::INTERFACE)
    }

    pub fn is_enum(&self) -> bool {
        self.flags.contains(ClassFlags::ENUM)
    }

    pub fn is_synthetic(&self) -> bool {
        self.flags.contains(ClassFlags::SYNTHETIC)
    }

    /// Does this class itself define `equals`?
    pub fn defines_equals(&self) -> bool {
        self.equals.is_some()
    }

    /// Does this class itself define the method `name`?
    pub fn defines_method(&self, name: &str) -> bool {
        self.methods.contains_key(name)
    }
}

impl fmt::Debug for ClassDef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClassDef")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("superclass", &self.superclass)
            .field("flags", &self.flags)
            .field("fields", &self.fields)
            .field("methods", &self.methods.keys().collect::<Vec<_>>())
            .field("equals", &self.equals.is_some())
            .field("hash", &self.hash.is_some())
            .finish_non_exhaustive()
    }
}

/// Field declaration before the class has an id.
#[derive(Clone, Debug)]
pub(crate) struct PendingField {
    pub(crate) name: String,
    pub(crate) ty: TypeDescriptor,
    pub(crate) flags: FieldFlags,
}

/// Fluent declaration of a class, consumed by `ClassRegistry::define`.
///
/// # Example
///
/// ```text
/// let point = registry.define(
///     ClassBuilder::new("Point")
///         .field("x", TypeDescriptor::prim(Primitive::Int))
///         .field("y", TypeDescriptor::prim(Primitive::Int))
///         .derive_value_semantics(),
/// );
/// ```
pub struct ClassBuilder {
    pub(crate) name: String,
    pub(crate) superclass: Option<ClassId>,
    pub(crate) flags: ClassFlags,
    pub(crate) type_params: u8,
    pub(crate) fields: Vec<PendingField>,
    pub(crate) constants: Vec<String>,
    pub(crate) methods: FxHashMap<String, MethodFn>,
    pub(crate) equals: Option<EqualsFn>,
    pub(crate) hash: Option<HashFn>,
    pub(crate) derive: Option<DeriveMode>,
}

impl ClassBuilder {
    /// Start declaring a concrete class.
    pub fn new(name: impl Into<String>) -> Self {
        ClassBuilder {
            name: name.into(),
            superclass: None,
            flags: ClassFlags::empty(),
            type_params: 0,
            fields: Vec::new(),
            constants: Vec::new(),
            methods: FxHashMap::default(),
            equals: None,
            hash: None,
            derive: None,
        }
    }

    /// Start declaring an interface.
    pub fn interface(name: impl Into<String>) -> Self {
        Self::new(name).flags(ClassFlags::INTERFACE)
    }

    /// Start declaring an enum with the given constants.
    pub fn enumeration(name: impl Into<String>, constants: &[&str]) -> Self {
        let mut builder = Self::new(name).flags(ClassFlags::ENUM | ClassFlags::FINAL);
        builder.constants = constants.iter().map(|c| (*c).to_string()).collect();
        builder
    }

    #[must_use]
    pub fn extends(mut self, superclass: ClassId) -> Self {
        self.superclass = Some(superclass);
        self
    }

    /// Add class modifiers.
    #[must_use]
    pub fn flags(mut self, flags: ClassFlags) -> Self {
        self.flags |= flags;
        self
    }

    /// Declare the number of generic type parameters.
    #[must_use]
    pub fn type_params(mut self, count: u8) -> Self {
        self.type_params = count;
        self
    }

    /// Declare an instance field without modifiers.
    #[must_use]
    pub fn field(self, name: impl Into<String>, ty: TypeDescriptor) -> Self {
        self.field_with(name, ty, FieldFlags::empty())
    }

    /// Declare a field with modifiers.
    #[must_use]
    pub fn field_with(
        mut self,
        name: impl Into<String>,
        ty: TypeDescriptor,
        flags: FieldFlags,
    ) -> Self {
        self.fields.push(PendingField {
            name: name.into(),
            ty,
            flags,
        });
        self
    }

    /// Define a zero-argument method.
    #[must_use]
    pub fn method(
        mut self,
        name: impl Into<String>,
        body: impl Fn(&Receiver<'_>) -> InvokeResult<Value> + 'static,
    ) -> Self {
        self.methods.insert(name.into(), Rc::new(body));
        self
    }

    /// Define an accessor `method` that returns the value of `field`.
    #[must_use]
    pub fn getter(self, method: impl Into<String>, field: impl Into<String>) -> Self {
        let field = field.into();
        self.method(method, move |this| this.field(&field))
    }

    /// Define the `equals` behaviour.
    #[must_use]
    pub fn equals(
        mut self,
        body: impl Fn(&Receiver<'_>, &Value) -> InvokeResult<bool> + 'static,
    ) -> Self {
        self.equals = Some(Rc::new(body));
        self
    }

    /// Define the `hash` behaviour.
    #[must_use]
    pub fn hash(mut self, body: impl Fn(&Receiver<'_>) -> InvokeResult<u64> + 'static) -> Self {
        self.hash = Some(Rc::new(body));
        self
    }

    /// Derive `equals` and `hash` over every non-static, non-transient field
    /// of the class (inherited ones included), reading fields directly.
    #[must_use]
    pub fn derive_value_semantics(mut self) -> Self {
        self.derive = Some(DeriveMode::Fields);
        self
    }

    /// Like `derive_value_semantics`, but every field is read through its
    /// `get<Field>` accessor, which is generated when not already defined.
    #[must_use]
    pub fn derive_value_semantics_via_accessors(mut self) -> Self {
        self.derive = Some(DeriveMode::Accessors);
        self
    }
}
