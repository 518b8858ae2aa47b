//! Registry of class definitions.
//!
//! The registry is append-only: classes are never removed or mutated after
//! `define`. It uses interior mutability so behaviour closures (which only
//! see `&ClassRegistry`) and the verifier can both derive new subclasses
//! while other code holds `Rc<ClassDef>` handles.
//!
//! # Design
//!
//! - Dense `Vec` indexed by `ClassId` for O(1) lookup
//! - `FxHashMap` by name, so derived subclasses are created once and reused
//! - Interfaces may be bound to caller-supplied implementation classes

use std::cell::RefCell;
use std::rc::Rc;

use eqv_types::{ClassFlags, ClassId, TypeDescriptor, TypeKind};
use rustc_hash::FxHashMap;
use smallvec::SmallVec;

use crate::class::{ClassBuilder, ClassDef, DeriveMode, EqualsFn, FieldDef, HashFn, MethodFn, Storage};
use crate::derive;
use crate::dispatch::Receiver;
use crate::errors::{RuntimeError, RuntimeResult};
use crate::object::ObjRef;
use crate::value::Value;

/// Inheritance chain, runtime class first.
pub(crate) type Chain = SmallVec<[Rc<ClassDef>; 4]>;

/// Registry of every class known to a verification run.
#[derive(Default)]
pub struct ClassRegistry {
    classes: RefCell<Vec<Rc<ClassDef>>>,
    by_name: RefCell<FxHashMap<String, ClassId>>,
    implementations: RefCell<FxHashMap<ClassId, ClassId>>,
}

impl ClassRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a class and return its id.
    ///
    /// Fails when the superclass is unknown or final.
    pub fn define(&self, builder: ClassBuilder) -> RuntimeResult<ClassId> {
        let parent = match builder.superclass {
            Some(sup) => {
                let parent = self.class(sup)?;
                if parent.is_final() {
                    return Err(RuntimeError::FinalClass(parent.name.clone()));
                }
                Some(parent)
            }
            None => None,
        };
        Ok(self.insert(builder, parent.as_deref()))
    }

    /// The id the next `define` will assign.
    ///
    /// Lets a class declare fields of its own type (linked nodes, trees).
    pub fn next_id(&self) -> ClassId {
        ClassId::new(u32::try_from(self.len()).unwrap_or(u32::MAX))
    }

    fn insert(&self, builder: ClassBuilder, parent: Option<&ClassDef>) -> ClassId {
        let id = self.next_id();
        let inherited_slots = parent.map_or(0, ClassDef::slot_count);

        let mut fields = Vec::with_capacity(builder.fields.len());
        let mut statics = Vec::new();
        let mut instance_slots = inherited_slots;
        for pending in builder.fields {
            let storage = if pending.flags.contains(eqv_types::FieldFlags::STATIC) {
                statics.push(Value::default_for(&pending.ty));
                Storage::Static(statics.len() - 1)
            } else {
                instance_slots += 1;
                Storage::Instance(instance_slots - 1)
            };
            fields.push(FieldDef {
                name: pending.name,
                ty: pending.ty,
                flags: pending.flags,
                declaring: id,
                storage,
            });
        }

        let constants = builder
            .constants
            .iter()
            .enumerate()
            .map(|(ordinal, name)| {
                Value::enum_constant(id, u32::try_from(ordinal).unwrap_or(u32::MAX), name)
            })
            .collect();

        let mut methods = builder.methods;
        let mut equals = builder.equals;
        let mut hash = builder.hash;
        if let Some(mode) = builder.derive {
            let mut names: Vec<String> = builder
                .superclass
                .map(|sup| self.fields_of(sup))
                .unwrap_or_default()
                .into_iter()
                .chain(fields.iter().cloned())
                .filter(|f| !f.is_static() && !f.is_transient())
                .map(|f| f.name)
                .collect();
            names.dedup();
            let (derived_eq, derived_hash): (EqualsFn, HashFn) = match mode {
                DeriveMode::Fields => (derive::field_equals(&names), derive::field_hash(&names)),
                DeriveMode::Accessors => {
                    let getters: Vec<String> =
                        names.iter().map(|n| derive::getter_name(n)).collect();
                    for (field, getter) in names.iter().zip(&getters) {
                        if !methods.contains_key(getter) {
                            let field = field.clone();
                            let body: MethodFn = Rc::new(move |this: &Receiver<'_>| this.field(&field));
                            methods.insert(getter.clone(), body);
                        }
                    }
                    (
                        derive::accessor_equals(&getters),
                        derive::accessor_hash(&getters),
                    )
                }
            };
            equals.get_or_insert(derived_eq);
            hash.get_or_insert(derived_hash);
        }

        let def = ClassDef {
            id,
            name: builder.name,
            superclass: builder.superclass,
            flags: builder.flags,
            type_params: builder.type_params,
            fields,
            slot_count: instance_slots,
            statics: RefCell::new(statics),
            constants,
            methods,
            equals,
            hash,
        };
        tracing::trace!(class = %def.name, %id, slots = def.slot_count, "defined class");
        self.by_name.borrow_mut().insert(def.name.clone(), id);
        self.classes.borrow_mut().push(Rc::new(def));
        id
    }

    /// Number of registered classes.
    pub fn len(&self) -> usize {
        self.classes.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Look up a class by id.
    pub fn get(&self, id: ClassId) -> Option<Rc<ClassDef>> {
        self.classes.borrow().get(id.index()).cloned()
    }

    /// Look up a class by id, failing for ids from another registry.
    pub fn class(&self, id: ClassId) -> RuntimeResult<Rc<ClassDef>> {
        self.get(id).ok_or(RuntimeError::UnknownClass(id))
    }

    /// Look up a class by name.
    pub fn lookup(&self, name: &str) -> Option<ClassId> {
        self.by_name.borrow().get(name).copied()
    }

    /// Name of a class, for messages.
    pub fn name_of(&self, id: ClassId) -> String {
        self.get(id)
            .map_or_else(|| id.to_string(), |c| c.name.clone())
    }

    /// The class followed by all of its superclasses.
    pub(crate) fn chain(&self, id: ClassId) -> Chain {
        let mut chain = Chain::new();
        let mut next = self.get(id);
        while let Some(class) = next {
            next = class.superclass.and_then(|sup| self.get(sup));
            chain.push(class);
        }
        chain
    }

    /// Every field of `id`, inherited ones first.
    pub fn fields_of(&self, id: ClassId) -> Vec<FieldDef> {
        self.chain(id)
            .iter()
            .rev()
            .flat_map(|class| class.fields.iter().cloned())
            .collect()
    }

    /// The field `name` as seen from `id`; subclass declarations shadow.
    pub fn find_field(&self, id: ClassId, name: &str) -> Option<FieldDef> {
        self.chain(id)
            .iter()
            .find_map(|class| class.fields.iter().find(|f| f.name == name).cloned())
    }

    /// The method `name` as dispatched on an instance of `id`.
    pub fn find_method(&self, id: ClassId, name: &str) -> Option<MethodFn> {
        self.chain(id)
            .iter()
            .find_map(|class| class.methods.get(name).cloned())
    }

    pub(crate) fn find_equals(&self, id: ClassId) -> Option<EqualsFn> {
        self.chain(id).iter().find_map(|class| class.equals.clone())
    }

    pub(crate) fn find_hash(&self, id: ClassId) -> Option<HashFn> {
        self.chain(id).iter().find_map(|class| class.hash.clone())
    }

    /// Does `id` (or a superclass) define its own `equals`?
    pub fn declares_equals(&self, id: ClassId) -> bool {
        self.find_equals(id).is_some()
    }

    /// Is `sub` the same class as `sup` or one of its descendants?
    ///
    /// An interface counts as a supertype of its registered implementation.
    pub fn is_subclass_of(&self, sub: ClassId, sup: ClassId) -> bool {
        if self.implementation_of(sup) == Some(sub) {
            return true;
        }
        self.chain(sub).iter().any(|class| class.id == sup)
    }

    /// Can `value` be stored in a field declared as `ty`?
    pub fn accepts(&self, ty: &TypeDescriptor, value: &Value) -> bool {
        match (ty.kind(), value) {
            (TypeKind::Prim(_), Value::Null) => false,
            (_, Value::Null) | (TypeKind::Any | TypeKind::Var(_), _) => true,
            (TypeKind::Prim(p) | TypeKind::Boxed(p), v) => v.primitive() == Some(p),
            (TypeKind::Str, Value::Str(_))
            | (TypeKind::List, Value::List(_))
            | (TypeKind::Set, Value::Set(_))
            | (TypeKind::Map, Value::Map(_))
            | (TypeKind::Optional, Value::Optional(_))
            | (TypeKind::Array, Value::Array(_)) => true,
            (
                TypeKind::Date
                | TypeKind::Time
                | TypeKind::DateTime
                | TypeKind::Instant
                | TypeKind::Duration
                | TypeKind::ZoneOffset,
                Value::Temporal(t),
            ) => t.kind() == ty.kind(),
            (TypeKind::Class(id), Value::Object(obj)) => self.is_subclass_of(obj.class(), id),
            (TypeKind::Class(id), Value::Enum(constant)) => constant.class == id,
            _ => false,
        }
    }

    /// Read a field of `obj` without going through any accessor.
    pub fn read_field(&self, obj: &ObjRef, field: &FieldDef) -> Value {
        match field.storage {
            Storage::Instance(slot) => obj.get(slot),
            Storage::Static(slot) => self
                .get(field.declaring)
                .and_then(|class| class.statics.borrow().get(slot).cloned())
                .unwrap_or(Value::Null),
        }
    }

    /// Store `value` into a field of `obj`, bypassing any accessor.
    ///
    /// Fails when the value is not assignable to the field's declared type.
    pub fn write_field(&self, obj: &ObjRef, field: &FieldDef, value: Value) -> RuntimeResult<()> {
        if !self.accepts(&field.ty, &value) {
            return Err(RuntimeError::IncompatibleValue {
                field: field.name.clone(),
                ty: field.ty.to_string(),
                value: value.to_string(),
            });
        }
        match field.storage {
            Storage::Instance(slot) => obj.set(slot, value),
            Storage::Static(slot) => {
                let class = self.class(field.declaring)?;
                let mut statics = class.statics.borrow_mut();
                if let Some(cell) = statics.get_mut(slot) {
                    *cell = value;
                }
            }
        }
        Ok(())
    }

    /// A subclass of `parent` that overrides the given methods.
    ///
    /// The subclass is named `{parent}${suffix}` and created only once; later
    /// calls with the same suffix return the existing class.
    pub fn derive_subclass(
        &self,
        parent: ClassId,
        suffix: &str,
        overrides: Vec<(String, MethodFn)>,
    ) -> RuntimeResult<ClassId> {
        let parent_def = self.class(parent)?;
        if parent_def.is_final() {
            return Err(RuntimeError::FinalClass(parent_def.name.clone()));
        }
        let name = format!("{}${suffix}", parent_def.name);
        if let Some(existing) = self.lookup(&name) {
            return Ok(existing);
        }
        let mut builder = ClassBuilder::new(name)
            .extends(parent)
            .flags(ClassFlags::SYNTHETIC)
            .type_params(parent_def.type_params);
        for (method, body) in overrides {
            builder.methods.insert(method, body);
        }
        Ok(self.insert(builder, Some(&parent_def)))
    }

    /// Bind an interface or abstract class to a concrete test double.
    pub fn register_implementation(
        &self,
        abstraction: ClassId,
        implementation: ClassId,
    ) -> RuntimeResult<()> {
        self.class(abstraction)?;
        self.class(implementation)?;
        self.implementations
            .borrow_mut()
            .insert(abstraction, implementation);
        Ok(())
    }

    /// The implementation registered for `abstraction`, if any.
    pub fn implementation_of(&self, abstraction: ClassId) -> Option<ClassId> {
        self.implementations.borrow().get(&abstraction).copied()
    }

    /// Render a value for messages, showing object fields.
    pub fn render(&self, value: &Value) -> String {
        self.render_depth(value, 0)
    }

    fn render_depth(&self, value: &Value, depth: usize) -> String {
        let Value::Object(obj) = value else {
            return value.to_string();
        };
        let name = self.name_of(obj.class());
        if depth >= 3 {
            return format!("{name}{{...}}");
        }
        let fields: Vec<String> = self
            .fields_of(obj.class())
            .iter()
            .filter(|f| !f.is_static())
            .map(|f| {
                let v = self.read_field(obj, f);
                format!("{}={}", f.name, self.render_depth(&v, depth + 1))
            })
            .collect();
        format!("{name}{{{}}}", fields.join(", "))
    }
}
