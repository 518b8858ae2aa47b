//! Equality, hash and method dispatch.
//!
//! Dispatch is virtual: the runtime class of an object decides which
//! `equals`, `hash` or method body runs, walking up the superclass chain.
//! Objects whose chain defines no `equals` / `hash` fall back to identity.

use std::hash::{Hash, Hasher};

use eqv_types::ClassId;
use rustc_hash::FxHasher;

use crate::errors::{InvokeResult, Thrown};
use crate::heap::Heap;
use crate::object::ObjRef;
use crate::registry::ClassRegistry;
use crate::value::Value;

/// Combine field hashes in order (`31 * acc + h`).
pub fn combine_hashes(hashes: impl IntoIterator<Item = u64>) -> u64 {
    hashes
        .into_iter()
        .fold(17u64, |acc, h| acc.wrapping_mul(31).wrapping_add(h))
}

fn fx_hash<T: Hash + ?Sized>(value: &T) -> u64 {
    let mut hasher = FxHasher::default();
    value.hash(&mut hasher);
    hasher.finish()
}

/// The view of `this` handed to class behaviour.
#[derive(Clone, Copy)]
pub struct Receiver<'a> {
    registry: &'a ClassRegistry,
    this: &'a ObjRef,
}

impl<'a> Receiver<'a> {
    pub fn new(registry: &'a ClassRegistry, this: &'a ObjRef) -> Self {
        Receiver { registry, this }
    }

    #[inline]
    pub fn registry(&self) -> &'a ClassRegistry {
        self.registry
    }

    #[inline]
    pub fn object(&self) -> &'a ObjRef {
        self.this
    }

    /// Runtime class of `this`.
    #[inline]
    pub fn class(&self) -> ClassId {
        self.this.class()
    }

    /// Read a field directly, bypassing accessors.
    pub fn field(&self, name: &str) -> InvokeResult<Value> {
        let field = self
            .registry
            .find_field(self.class(), name)
            .ok_or_else(|| Thrown::NoSuchField {
                class: self.registry.name_of(self.class()),
                field: name.to_string(),
            })?;
        Ok(self.registry.read_field(self.this, &field))
    }

    /// Invoke a zero-argument method with virtual dispatch.
    pub fn call(&self, method: &str) -> InvokeResult<Value> {
        self.registry.invoke(self.this, method)
    }

    /// View `other` as a peer of `this` when it is an object of a related
    /// class (same class, subclass or superclass).
    pub fn peer<'b>(&'b self, other: &'b Value) -> Option<Receiver<'b>> {
        let Value::Object(obj) = other else {
            return None;
        };
        let related = self.registry.is_subclass_of(obj.class(), self.class())
            || self.registry.is_subclass_of(self.class(), obj.class());
        related.then_some(Receiver {
            registry: self.registry,
            this: obj,
        })
    }

    /// Is `other` this very object?
    pub fn is_same(&self, other: &Value) -> bool {
        other.as_object().is_some_and(|o| Heap::ptr_eq(o, self.this))
    }

    /// Value equality of two nested values.
    pub fn eq(&self, a: &Value, b: &Value) -> InvokeResult<bool> {
        self.registry.equals(a, b)
    }

    /// Hash of a nested value.
    pub fn hash(&self, value: &Value) -> InvokeResult<u64> {
        self.registry.hash_code(value)
    }
}

impl ClassRegistry {
    /// Value equality, dispatching to class `equals` for objects.
    pub fn equals(&self, a: &Value, b: &Value) -> InvokeResult<bool> {
        Ok(match (a, b) {
            (Value::Object(x), _) => return self.object_equals(x, b),
            (Value::Null, Value::Null) => true,
            (Value::Bool(x), Value::Bool(y)) => x == y,
            (Value::Byte(x), Value::Byte(y)) => x == y,
            (Value::Short(x), Value::Short(y)) => x == y,
            (Value::Int(x), Value::Int(y)) => x == y,
            (Value::Long(x), Value::Long(y)) => x == y,
            (Value::Float(x), Value::Float(y)) => x.to_bits() == y.to_bits(),
            (Value::Double(x), Value::Double(y)) => x.to_bits() == y.to_bits(),
            (Value::Char(x), Value::Char(y)) => x == y,
            (Value::Str(x), Value::Str(y)) => **x == **y,
            (Value::List(x), Value::List(y)) => {
                if x.len() != y.len() {
                    return Ok(false);
                }
                for (l, r) in x.iter().zip(y.iter()) {
                    if !self.equals(l, r)? {
                        return Ok(false);
                    }
                }
                true
            }
            (Value::Set(x), Value::Set(y)) => {
                x.len() == y.len() && self.all_contained(x, y)? && self.all_contained(y, x)?
            }
            (Value::Map(x), Value::Map(y)) => {
                if x.len() != y.len() {
                    return Ok(false);
                }
                for (k, v) in x.iter() {
                    let mut found = false;
                    for (k2, v2) in y.iter() {
                        if self.equals(k, k2)? {
                            found = self.equals(v, v2)?;
                            break;
                        }
                    }
                    if !found {
                        return Ok(false);
                    }
                }
                true
            }
            (Value::Optional(x), Value::Optional(y)) => match (&**x, &**y) {
                (Some(l), Some(r)) => return self.equals(l, r),
                (None, None) => true,
                _ => false,
            },
            (Value::Temporal(x), Value::Temporal(y)) => **x == **y,
            (Value::Enum(x), Value::Enum(y)) => Heap::ptr_eq(x, y),
            (Value::Array(x), Value::Array(y)) => Heap::ptr_eq(x, y),
            _ => false,
        })
    }

    fn all_contained(&self, items: &[Value], within: &[Value]) -> InvokeResult<bool> {
        for item in items {
            let mut found = false;
            for candidate in within {
                if self.equals(item, candidate)? {
                    found = true;
                    break;
                }
            }
            if !found {
                return Ok(false);
            }
        }
        Ok(true)
    }

    fn object_equals(&self, this: &ObjRef, other: &Value) -> InvokeResult<bool> {
        match self.find_equals(this.class()) {
            Some(equals) => equals(&Receiver::new(self, this), other),
            None => Ok(other.as_object().is_some_and(|o| Heap::ptr_eq(o, this))),
        }
    }

    /// Hash code, dispatching to class `hash` for objects.
    ///
    /// Consistent with `equals` for every built-in value.
    pub fn hash_code(&self, value: &Value) -> InvokeResult<u64> {
        Ok(match value {
            Value::Null => 0,
            Value::Bool(b) => fx_hash(b),
            Value::Byte(n) => fx_hash(n),
            Value::Short(n) => fx_hash(n),
            Value::Int(n) => fx_hash(n),
            Value::Long(n) => fx_hash(n),
            Value::Float(n) => fx_hash(&n.to_bits()),
            Value::Double(n) => fx_hash(&n.to_bits()),
            Value::Char(c) => fx_hash(c),
            Value::Str(s) => fx_hash(s.as_str()),
            Value::List(items) => {
                let mut hashes = Vec::with_capacity(items.len());
                for item in items.iter() {
                    hashes.push(self.hash_code(item)?);
                }
                combine_hashes(hashes)
            }
            Value::Set(items) => {
                let mut sum = 0u64;
                for item in items.iter() {
                    sum = sum.wrapping_add(self.hash_code(item)?);
                }
                sum
            }
            Value::Map(entries) => {
                let mut sum = 0u64;
                for (k, v) in entries.iter() {
                    sum = sum.wrapping_add(self.hash_code(k)? ^ self.hash_code(v)?);
                }
                sum
            }
            Value::Optional(inner) => match &**inner {
                Some(v) => self.hash_code(v)?,
                None => 0,
            },
            Value::Temporal(t) => fx_hash(&**t),
            Value::Enum(c) => Heap::address(c) as u64,
            Value::Array(a) => Heap::address(a) as u64,
            Value::Object(obj) => match self.find_hash(obj.class()) {
                Some(hash) => hash(&Receiver::new(self, obj))?,
                None => Heap::address(obj) as u64,
            },
        })
    }

    /// Invoke a zero-argument method on `obj` with virtual dispatch.
    pub fn invoke(&self, obj: &ObjRef, method: &str) -> InvokeResult<Value> {
        match self.find_method(obj.class(), method) {
            Some(body) => body(&Receiver::new(self, obj)),
            None => Err(Thrown::NoSuchMethod {
                class: self.name_of(obj.class()),
                method: method.to_string(),
            }),
        }
    }

    /// Does an instance of `id` respond to `method`?
    pub fn has_method(&self, id: ClassId, method: &str) -> bool {
        self.find_method(id, method).is_some()
    }
}
