//! Runtime values.
//!
//! # Identity vs Equality
//!
//! Every heap variant is allocated through a factory method, so two values
//! built from the same content are equal (`ClassRegistry::equals`) but not
//! the same reference (`Value::same_ref`). The verifier relies on this to
//! tell value comparison from reference comparison.

use std::fmt;

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, NaiveTime, TimeDelta, Utc};
use eqv_types::{ClassId, Primitive, TypeDescriptor, TypeKind};

use crate::heap::Heap;
use crate::object::ObjRef;

/// Runtime value of any field.
#[derive(Clone)]
pub enum Value {
    /// Absent reference.
    Null,

    // Scalars (inline, compared by value even under reference comparison)
    Bool(bool),
    Byte(i8),
    Short(i16),
    Int(i32),
    Long(i64),
    Float(f32),
    Double(f64),
    Char(char),

    // Heap types
    /// Immutable string.
    Str(Heap<String>),
    /// Ordered list.
    List(Heap<Vec<Value>>),
    /// Set; element order is irrelevant for equality.
    Set(Heap<Vec<Value>>),
    /// Map as an association list; entry order is irrelevant for equality.
    Map(Heap<Vec<(Value, Value)>>),
    /// Present or absent value.
    Optional(Heap<Option<Value>>),
    /// Date/time value.
    Temporal(Heap<Temporal>),
    /// Enum constant. Constants are singletons owned by their class.
    Enum(Heap<EnumConstant>),
    /// Array. Array equality is reference equality.
    Array(Heap<ArrayValue>),
    /// Class instance.
    Object(ObjRef),
}

/// Date/time payloads.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Temporal {
    Date(NaiveDate),
    Time(NaiveTime),
    DateTime(NaiveDateTime),
    Instant(DateTime<Utc>),
    Duration(TimeDelta),
    Offset(FixedOffset),
}

impl Temporal {
    /// The descriptor kind this payload belongs to.
    pub fn kind(&self) -> TypeKind {
        match self {
            Temporal::Date(_) => TypeKind::Date,
            Temporal::Time(_) => TypeKind::Time,
            Temporal::DateTime(_) => TypeKind::DateTime,
            Temporal::Instant(_) => TypeKind::Instant,
            Temporal::Duration(_) => TypeKind::Duration,
            Temporal::Offset(_) => TypeKind::ZoneOffset,
        }
    }
}

impl fmt::Display for Temporal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Temporal::Date(d) => write!(f, "{d}"),
            Temporal::Time(t) => write!(f, "{t}"),
            Temporal::DateTime(dt) => write!(f, "{dt}"),
            Temporal::Instant(i) => write!(f, "{}", i.to_rfc3339()),
            Temporal::Duration(d) => write!(f, "{d}"),
            Temporal::Offset(o) => write!(f, "{o}"),
        }
    }
}

/// A constant of an enum class.
#[derive(Debug)]
pub struct EnumConstant {
    /// The enum class declaring this constant.
    pub class: ClassId,
    /// Position in declaration order.
    pub ordinal: u32,
    /// Constant name.
    pub name: String,
}

/// Array contents together with the declared component type.
#[derive(Debug)]
pub struct ArrayValue {
    pub component: TypeDescriptor,
    pub items: Vec<Value>,
}

// Factory Methods (ONLY way to construct heap values)

impl Value {
    #[inline]
    pub fn string(s: impl Into<String>) -> Self {
        Value::Str(Heap::new(s.into()))
    }

    #[inline]
    pub fn list(items: Vec<Value>) -> Self {
        Value::List(Heap::new(items))
    }

    #[inline]
    pub fn set(items: Vec<Value>) -> Self {
        Value::Set(Heap::new(items))
    }

    #[inline]
    pub fn map(entries: Vec<(Value, Value)>) -> Self {
        Value::Map(Heap::new(entries))
    }

    #[inline]
    pub fn optional(inner: Option<Value>) -> Self {
        Value::Optional(Heap::new(inner))
    }

    #[inline]
    pub fn temporal(t: Temporal) -> Self {
        Value::Temporal(Heap::new(t))
    }

    /// A freshly allocated array.
    #[inline]
    pub fn array(component: TypeDescriptor, items: Vec<Value>) -> Self {
        Value::Array(Heap::new(ArrayValue { component, items }))
    }

    #[inline]
    pub(crate) fn enum_constant(class: ClassId, ordinal: u32, name: &str) -> Self {
        Value::Enum(Heap::new(EnumConstant {
            class,
            ordinal,
            name: name.to_string(),
        }))
    }

    /// The default a field of type `ty` holds right after allocation.
    ///
    /// Zero / `false` / `'\0'` for primitives, `Null` for everything else.
    pub fn default_for(ty: &TypeDescriptor) -> Value {
        match ty.kind() {
            TypeKind::Prim(p) => match p {
                Primitive::Bool => Value::Bool(false),
                Primitive::Byte => Value::Byte(0),
                Primitive::Short => Value::Short(0),
                Primitive::Int => Value::Int(0),
                Primitive::Long => Value::Long(0),
                Primitive::Float => Value::Float(0.0),
                Primitive::Double => Value::Double(0.0),
                Primitive::Char => Value::Char('\0'),
            },
            _ => Value::Null,
        }
    }
}

// Value Methods

impl Value {
    #[inline]
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_object(&self) -> Option<&ObjRef> {
        match self {
            Value::Object(o) => Some(o),
            _ => None,
        }
    }

    /// The primitive this scalar value belongs to.
    pub fn primitive(&self) -> Option<Primitive> {
        match self {
            Value::Bool(_) => Some(Primitive::Bool),
            Value::Byte(_) => Some(Primitive::Byte),
            Value::Short(_) => Some(Primitive::Short),
            Value::Int(_) => Some(Primitive::Int),
            Value::Long(_) => Some(Primitive::Long),
            Value::Float(_) => Some(Primitive::Float),
            Value::Double(_) => Some(Primitive::Double),
            Value::Char(_) => Some(Primitive::Char),
            _ => None,
        }
    }

    /// Reference identity.
    ///
    /// Scalars compare by value (there is nothing else to compare); heap
    /// values compare by allocation.
    pub fn same_ref(&self, other: &Value) -> bool {
        match (self, other) {
            (Value::Null, Value::Null) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Byte(a), Value::Byte(b)) => a == b,
            (Value::Short(a), Value::Short(b)) => a == b,
            (Value::Int(a), Value::Int(b)) => a == b,
            (Value::Long(a), Value::Long(b)) => a == b,
            (Value::Float(a), Value::Float(b)) => a.to_bits() == b.to_bits(),
            (Value::Double(a), Value::Double(b)) => a.to_bits() == b.to_bits(),
            (Value::Char(a), Value::Char(b)) => a == b,
            (Value::Str(a), Value::Str(b)) => Heap::ptr_eq(a, b),
            (Value::List(a), Value::List(b)) | (Value::Set(a), Value::Set(b)) => {
                Heap::ptr_eq(a, b)
            }
            (Value::Map(a), Value::Map(b)) => Heap::ptr_eq(a, b),
            (Value::Optional(a), Value::Optional(b)) => Heap::ptr_eq(a, b),
            (Value::Temporal(a), Value::Temporal(b)) => Heap::ptr_eq(a, b),
            (Value::Enum(a), Value::Enum(b)) => Heap::ptr_eq(a, b),
            (Value::Array(a), Value::Array(b)) => Heap::ptr_eq(a, b),
            (Value::Object(a), Value::Object(b)) => Heap::ptr_eq(a, b),
            _ => false,
        }
    }

    /// Short type label for messages.
    pub fn type_label(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "bool",
            Value::Byte(_) => "byte",
            Value::Short(_) => "short",
            Value::Int(_) => "int",
            Value::Long(_) => "long",
            Value::Float(_) => "float",
            Value::Double(_) => "double",
            Value::Char(_) => "char",
            Value::Str(_) => "Str",
            Value::List(_) => "List",
            Value::Set(_) => "Set",
            Value::Map(_) => "Map",
            Value::Optional(_) => "Optional",
            Value::Temporal(_) => "Temporal",
            Value::Enum(_) => "enum",
            Value::Array(_) => "array",
            Value::Object(_) => "object",
        }
    }
}

// Trait Implementations

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => write!(f, "Null"),
            Value::Bool(b) => write!(f, "Bool({b})"),
            Value::Byte(n) => write!(f, "Byte({n})"),
            Value::Short(n) => write!(f, "Short({n})"),
            Value::Int(n) => write!(f, "Int({n})"),
            Value::Long(n) => write!(f, "Long({n})"),
            Value::Float(n) => write!(f, "Float({n})"),
            Value::Double(n) => write!(f, "Double({n})"),
            Value::Char(c) => write!(f, "Char({c:?})"),
            Value::Str(s) => write!(f, "Str({:?})", &**s),
            Value::List(items) => write!(f, "List({:?})", &**items),
            Value::Set(items) => write!(f, "Set({:?})", &**items),
            Value::Map(entries) => write!(f, "Map({:?})", &**entries),
            Value::Optional(v) => write!(f, "Optional({:?})", &**v),
            Value::Temporal(t) => write!(f, "Temporal({})", &**t),
            Value::Enum(c) => write!(f, "Enum({}::{})", c.class, c.name),
            Value::Array(a) => write!(f, "Array({:?})", a.items),
            Value::Object(o) => write!(f, "Object({}@{:x})", o.class(), Heap::address(o)),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => write!(f, "null"),
            Value::Bool(b) => write!(f, "{b}"),
            Value::Byte(n) => write!(f, "{n}"),
            Value::Short(n) => write!(f, "{n}"),
            Value::Int(n) => write!(f, "{n}"),
            Value::Long(n) => write!(f, "{n}"),
            Value::Float(n) => write!(f, "{n}"),
            Value::Double(n) => write!(f, "{n}"),
            Value::Char(c) => write!(f, "'{c}'"),
            Value::Str(s) => write!(f, "\"{}\"", &**s),
            Value::List(items) | Value::Set(items) => {
                let (open, close) = match self {
                    Value::Set(_) => ("{", "}"),
                    _ => ("[", "]"),
                };
                write!(f, "{open}")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{item}")?;
                }
                write!(f, "{close}")
            }
            Value::Map(entries) => {
                write!(f, "{{")?;
                for (i, (k, v)) in entries.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{k}: {v}")?;
                }
                write!(f, "}}")
            }
            Value::Optional(v) => match &**v {
                Some(inner) => write!(f, "Optional[{inner}]"),
                None => write!(f, "Optional.empty"),
            },
            Value::Temporal(t) => write!(f, "{}", &**t),
            Value::Enum(c) => write!(f, "{}", c.name),
            Value::Array(a) => {
                write!(f, "[")?;
                for (i, item) in a.items.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{item}")?;
                }
                write!(f, "]")
            }
            Value::Object(o) => write!(f, "<object {}@{:x}>", o.class(), Heap::address(o)),
        }
    }
}

#[cfg(test)]
mod tests;
