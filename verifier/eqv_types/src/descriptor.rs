//! Type descriptors: a type plus the generic arguments relevant to synthesis.

use std::fmt;

use crate::{ClassId, Primitive};

/// The outermost shape of a type.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum TypeKind {
    /// Non-nullable scalar.
    Prim(Primitive),
    /// Nullable wrapper around a scalar.
    Boxed(Primitive),
    /// Immutable string.
    Str,
    /// Top type. Any value fits.
    Any,
    /// Ordered list; one argument (element type).
    List,
    /// Set; one argument (element type).
    Set,
    /// Map; two arguments (key type, value type).
    Map,
    /// Optional value; one argument.
    Optional,
    /// Calendar date.
    Date,
    /// Wall clock time.
    Time,
    /// Date and time without zone.
    DateTime,
    /// Point on the UTC time line.
    Instant,
    /// Signed duration.
    Duration,
    /// Fixed offset from UTC.
    ZoneOffset,
    /// Array; one argument (component type).
    Array,
    /// User-defined class, enum or interface.
    Class(ClassId),
    /// The n-th type parameter of the enclosing class.
    Var(u8),
}

/// A type together with its generic arguments.
///
/// Equality is structural, so descriptors work as cache keys.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct TypeDescriptor {
    kind: TypeKind,
    args: Vec<TypeDescriptor>,
}

impl TypeDescriptor {
    /// A descriptor without generic arguments.
    pub fn of(kind: TypeKind) -> Self {
        TypeDescriptor {
            kind,
            args: Vec::new(),
        }
    }

    /// A descriptor with generic arguments.
    pub fn with_args(kind: TypeKind, args: Vec<TypeDescriptor>) -> Self {
        TypeDescriptor { kind, args }
    }

    #[inline]
    pub fn prim(p: Primitive) -> Self {
        Self::of(TypeKind::Prim(p))
    }

    #[inline]
    pub fn boxed(p: Primitive) -> Self {
        Self::of(TypeKind::Boxed(p))
    }

    #[inline]
    pub fn string() -> Self {
        Self::of(TypeKind::Str)
    }

    #[inline]
    pub fn any() -> Self {
        Self::of(TypeKind::Any)
    }

    #[inline]
    pub fn class(id: ClassId) -> Self {
        Self::of(TypeKind::Class(id))
    }

    #[inline]
    pub fn var(index: u8) -> Self {
        Self::of(TypeKind::Var(index))
    }

    pub fn list_of(element: TypeDescriptor) -> Self {
        Self::with_args(TypeKind::List, vec![element])
    }

    pub fn set_of(element: TypeDescriptor) -> Self {
        Self::with_args(TypeKind::Set, vec![element])
    }

    pub fn optional_of(element: TypeDescriptor) -> Self {
        Self::with_args(TypeKind::Optional, vec![element])
    }

    pub fn map_of(key: TypeDescriptor, value: TypeDescriptor) -> Self {
        Self::with_args(TypeKind::Map, vec![key, value])
    }

    pub fn array_of(component: TypeDescriptor) -> Self {
        Self::with_args(TypeKind::Array, vec![component])
    }

    /// The outermost kind.
    #[inline]
    pub fn kind(&self) -> TypeKind {
        self.kind
    }

    /// Generic arguments, in declaration order.
    #[inline]
    pub fn args(&self) -> &[TypeDescriptor] {
        &self.args
    }

    /// The i-th generic argument, or `Any` when the type is raw.
    pub fn arg(&self, index: usize) -> TypeDescriptor {
        self.args.get(index).cloned().unwrap_or_else(Self::any)
    }

    /// Component type of an array descriptor.
    pub fn component(&self) -> Option<&TypeDescriptor> {
        match self.kind {
            TypeKind::Array => self.args.first(),
            _ => None,
        }
    }

    /// The class id if this is a class type.
    pub fn class_id(&self) -> Option<ClassId> {
        match self.kind {
            TypeKind::Class(id) => Some(id),
            _ => None,
        }
    }

    /// Non-nullable scalar?
    pub fn is_primitive(&self) -> bool {
        matches!(self.kind, TypeKind::Prim(_))
    }

    pub fn is_string(&self) -> bool {
        self.kind == TypeKind::Str
    }

    pub fn is_array(&self) -> bool {
        self.kind == TypeKind::Array
    }

    /// Substitute type variables with the arguments of `enclosing`.
    ///
    /// A field declared as `T` inside `Box<T>` resolves to `Str` when the
    /// enclosing descriptor is `Box<Str>`. Unbound variables become `Any`.
    pub fn resolve(&self, enclosing: &TypeDescriptor) -> TypeDescriptor {
        if let TypeKind::Var(index) = self.kind {
            return enclosing.arg(usize::from(index));
        }
        if self.args.is_empty() {
            return self.clone();
        }
        TypeDescriptor {
            kind: self.kind,
            args: self.args.iter().map(|a| a.resolve(enclosing)).collect(),
        }
    }
}

impl fmt::Display for TypeDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            TypeKind::Prim(p) => write!(f, "{}", p.name())?,
            TypeKind::Boxed(p) => write!(f, "{}", p.boxed_name())?,
            TypeKind::Str => write!(f, "Str")?,
            TypeKind::Any => write!(f, "Any")?,
            TypeKind::List => write!(f, "List")?,
            TypeKind::Set => write!(f, "Set")?,
            TypeKind::Map => write!(f, "Map")?,
            TypeKind::Optional => write!(f, "Optional")?,
            TypeKind::Date => write!(f, "Date")?,
            TypeKind::Time => write!(f, "Time")?,
            TypeKind::DateTime => write!(f, "DateTime")?,
            TypeKind::Instant => write!(f, "Instant")?,
            TypeKind::Duration => write!(f, "Duration")?,
            TypeKind::ZoneOffset => write!(f, "ZoneOffset")?,
            TypeKind::Array => {
                return match self.args.first() {
                    Some(component) => write!(f, "{component}[]"),
                    None => write!(f, "Any[]"),
                };
            }
            TypeKind::Class(id) => write!(f, "Class{id}")?,
            TypeKind::Var(i) => write!(f, "T{i}")?,
        }
        if !self.args.is_empty() {
            write!(f, "<")?;
            for (i, arg) in self.args.iter().enumerate() {
                if i > 0 {
                    write!(f, ", ")?;
                }
                write!(f, "{arg}")?;
            }
            write!(f, ">")?;
        }
        Ok(())
    }
}
