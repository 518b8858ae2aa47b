//! Value triples.

use std::fmt;

use eqv_runtime::Value;

/// Which member of a triple to use.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Color {
    Red,
    Blue,
    RedCopy,
}

/// Three values of one type: two distinguishable ones and a separately built
/// copy of the first.
///
/// `red` and `red_copy` are equal in content but are different allocations,
/// except for values that only exist once (enum constants, nulls, scalars).
#[derive(Clone, Debug)]
pub struct Tuple {
    red: Value,
    blue: Value,
    red_copy: Value,
}

impl Tuple {
    pub fn new(red: Value, blue: Value, red_copy: Value) -> Self {
        Tuple {
            red,
            blue,
            red_copy,
        }
    }

    /// All three members null.
    pub fn nulls() -> Self {
        Self::new(Value::Null, Value::Null, Value::Null)
    }

    /// Build a triple by applying `make` to each color in turn.
    pub fn from_fn<E>(mut make: impl FnMut(Color) -> Result<Value, E>) -> Result<Self, E> {
        Ok(Self::new(
            make(Color::Red)?,
            make(Color::Blue)?,
            make(Color::RedCopy)?,
        ))
    }

    #[inline]
    pub fn red(&self) -> &Value {
        &self.red
    }

    #[inline]
    pub fn blue(&self) -> &Value {
        &self.blue
    }

    #[inline]
    pub fn red_copy(&self) -> &Value {
        &self.red_copy
    }

    /// The member of the given color.
    pub fn pick(&self, color: Color) -> &Value {
        match color {
            Color::Red => &self.red,
            Color::Blue => &self.blue,
            Color::RedCopy => &self.red_copy,
        }
    }
}

impl fmt::Display for Tuple {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Tuple [{}, {}, {}]", self.red, self.blue, self.red_copy)
    }
}
