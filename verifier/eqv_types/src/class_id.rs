use std::fmt;

/// Handle to a class stored in a class registry.
///
/// Ids are dense indices assigned in definition order. They are only
/// meaningful for the registry that issued them.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ClassId(u32);

impl ClassId {
    /// Create a class id from a raw index.
    #[inline]
    pub const fn new(index: u32) -> Self {
        ClassId(index)
    }

    /// Raw index into the registry's class table.
    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for ClassId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}
