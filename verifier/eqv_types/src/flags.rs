//! Modifier flags for fields and classes.

use bitflags::bitflags;

bitflags! {
    /// Modifiers of a declared field.
    #[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Default)]
    pub struct FieldFlags: u8 {
        /// Belongs to the class, not to instances.
        const STATIC = 1 << 0;
        /// Cannot be reassigned after construction.
        const FINAL = 1 << 1;
        /// Excluded from serialized/persistent state.
        const TRANSIENT = 1 << 2;
    }
}

impl FieldFlags {
    /// Static and final at the same time: a constant, never synthesized.
    pub fn is_constant(self) -> bool {
        self.contains(FieldFlags::STATIC | FieldFlags::FINAL)
    }
}

bitflags! {
    /// Modifiers and category of a class.
    #[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Default)]
    pub struct ClassFlags: u8 {
        /// Cannot be subclassed.
        const FINAL = 1 << 0;
        /// Cannot be allocated directly; needs a concrete subclass.
        const ABSTRACT = 1 << 1;
        /// Pure interface: no state of its own.
        const INTERFACE = 1 << 2;
        /// Enumeration with a fixed set of singleton constants.
        const ENUM = 1 << 3;
        /// Host-managed type with no allocation strategy; needs a prefab.
        const OPAQUE = 1 << 4;
        /// Generated by the verifier itself (anonymous or throwing subclasses).
        const SYNTHETIC = 1 << 5;
    }
}
