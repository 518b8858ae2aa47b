//! Suppressible warnings.

use std::fmt;

use bitflags::bitflags;

/// A warning the caller can suppress to relax a check.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Warning {
    /// Two identical copies are expected to be unequal.
    IdenticalCopy,
    /// Like `IdenticalCopy`, for versioned entities; disables reflexivity.
    IdenticalCopyForVersionedEntity,
    /// Fields may be compared by reference.
    ReferenceEquality,
    /// Fields are never null; skip null probes.
    NullFields,
    /// Primitive fields are never zero; skip zero probes.
    ZeroFields,
    /// Only require accessors in `hash` for fields `hash` actually uses.
    StrictHashcode,
    /// Transient fields may take part in equality.
    TransientFields,
    /// Lazy fields may be read directly.
    JpaGetter,
}

impl Warning {
    pub const ALL: [Warning; 8] = [
        Warning::IdenticalCopy,
        Warning::IdenticalCopyForVersionedEntity,
        Warning::ReferenceEquality,
        Warning::NullFields,
        Warning::ZeroFields,
        Warning::StrictHashcode,
        Warning::TransientFields,
        Warning::JpaGetter,
    ];

    /// Name as shown in messages.
    pub fn name(self) -> &'static str {
        match self {
            Warning::IdenticalCopy => "IDENTICAL_COPY",
            Warning::IdenticalCopyForVersionedEntity => "IDENTICAL_COPY_FOR_VERSIONED_ENTITY",
            Warning::ReferenceEquality => "REFERENCE_EQUALITY",
            Warning::NullFields => "NULL_FIELDS",
            Warning::ZeroFields => "ZERO_FIELDS",
            Warning::StrictHashcode => "STRICT_HASHCODE",
            Warning::TransientFields => "TRANSIENT_FIELDS",
            Warning::JpaGetter => "JPA_GETTER",
        }
    }

    fn flag(self) -> Warnings {
        match self {
            Warning::IdenticalCopy => Warnings::IDENTICAL_COPY,
            Warning::IdenticalCopyForVersionedEntity => {
                Warnings::IDENTICAL_COPY_FOR_VERSIONED_ENTITY
            }
            Warning::ReferenceEquality => Warnings::REFERENCE_EQUALITY,
            Warning::NullFields => Warnings::NULL_FIELDS,
            Warning::ZeroFields => Warnings::ZERO_FIELDS,
            Warning::StrictHashcode => Warnings::STRICT_HASHCODE,
            Warning::TransientFields => Warnings::TRANSIENT_FIELDS,
            Warning::JpaGetter => Warnings::JPA_GETTER,
        }
    }
}

impl fmt::Display for Warning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

bitflags! {
    /// Set of suppressed warnings.
    #[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Default)]
    pub struct Warnings: u16 {
        const IDENTICAL_COPY = 1 << 0;
        const IDENTICAL_COPY_FOR_VERSIONED_ENTITY = 1 << 1;
        const REFERENCE_EQUALITY = 1 << 2;
        const NULL_FIELDS = 1 << 3;
        const ZERO_FIELDS = 1 << 4;
        const STRICT_HASHCODE = 1 << 5;
        const TRANSIENT_FIELDS = 1 << 6;
        const JPA_GETTER = 1 << 7;
    }
}

impl Warnings {
    /// Is `warning` suppressed?
    #[inline]
    pub fn suppresses(self, warning: Warning) -> bool {
        self.contains(warning.flag())
    }
}

impl From<Warning> for Warnings {
    fn from(warning: Warning) -> Self {
        warning.flag()
    }
}

impl FromIterator<Warning> for Warnings {
    fn from_iter<I: IntoIterator<Item = Warning>>(iter: I) -> Self {
        iter.into_iter()
            .fold(Warnings::empty(), |set, w| set | w.flag())
    }
}
