//! Field probes.

use eqv_runtime::FieldDef;
use eqv_types::TypeDescriptor;

/// A declared field of the type under test, seen from that type.
///
/// The field's declared type is resolved against the type under test, so a
/// field declared as `T` in `Box<T>` reports `Str` when probing `Box<Str>`.
#[derive(Clone, Debug)]
pub struct FieldProbe {
    field: FieldDef,
    ty: TypeDescriptor,
}

impl FieldProbe {
    pub fn new(field: FieldDef, enclosing: &TypeDescriptor) -> Self {
        let ty = field.ty.resolve(enclosing);
        FieldProbe { field, ty }
    }

    #[inline]
    pub fn field(&self) -> &FieldDef {
        &self.field
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.field.name
    }

    /// Resolved type of the field.
    #[inline]
    pub fn ty(&self) -> &TypeDescriptor {
        &self.ty
    }

    pub fn is_static(&self) -> bool {
        self.field.is_static()
    }

    pub fn is_final(&self) -> bool {
        self.field.is_final()
    }

    pub fn is_transient(&self) -> bool {
        self.field.is_transient()
    }

    pub fn is_primitive(&self) -> bool {
        self.ty.is_primitive()
    }

    /// Static final fields are constants and never written.
    pub fn can_be_modified(&self) -> bool {
        !self.field.flags.is_constant()
    }
}
