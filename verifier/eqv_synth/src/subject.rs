//! Subjects: instances of the type under test built to a recipe.

use std::rc::Rc;

use eqv_runtime::{FieldDef, ObjRef, Value};
use eqv_types::TypeDescriptor;

use crate::context::SynthesisContext;
use crate::errors::{SynthesisError, SynthesisResult};
use crate::provider::ValueProvider;
use crate::tuple::{Color, Tuple};

/// Builds fresh instances of one type for the field checks.
///
/// Every call allocates a new object; cached triples are never modified.
pub struct SubjectCreator<'a> {
    provider: &'a ValueProvider<'a>,
    ty: TypeDescriptor,
}

impl<'a> SubjectCreator<'a> {
    /// Realize `ty` (and everything it refers to) and return a creator.
    pub fn new(provider: &'a ValueProvider<'a>, ty: TypeDescriptor) -> SynthesisResult<Self> {
        provider.realize_cache_for(&ty, &SynthesisContext::empty())?;
        Ok(SubjectCreator { provider, ty })
    }

    #[inline]
    pub fn type_descriptor(&self) -> &TypeDescriptor {
        &self.ty
    }

    #[inline]
    pub fn provider(&self) -> &'a ValueProvider<'a> {
        self.provider
    }

    /// An instance with every field red.
    pub fn plain(&self) -> SynthesisResult<ObjRef> {
        self.instance_of(&self.ty, Color::Red)
    }

    /// A red instance of a subclass of the type under test, such as a
    /// derived probe subclass.
    pub fn plain_of(&self, ty: &TypeDescriptor) -> SynthesisResult<ObjRef> {
        self.instance_of(ty, Color::Red)
    }

    fn instance_of(&self, ty: &TypeDescriptor, color: Color) -> SynthesisResult<ObjRef> {
        self.provider
            .give_object(ty, color, &SynthesisContext::empty())
    }

    /// A red instance whose `field` holds its blue value instead.
    ///
    /// When the field's type has no blue value distinct from red (a one
    /// constant enum, a recursive placeholder), the field's default is used.
    pub fn with_field_changed(&self, field: &FieldDef) -> SynthesisResult<ObjRef> {
        let ty = self.field_type(field)?;
        let red = self.provider.give_red(&ty)?;
        let blue = self.provider.give_blue(&ty)?;
        let registry = self.provider.registry();
        let changed = if registry.equals(&red, &blue)? {
            tracing::trace!(field = %field.name, "no distinct blue value; using default");
            Value::default_for(&ty)
        } else {
            blue
        };
        self.with_field_set_to(field, changed)
    }

    /// A red instance whose `field` holds its type's default.
    pub fn with_field_defaulted(&self, field: &FieldDef) -> SynthesisResult<ObjRef> {
        let ty = field.ty.resolve(&self.ty);
        self.with_field_set_to(field, Value::default_for(&ty))
    }

    /// A red instance whose `field` holds `value`.
    ///
    /// Fails with a runtime error when `value` cannot be stored in `field`,
    /// and refuses static fields.
    pub fn with_field_set_to(&self, field: &FieldDef, value: Value) -> SynthesisResult<ObjRef> {
        if field.is_static() {
            return Err(SynthesisError::StaticField(field.name.clone()));
        }
        let obj = self.plain()?;
        self.provider.registry().write_field(&obj, field, value)?;
        Ok(obj)
    }

    /// Red, blue and red copy of a field's resolved type.
    pub fn field_values(&self, field: &FieldDef) -> SynthesisResult<Rc<Tuple>> {
        let ty = self.field_type(field)?;
        self.provider
            .get(&ty)
            .ok_or(SynthesisError::NotRealized(ty))
    }

    fn field_type(&self, field: &FieldDef) -> SynthesisResult<TypeDescriptor> {
        let ty = field.ty.resolve(&self.ty);
        self.provider
            .realize_cache_for(&ty, &SynthesisContext::empty())?;
        Ok(ty)
    }
}

#[cfg(test)]
mod tests;
