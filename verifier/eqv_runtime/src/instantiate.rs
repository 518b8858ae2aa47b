//! Object allocation without running construction logic.
//!
//! The verifier needs instances of classes whose constructors it cannot call
//! (or must not call). `ForcedAllocator` produces an object with every
//! instance slot at its type default, the equivalent of a freshly zeroed
//! allocation.

use eqv_types::ClassId;

use crate::errors::{RuntimeError, RuntimeResult};
use crate::object::{Instance, ObjRef};
use crate::registry::ClassRegistry;
use crate::value::Value;

/// Suffix of the synthetic subclass used to instantiate abstract classes.
const ANONYMOUS_SUFFIX: &str = "Anon";

/// Strategy for producing blank instances of a class.
pub trait Allocator {
    /// A new instance of `class` with default slots.
    fn allocate(&self, registry: &ClassRegistry, class: ClassId) -> RuntimeResult<ObjRef>;
}

/// Allocates any class by writing defaults into every instance slot.
///
/// Abstract classes and interfaces are instantiated through their registered
/// implementation, or else through a synthetic anonymous subclass. Enum
/// classes and classes flagged `OPAQUE` cannot be instantiated.
#[derive(Clone, Copy, Debug, Default)]
pub struct ForcedAllocator;

impl Allocator for ForcedAllocator {
    fn allocate(&self, registry: &ClassRegistry, class: ClassId) -> RuntimeResult<ObjRef> {
        let def = registry.class(class)?;
        if def.is_enum() {
            return Err(RuntimeError::Uninstantiable {
                class: def.name().to_string(),
                reason: "enum constants are fixed",
            });
        }
        if def.flags().contains(eqv_types::ClassFlags::OPAQUE) {
            return Err(RuntimeError::Uninstantiable {
                class: def.name().to_string(),
                reason: "class is opaque",
            });
        }
        if def.is_abstract() {
            let concrete = match registry.implementation_of(class) {
                Some(implementation) => implementation,
                None => registry.anonymous_subclass(class)?,
            };
            tracing::trace!(class = %def.name(), %concrete, "instantiating abstract class");
            return self.allocate(registry, concrete);
        }
        Ok(registry.blank_instance(class))
    }
}

impl ClassRegistry {
    /// Synthetic concrete subclass of an abstract class or interface.
    pub fn anonymous_subclass(&self, abstraction: ClassId) -> RuntimeResult<ClassId> {
        self.derive_subclass(abstraction, ANONYMOUS_SUFFIX, Vec::new())
    }

    /// An instance of `class` whose slots all hold their type defaults.
    fn blank_instance(&self, class: ClassId) -> ObjRef {
        let slot_count = self.get(class).map_or(0, |def| def.slot_count());
        let obj = Instance::allocate(class, vec![Value::Null; slot_count]);
        for field in self.fields_of(class).iter().filter(|f| !f.is_static()) {
            if let crate::class::Storage::Instance(slot) = field.storage {
                obj.set(slot, Value::default_for(&field.ty));
            }
        }
        obj
    }

    /// A new object of the same runtime class holding the same slot values.
    pub fn shallow_copy(&self, obj: &ObjRef) -> ObjRef {
        let slots = (0..obj.slot_count()).map(|i| obj.get(i)).collect();
        Instance::allocate(obj.class(), slots)
    }
}
