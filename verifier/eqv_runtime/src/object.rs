//! Class instances.

use std::cell::RefCell;

use eqv_types::ClassId;

use crate::heap::Heap;
use crate::value::Value;

/// Shared handle to a class instance.
pub type ObjRef = Heap<Instance>;

/// Storage of one object: its runtime class and its instance slots.
///
/// Slots are laid out root class first, so a subclass instance shares the
/// slot indices of its superclasses.
#[derive(Debug)]
pub struct Instance {
    class: ClassId,
    slots: RefCell<Vec<Value>>,
}

impl Instance {
    /// Allocate an object of `class` with the given initial slot values.
    pub(crate) fn allocate(class: ClassId, slots: Vec<Value>) -> ObjRef {
        Heap::new(Instance {
            class,
            slots: RefCell::new(slots),
        })
    }

    /// The runtime class of this object.
    #[inline]
    pub fn class(&self) -> ClassId {
        self.class
    }

    /// Value stored in slot `index`, or `Null` for an out-of-range slot.
    pub fn get(&self, index: usize) -> Value {
        self.slots.borrow().get(index).cloned().unwrap_or(Value::Null)
    }

    /// Overwrite slot `index`. Out-of-range writes are ignored.
    pub(crate) fn set(&self, index: usize, value: Value) {
        if let Some(slot) = self.slots.borrow_mut().get_mut(index) {
            *slot = value;
        }
    }

    /// Number of instance slots.
    pub fn slot_count(&self) -> usize {
        self.slots.borrow().len()
    }
}
