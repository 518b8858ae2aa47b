//! Shared heap storage for runtime values.
//!
//! `Heap<T>` has a crate-private constructor: heap values are created through
//! the `Value::` factory methods only, so every allocation has a distinct
//! identity that `Value::same_ref` can observe.

use std::fmt;
use std::ops::Deref;
use std::rc::Rc;

/// Reference-counted heap cell with observable identity.
pub struct Heap<T: ?Sized>(Rc<T>);

impl<T> Heap<T> {
    #[inline]
    pub(crate) fn new(value: T) -> Self {
        Heap(Rc::new(value))
    }
}

impl<T: ?Sized> Heap<T> {
    /// Do both handles point at the same allocation?
    #[inline]
    pub fn ptr_eq(a: &Self, b: &Self) -> bool {
        Rc::ptr_eq(&a.0, &b.0)
    }

    /// Address of the allocation, used as the identity hash.
    #[inline]
    pub fn address(this: &Self) -> usize {
        Rc::as_ptr(&this.0).cast::<()>() as usize
    }
}

impl<T: ?Sized> Clone for Heap<T> {
    fn clone(&self) -> Self {
        Heap(Rc::clone(&self.0))
    }
}

impl<T: ?Sized> Deref for Heap<T> {
    type Target = T;

    #[inline]
    fn deref(&self) -> &T {
        &self.0
    }
}

impl<T: ?Sized + PartialEq> PartialEq for Heap<T> {
    fn eq(&self, other: &Self) -> bool {
        *self.0 == *other.0
    }
}

impl<T: ?Sized + fmt::Debug> fmt::Debug for Heap<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&*self.0, f)
    }
}
