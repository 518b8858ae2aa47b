//! Derived value semantics.
//!
//! Classes declared with `derive_value_semantics()` get an `equals` that
//! compares the listed fields with value equality and a `hash` that combines
//! the field hashes. Both stop at the first failure raised by a nested value.

use std::rc::Rc;

use crate::class::{EqualsFn, HashFn};
use crate::dispatch::{combine_hashes, Receiver};
use crate::value::Value;

/// Conventional accessor name for a field: `name` -> `getName`.
pub fn getter_name(field: &str) -> String {
    let mut chars = field.chars();
    match chars.next() {
        Some(first) => format!("get{}{}", first.to_uppercase(), chars.as_str()),
        None => "get".to_string(),
    }
}

/// Field-wise equality over direct field reads.
pub(crate) fn field_equals(fields: &[String]) -> EqualsFn {
    let fields = fields.to_vec();
    Rc::new(move |this: &Receiver<'_>, other: &Value| {
        let Some(that) = this.peer(other) else {
            return Ok(false);
        };
        for name in &fields {
            if !this.eq(&this.field(name)?, &that.field(name)?)? {
                return Ok(false);
            }
        }
        Ok(true)
    })
}

/// Field-wise hash over direct field reads.
pub(crate) fn field_hash(fields: &[String]) -> HashFn {
    let fields = fields.to_vec();
    Rc::new(move |this: &Receiver<'_>| {
        let mut hashes = Vec::with_capacity(fields.len());
        for name in &fields {
            hashes.push(this.hash(&this.field(name)?)?);
        }
        Ok(combine_hashes(hashes))
    })
}

/// Field-wise equality through accessors, on both sides.
pub(crate) fn accessor_equals(getters: &[String]) -> EqualsFn {
    let getters = getters.to_vec();
    Rc::new(move |this: &Receiver<'_>, other: &Value| {
        let Some(that) = this.peer(other) else {
            return Ok(false);
        };
        for getter in &getters {
            if !this.eq(&this.call(getter)?, &that.call(getter)?)? {
                return Ok(false);
            }
        }
        Ok(true)
    })
}

/// Field-wise hash through accessors.
pub(crate) fn accessor_hash(getters: &[String]) -> HashFn {
    let getters = getters.to_vec();
    Rc::new(move |this: &Receiver<'_>| {
        let mut hashes = Vec::with_capacity(getters.len());
        for getter in &getters {
            hashes.push(this.hash(&this.call(getter)?)?);
        }
        Ok(combine_hashes(hashes))
    })
}
