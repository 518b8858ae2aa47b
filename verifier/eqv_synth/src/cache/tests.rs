use std::rc::Rc;

use eqv_runtime::Value;
use eqv_types::{Primitive, TypeDescriptor};

use super::*;

#[test]
fn test_put_then_get() {
    let cache = ValueCache::new();
    let ty = TypeDescriptor::prim(Primitive::Int);
    assert!(cache.is_empty());
    assert!(cache.get(&ty).is_none());

    let stored = cache.put(ty.clone(), Tuple::new(Value::Int(1), Value::Int(2), Value::Int(1)));
    let fetched = cache.get(&ty).unwrap();
    assert!(Rc::ptr_eq(&stored, &fetched));
    assert!(cache.contains(&ty));
    assert_eq!(cache.len(), 1);
}

#[test]
fn test_put_replaces_placeholder() {
    let cache = ValueCache::new();
    let ty = TypeDescriptor::string();
    cache.put(ty.clone(), Tuple::nulls());
    cache.put(ty.clone(), Tuple::new(Value::string("a"), Value::string("b"), Value::string("a")));
    assert_eq!(cache.len(), 1);
    assert_eq!(cache.get(&ty).unwrap().red().as_str(), Some("a"));
}

#[test]
fn test_remove_drops_entry() {
    let cache = ValueCache::new();
    let ty = TypeDescriptor::string();
    cache.put(ty.clone(), Tuple::nulls());
    assert!(cache.remove(&ty).is_some());
    assert!(!cache.contains(&ty));
    assert!(cache.remove(&ty).is_none());
}

#[test]
fn test_keys_are_structural() {
    let cache = ValueCache::new();
    cache.put(TypeDescriptor::list_of(TypeDescriptor::string()), Tuple::nulls());
    assert!(cache.contains(&TypeDescriptor::list_of(TypeDescriptor::string())));
    assert!(!cache.contains(&TypeDescriptor::list_of(TypeDescriptor::any())));
}
