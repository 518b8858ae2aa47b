use pretty_assertions::assert_eq;

use super::*;

#[test]
fn test_factories_allocate_distinct_references() {
    let a = Value::string("red");
    let b = Value::string("red");
    assert!(!a.same_ref(&b));
    assert!(a.same_ref(&a.clone()));
}

#[test]
fn test_scalars_compare_by_value_under_same_ref() {
    assert!(Value::Int(3).same_ref(&Value::Int(3)));
    assert!(!Value::Int(3).same_ref(&Value::Long(3)));
    assert!(Value::Double(f64::NAN).same_ref(&Value::Double(f64::NAN)));
    assert!(Value::Null.same_ref(&Value::Null));
}

#[test]
fn test_default_for_primitives_and_references() {
    assert!(matches!(
        Value::default_for(&TypeDescriptor::prim(Primitive::Int)),
        Value::Int(0)
    ));
    assert!(matches!(
        Value::default_for(&TypeDescriptor::prim(Primitive::Bool)),
        Value::Bool(false)
    ));
    assert!(matches!(
        Value::default_for(&TypeDescriptor::prim(Primitive::Char)),
        Value::Char('\0')
    ));
    assert!(Value::default_for(&TypeDescriptor::boxed(Primitive::Int)).is_null());
    assert!(Value::default_for(&TypeDescriptor::string()).is_null());
}

#[test]
fn test_primitive_of_scalars() {
    assert_eq!(Value::Byte(1).primitive(), Some(Primitive::Byte));
    assert_eq!(Value::Char('x').primitive(), Some(Primitive::Char));
    assert_eq!(Value::string("x").primitive(), None);
}

#[test]
fn test_display() {
    assert_eq!(Value::string("abc").to_string(), "\"abc\"");
    assert_eq!(
        Value::list(vec![Value::Int(1), Value::Int(2)]).to_string(),
        "[1, 2]"
    );
    assert_eq!(Value::set(vec![Value::Int(1)]).to_string(), "{1}");
    assert_eq!(
        Value::map(vec![(Value::string("k"), Value::Bool(true))]).to_string(),
        "{\"k\": true}"
    );
    assert_eq!(Value::optional(None).to_string(), "Optional.empty");
    assert_eq!(
        Value::optional(Some(Value::Char('c'))).to_string(),
        "Optional['c']"
    );
}

#[test]
fn test_temporal_kind() {
    let date = chrono::NaiveDate::from_ymd_opt(2024, 2, 29).map(Temporal::Date);
    assert_eq!(date.map(|d| d.kind()), Some(TypeKind::Date));
    let offset = FixedOffset::east_opt(3600).map(Temporal::Offset);
    assert_eq!(offset.map(|o| o.kind()), Some(TypeKind::ZoneOffset));
}

#[test]
fn test_type_label() {
    assert_eq!(Value::Null.type_label(), "null");
    assert_eq!(Value::array(TypeDescriptor::string(), vec![]).type_label(), "array");
}

#[test]
fn test_debug_shows_temporal_contents() {
    let date = NaiveDate::from_ymd_opt(2003, 7, 14).unwrap();
    let value = Value::temporal(Temporal::Date(date));
    assert_eq!(format!("{value:?}"), "Temporal(2003-07-14)");
}
