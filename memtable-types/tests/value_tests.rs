use memtable_types::{Value, ValueType};
use proptest::prelude::*;
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

fn hash_of(value: &Value) -> u64 {
    let mut hasher = DefaultHasher::new();
    value.hash(&mut hasher);
    hasher.finish()
}

// ── value_type ───────────────────────────────────────────────────

#[test]
fn value_type_of_each_variant() {
    assert_eq!(Value::Bool(true).value_type(), Some(ValueType::Bool));
    assert_eq!(Value::Int32(1).value_type(), Some(ValueType::Int32));
    assert_eq!(Value::Int64(1).value_type(), Some(ValueType::Int64));
    assert_eq!(Value::Float64(1.5).value_type(), Some(ValueType::Float64));
    assert_eq!(Value::from("a").value_type(), Some(ValueType::String));
    assert_eq!(Value::Uuid(uuid::Uuid::nil()).value_type(), Some(ValueType::Uuid));
    assert_eq!(Value::Bytes(vec![1]).value_type(), Some(ValueType::Bytes));
    assert_eq!(Value::Null.value_type(), None);
}

#[test]
fn null_is_null() {
    assert!(Value::Null.is_null());
    assert!(!Value::Int32(0).is_null());
}

// ── Equality ─────────────────────────────────────────────────────

#[test]
fn same_number_different_width_is_not_equal() {
    assert_ne!(Value::Int32(7), Value::Int64(7));
}

#[test]
fn float_equality_is_bitwise() {
    assert_eq!(Value::Float64(f64::NAN), Value::Float64(f64::NAN));
    assert_ne!(Value::Float64(0.0), Value::Float64(-0.0));
    assert_eq!(hash_of(&Value::Float64(f64::NAN)), hash_of(&Value::Float64(f64::NAN)));
}

#[test]
fn option_into_value() {
    assert_eq!(Value::from(Some(3)), Value::Int32(3));
    assert_eq!(Value::from(None::<i32>), Value::Null);
}

// ── Display ──────────────────────────────────────────────────────

#[test]
fn display_renders_key_friendly_text() {
    assert_eq!(Value::Int32(42).to_string(), "42");
    assert_eq!(Value::from("abc").to_string(), "\"abc\"");
    assert_eq!(Value::Bytes(vec![0xde, 0xad]).to_string(), "0xdead");
    assert_eq!(Value::Null.to_string(), "NULL");
}

#[test]
fn value_type_display_and_serde_names_match() {
    for ty in [
        ValueType::Bool,
        ValueType::Int32,
        ValueType::Int64,
        ValueType::Float64,
        ValueType::String,
        ValueType::Uuid,
        ValueType::Bytes,
    ] {
        let json = serde_json::to_string(&ty).unwrap();
        assert_eq!(json, format!("\"{ty}\""));
    }
}

// ── JSON conversion ──────────────────────────────────────────────

#[test]
fn to_json_value() {
    assert_eq!(serde_json::Value::from(&Value::Int64(9)), serde_json::json!(9));
    assert_eq!(serde_json::Value::from(&Value::from("x")), serde_json::json!("x"));
    assert_eq!(serde_json::Value::from(&Value::Null), serde_json::Value::Null);
    assert_eq!(serde_json::Value::from(&Value::Bytes(vec![1, 2])), serde_json::json!([1, 2]));
}

// ── Properties ───────────────────────────────────────────────────

fn value_strategy() -> impl Strategy<Value = Value> {
    prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::Bool),
        any::<i32>().prop_map(Value::Int32),
        any::<i64>().prop_map(Value::Int64),
        any::<f64>().prop_map(Value::Float64),
        "[a-z]{0,12}".prop_map(Value::String),
        prop::collection::vec(any::<u8>(), 0..8).prop_map(Value::Bytes),
    ]
}

proptest! {
    /// Equal values always hash equally.
    #[test]
    fn eq_implies_same_hash(a in value_strategy()) {
        let b = a.clone();
        prop_assert_eq!(&a, &b);
        prop_assert_eq!(hash_of(&a), hash_of(&b));
    }

    /// Values of different types are never equal.
    #[test]
    fn different_types_never_equal(a in value_strategy(), b in value_strategy()) {
        if a.value_type() != b.value_type() {
            prop_assert_ne!(a, b);
        }
    }
}
