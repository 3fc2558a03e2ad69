//! Property tests for attribute conversion and document encoding.

use catalog_codec::{
    attributes_from_dynamic, attributes_to_dynamic, from_cbor, from_dynamic, to_canonical_cbor,
    to_dynamic, CodecError, Value, WireStruct, WireValue,
};
use proptest::prelude::*;
use std::collections::BTreeMap;

fn finite_or_infinite() -> impl Strategy<Value = f64> {
    any::<f64>().prop_filter("NaN never compares equal", |f| !f.is_nan())
}

fn wire_value() -> impl Strategy<Value = WireValue> {
    let leaf = prop_oneof![
        Just(WireValue::Null),
        any::<bool>().prop_map(WireValue::Bool),
        finite_or_infinite().prop_map(WireValue::Number),
        ".{0,12}".prop_map(WireValue::String),
    ];
    leaf.prop_recursive(4, 48, 6, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..6).prop_map(WireValue::List),
            prop::collection::btree_map("[a-z]{1,8}", inner, 0..6).prop_map(WireValue::Struct),
        ]
    })
}

fn representable_value() -> impl Strategy<Value = Value> {
    let leaf = prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::Bool),
        finite_or_infinite().prop_map(Value::Float),
        ".{0,12}".prop_map(Value::Text),
    ];
    leaf.prop_recursive(4, 48, 6, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..6).prop_map(Value::Array),
            prop::collection::btree_map("[a-z]{1,8}", inner, 0..6)
                .prop_map(|m: BTreeMap<String, Value>| Value::text_map(m)),
        ]
    })
}

fn value_with_integers() -> impl Strategy<Value = Value> {
    let exact = -(1i64 << 53)..=(1i64 << 53);
    let leaf = prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::Bool),
        exact.prop_map(Value::Integer),
        finite_or_infinite().prop_map(Value::Float),
        ".{0,12}".prop_map(Value::Text),
    ];
    leaf.prop_recursive(4, 48, 6, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..6).prop_map(Value::Array),
            prop::collection::btree_map("[a-z]{1,8}", inner, 0..6)
                .prop_map(|m: BTreeMap<String, Value>| Value::text_map(m)),
        ]
    })
}

/// `value` with every integer replaced by the equal float.
fn widen_integers(value: &Value) -> Value {
    match value {
        Value::Integer(n) => Value::Float(*n as f64),
        Value::Array(items) => Value::Array(items.iter().map(widen_integers).collect()),
        Value::Map(entries) => Value::Map(
            entries
                .iter()
                .map(|(k, v)| (k.clone(), widen_integers(v)))
                .collect(),
        ),
        other => other.clone(),
    }
}

proptest! {
    #[test]
    fn wire_to_dynamic_and_back(wire in wire_value()) {
        let back = from_dynamic(&to_dynamic(&wire)).unwrap();
        prop_assert_eq!(back, wire);
    }

    #[test]
    fn dynamic_to_wire_and_back(value in representable_value()) {
        let wire = from_dynamic(&value).unwrap();
        prop_assert_eq!(to_dynamic(&wire), value);
    }

    #[test]
    fn exact_integers_come_back_as_equal_floats(value in value_with_integers()) {
        let wire = from_dynamic(&value).unwrap();
        prop_assert_eq!(to_dynamic(&wire), widen_integers(&value));
    }

    #[test]
    fn dynamic_survives_document_encoding(value in representable_value()) {
        let bytes = to_canonical_cbor(&value).unwrap();
        prop_assert_eq!(from_cbor(&bytes).unwrap(), value);
    }

    #[test]
    fn attribute_bags_round_trip(bag in prop::collection::btree_map("[a-z]{1,8}", wire_value(), 0..8)) {
        let bag: WireStruct = bag;
        let back = attributes_from_dynamic(&attributes_to_dynamic(&bag)).unwrap();
        prop_assert_eq!(back, bag);
    }

    #[test]
    fn integers_beyond_double_precision_are_rejected(n in (1i64 << 53) + 1..i64::MAX) {
        let is_unsupported = matches!(
            from_dynamic(&Value::Integer(n)),
            Err(CodecError::UnsupportedValueKind { .. })
        );
        prop_assert!(is_unsupported);
    }
}
