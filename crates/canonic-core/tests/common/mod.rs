//! Shared helpers and proptest strategies for canonic-core integration tests

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

use canonic_core::{NormalizedValue, Scalar, Value};
use proptest::prelude::*;

/// Hash a value with the standard hasher
#[allow(dead_code)]
pub fn hash_of<T: Hash>(value: &T) -> u64 {
    let mut hasher = DefaultHasher::new();
    value.hash(&mut hasher);
    hasher.finish()
}

/// Turn a normalized value back into mutable containers
///
/// Maps become mappings, sets become sets, sequences become lists.
#[allow(dead_code)]
pub fn thaw(value: &NormalizedValue) -> Value {
    match value {
        NormalizedValue::Scalar(s) => Value::Scalar(s.clone()),
        NormalizedValue::Sequence(items) => Value::Sequence(items.iter().map(thaw).collect()),
        NormalizedValue::Set(set) => Value::Set(set.iter().map(thaw).collect()),
        NormalizedValue::Map(map) => {
            Value::Mapping(map.iter().map(|(k, v)| (thaw(k), thaw(v))).collect())
        }
    }
}

/// Arbitrary scalar, including NaN and signed zero floats
#[allow(dead_code)]
pub fn arb_scalar() -> impl Strategy<Value = Scalar> {
    prop_oneof![
        Just(Scalar::Null),
        any::<bool>().prop_map(Scalar::Bool),
        any::<i64>().prop_map(Scalar::Int),
        prop_oneof![
            Just(f64::NAN),
            Just(-0.0),
            Just(0.0),
            -1.0e6..1.0e6f64,
        ]
        .prop_map(Scalar::Float),
        "[a-z]{0,8}".prop_map(Scalar::Text),
        prop::collection::vec(any::<u8>(), 0..4).prop_map(Scalar::Bytes),
    ]
}

/// Arbitrary nested value made only of normalizable parts
#[allow(dead_code)]
pub fn arb_value() -> impl Strategy<Value = Value> {
    arb_scalar()
        .prop_map(Value::Scalar)
        .prop_recursive(3, 32, 4, |inner| {
            prop_oneof![
                prop::collection::vec(inner.clone(), 0..4).prop_map(Value::Sequence),
                prop::collection::vec(inner.clone(), 0..4).prop_map(Value::Set),
                prop::collection::vec((inner.clone(), inner), 0..4).prop_map(Value::Mapping),
            ]
        })
}

/// Arbitrary text-keyed entries with scalar values
#[allow(dead_code)]
pub fn arb_entries() -> impl Strategy<Value = Vec<(String, i64)>> {
    prop::collection::vec(("[a-z]{1,6}", any::<i64>()), 0..8)
}
