#![allow(clippy::unwrap_used, clippy::expect_used)]

mod common;

use canonic_core::{
    is_hashable, normalize, normalize_all, CanonError, FrozenSet, ImmutableMap, NormalizedValue,
    Scalar, Value,
};
use common::{arb_value, hash_of, thaw};
use proptest::prelude::*;

#[test]
fn test_mapping_becomes_immutable_map() {
    let value = Value::mapping([("a", Value::mapping([("b", "c")]))]);

    let normalized = normalize(&value).unwrap();

    let map = normalized.as_map().expect("mapping normalizes to a map");
    let inner = map.get(&NormalizedValue::from("a")).unwrap();
    let expected_inner = ImmutableMap::from_trusted([("b", "c")]).unwrap();
    assert_eq!(inner, &NormalizedValue::Map(expected_inner));
}

#[test]
fn test_set_deduplicates_members() {
    let value = Value::set(["x", "y", "x"]);

    let normalized = normalize(&value).unwrap();

    let set = normalized.as_set().expect("set normalizes to a frozen set");
    assert_eq!(set.len(), 2);
    assert!(set.contains(&NormalizedValue::from("x")));
    assert!(set.contains(&NormalizedValue::from("y")));
}

#[test]
fn test_sequence_keeps_order() {
    let value = Value::list([3, 1, 2]);

    let normalized = normalize(&value).unwrap();

    assert_eq!(
        normalized.as_sequence().unwrap(),
        &[
            NormalizedValue::from(3),
            NormalizedValue::from(1),
            NormalizedValue::from(2)
        ]
    );
}

#[test]
fn test_nested_lists_inside_sets() {
    let value = Value::set([Value::list(["a", "b"]), Value::list(["a", "b"])]);

    let normalized = normalize(&value).unwrap();

    let set = normalized.as_set().unwrap();
    assert_eq!(set.len(), 1);
    let member = NormalizedValue::sequence([NormalizedValue::from("a"), NormalizedValue::from("b")]);
    assert!(set.contains(&member));
}

#[test]
fn test_signalling_nan_becomes_canonical() {
    let signalling = f64::from_bits(0x7ff0_0000_0000_0001);
    let value = Value::list([Value::from(signalling)]);

    let normalized = normalize(&value).unwrap();

    match &normalized.as_sequence().unwrap()[0] {
        NormalizedValue::Scalar(Scalar::Float(f)) => {
            assert_eq!(f.to_bits(), f64::NAN.to_bits());
        }
        other => panic!("Expected float, got {:?}", other),
    }
}

#[test]
fn test_frozen_signalling_nan_becomes_canonical() {
    let signalling = f64::from_bits(0x7ff0_0000_0000_0001);
    let frozen = Value::Frozen(NormalizedValue::Scalar(Scalar::Float(signalling)));

    let normalized = normalize(&frozen).unwrap();

    match normalized {
        NormalizedValue::Scalar(Scalar::Float(f)) => {
            assert_eq!(f.to_bits(), f64::NAN.to_bits());
        }
        other => panic!("Expected float, got {:?}", other),
    }
}

#[test]
fn test_nan_keys_collapse_into_one_entry() {
    let quiet = f64::NAN;
    let signalling = f64::from_bits(0x7ff0_0000_0000_0001);
    let value = Value::mapping([(Value::from(quiet), 1), (Value::from(signalling), 2)]);

    let normalized = normalize(&value).unwrap();

    let map = normalized.as_map().unwrap();
    assert_eq!(map.len(), 1);
    assert_eq!(
        map.get(&NormalizedValue::from(f64::NAN)).unwrap(),
        &NormalizedValue::from(2)
    );
}

#[test]
fn test_colliding_keys_overwrite_silently() {
    let value = Value::mapping([
        (Value::list(["k"]), "first"),
        (Value::list(["k"]), "second"),
    ]);

    let normalized = normalize(&value).unwrap();

    let map = normalized.as_map().unwrap();
    assert_eq!(map.len(), 1);
    assert_eq!(map.values().next(), Some(&NormalizedValue::from("second")));
}

#[test]
fn test_frozen_input_is_returned_unchanged() {
    let map = ImmutableMap::from_trusted([("b", "c")]).unwrap();
    let set: FrozenSet = [NormalizedValue::from(1)].into_iter().collect();

    assert_eq!(
        normalize(&Value::from(map.clone())).unwrap(),
        NormalizedValue::Map(map)
    );
    assert_eq!(
        normalize(&Value::from(set.clone())).unwrap(),
        NormalizedValue::Set(set)
    );
}

#[test]
fn test_slice_reports_type_and_value() {
    let err = normalize(&Value::slice(Some(0), Some(3), None)).unwrap_err();

    match &err {
        CanonError::NotNormalizable { type_name, value } => {
            assert_eq!(*type_name, "slice");
            assert!(value.contains("Slice"));
        }
        other => panic!("Expected NotNormalizable, got {:?}", other),
    }
    assert!(err.to_string().starts_with("slice cannot be made hashable"));
}

#[test]
fn test_slice_as_mapping_key_fails() {
    let value = Value::mapping([(Value::slice(None, None, None), 1)]);
    assert!(matches!(
        normalize(&value),
        Err(CanonError::NotNormalizable { .. })
    ));
}

#[test]
fn test_normalize_all_stops_at_slice() {
    let values = vec![Value::from(1), Value::slice(None, None, None), Value::from(2)];
    assert!(normalize_all(&values).is_err());
}

#[test]
fn test_json_document_normalizes() {
    let json = serde_json::json!({"name": "job", "tags": ["a", "b"], "limits": {"cpu": 2}});

    let normalized = normalize(&Value::from(json)).unwrap();

    let map = normalized.as_map().unwrap();
    assert_eq!(map.len(), 3);
    assert!(map.contains_key(&NormalizedValue::from("tags")));
    assert!(map
        .get(&NormalizedValue::from("limits"))
        .unwrap()
        .as_map()
        .is_some());
}

#[test]
fn test_normalized_values_are_send_and_sync() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<NormalizedValue>();
    assert_send_sync::<ImmutableMap>();
    assert_send_sync::<FrozenSet>();
}

proptest! {
    /// Normalizing a normalized value changes nothing
    #[test]
    fn prop_normalize_is_idempotent(value in arb_value()) {
        let once = normalize(&value).unwrap();
        let twice = normalize(&Value::Frozen(once.clone())).unwrap();
        prop_assert_eq!(&once, &twice);
        prop_assert_eq!(hash_of(&once), hash_of(&twice));
    }

    /// Thawing and renormalizing gives back an equal value
    #[test]
    fn prop_thaw_round_trip_is_stable(value in arb_value()) {
        let normalized = normalize(&value).unwrap();
        let again = normalize(&thaw(&normalized)).unwrap();
        prop_assert_eq!(hash_of(&normalized), hash_of(&again));
        prop_assert_eq!(normalized, again);
    }

    /// Every result is accepted by the trusting path
    #[test]
    fn prop_result_is_hashable(value in arb_value()) {
        let normalized = normalize(&value).unwrap();
        prop_assert!(is_hashable(&Value::Frozen(normalized)));
    }
}
