#![allow(clippy::unwrap_used, clippy::expect_used)]

mod common;

use std::borrow::Cow;
use std::ptr;

use canonic_core::{map_entries, map_keys, map_values, try_transform_entries, EntryFn};
use common::arb_entries;
use indexmap::IndexMap;
use proptest::prelude::*;

fn squares_input() -> IndexMap<i64, i64> {
    [(1, 1), (2, 2), (3, 3)].into_iter().collect()
}

#[test]
fn test_value_fn_squares_values() {
    let input = squares_input();

    let mapped = map_entries(&input, None, Some(EntryFn::single(|v: &i64| v * v)));

    let expected: IndexMap<i64, i64> = [(1, 1), (2, 4), (3, 9)].into_iter().collect();
    assert_eq!(*mapped, expected);
}

#[test]
fn test_key_fn_squares_keys() {
    let input = squares_input();

    let mapped = map_entries(&input, Some(EntryFn::single(|k: &i64| k * k)), None);

    let expected: IndexMap<i64, i64> = [(1, 1), (4, 2), (9, 3)].into_iter().collect();
    assert_eq!(*mapped, expected);
    let keys: Vec<_> = mapped.keys().copied().collect();
    assert_eq!(keys, vec![1, 4, 9]);
}

#[test]
fn test_both_functions_applied() {
    let input = squares_input();

    let mapped = map_entries(
        &input,
        Some(EntryFn::single(|k: &i64| k + 10)),
        Some(EntryFn::paired(|v: &i64, k: &i64| v * 100 + k)),
    );

    let expected: IndexMap<i64, i64> =
        [(11, 101), (12, 202), (13, 303)].into_iter().collect();
    assert_eq!(*mapped, expected);
}

#[test]
fn test_no_functions_returns_input_itself() {
    let input = squares_input();

    let mapped = map_entries(&input, None, None);

    assert!(matches!(mapped, Cow::Borrowed(_)));
    assert!(ptr::eq(&*mapped, &input));
}

#[test]
fn test_empty_input_returns_input_itself() {
    let input: IndexMap<String, String> = IndexMap::new();

    let mapped = map_entries(
        &input,
        Some(EntryFn::single(|k: &String| k.to_uppercase())),
        Some(EntryFn::single(|v: &String| v.to_uppercase())),
    );

    assert!(ptr::eq(&*mapped, &input));
}

#[test]
fn test_colliding_keys_last_write_wins() {
    let input: IndexMap<String, i64> =
        [("a".to_string(), 0), ("A".to_string(), 1)].into_iter().collect();

    let mapped = map_keys(EntryFn::single(|k: &String| k.to_uppercase()), &input);

    assert_eq!(mapped.len(), 1);
    assert_eq!(mapped.get("A"), Some(&1));
}

#[test]
fn test_map_values_paired_sees_key() {
    let input: IndexMap<String, String> = [
        ("db.host".to_string(), "localhost".to_string()),
        ("db.port".to_string(), "5432".to_string()),
    ]
    .into_iter()
    .collect();

    let mapped = map_values(
        EntryFn::paired(|v: &String, k: &String| format!("{}={}", k, v)),
        &input,
    );

    assert_eq!(mapped["db.host"], "db.host=localhost");
    assert_eq!(mapped["db.port"], "db.port=5432");
    assert!(matches!(mapped, Cow::Owned(_)));
}

#[test]
fn test_try_transform_changes_types() {
    let input: IndexMap<&str, &str> = [("1", "one"), ("2", "two")].into_iter().collect();

    let key_fn = EntryFn::single(|k: &&str| k.parse::<i64>());
    let value_fn = EntryFn::single(|v: &&str| Ok(v.len()));

    let transformed = try_transform_entries(&input, &key_fn, &value_fn).unwrap();

    let expected: IndexMap<i64, usize> = [(1, 3), (2, 3)].into_iter().collect();
    assert_eq!(transformed, expected);
}

#[test]
fn test_try_transform_reports_first_error() {
    let input: IndexMap<&str, &str> = [("1", "one"), ("x", "two"), ("y", "three")]
        .into_iter()
        .collect();

    let key_fn = EntryFn::single(|k: &&str| k.parse::<i64>());
    let value_fn = EntryFn::single(|v: &&str| Ok(v.len()));

    assert!(try_transform_entries(&input, &key_fn, &value_fn).is_err());
}

proptest! {
    /// With no functions the result is always the input itself
    #[test]
    fn prop_identity_without_functions(entries in arb_entries()) {
        let input: IndexMap<String, i64> = entries.into_iter().collect();
        let mapped = map_entries(&input, None, None);
        prop_assert!(ptr::eq(&*mapped, &input));
    }

    /// Identity functions produce an equal but distinct map
    #[test]
    fn prop_identity_functions_preserve_contents(entries in arb_entries()) {
        let input: IndexMap<String, i64> = entries.into_iter().collect();
        let mapped = map_entries(
            &input,
            Some(EntryFn::single(|k: &String| k.clone())),
            Some(EntryFn::single(|v: &i64| *v)),
        );
        prop_assert_eq!(&*mapped, &input);
    }
}
