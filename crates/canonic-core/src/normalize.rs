//! Recursive hashability normalization
//!
//! `normalize` rewrites a `Value` into its canonical `NormalizedValue`:
//!
//! | Input | Output |
//! |---|---|
//! | scalar | unchanged, any NaN becomes the canonical NaN |
//! | mapping | `ImmutableMap` of normalized keys and values |
//! | set | `FrozenSet` of normalized members |
//! | sequence | fixed sequence of normalized items |
//! | frozen | unchanged, a bare NaN scalar becomes the canonical NaN |
//! | slice | `NotNormalizable` |
//!
//! The result type is hashable by construction, so no post-check is needed.
//!
//! Two distinct keys of an input mapping that normalize to the same key
//! collide destructively: the later entry overwrites the earlier one.

use crate::errors::{CanonError, Result};
use crate::frozen_map::ImmutableMap;
use crate::frozen_set::FrozenSet;
use crate::map_entries::{try_transform_entries, EntryFn};
use crate::value::{NormalizedValue, Value};

/// Convert `value` into its canonical, deeply-immutable, hashable form.
///
/// Normalizing an already-normalized value (`Value::Frozen`) returns it
/// unchanged.
///
/// # Errors
/// * `NotNormalizable` - If the value, or anything nested in it, is
///   slice-like
pub fn normalize(value: &Value) -> Result<NormalizedValue> {
    match value {
        Value::Scalar(scalar) => Ok(NormalizedValue::Scalar(scalar.canonicalized())),
        Value::Frozen(NormalizedValue::Scalar(scalar)) => {
            Ok(NormalizedValue::Scalar(scalar.canonicalized()))
        }
        Value::Frozen(frozen) => Ok(frozen.clone()),
        Value::Sequence(items) => {
            let normalized = items.iter().map(normalize).collect::<Result<Vec<_>>>()?;
            Ok(NormalizedValue::Sequence(normalized.into()))
        }
        Value::Set(members) => {
            let normalized = members.iter().map(normalize).collect::<Result<FrozenSet>>()?;
            Ok(NormalizedValue::Set(normalized))
        }
        Value::Mapping(entries) => {
            let normalize_fn = EntryFn::single(normalize);
            let table = try_transform_entries(
                entries.iter().map(|(key, value)| (key, value)),
                &normalize_fn,
                &normalize_fn,
            )?;
            Ok(NormalizedValue::Map(ImmutableMap::from_index_map(table)))
        }
        Value::Slice { .. } => Err(CanonError::NotNormalizable {
            type_name: value.type_name(),
            value: format!("{:?}", value),
        }),
    }
}

/// Normalize every value of an iterator, stopping at the first failure
///
/// # Errors
/// * `NotNormalizable` - From the first value that has no hashable form
pub fn normalize_all<'a, I>(values: I) -> Result<Vec<NormalizedValue>>
where
    I: IntoIterator<Item = &'a Value>,
{
    values.into_iter().map(normalize).collect()
}

/// Check whether a value is hashable as-is, without converting it
pub fn is_hashable(value: &Value) -> bool {
    matches!(value, Value::Scalar(_) | Value::Frozen(_))
}
