//! Mapping inversion
//!
//! Keys become values and values become keys. Several keys may share a
//! value, so every normalized value maps to the list of keys that carried
//! it, in first-seen order. Keys are never deduplicated.

use indexmap::IndexMap;

use crate::errors::Result;
use crate::normalize::normalize;
use crate::value::{NormalizedValue, Value};

/// Normalized value to the ordered list of original keys carrying it
pub type InverseMapping<K> = IndexMap<NormalizedValue, Vec<K>>;

/// Invert a mapping, grouping its keys by normalized value.
///
/// Accepts anything iterating as `(&K, &Value)`, e.g. `&IndexMap<K, Value>`
/// or `&BTreeMap<K, Value>`, and walks it in its natural order.
///
/// # Example
///
/// ```
/// use canonic_core::{invert, NormalizedValue, Value};
/// use indexmap::IndexMap;
///
/// let input: IndexMap<&str, Value> = [
///     ("test_key1", Value::from("test_value1")),
///     ("test_key2", Value::from("test_value2")),
///     ("test_key3", Value::from("test_value1")),
/// ]
/// .into_iter()
/// .collect();
///
/// let inverse = invert(&input).unwrap();
/// assert_eq!(
///     inverse[&NormalizedValue::from("test_value1")],
///     vec!["test_key1", "test_key3"]
/// );
/// ```
///
/// # Errors
/// * `NotNormalizable` - If any value has no hashable form; no partial
///   result is returned
pub fn invert<'a, K, I>(mapping: I) -> Result<InverseMapping<K>>
where
    I: IntoIterator<Item = (&'a K, &'a Value)>,
    K: Clone + 'a,
{
    let mut inverse: InverseMapping<K> = IndexMap::new();
    let mut entry_count = 0usize;
    for (key, value) in mapping {
        let normalized = normalize(value)?;
        inverse.entry(normalized).or_default().push(key.clone());
        entry_count += 1;
    }
    tracing::debug!(
        entry_count = entry_count,
        group_count = inverse.len(),
        "inverted mapping"
    );
    Ok(inverse)
}
