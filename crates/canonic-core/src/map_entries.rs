//! Key/value transforms over mappings
//!
//! A transform is an `EntryFn` with one of two explicit call shapes:
//!
//! - `EntryFn::single(|own| ..)` sees only its own axis
//! - `EntryFn::paired(|own, sibling| ..)` also sees the paired entry
//!
//! Key functions see `(key, value)`, value functions see `(value, key)`.
//!
//! ## Collisions
//!
//! Transformed keys that compare equal collapse last-write-wins in input
//! iteration order. A key function must be injective for the result to be
//! lossless; this is a contract on the caller, not a checked error.

use std::borrow::Cow;
use std::hash::Hash;

use indexmap::IndexMap;

/// A transform applied to one axis of a mapping entry
pub enum EntryFn<'f, A, B, R> {
    /// Receives only its own axis value
    Single(Box<dyn Fn(&A) -> R + 'f>),
    /// Receives its own axis value, then the paired axis value
    Paired(Box<dyn Fn(&A, &B) -> R + 'f>),
}

impl<'f, A, B, R> EntryFn<'f, A, B, R> {
    pub fn single(f: impl Fn(&A) -> R + 'f) -> Self {
        EntryFn::Single(Box::new(f))
    }

    pub fn paired(f: impl Fn(&A, &B) -> R + 'f) -> Self {
        EntryFn::Paired(Box::new(f))
    }

    /// Apply the transform to `own`, passing `sibling` to paired transforms
    pub fn apply(&self, own: &A, sibling: &B) -> R {
        match self {
            EntryFn::Single(f) => f(own),
            EntryFn::Paired(f) => f(own, sibling),
        }
    }
}

/// Map a mapping's keys and values.
///
/// Returns the input itself (`Cow::Borrowed`) when the map is empty or when
/// neither function is given, so callers can detect "nothing changed" with
/// `std::ptr::eq`. Otherwise builds a new map, using identity for the
/// missing side.
///
/// # Example
///
/// ```
/// use canonic_core::map_entries::{map_entries, EntryFn};
/// use indexmap::IndexMap;
///
/// let input: IndexMap<i64, i64> = [(1, 1), (2, 2), (3, 3)].into_iter().collect();
/// let squared = map_entries(&input, None, Some(EntryFn::single(|v: &i64| v * v)));
/// let expected: IndexMap<i64, i64> = [(1, 1), (2, 4), (3, 9)].into_iter().collect();
/// assert_eq!(*squared, expected);
/// ```
pub fn map_entries<'a, K, V>(
    map: &'a IndexMap<K, V>,
    key_fn: Option<EntryFn<'_, K, V, K>>,
    value_fn: Option<EntryFn<'_, V, K, V>>,
) -> Cow<'a, IndexMap<K, V>>
where
    K: Hash + Eq + Clone,
    V: Clone,
{
    if map.is_empty() || (key_fn.is_none() && value_fn.is_none()) {
        return Cow::Borrowed(map);
    }

    let mapped = map
        .iter()
        .map(|(key, value)| {
            let new_key = match &key_fn {
                Some(f) => f.apply(key, value),
                None => key.clone(),
            };
            let new_value = match &value_fn {
                Some(f) => f.apply(value, key),
                None => value.clone(),
            };
            (new_key, new_value)
        })
        .collect();
    Cow::Owned(mapped)
}

/// Map only the keys of a mapping
pub fn map_keys<'a, K, V>(
    key_fn: EntryFn<'_, K, V, K>,
    map: &'a IndexMap<K, V>,
) -> Cow<'a, IndexMap<K, V>>
where
    K: Hash + Eq + Clone,
    V: Clone,
{
    map_entries(map, Some(key_fn), None)
}

/// Map only the values of a mapping
pub fn map_values<'a, K, V>(
    value_fn: EntryFn<'_, V, K, V>,
    map: &'a IndexMap<K, V>,
) -> Cow<'a, IndexMap<K, V>>
where
    K: Hash + Eq + Clone,
    V: Clone,
{
    map_entries(map, None, Some(value_fn))
}

/// Fallible, type-changing transform of a sequence of entries.
///
/// Applies `key_fn` and `value_fn` to every entry in order and collects the
/// results into a new map. Stops at the first error.
///
/// # Errors
/// Returns the first error produced by either function.
pub fn try_transform_entries<'a, K, V, K2, V2, E, I>(
    entries: I,
    key_fn: &EntryFn<'_, K, V, std::result::Result<K2, E>>,
    value_fn: &EntryFn<'_, V, K, std::result::Result<V2, E>>,
) -> std::result::Result<IndexMap<K2, V2>, E>
where
    I: IntoIterator<Item = (&'a K, &'a V)>,
    K: 'a,
    V: 'a,
    K2: Hash + Eq,
{
    let iter = entries.into_iter();
    let mut transformed = IndexMap::with_capacity(iter.size_hint().0);
    for (key, value) in iter {
        let new_key = key_fn.apply(key, value)?;
        let new_value = value_fn.apply(value, key)?;
        transformed.insert(new_key, new_value);
    }
    Ok(transformed)
}
