//! Hashable immutable mapping
//!
//! `ImmutableMap` owns its entry table behind an `Arc`; clones share the
//! table and nothing can change it after construction.
//!
//! ## Constructors
//!
//! - `from_trusted`: every key and value must already be hashable, nothing
//!   is converted
//! - `from_normalizing`: every key and value goes through `normalize` first,
//!   then the trusting path
//! - `from_normalized` / `FromIterator`: infallible, from normalized pairs
//!
//! Duplicate keys resolve last-write-wins. The surviving entry keeps the
//! position of the first occurrence.
//!
//! ## Hashing
//!
//! `hash = XOR over all pairs of hash((key, value))`, computed once at
//! construction. Hashing the pair as a unit keeps key and value roles apart;
//! the XOR keeps the result independent of insertion order. Pairs with
//! identical per-pair hashes cancel each other out, which is accepted.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

use indexmap::IndexMap;

use crate::errors::{CanonError, MutationKind, Result};
use crate::normalize::normalize;
use crate::value::{stable_hash, NormalizedValue, Value};

/// Immutable, hashable mapping of normalized keys to normalized values
#[derive(Clone)]
pub struct ImmutableMap {
    entries: Arc<IndexMap<NormalizedValue, NormalizedValue>>,
    fold_hash: u64,
}

impl ImmutableMap {
    /// Create an empty map
    pub fn new() -> Self {
        Self::from_index_map(IndexMap::new())
    }

    pub(crate) fn from_index_map(entries: IndexMap<NormalizedValue, NormalizedValue>) -> Self {
        let fold_hash = entries
            .iter()
            .fold(0u64, |acc, pair| acc ^ stable_hash(&pair));
        Self {
            entries: Arc::new(entries),
            fold_hash,
        }
    }

    /// Build a map from already-normalized pairs
    pub fn from_normalized<I>(entries: I) -> Self
    where
        I: IntoIterator<Item = (NormalizedValue, NormalizedValue)>,
    {
        Self::from_index_map(entries.into_iter().collect())
    }

    /// Build a map from entries whose keys and values are already hashable
    ///
    /// Nothing is converted; a NaN scalar is only rewritten to the canonical
    /// NaN. Accepts any iterable of pairs: a mapping, a vector of pairs, an
    /// iterator, or keyword-style `[("name", value)]` arrays.
    ///
    /// # Errors
    /// * `NotHashable` - If a key or value is a mutable container or
    ///   slice-like; the offending value is named in the error
    pub fn from_trusted<I, K, V>(entries: I) -> Result<Self>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<Value>,
        V: Into<Value>,
    {
        let iter = entries.into_iter();
        let mut table = IndexMap::with_capacity(iter.size_hint().0);
        for (key, value) in iter {
            let key = require_hashable(key.into())?;
            let value = require_hashable(value.into())?;
            table.insert(key, value);
        }
        Ok(Self::from_index_map(table))
    }

    /// Build a map after normalizing every key and value
    ///
    /// Keys that normalize to the same value collide and the later entry
    /// wins. No collision is reported.
    ///
    /// # Errors
    /// * `NotNormalizable` - If a key or value has no hashable form
    pub fn from_normalizing<I, K, V>(entries: I) -> Result<Self>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<Value>,
        V: Into<Value>,
    {
        let normalized = entries
            .into_iter()
            .map(|(key, value)| {
                let key = normalize(&key.into())?;
                let value = normalize(&value.into())?;
                Ok((Value::Frozen(key), Value::Frozen(value)))
            })
            .collect::<Result<Vec<_>>>()?;
        Self::from_trusted(normalized)
    }

    /// Get the value stored under `key`
    ///
    /// # Errors
    /// * `KeyNotFound` - If the key is absent
    pub fn get(&self, key: &NormalizedValue) -> Result<&NormalizedValue> {
        self.entries
            .get(key)
            .ok_or_else(|| CanonError::KeyNotFound {
                key: key.to_string(),
            })
    }

    /// Get the value stored under `key`, if any
    pub fn lookup(&self, key: &NormalizedValue) -> Option<&NormalizedValue> {
        self.entries.get(key)
    }

    pub fn contains_key(&self, key: &NormalizedValue) -> bool {
        self.entries.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Keys in the order of the deduplicated entry table
    pub fn keys(&self) -> impl Iterator<Item = &NormalizedValue> {
        self.entries.keys()
    }

    pub fn values(&self) -> impl Iterator<Item = &NormalizedValue> {
        self.entries.values()
    }

    pub fn iter(&self) -> indexmap::map::Iter<'_, NormalizedValue, NormalizedValue> {
        self.entries.iter()
    }

    /// Order-independent hash of the entries
    pub fn fold_hash(&self) -> u64 {
        self.fold_hash
    }

    /// Item assignment is not supported.
    ///
    /// # Errors
    /// Always fails with `ImmutableMutation { operation: Assignment }`.
    pub fn set_item(
        &self,
        _key: impl Into<Value>,
        _value: impl Into<Value>,
    ) -> Result<()> {
        Err(CanonError::ImmutableMutation {
            operation: MutationKind::Assignment,
        })
    }

    /// Item deletion is not supported.
    ///
    /// # Errors
    /// Always fails with `ImmutableMutation { operation: Deletion }`.
    pub fn del_item(&self, _key: impl Into<Value>) -> Result<()> {
        Err(CanonError::ImmutableMutation {
            operation: MutationKind::Deletion,
        })
    }
}

fn require_hashable(value: Value) -> Result<NormalizedValue> {
    match value.into_hashable() {
        Ok(NormalizedValue::Scalar(scalar)) => Ok(NormalizedValue::Scalar(scalar.canonicalized())),
        Ok(hashable) => Ok(hashable),
        Err(rejected) => Err(CanonError::NotHashable {
            value: format!("{:?}", rejected),
        }),
    }
}

impl Default for ImmutableMap {
    fn default() -> Self {
        Self::new()
    }
}

impl FromIterator<(NormalizedValue, NormalizedValue)> for ImmutableMap {
    fn from_iter<I: IntoIterator<Item = (NormalizedValue, NormalizedValue)>>(iter: I) -> Self {
        Self::from_normalized(iter)
    }
}

impl<'a> IntoIterator for &'a ImmutableMap {
    type Item = (&'a NormalizedValue, &'a NormalizedValue);
    type IntoIter = indexmap::map::Iter<'a, NormalizedValue, NormalizedValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

impl PartialEq for ImmutableMap {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.entries, &other.entries)
            || (self.fold_hash == other.fold_hash && *self.entries == *other.entries)
    }
}

impl Eq for ImmutableMap {}

impl Hash for ImmutableMap {
    fn hash<H: Hasher>(&self, state: &mut H) {
        state.write_u64(self.fold_hash);
    }
}

impl fmt::Debug for ImmutableMap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.entries.iter()).finish()
    }
}

impl fmt::Display for ImmutableMap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("{")?;
        for (i, (key, value)) in self.entries.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{}: {}", key, value)?;
        }
        f.write_str("}")
    }
}
