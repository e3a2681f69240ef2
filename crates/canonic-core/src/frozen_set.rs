//! Immutable, hashable set of normalized values

use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

use indexmap::IndexSet;

use crate::value::{stable_hash, NormalizedValue};

/// Deduplicated, unordered set of `NormalizedValue`s
///
/// Iteration follows first insertion, but equality and hashing ignore order:
/// the hash is the XOR-fold of the member hashes.
#[derive(Clone)]
pub struct FrozenSet {
    members: Arc<IndexSet<NormalizedValue>>,
    fold_hash: u64,
}

impl FrozenSet {
    /// Create an empty set
    pub fn new() -> Self {
        Self::from_index_set(IndexSet::new())
    }

    fn from_index_set(members: IndexSet<NormalizedValue>) -> Self {
        let fold_hash = members
            .iter()
            .fold(0u64, |acc, member| acc ^ stable_hash(member));
        Self {
            members: Arc::new(members),
            fold_hash,
        }
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub fn contains(&self, value: &NormalizedValue) -> bool {
        self.members.contains(value)
    }

    pub fn iter(&self) -> impl Iterator<Item = &NormalizedValue> {
        self.members.iter()
    }

    /// Order-independent hash of the members
    pub fn fold_hash(&self) -> u64 {
        self.fold_hash
    }
}

impl Default for FrozenSet {
    fn default() -> Self {
        Self::new()
    }
}

impl FromIterator<NormalizedValue> for FrozenSet {
    fn from_iter<I: IntoIterator<Item = NormalizedValue>>(iter: I) -> Self {
        Self::from_index_set(iter.into_iter().collect())
    }
}

impl PartialEq for FrozenSet {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.members, &other.members)
            || (self.fold_hash == other.fold_hash && *self.members == *other.members)
    }
}

impl Eq for FrozenSet {}

impl Hash for FrozenSet {
    fn hash<H: Hasher>(&self, state: &mut H) {
        state.write_u64(self.fold_hash);
    }
}

impl fmt::Debug for FrozenSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.members.iter()).finish()
    }
}

impl fmt::Display for FrozenSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.members.is_empty() {
            return f.write_str("set()");
        }
        f.write_str("{")?;
        for (i, member) in self.members.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{}", member)?;
        }
        f.write_str("}")
    }
}
