//! Input and canonical value models
//!
//! `Value` is the universe of inputs accepted for normalization: scalars,
//! mutable containers (sequences, sets, mappings), already-frozen values and
//! slice-like values that have no hashable form.
//!
//! `NormalizedValue` is the hashable restriction of that universe. Every
//! variant implements `Eq` and `Hash`, and structurally equal values always
//! hash equal.

use std::collections::hash_map::DefaultHasher;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

use crate::frozen_map::ImmutableMap;
use crate::frozen_set::FrozenSet;

/// The single NaN representation produced by normalization
pub const CANONICAL_NAN: f64 = f64::NAN;

/// Deterministic per-value digest used by the XOR-folded container hashes
pub(crate) fn stable_hash<T: Hash + ?Sized>(value: &T) -> u64 {
    let mut hasher = DefaultHasher::new();
    value.hash(&mut hasher);
    hasher.finish()
}

/// Bit pattern used for float equality and hashing.
///
/// All NaNs collapse to the canonical NaN and both zeros to `+0.0`, so
/// `a == b` implies `hash(a) == hash(b)`.
fn float_key(f: f64) -> u64 {
    if f.is_nan() {
        CANONICAL_NAN.to_bits()
    } else if f == 0.0 {
        0
    } else {
        f.to_bits()
    }
}

/// Already-hashable leaf values
///
/// `Int(1)` and `Float(1.0)` are distinct values.
#[derive(Debug, Clone)]
pub enum Scalar {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
    Bytes(Vec<u8>),
}

impl Scalar {
    /// Return the canonical form of this scalar.
    ///
    /// Any NaN (quiet or signalling, any payload) becomes `CANONICAL_NAN`.
    pub fn canonicalized(&self) -> Scalar {
        match self {
            Scalar::Float(f) if f.is_nan() => Scalar::Float(CANONICAL_NAN),
            other => other.clone(),
        }
    }

    pub fn type_name(&self) -> &'static str {
        match self {
            Scalar::Null => "null",
            Scalar::Bool(_) => "bool",
            Scalar::Int(_) => "int",
            Scalar::Float(_) => "float",
            Scalar::Text(_) => "text",
            Scalar::Bytes(_) => "bytes",
        }
    }
}

impl PartialEq for Scalar {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Scalar::Null, Scalar::Null) => true,
            (Scalar::Bool(a), Scalar::Bool(b)) => a == b,
            (Scalar::Int(a), Scalar::Int(b)) => a == b,
            (Scalar::Float(a), Scalar::Float(b)) => float_key(*a) == float_key(*b),
            (Scalar::Text(a), Scalar::Text(b)) => a == b,
            (Scalar::Bytes(a), Scalar::Bytes(b)) => a == b,
            _ => false,
        }
    }
}

impl Eq for Scalar {}

impl Hash for Scalar {
    fn hash<H: Hasher>(&self, state: &mut H) {
        std::mem::discriminant(self).hash(state);
        match self {
            Scalar::Null => {}
            Scalar::Bool(b) => b.hash(state),
            Scalar::Int(n) => n.hash(state),
            Scalar::Float(f) => float_key(*f).hash(state),
            Scalar::Text(s) => s.hash(state),
            Scalar::Bytes(b) => b.hash(state),
        }
    }
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scalar::Null => f.write_str("null"),
            Scalar::Bool(b) => write!(f, "{}", b),
            Scalar::Int(n) => write!(f, "{}", n),
            Scalar::Float(x) if x.is_nan() => f.write_str("nan"),
            Scalar::Float(x) => write!(f, "{:?}", x),
            Scalar::Text(s) => write!(f, "{:?}", s),
            Scalar::Bytes(b) => write!(f, "b\"{}\"", b.escape_ascii()),
        }
    }
}

/// Canonical, deeply-immutable, hashable value
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum NormalizedValue {
    Scalar(Scalar),
    /// Ordered, fixed-length sequence
    Sequence(Arc<[NormalizedValue]>),
    /// Unordered, deduplicated set
    Set(FrozenSet),
    Map(ImmutableMap),
}

impl NormalizedValue {
    /// Build a fixed sequence from already-normalized items
    pub fn sequence<I>(items: I) -> Self
    where
        I: IntoIterator<Item = NormalizedValue>,
    {
        NormalizedValue::Sequence(items.into_iter().collect())
    }

    pub fn type_name(&self) -> &'static str {
        match self {
            NormalizedValue::Scalar(s) => s.type_name(),
            NormalizedValue::Sequence(_) => "sequence",
            NormalizedValue::Set(_) => "set",
            NormalizedValue::Map(_) => "map",
        }
    }

    pub fn as_scalar(&self) -> Option<&Scalar> {
        match self {
            NormalizedValue::Scalar(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_sequence(&self) -> Option<&[NormalizedValue]> {
        match self {
            NormalizedValue::Sequence(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_set(&self) -> Option<&FrozenSet> {
        match self {
            NormalizedValue::Set(set) => Some(set),
            _ => None,
        }
    }

    pub fn as_map(&self) -> Option<&ImmutableMap> {
        match self {
            NormalizedValue::Map(map) => Some(map),
            _ => None,
        }
    }
}

impl fmt::Display for NormalizedValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NormalizedValue::Scalar(s) => write!(f, "{}", s),
            NormalizedValue::Sequence(items) => {
                f.write_str("(")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{}", item)?;
                }
                f.write_str(")")
            }
            NormalizedValue::Set(set) => write!(f, "{}", set),
            NormalizedValue::Map(map) => write!(f, "{}", map),
        }
    }
}

impl From<Scalar> for NormalizedValue {
    fn from(scalar: Scalar) -> Self {
        NormalizedValue::Scalar(scalar)
    }
}

impl From<&str> for NormalizedValue {
    fn from(s: &str) -> Self {
        NormalizedValue::Scalar(Scalar::Text(s.to_string()))
    }
}

impl From<String> for NormalizedValue {
    fn from(s: String) -> Self {
        NormalizedValue::Scalar(Scalar::Text(s))
    }
}

impl From<i64> for NormalizedValue {
    fn from(n: i64) -> Self {
        NormalizedValue::Scalar(Scalar::Int(n))
    }
}

impl From<i32> for NormalizedValue {
    fn from(n: i32) -> Self {
        NormalizedValue::Scalar(Scalar::Int(i64::from(n)))
    }
}

impl From<bool> for NormalizedValue {
    fn from(b: bool) -> Self {
        NormalizedValue::Scalar(Scalar::Bool(b))
    }
}

impl From<f64> for NormalizedValue {
    fn from(f: f64) -> Self {
        NormalizedValue::Scalar(Scalar::Float(f))
    }
}

impl From<ImmutableMap> for NormalizedValue {
    fn from(map: ImmutableMap) -> Self {
        NormalizedValue::Map(map)
    }
}

impl From<FrozenSet> for NormalizedValue {
    fn from(set: FrozenSet) -> Self {
        NormalizedValue::Set(set)
    }
}

impl From<Vec<NormalizedValue>> for NormalizedValue {
    fn from(items: Vec<NormalizedValue>) -> Self {
        NormalizedValue::Sequence(items.into())
    }
}

/// Any value accepted for normalization
///
/// `Sequence`, `Set` and `Mapping` are the mutable (unhashable) containers.
/// `Frozen` carries a value that is already canonical, e.g. a tuple, a
/// frozen set or an `ImmutableMap` handed back in by a caller.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Scalar(Scalar),
    Sequence(Vec<Value>),
    /// Elements may repeat; duplicates collapse after normalization
    Set(Vec<Value>),
    /// Entries in insertion order
    Mapping(Vec<(Value, Value)>),
    Frozen(NormalizedValue),
    /// Range/slice-like value with no hashable representation
    Slice {
        start: Option<i64>,
        stop: Option<i64>,
        step: Option<i64>,
    },
}

impl Value {
    /// Build a mutable sequence
    pub fn list<I, T>(items: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<Value>,
    {
        Value::Sequence(items.into_iter().map(Into::into).collect())
    }

    /// Build a mutable set
    pub fn set<I, T>(items: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<Value>,
    {
        Value::Set(items.into_iter().map(Into::into).collect())
    }

    /// Build a mutable mapping from key/value pairs
    pub fn mapping<I, K, V>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<Value>,
        V: Into<Value>,
    {
        Value::Mapping(
            entries
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }

    pub fn slice(start: Option<i64>, stop: Option<i64>, step: Option<i64>) -> Self {
        Value::Slice { start, stop, step }
    }

    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Scalar(s) => s.type_name(),
            Value::Sequence(_) => "sequence",
            Value::Set(_) => "set",
            Value::Mapping(_) => "mapping",
            Value::Frozen(n) => n.type_name(),
            Value::Slice { .. } => "slice",
        }
    }

    /// Take the value as-is if it is already hashable, without conversion.
    ///
    /// Returns the original value back when it is a mutable container or
    /// slice-like.
    pub fn into_hashable(self) -> std::result::Result<NormalizedValue, Value> {
        match self {
            Value::Scalar(s) => Ok(NormalizedValue::Scalar(s)),
            Value::Frozen(n) => Ok(n),
            other => Err(other),
        }
    }
}

impl From<Scalar> for Value {
    fn from(scalar: Scalar) -> Self {
        Value::Scalar(scalar)
    }
}

impl From<NormalizedValue> for Value {
    fn from(value: NormalizedValue) -> Self {
        Value::Frozen(value)
    }
}

impl From<ImmutableMap> for Value {
    fn from(map: ImmutableMap) -> Self {
        Value::Frozen(NormalizedValue::Map(map))
    }
}

impl From<FrozenSet> for Value {
    fn from(set: FrozenSet) -> Self {
        Value::Frozen(NormalizedValue::Set(set))
    }
}

impl From<()> for Value {
    fn from(_: ()) -> Self {
        Value::Scalar(Scalar::Null)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Scalar(Scalar::Text(s.to_string()))
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Scalar(Scalar::Text(s))
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Scalar(Scalar::Int(n))
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Value::Scalar(Scalar::Int(i64::from(n)))
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Scalar(Scalar::Bool(b))
    }
}

impl From<f64> for Value {
    fn from(f: f64) -> Self {
        Value::Scalar(Scalar::Float(f))
    }
}

/// JSON documents map onto mutable containers: arrays become sequences and
/// objects become mappings with text keys.
impl From<serde_json::Value> for Value {
    fn from(json: serde_json::Value) -> Self {
        match json {
            serde_json::Value::Null => Value::Scalar(Scalar::Null),
            serde_json::Value::Bool(b) => Value::Scalar(Scalar::Bool(b)),
            serde_json::Value::Number(n) => match n.as_i64() {
                Some(i) => Value::Scalar(Scalar::Int(i)),
                None => Value::Scalar(n.as_f64().map_or(Scalar::Null, Scalar::Float)),
            },
            serde_json::Value::String(s) => Value::Scalar(Scalar::Text(s)),
            serde_json::Value::Array(items) => {
                Value::Sequence(items.into_iter().map(Value::from).collect())
            }
            serde_json::Value::Object(entries) => Value::Mapping(
                entries
                    .into_iter()
                    .map(|(k, v)| (Value::from(k), Value::from(v)))
                    .collect(),
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nan_payloads_compare_and_hash_equal() {
        let signalling = f64::from_bits(0x7ff0_0000_0000_0001);
        assert!(signalling.is_nan());

        let a = Scalar::Float(signalling);
        let b = Scalar::Float(f64::NAN);
        assert_eq!(a, b);
        assert_eq!(stable_hash(&a), stable_hash(&b));
    }

    #[test]
    fn test_canonicalized_rewrites_nan_bits() {
        let signalling = Scalar::Float(f64::from_bits(0x7ff0_0000_0000_0001));
        match signalling.canonicalized() {
            Scalar::Float(f) => assert_eq!(f.to_bits(), CANONICAL_NAN.to_bits()),
            other => panic!("Expected float, got {:?}", other),
        }
    }

    #[test]
    fn test_signed_zeros_are_equal() {
        let pos = Scalar::Float(0.0);
        let neg = Scalar::Float(-0.0);
        assert_eq!(pos, neg);
        assert_eq!(stable_hash(&pos), stable_hash(&neg));
    }

    #[test]
    fn test_int_and_float_are_distinct() {
        assert_ne!(Scalar::Int(1), Scalar::Float(1.0));
    }

    #[test]
    fn test_into_hashable_rejects_mutable_containers() {
        assert!(Value::from("a").into_hashable().is_ok());
        assert!(Value::list(["a"]).into_hashable().is_err());
        assert!(Value::set(["a"]).into_hashable().is_err());
        assert!(Value::mapping([("a", 1)]).into_hashable().is_err());
        assert!(Value::slice(None, Some(1), None).into_hashable().is_err());
    }

    #[test]
    fn test_from_json_object_keeps_text_keys() {
        let value = Value::from(serde_json::json!({"a": [1, 2.5, null]}));
        match value {
            Value::Mapping(entries) => {
                assert_eq!(entries.len(), 1);
                assert_eq!(entries[0].0, Value::from("a"));
                assert_eq!(
                    entries[0].1,
                    Value::Sequence(vec![
                        Value::from(1),
                        Value::from(2.5),
                        Value::Scalar(Scalar::Null),
                    ])
                );
            }
            other => panic!("Expected mapping, got {:?}", other),
        }
    }

    #[test]
    fn test_display_renders_nested_sequence() {
        let value = NormalizedValue::sequence([
            NormalizedValue::from("b"),
            NormalizedValue::from(2),
        ]);
        assert_eq!(value.to_string(), "(\"b\", 2)");
    }
}
