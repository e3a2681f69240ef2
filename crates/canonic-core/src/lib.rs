//! canonic core - Canonical hashable forms for nested data
//!
//! This crate converts arbitrary nested, possibly-mutable data into a
//! deeply-immutable, hashable equivalent and builds on that form:
//! - `normalize` rewrites any supported `Value` into a `NormalizedValue`
//! - `ImmutableMap` is a hashable mapping with an order-independent hash
//! - `map_entries` applies key/value transforms to a mapping
//! - `invert` groups the keys of a mapping by their normalized values
//! - `UuidGenerator` derives predictable UUIDs from a fixed base
//!
//! Everything here is synchronous and pure. Produced values are immutable
//! and `Send + Sync`, so they can be shared freely across threads.

pub mod errors;
pub mod frozen_map;
pub mod frozen_set;
pub mod logging_facility;
pub mod map_entries;
pub mod normalize;
pub mod transpose;
pub mod uuid_gen;
pub mod value;

/// Schema constants used by the logging macros.
pub use canonic_core_types as core_types;

// Re-export commonly used types
pub use errors::{CanonError, ExError, ExErrorKind, MutationKind, Result};
pub use frozen_map::ImmutableMap;
pub use frozen_set::FrozenSet;
pub use map_entries::{map_entries, map_keys, map_values, try_transform_entries, EntryFn};
pub use normalize::{is_hashable, normalize, normalize_all};
pub use transpose::{invert, InverseMapping};
pub use uuid_gen::{generate_uuid, UuidGenerator};
pub use value::{NormalizedValue, Scalar, Value};
