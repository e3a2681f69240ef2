//! Predictable UUIDs derived from a base name and a value
//!
//! `generate_uuid(base, value)` is a pure function of its two strings:
//! the base is hashed into a UUID, and that UUID's text form concatenated
//! with the value is hashed into the result. Each UUID is the 16-byte MD5
//! digest of its input, so results match other MD5 name-derived generators.
//!
//! `UuidGenerator` fixes the base and memoizes results in a cache owned by
//! the generator itself, so callers decide its scope and lifetime.

use std::collections::HashMap;
use std::sync::Mutex;

use md5::{Digest, Md5};
use uuid::Uuid;

/// Generate a predictable UUID from `base` and `value`
pub fn generate_uuid(base: &str, value: &str) -> Uuid {
    let base_uuid = digest_uuid(base.as_bytes());
    let combined = format!("{}{}", base_uuid, value);
    digest_uuid(combined.as_bytes())
}

fn digest_uuid(input: &[u8]) -> Uuid {
    let digest = Md5::digest(input);
    let mut bytes = [0u8; 16];
    bytes.copy_from_slice(&digest);
    Uuid::from_bytes(bytes)
}

/// UUID generator with a fixed base and an explicit memo cache
#[derive(Debug)]
pub struct UuidGenerator {
    base: String,
    cache: Mutex<HashMap<String, Uuid>>,
}

impl UuidGenerator {
    pub fn new(base: impl Into<String>) -> Self {
        Self {
            base: base.into(),
            cache: Mutex::new(HashMap::new()),
        }
    }

    pub fn base(&self) -> &str {
        &self.base
    }

    /// Generate the UUID for `value`, equal to `generate_uuid(base, value)`
    pub fn generate(&self, value: &str) -> Uuid {
        if let Some(cached) = self
            .cache
            .lock()
            .ok()
            .and_then(|cache| cache.get(value).copied())
        {
            return cached;
        }

        let uuid = generate_uuid(&self.base, value);
        self.cache
            .lock()
            .map(|mut cache| cache.insert(value.to_string(), uuid))
            .ok();
        uuid
    }

    /// Number of memoized values
    pub fn cache_len(&self) -> usize {
        self.cache.lock().map(|cache| cache.len()).unwrap_or_default()
    }

    pub fn clear_cache(&self) {
        self.cache.lock().map(|mut cache| cache.clear()).ok();
    }
}
