//! Settings file loading with an explicit cache
//!
//! A `SettingsCache` reads its JSON document on the first `load` and serves
//! the parsed result afterwards without touching the file again, even if the
//! file changes. Call `clear` to force a reread.
//!
//! A missing file is reported as a `NotFound` error and never cached, so a
//! later `load` picks the file up once it exists.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use std::time::Instant;

use canonic_core::{log_op_end, log_op_error, log_op_start};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::errors::{cache_poisoned, io_error, missing_setting, parse_error, Result};

/// Directory holding the settings file, relative to the working directory
pub const SETTINGS_DIR: &str = "settings";

/// Settings file name
pub const SETTINGS_FILE: &str = "settings.json";

/// Parsed settings document, keys in file order
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Settings {
    values: IndexMap<String, serde_json::Value>,
}

impl Settings {
    pub fn new(values: IndexMap<String, serde_json::Value>) -> Self {
        Self { values }
    }

    /// Parse a settings document; the top level must be a JSON object
    pub fn from_json_str(content: &str) -> std::result::Result<Self, serde_json::Error> {
        serde_json::from_str(content)
    }

    pub fn get(&self, key: &str) -> Option<&serde_json::Value> {
        self.values.get(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.values.keys().map(String::as_str)
    }

    pub fn iter(&self) -> indexmap::map::Iter<'_, String, serde_json::Value> {
        self.values.iter()
    }
}

/// Loads and memoizes one settings file
#[derive(Debug)]
pub struct SettingsCache {
    path: PathBuf,
    cached: Mutex<Option<Arc<Settings>>>,
}

impl SettingsCache {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            cached: Mutex::new(None),
        }
    }

    /// Cache for `<cwd>/settings/settings.json`
    ///
    /// # Errors
    /// * `Io` - If the current directory cannot be determined
    pub fn from_cwd() -> Result<Self> {
        let cwd = std::env::current_dir()
            .map_err(|e| io_error("settings_cwd", Path::new("."), e))?;
        Ok(Self::new(cwd.join(SETTINGS_DIR).join(SETTINGS_FILE)))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Whether a parsed document is currently cached
    pub fn is_loaded(&self) -> bool {
        self.cached
            .lock()
            .map(|cached| cached.is_some())
            .unwrap_or_default()
    }

    /// Load the settings, reading the file only if nothing is cached
    ///
    /// # Errors
    /// * `NotFound` - If the file does not exist
    /// * `Io` - If the file exists but cannot be read
    /// * `Serialization` - If the file is not valid JSON
    /// * `InvalidInput` - If the document is not a JSON object
    pub fn load(&self) -> Result<Arc<Settings>> {
        log_op_start!("settings_load", path = %self.path.display());
        let start = Instant::now();

        let settings = self.load_impl().map_err(|e| {
            log_op_error!(
                "settings_load",
                e.clone(),
                duration_ms = start.elapsed().as_millis() as u64
            );
            e
        })?;

        log_op_end!(
            "settings_load",
            duration_ms = start.elapsed().as_millis() as u64,
            entry_count = settings.len()
        );

        Ok(settings)
    }

    fn load_impl(&self) -> Result<Arc<Settings>> {
        let mut cached = self
            .cached
            .lock()
            .map_err(|_| cache_poisoned("settings_load"))?;

        if let Some(settings) = &*cached {
            tracing::debug!("settings served from cache");
            return Ok(Arc::clone(settings));
        }

        let content =
            fs::read_to_string(&self.path).map_err(|e| io_error("settings_read", &self.path, e))?;
        let settings = Settings::from_json_str(&content)
            .map(Arc::new)
            .map_err(|e| parse_error(&self.path, e))?;

        *cached = Some(Arc::clone(&settings));
        Ok(settings)
    }

    /// Drop the cached document so the next `load` rereads the file
    pub fn clear(&self) {
        self.cached.lock().map(|mut cached| cached.take()).ok();
    }

    /// Lazily read a single setting
    ///
    /// The returned closure loads the settings when called and yields the
    /// stored value, else `default`.
    ///
    /// # Errors
    /// The closure fails with the `load` error if the file cannot be loaded,
    /// and with `NotFound` if the key is absent and there is no default.
    pub fn setting(
        &self,
        key: impl Into<String>,
        default: Option<serde_json::Value>,
    ) -> impl Fn() -> Result<serde_json::Value> + '_ {
        let key = key.into();
        move || {
            let settings = self.load()?;
            settings
                .get(&key)
                .or(default.as_ref())
                .cloned()
                .ok_or_else(|| missing_setting(&key))
        }
    }
}
