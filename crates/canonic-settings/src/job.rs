//! Per-job settings derived from the shared settings file
//!
//! A job reads only the settings whose key starts with its prefix. Dots in
//! those keys become underscores, so `exporters.host` is exposed as
//! `exporters_host`. The top-level `log_level` setting is always carried in
//! `JobSettings::log_level`, and also kept in `values` when the prefix
//! matches it.
//!
//! Sources, highest priority first: environment variables, then the settings
//! file, then defaults. A missing settings file is not an error for jobs.

use std::fmt;
use std::str::FromStr;
use std::time::Instant;

use canonic_core::errors::ExErrorKind;
use canonic_core::logging_facility::{init_with_filter, Profile};
use canonic_core::{
    log_op_end, log_op_error, log_op_start, map_keys, EntryFn, ImmutableMap, Value,
};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::errors::{invalid_log_level, Result};
use crate::settings::{Settings, SettingsCache};

/// Key of the log level setting
pub const LOG_LEVEL_KEY: &str = "log_level";

/// Log levels accepted in settings, named as in the settings file
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum LogLevel {
    Notset,
    Debug,
    Info,
    Warning,
    #[default]
    Error,
    Critical,
}

impl LogLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Notset => "NOTSET",
            LogLevel::Debug => "DEBUG",
            LogLevel::Info => "INFO",
            LogLevel::Warning => "WARNING",
            LogLevel::Error => "ERROR",
            LogLevel::Critical => "CRITICAL",
        }
    }

    /// `tracing` filter directive for this level
    ///
    /// `NOTSET` lets everything through; `CRITICAL` has no own level and
    /// shares `error`.
    pub fn filter_directive(&self) -> &'static str {
        match self {
            LogLevel::Notset => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warning => "warn",
            LogLevel::Error | LogLevel::Critical => "error",
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LogLevel {
    type Err = canonic_core::ExError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_uppercase().as_str() {
            "NOTSET" => Ok(LogLevel::Notset),
            "DEBUG" => Ok(LogLevel::Debug),
            "INFO" => Ok(LogLevel::Info),
            "WARNING" => Ok(LogLevel::Warning),
            "ERROR" => Ok(LogLevel::Error),
            "CRITICAL" => Ok(LogLevel::Critical),
            _ => Err(invalid_log_level(s)),
        }
    }
}

/// Settings of one job
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct JobSettings {
    pub log_level: LogLevel,
    /// Prefixed settings with dots in keys replaced by underscores
    pub values: IndexMap<String, serde_json::Value>,
}

impl JobSettings {
    /// Derive job settings from a loaded settings document
    ///
    /// # Errors
    /// * `InvalidInput` - If `log_level` is present but not a known level
    pub fn from_settings(settings: &Settings, prefix: &str) -> Result<Self> {
        let matching: IndexMap<String, serde_json::Value> = settings
            .iter()
            .filter(|(key, _)| key.starts_with(prefix))
            .map(|(key, value)| (key.clone(), value.clone()))
            .collect();

        let values = map_keys(
            EntryFn::single(|key: &String| key.replace('.', "_")),
            &matching,
        )
        .into_owned();

        let log_level = match settings.get(LOG_LEVEL_KEY) {
            Some(serde_json::Value::String(level)) => level.parse::<LogLevel>()?,
            Some(other) => return Err(invalid_log_level(&other.to_string())),
            None => LogLevel::default(),
        };

        Ok(Self { log_level, values })
    }

    /// Load job settings from the cache, then apply the process environment
    ///
    /// # Errors
    /// * `Io` - If the settings file exists but cannot be read
    /// * `Serialization` / `InvalidInput` - If the settings file is malformed
    /// * `InvalidInput` - If a log level is not a known level
    pub fn load(cache: &SettingsCache, prefix: &str) -> Result<Self> {
        Self::load_with_env(cache, prefix, std::env::vars())
    }

    /// Load job settings from the cache, then apply the given variables
    ///
    /// A missing settings file falls back to defaults with a warning. Any
    /// other read failure is returned.
    ///
    /// # Errors
    /// * `Io` - If the settings file exists but cannot be read
    /// * `Serialization` / `InvalidInput` - If the settings file is malformed
    /// * `InvalidInput` - If a log level is not a known level
    pub fn load_with_env<I, K, V>(cache: &SettingsCache, prefix: &str, vars: I) -> Result<Self>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        log_op_start!("job_settings_load", prefix = prefix);
        let start = Instant::now();

        let result = Self::load_impl(cache, prefix)
            .and_then(|settings| settings.apply_env(vars))
            .map_err(|e| {
                log_op_error!(
                    "job_settings_load",
                    e.clone(),
                    duration_ms = start.elapsed().as_millis() as u64
                );
                e
            })?;

        log_op_end!(
            "job_settings_load",
            duration_ms = start.elapsed().as_millis() as u64,
            entry_count = result.values.len()
        );

        Ok(result)
    }

    fn load_impl(cache: &SettingsCache, prefix: &str) -> Result<Self> {
        match cache.load() {
            Ok(settings) => Self::from_settings(&settings, prefix),
            Err(e) if e.kind() == ExErrorKind::NotFound => {
                tracing::warn!(
                    path = %cache.path().display(),
                    "Could not load settings file, using settings from environment"
                );
                Ok(Self::default())
            }
            Err(e) => Err(e),
        }
    }

    /// Override settings from environment-style variables
    ///
    /// Names match case-insensitively: `LOG_LEVEL` sets the log level, any
    /// other name replaces the job setting of the same name.
    ///
    /// # Errors
    /// * `InvalidInput` - If `LOG_LEVEL` is not a known level
    pub fn apply_env<I, K, V>(mut self, vars: I) -> Result<Self>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        for (name, value) in vars {
            let name = name.as_ref().to_ascii_lowercase();
            let value: String = value.into();
            if name == LOG_LEVEL_KEY {
                self.log_level = value.parse()?;
                if let Some(slot) = self.values.get_mut(LOG_LEVEL_KEY) {
                    *slot = serde_json::Value::String(self.log_level.as_str().to_string());
                }
            } else if let Some(slot) = self.values.get_mut(&name) {
                *slot = serde_json::Value::String(value);
            }
        }
        Ok(self)
    }

    pub fn get(&self, key: &str) -> Option<&serde_json::Value> {
        self.values.get(key)
    }

    /// Freeze the settings into an `ImmutableMap`, `log_level` included
    ///
    /// The `log_level` entry always reflects `self.log_level`.
    ///
    /// # Errors
    /// * `NotHashable` - If a setting holds a JSON array or object
    pub fn to_frozen(&self) -> canonic_core::Result<ImmutableMap> {
        ImmutableMap::from_trusted(self.entries())
    }

    /// Freeze the settings, normalizing nested JSON arrays and objects
    ///
    /// # Errors
    /// * `NotNormalizable` - If a value has no hashable form
    pub fn to_normalized(&self) -> canonic_core::Result<ImmutableMap> {
        ImmutableMap::from_normalizing(self.entries())
    }

    fn entries(&self) -> impl Iterator<Item = (Value, Value)> + '_ {
        std::iter::once((Value::from(LOG_LEVEL_KEY), Value::from(self.log_level.as_str()))).chain(
            self.values
                .iter()
                .filter(|(key, _)| key.as_str() != LOG_LEVEL_KEY)
                .map(|(key, value)| (Value::from(key.as_str()), Value::from(value.clone()))),
        )
    }

    /// Initialize logging at the configured level
    ///
    /// Only the first logging initialization in a process takes effect.
    /// `RUST_LOG` still overrides the configured level.
    pub fn start_logging(&self) {
        init_with_filter(Profile::Development, self.log_level.filter_directive());
        tracing::debug!(log_level = %self.log_level, "logging started");
    }
}
