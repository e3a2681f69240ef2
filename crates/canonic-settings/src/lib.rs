//! canonic settings - JSON settings loading for jobs
//!
//! Reads `settings/settings.json` once per `SettingsCache`, hands out lazily
//! evaluated single settings, and derives per-job settings filtered by key
//! prefix. Job settings can be frozen into an `ImmutableMap`.

pub mod errors;
pub mod job;
pub mod settings;

pub use errors::Result;
pub use job::{JobSettings, LogLevel};
pub use settings::{Settings, SettingsCache, SETTINGS_DIR, SETTINGS_FILE};
