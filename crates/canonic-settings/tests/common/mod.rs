//! Shared helpers for canonic-settings integration tests

use std::fs;
use std::path::PathBuf;

use canonic_settings::{SettingsCache, SETTINGS_DIR, SETTINGS_FILE};
use tempfile::TempDir;

/// Write `content` to `<dir>/settings/settings.json` and return its path
#[allow(dead_code)]
pub fn write_settings(dir: &TempDir, content: &str) -> PathBuf {
    let settings_dir = dir.path().join(SETTINGS_DIR);
    fs::create_dir_all(&settings_dir).unwrap();
    let path = settings_dir.join(SETTINGS_FILE);
    fs::write(&path, content).unwrap();
    path
}

/// Create a temp dir holding a settings file and a cache pointing at it
#[allow(dead_code)]
pub fn cache_with(content: &str) -> (TempDir, SettingsCache) {
    let dir = TempDir::new().unwrap();
    let path = write_settings(&dir, content);
    (dir, SettingsCache::new(path))
}

/// A cache pointing at a file that does not exist
#[allow(dead_code)]
pub fn missing_cache() -> (TempDir, SettingsCache) {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join(SETTINGS_DIR).join(SETTINGS_FILE);
    (dir, SettingsCache::new(path))
}

/// A cache whose settings path is a directory instead of a file
#[allow(dead_code)]
pub fn directory_cache() -> (TempDir, SettingsCache) {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join(SETTINGS_DIR).join(SETTINGS_FILE);
    fs::create_dir_all(&path).unwrap();
    (dir, SettingsCache::new(path))
}
