//! Persisted playback settings: the last-used stream URL and volume.
//!
//! Loading is infallible by design — a missing file, unreadable JSON, or a
//! missing key each fall back to defaults without touching the caller.

use crate::global;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::io::ErrorKind;
use std::path::PathBuf;
use tracing::{info, warn};

pub const DEFAULT_STREAM_URL: &str = "https://www.youtube.com/watch?v=jfKfPfyJRdk";
pub const DEFAULT_VOLUME: u32 = 50;

pub const MAX_VOLUME: u32 = 100;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub last_url: String,
    pub volume: u32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            last_url: DEFAULT_STREAM_URL.to_string(),
            volume: DEFAULT_VOLUME,
        }
    }
}

impl Settings {
    /// Volume must hold the [0,100] invariant no matter what was on disk.
    fn clamped(mut self) -> Self {
        self.volume = self.volume.min(MAX_VOLUME);
        self
    }
}

pub struct SettingsStore {
    path: PathBuf,
}

impl SettingsStore {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn from_global() -> Result<Self> {
        Ok(Self::new(global::settings_file()?))
    }

    pub fn load(&self) -> Settings {
        let content = match std::fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                info!("No settings file at {:?}, using defaults", self.path);
                return Settings::default();
            }
            Err(e) => {
                warn!("Failed to read settings file {:?}: {}", self.path, e);
                return Settings::default();
            }
        };

        match serde_json::from_str::<Settings>(&content) {
            Ok(settings) => settings.clamped(),
            Err(e) => {
                warn!(
                    "Settings file {:?} is not valid JSON ({}), using defaults",
                    self.path, e
                );
                Settings::default()
            }
        }
    }

    pub fn save(&self, settings: &Settings) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent).context("Failed to create settings directory")?;
        }

        let content =
            serde_json::to_string_pretty(settings).context("Failed to serialize settings")?;

        std::fs::write(&self.path, content).context("Failed to write settings file")?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn store_in(dir: &tempfile::TempDir) -> SettingsStore {
        SettingsStore::new(dir.path().join("settings.json"))
    }

    #[test]
    fn missing_file_yields_defaults() {
        let dir = tempdir().unwrap();
        let settings = store_in(&dir).load();
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn save_then_load_round_trips() {
        let dir = tempdir().unwrap();
        let store = store_in(&dir);

        let settings = Settings {
            last_url: "https://example.com/watch?v=abc".to_string(),
            volume: 80,
        };
        store.save(&settings).unwrap();

        assert_eq!(store.load(), settings);
    }

    #[test]
    fn corrupt_file_yields_defaults() {
        let dir = tempdir().unwrap();
        let store = store_in(&dir);
        std::fs::write(dir.path().join("settings.json"), "{not json").unwrap();

        assert_eq!(store.load(), Settings::default());
    }

    #[test]
    fn missing_volume_key_defaults_and_keeps_url() {
        let dir = tempdir().unwrap();
        let store = store_in(&dir);
        std::fs::write(
            dir.path().join("settings.json"),
            r#"{"last_url": "https://example.com/stream"}"#,
        )
        .unwrap();

        let settings = store.load();
        assert_eq!(settings.last_url, "https://example.com/stream");
        assert_eq!(settings.volume, DEFAULT_VOLUME);
    }

    #[test]
    fn missing_url_key_defaults_and_keeps_volume() {
        let dir = tempdir().unwrap();
        let store = store_in(&dir);
        std::fs::write(dir.path().join("settings.json"), r#"{"volume": 25}"#).unwrap();

        let settings = store.load();
        assert_eq!(settings.last_url, DEFAULT_STREAM_URL);
        assert_eq!(settings.volume, 25);
    }

    #[test]
    fn out_of_range_volume_is_clamped_on_load() {
        let dir = tempdir().unwrap();
        let store = store_in(&dir);
        std::fs::write(dir.path().join("settings.json"), r#"{"volume": 250}"#).unwrap();

        assert_eq!(store.load().volume, MAX_VOLUME);
    }

    #[test]
    fn save_reports_errors_instead_of_panicking() {
        let dir = tempdir().unwrap();
        // A directory where the file should be makes the write fail.
        let store = SettingsStore::new(dir.path().to_path_buf());

        assert!(store.save(&Settings::default()).is_err());
    }

    #[test]
    fn save_creates_parent_directories() {
        let dir = tempdir().unwrap();
        let store = SettingsStore::new(dir.path().join("nested").join("settings.json"));

        store.save(&Settings::default()).unwrap();
        assert_eq!(store.load(), Settings::default());
    }
}
