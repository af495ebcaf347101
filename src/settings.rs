//! Game settings and preferences
//!
//! Persisted as a small JSON file next to the game. Missing keys fall back to
//! their defaults so older files keep loading.

use std::fs;
use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::input::QuickTapConfig;

/// Default settings file name
pub const SETTINGS_FILE: &str = "bricks_settings.json";

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Audio ===
    /// Sound effects on game events
    pub sfx_on: bool,
    /// Background music
    pub music_on: bool,

    // === Simulation ===
    /// Tick driver interval
    pub tick_interval_ms: u64,

    // === Input ===
    /// Longest press still counted as a quick tap
    pub tap_max_duration_ms: u64,
    /// Largest movement still counted as a quick tap (density-independent px)
    pub tap_max_distance_dp: f32,
    /// Physical pixels per dp
    pub display_density: f32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            sfx_on: true,
            music_on: true,

            tick_interval_ms: TICK_INTERVAL_MS,

            tap_max_duration_ms: MAX_TAP_DURATION_MS,
            tap_max_distance_dp: MAX_TAP_DISTANCE_DP,
            display_density: 1.0,
        }
    }
}

impl Settings {
    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms.max(1))
    }

    /// Quick tap thresholds converted to physical pixels
    pub fn quick_tap(&self) -> QuickTapConfig {
        QuickTapConfig::new(
            self.tap_max_duration_ms,
            self.tap_max_distance_dp,
            self.display_density,
        )
    }

    /// Load settings, falling back to defaults if the file is missing or bad
    pub fn load_from(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        let json = match fs::read_to_string(path) {
            Ok(json) => json,
            Err(e) => {
                log::info!("Using default settings ({}: {e})", path.display());
                return Self::default();
            }
        };
        match serde_json::from_str(&json) {
            Ok(settings) => {
                log::info!("Loaded settings from {}", path.display());
                settings
            }
            Err(e) => {
                log::warn!("Ignoring malformed settings {}: {e}", path.display());
                Self::default()
            }
        }
    }

    /// Save settings as pretty JSON
    pub fn save_to(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let json = serde_json::to_string_pretty(self).context("serializing settings")?;
        fs::write(path, json).with_context(|| format!("writing settings {}", path.display()))?;
        log::info!("Settings saved");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert!(settings.sfx_on && settings.music_on);
        assert_eq!(settings.tick_interval(), Duration::from_millis(20));
        let tap = settings.quick_tap();
        assert_eq!(tap.max_duration, Duration::from_millis(180));
        assert_eq!(tap.max_distance_px, 20.0);
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(SETTINGS_FILE);
        let settings = Settings {
            sfx_on: false,
            display_density: 3.0,
            ..Default::default()
        };
        settings.save_to(&path).unwrap();
        assert_eq!(Settings::load_from(&path), settings);
    }

    #[test]
    fn test_missing_keys_use_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(SETTINGS_FILE);
        fs::write(&path, r#"{ "music_on": false }"#).unwrap();
        let settings = Settings::load_from(&path);
        assert!(!settings.music_on);
        assert!(settings.sfx_on);
        assert_eq!(settings.tick_interval_ms, TICK_INTERVAL_MS);
    }

    #[test]
    fn test_bad_file_falls_back() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(SETTINGS_FILE);
        fs::write(&path, "not json").unwrap();
        assert_eq!(Settings::load_from(&path), Settings::default());
        assert_eq!(Settings::load_from(dir.path().join("nope.json")), Settings::default());
    }

    #[test]
    fn test_save_to_missing_dir_errors() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("no/such/dir").join(SETTINGS_FILE);
        assert!(Settings::default().save_to(path).is_err());
    }
}
