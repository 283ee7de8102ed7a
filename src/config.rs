//! User settings and where they live on disk.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use log::{info, warn};
use serde::{Deserialize, Serialize};

use crate::color::{hex_to_rgb, Hsl};
use crate::error::PickerError;
use crate::history::HISTORY_CAPACITY;
use crate::notice::COPIED_NOTICE_DELAY;
use crate::ring::RingGeometry;
use crate::session::DEFAULT_COLOR;

const APP_DIR: &str = "hexo-picker";
const SETTINGS_FILE: &str = "settings.json";
const STORAGE_FILE: &str = "storage.json";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Radius of the ring's center line, in logical pixels.
    pub ring_radius: f64,
    /// Width of the ring band.
    pub ring_width: f64,
    /// Side of the square ring canvas.
    pub canvas_size: u32,
    pub history_capacity: usize,
    pub copied_notice_ms: u64,
    pub initial_color: Hsl,
    pub presets: Vec<String>,
    /// Hide the main window while picking from the screen.
    pub hide_while_sampling: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            ring_radius: 110.0,
            ring_width: 26.0,
            canvas_size: 300,
            history_capacity: HISTORY_CAPACITY,
            copied_notice_ms: COPIED_NOTICE_DELAY.as_millis() as u64,
            initial_color: DEFAULT_COLOR,
            presets: [
                "#FF4D6D", "#FF9F1C", "#FFD60A", "#2EC4B6", "#1E90FF", "#7B2CBF", "#1F2937",
            ]
            .into_iter()
            .map(String::from)
            .collect(),
            hide_while_sampling: false,
        }
    }
}

impl Settings {
    pub fn ring(&self) -> RingGeometry {
        RingGeometry::centered(self.canvas_size, self.ring_radius, self.ring_width)
    }

    pub fn copied_notice_delay(&self) -> Duration {
        Duration::from_millis(self.copied_notice_ms)
    }

    pub fn validate(&self) -> Result<(), PickerError> {
        if self.ring_width.is_nan() || self.ring_width <= 0.0 {
            return Err(PickerError::Config("ring_width must be positive".into()));
        }
        if self.ring_radius.is_nan() || self.ring_radius < self.ring_width / 2.0 {
            return Err(PickerError::Config(
                "ring_radius must be at least half of ring_width".into(),
            ));
        }
        if self.ring_radius + self.ring_width / 2.0 > self.canvas_size as f64 / 2.0 {
            return Err(PickerError::Config("ring does not fit the canvas".into()));
        }
        if self.history_capacity == 0 {
            return Err(PickerError::Config("history_capacity must be at least 1".into()));
        }
        let Hsl { s, l, .. } = self.initial_color;
        if !(0.0..=1.0).contains(&s) || !(0.0..=1.0).contains(&l) || !self.initial_color.h.is_finite() {
            return Err(PickerError::Config("initial_color out of range".into()));
        }
        for preset in &self.presets {
            hex_to_rgb(preset).map_err(|e| PickerError::Config(format!("preset: {e}")))?;
        }
        Ok(())
    }
}

/// Per-user directory for the picker's files.
pub fn config_dir() -> PathBuf {
    if let Ok(dir) = std::env::var("XDG_CONFIG_HOME") {
        return PathBuf::from(dir).join(APP_DIR);
    }
    if let Ok(home) = std::env::var("HOME") {
        return PathBuf::from(home).join(".config").join(APP_DIR);
    }
    PathBuf::from(".")
}

pub fn settings_path() -> PathBuf {
    config_dir().join(SETTINGS_FILE)
}

/// File backing the history store.
pub fn storage_path() -> PathBuf {
    config_dir().join(STORAGE_FILE)
}

/// Reads and validates settings from `path`.
///
/// A missing file yields `Ok(None)`.
pub fn read_settings(path: &Path) -> Result<Option<Settings>, PickerError> {
    let data = match fs::read_to_string(path) {
        Ok(data) => data,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(None),
        Err(err) => {
            return Err(PickerError::Config(format!(
                "read {} failed: {err}",
                path.display()
            )))
        }
    };
    let settings: Settings = serde_json::from_str(&data)
        .map_err(|err| PickerError::Config(format!("parse {} failed: {err}", path.display())))?;
    settings.validate()?;
    Ok(Some(settings))
}

/// Loads settings from `path`, falling back to defaults when the file is
/// missing or broken.
pub fn load_settings_from(path: &Path) -> Settings {
    match read_settings(path) {
        Ok(Some(settings)) => {
            info!("settings: loaded {}", path.display());
            settings
        }
        Ok(None) => Settings::default(),
        Err(err) => {
            warn!("settings: {err}; using defaults");
            Settings::default()
        }
    }
}

pub fn load_settings() -> Settings {
    load_settings_from(&settings_path())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let settings = Settings::default();
        settings.validate().unwrap();
        assert_eq!(settings.history_capacity, 12);
        assert_eq!(settings.copied_notice_delay(), Duration::from_millis(1200));
        assert_eq!(settings.initial_color, Hsl::new(320.0, 0.76, 0.62));
    }

    #[test]
    fn default_ring_band() {
        let ring = Settings::default().ring();
        assert_eq!(ring.inner(), 97.0);
        assert_eq!(ring.outer(), 123.0);
        assert_eq!((ring.center.x, ring.center.y), (150.0, 150.0));
    }

    #[test]
    fn missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(SETTINGS_FILE);
        assert_eq!(read_settings(&path).unwrap(), None);
        assert_eq!(load_settings_from(&path), Settings::default());
    }

    #[test]
    fn partial_file_fills_in_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(SETTINGS_FILE);
        fs::write(&path, r##"{ "history_capacity": 5, "presets": ["#000000"] }"##).unwrap();
        let settings = load_settings_from(&path);
        assert_eq!(settings.history_capacity, 5);
        assert_eq!(settings.presets, vec!["#000000".to_string()]);
        assert_eq!(settings.ring_radius, 110.0);
    }

    #[test]
    fn invalid_json_falls_back() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(SETTINGS_FILE);
        fs::write(&path, "{ nope").unwrap();
        assert!(matches!(read_settings(&path), Err(PickerError::Config(_))));
        assert_eq!(load_settings_from(&path), Settings::default());
    }

    #[test]
    fn invalid_values_fall_back() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(SETTINGS_FILE);
        fs::write(&path, r#"{ "presets": ["red"] }"#).unwrap();
        assert!(matches!(read_settings(&path), Err(PickerError::Config(_))));
        assert_eq!(load_settings_from(&path), Settings::default());
    }

    #[test]
    fn validate_rejects_bad_geometry() {
        let mut settings = Settings::default();
        settings.ring_width = 0.0;
        assert!(settings.validate().is_err());

        let mut settings = Settings::default();
        settings.ring_radius = 200.0;
        assert!(settings.validate().is_err());

        let mut settings = Settings::default();
        settings.history_capacity = 0;
        assert!(settings.validate().is_err());
    }

    #[test]
    fn settings_json_round_trip() {
        let settings = Settings::default();
        let json = serde_json::to_string_pretty(&settings).unwrap();
        let back: Settings = serde_json::from_str(&json).unwrap();
        assert_eq!(back, settings);
    }
}
