//! Game settings and preferences
//!
//! Persisted as a JSON file next to the high scores. Missing keys fall back
//! to defaults, so a hand-edited file can override just what it cares about.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::SimResult;
use crate::sim::Viewport;
use crate::tuning::Tuning;

/// Game settings/preferences
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Display ===
    /// Window size when not fullscreen
    pub windowed_size: (u32, u32),
    /// Size to assume for fullscreen when the platform can't report one
    pub fullscreen_size: (u32, u32),
    /// Launch straight into fullscreen
    pub start_fullscreen: bool,

    // === HUD ===
    /// Show tick rate counter
    pub show_fps: bool,

    // === Audio ===
    /// Master volume (0.0 - 1.0)
    pub master_volume: f32,
    /// Sound effects volume (0.0 - 1.0)
    pub sfx_volume: f32,
    /// Music volume (0.0 - 1.0)
    pub music_volume: f32,

    // === Balance ===
    pub tuning: Tuning,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            windowed_size: (DEFAULT_VIEWPORT_WIDTH, DEFAULT_VIEWPORT_HEIGHT),
            fullscreen_size: (DEFAULT_FULLSCREEN_WIDTH, DEFAULT_FULLSCREEN_HEIGHT),
            start_fullscreen: false,

            show_fps: true,

            master_volume: 0.8,
            sfx_volume: 1.0,
            music_volume: 0.4,

            tuning: Tuning::default(),
        }
    }
}

impl Settings {
    /// Viewport to open with
    pub fn initial_viewport(&self) -> SimResult<Viewport> {
        let (width, height) = if self.start_fullscreen {
            self.fullscreen_size
        } else {
            self.windowed_size
        };
        Viewport::new(width, height, self.start_fullscreen)
    }

    /// Size the display switches to when toggling away from `current`
    pub fn toggled_size(&self, current: &Viewport) -> (u32, u32) {
        if current.fullscreen {
            self.windowed_size
        } else {
            self.fullscreen_size
        }
    }

    /// Parse settings from JSON, validating tuning
    pub fn from_json(json: &str) -> SimResult<Self> {
        let settings: Settings = serde_json::from_str(json)?;
        settings.tuning.validate()?;
        Ok(settings)
    }

    /// Load settings from `path`.
    ///
    /// A missing file is not an error: defaults are used. A file that exists
    /// but can't be parsed is reported so the user's edits aren't silently
    /// discarded.
    pub fn load(path: &Path) -> SimResult<Self> {
        if !path.exists() {
            log::info!("No settings at {}, using defaults", path.display());
            return Ok(Self::default());
        }
        let json = fs::read_to_string(path)?;
        let settings = Self::from_json(&json)?;
        log::info!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    /// Load settings, falling back to defaults on any error
    pub fn load_or_default(path: &Path) -> Self {
        match Self::load(path) {
            Ok(settings) => settings,
            Err(e) => {
                log::warn!("Ignoring settings at {}: {}", path.display(), e);
                Self::default()
            }
        }
    }

    /// Save settings to `path` as pretty JSON
    pub fn save(&self, path: &Path) -> SimResult<()> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        log::info!("Settings saved to {}", path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SimError;

    fn temp_path(name: &str) -> std::path::PathBuf {
        std::env::temp_dir().join(format!("flappy_chicken_{}_{}.json", name, std::process::id()))
    }

    #[test]
    fn test_initial_viewport() {
        let mut settings = Settings::default();
        let vp = settings.initial_viewport().unwrap();
        assert_eq!((vp.width, vp.height, vp.fullscreen), (800, 450, false));
        assert_eq!(settings.toggled_size(&vp), (1920, 1080));

        settings.start_fullscreen = true;
        let vp = settings.initial_viewport().unwrap();
        assert!(vp.fullscreen);
        assert_eq!(settings.toggled_size(&vp), (800, 450));
    }

    #[test]
    fn test_zero_window_is_rejected() {
        let settings = Settings {
            windowed_size: (0, 450),
            ..Default::default()
        };
        assert!(matches!(
            settings.initial_viewport(),
            Err(SimError::InvalidViewport { .. })
        ));
    }

    #[test]
    fn test_partial_json() {
        let settings =
            Settings::from_json(r#"{ "show_fps": false, "tuning": { "gravity_accel": 0.25 } }"#)
                .unwrap();
        assert!(!settings.show_fps);
        assert_eq!(settings.tuning.gravity_accel, 0.25);
        assert_eq!(settings.tuning.lift_accel, LIFT_ACCEL);
        assert_eq!(settings.windowed_size, (800, 450));
    }

    #[test]
    fn test_unsafe_tuning_is_rejected() {
        let result = Settings::from_json(r#"{ "tuning": { "ground_ratio": 3.0 } }"#);
        assert!(matches!(result, Err(SimError::UnsafeConstant { .. })));
    }

    #[test]
    fn test_save_then_load() {
        let path = temp_path("settings");
        let settings = Settings {
            music_volume: 0.1,
            start_fullscreen: true,
            ..Default::default()
        };
        settings.save(&path).unwrap();
        let loaded = Settings::load(&path).unwrap();
        let _ = std::fs::remove_file(&path);
        assert_eq!(loaded.music_volume, 0.1);
        assert!(loaded.start_fullscreen);
    }

    #[test]
    fn test_missing_and_corrupt_files() {
        let path = temp_path("missing");
        let _ = std::fs::remove_file(&path);
        assert!(Settings::load(&path).unwrap().show_fps);

        let path = temp_path("corrupt");
        std::fs::write(&path, "{ not json").unwrap();
        assert!(matches!(Settings::load(&path), Err(SimError::Parse(_))));
        assert!(Settings::load_or_default(&path).show_fps);
        let _ = std::fs::remove_file(&path);
    }
}
