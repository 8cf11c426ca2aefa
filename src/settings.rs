//! Runtime settings
//!
//! Loaded from a JSON file; any field left out takes its default.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::{MAX_SUBSTEPS, TIME_STEP};

/// Display and runner settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Display ===
    /// Target drawing width in pixels
    pub window_width: f32,
    /// Target drawing height in pixels
    pub window_height: f32,
    /// Draw name labels over players
    pub player_names: bool,

    // === Simulation ===
    /// Cap on fixed steps taken per rendered frame
    pub max_substeps: u32,
    /// Wall-clock duration of one frame in the headless runner (seconds)
    pub frame_dt: f32,

    // === Headless runner ===
    /// Frames to run before exiting
    pub frames: u32,
    /// Seed for bomb placement and player launch velocities
    pub seed: u64,
    /// Players spawned at start
    pub players: usize,
    /// Frames between bomb drops
    pub bomb_interval: u32,
    /// Frames before a dropped bomb goes off
    pub bomb_fuse: u32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            window_width: 1280.0,
            window_height: 720.0,
            player_names: true,

            max_substeps: MAX_SUBSTEPS,
            // Slightly longer than one step so the accumulator has work to do
            frame_dt: TIME_STEP * 1.25,

            frames: 600,
            seed: 0x5eed,
            players: 4,
            bomb_interval: 45,
            bomb_fuse: 90,
        }
    }
}

impl Settings {
    /// Load settings from a JSON file, falling back to defaults
    pub fn load(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        match std::fs::read_to_string(path) {
            Ok(json) => match serde_json::from_str(&json) {
                Ok(settings) => {
                    log::info!("Loaded settings from {}", path.display());
                    settings
                }
                Err(e) => {
                    log::warn!("Ignoring malformed settings {}: {}", path.display(), e);
                    Self::default()
                }
            },
            Err(e) => {
                log::info!("Using default settings ({}: {})", path.display(), e);
                Self::default()
            }
        }
    }

    /// Save settings as pretty JSON
    pub fn save(&self, path: impl AsRef<Path>) -> std::io::Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_json_keeps_defaults() {
        let settings: Settings = serde_json::from_str(r#"{ "frames": 10, "players": 2 }"#).unwrap();
        assert_eq!(settings.frames, 10);
        assert_eq!(settings.players, 2);
        assert_eq!(settings.max_substeps, MAX_SUBSTEPS);
        assert!(settings.player_names);
    }

    #[test]
    fn test_missing_file_uses_defaults() {
        let settings = Settings::load("/nonexistent/settings.json");
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn test_save_and_load() {
        let path = std::env::temp_dir().join(format!("blast-arena-settings-{}.json", std::process::id()));
        let settings = Settings {
            window_width: 640.0,
            seed: 7,
            ..Settings::default()
        };
        settings.save(&path).unwrap();
        assert_eq!(Settings::load(&path), settings);
        let _ = std::fs::remove_file(&path);
    }
}
