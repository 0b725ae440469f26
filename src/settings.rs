//! Presentation settings
//!
//! Gameplay is fixed at compile time (`consts`). These only change how the
//! game is shown and heard. Stored as JSON.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::consts::SCREEN_FPS;
use crate::error::SettingsError;

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Diagnostic overlay (FPS, ball speed, fudge, paddle segment)
    pub show_stats: bool,
    /// Play sound cues
    pub sound: bool,
    /// Cue volume (0.0 - 1.0); 0 mutes
    pub volume: f32,
    /// Frame cap in frames per second
    pub frame_rate: u32,
    /// Fixed RNG seed for reproducible matches
    pub seed: Option<u64>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            show_stats: false,
            sound: true,
            volume: 0.8,
            frame_rate: SCREEN_FPS,
            seed: None,
        }
    }
}

impl Settings {
    /// Environment variable naming the settings file
    pub const PATH_ENV: &'static str = "PONG_SETTINGS";
    /// File looked up in the working directory otherwise
    pub const DEFAULT_PATH: &'static str = "pong_settings.json";

    /// Parse settings from JSON, filling gaps with defaults
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        let mut settings: Settings = serde_json::from_str(json)?;
        settings.volume = settings.volume.clamp(0.0, 1.0);
        settings.frame_rate = settings.frame_rate.max(1);
        Ok(settings)
    }

    /// Load settings from a file
    pub fn load_from(path: &Path) -> Result<Self, SettingsError> {
        let json = fs::read_to_string(path).map_err(|source| SettingsError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&json).map_err(|source| SettingsError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Load from `$PONG_SETTINGS` or `pong_settings.json`. A missing file
    /// means defaults; a broken one is reported and ignored.
    pub fn load() -> Self {
        let path = std::env::var_os(Self::PATH_ENV)
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(Self::DEFAULT_PATH));

        if !path.exists() {
            log::info!("No settings at {}, using defaults", path.display());
            return Self::default();
        }

        match Self::load_from(&path) {
            Ok(settings) => {
                log::info!("Loaded settings from {}", path.display());
                settings
            }
            Err(e) => {
                log::warn!("{e}; using default settings");
                Self::default()
            }
        }
    }

    /// Effective cue volume (respects the sound toggle)
    pub fn effective_volume(&self) -> f32 {
        if self.sound { self.volume } else { 0.0 }
    }

    /// Milliseconds budgeted per frame
    pub fn frame_budget_ms(&self) -> u64 {
        1000 / self.frame_rate.max(1) as u64
    }
}
