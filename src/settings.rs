//! Player settings and preferences
//!
//! Stored as a small JSON file next to the binary (or wherever the caller
//! points). Missing or broken files fall back to defaults.

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::tuning::{Tuning, TuningPreset};

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("cannot access settings file: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid settings JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Which revision of the gameplay constants to use
    pub preset: TuningPreset,
    /// Seed for targets and roll directions
    pub seed: u64,

    // === Audio ===
    /// Master volume (0.0 - 1.0)
    pub master_volume: f32,
    /// Sound effects volume (0.0 - 1.0)
    pub sfx_volume: f32,
    pub muted: bool,
    /// Play a cue when the ball leaves the hand
    pub throw_sound: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            preset: TuningPreset::Refined,
            seed: 0x5EED,

            master_volume: 0.8,
            sfx_volume: 1.0,
            muted: false,
            throw_sound: false,
        }
    }
}

impl Settings {
    /// Gameplay constants for the chosen preset
    pub fn tuning(&self) -> Tuning {
        self.preset.tuning()
    }

    pub fn load(path: &Path) -> Result<Self, SettingsError> {
        let json = std::fs::read_to_string(path)?;
        let settings = serde_json::from_str(&json)?;
        log::info!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    /// Load, or use defaults if the file is missing or invalid
    pub fn load_or_default(path: &Path) -> Self {
        match Self::load(path) {
            Ok(settings) => settings,
            Err(e) => {
                log::warn!("{} - using default settings", e);
                Self::default()
            }
        }
    }

    pub fn save(&self, path: &Path) -> Result<(), SettingsError> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        log::info!("Settings saved to {}", path.display());
        Ok(())
    }
}
