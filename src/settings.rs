//! Game settings and options-screen selections
//!
//! Launch options come from positional command-line arguments
//! (`[scale] [volume]`) or a JSON document. Background and crosshair are
//! picked on the options screen and only matter to presentation.

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::{GameError, GameResult};
use crate::sim::Scene;

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Visual scale; multiplies scene size, sprite size and target speed
    pub scale: f32,
    /// Master volume (0.0 - 1.0)
    pub volume: f32,
    /// Selected background (0-based)
    pub background: usize,
    /// Selected crosshair (0-based)
    pub crosshair: usize,
    /// Fixed RNG seed for reproducible runs
    pub seed: Option<u64>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            scale: 1.0,
            volume: 0.001,
            background: 0,
            crosshair: 0,
            seed: None,
        }
    }
}

impl Settings {
    /// Parse `[scale] [volume]` (program name already stripped)
    pub fn from_args(args: &[String]) -> GameResult<Self> {
        let mut settings = Self::default();
        if let Some(raw) = args.first() {
            settings.scale = parse_number("scale", raw)?;
            log::info!("Scale: {}", settings.scale);
        }
        if let Some(raw) = args.get(1) {
            settings.volume = parse_number("volume", raw)?;
            log::info!("Volume: {}", settings.volume);
        }
        settings.validate()?;
        Ok(settings)
    }

    /// Decode settings from JSON; missing fields keep their defaults
    pub fn from_json(json: &str) -> GameResult<Self> {
        let settings: Self = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn to_json(&self) -> GameResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Check every field is in range
    pub fn validate(&self) -> GameResult<()> {
        if !self.scale.is_finite() || self.scale <= 0.0 {
            return Err(GameError::InvalidSetting {
                name: "scale",
                value: self.scale.to_string(),
                reason: "must be a positive number",
            });
        }
        if !(0.0..=1.0).contains(&self.volume) {
            return Err(GameError::InvalidSetting {
                name: "volume",
                value: self.volume.to_string(),
                reason: "must be between 0.0 and 1.0",
            });
        }
        if self.background >= BACKGROUND_COUNT {
            return Err(GameError::InvalidSetting {
                name: "background",
                value: self.background.to_string(),
                reason: "must be below 6",
            });
        }
        if self.crosshair >= CROSSHAIR_COUNT {
            return Err(GameError::InvalidSetting {
                name: "crosshair",
                value: self.crosshair.to_string(),
                reason: "must be below 7",
            });
        }
        Ok(())
    }

    /// Playfield for these settings
    pub fn scene(&self) -> GameResult<Scene> {
        let size = BASE_SCENE_SIZE * self.scale;
        Scene::scaled(size.x, size.y, self.scale)
    }

    pub fn next_background(&mut self) {
        self.background = (self.background + 1) % BACKGROUND_COUNT;
    }

    pub fn previous_background(&mut self) {
        self.background = (self.background + BACKGROUND_COUNT - 1) % BACKGROUND_COUNT;
    }

    pub fn next_crosshair(&mut self) {
        self.crosshair = (self.crosshair + 1) % CROSSHAIR_COUNT;
    }

    pub fn previous_crosshair(&mut self) {
        self.crosshair = (self.crosshair + CROSSHAIR_COUNT - 1) % CROSSHAIR_COUNT;
    }
}

fn parse_number(name: &'static str, raw: &str) -> GameResult<f32> {
    raw.trim().parse::<f32>().map_err(|_| GameError::InvalidSetting {
        name,
        value: raw.to_string(),
        reason: "not a number",
    })
}
