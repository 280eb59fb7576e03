//! Game configuration
//!
//! Loaded from a JSON file; every field falls back to the defaults in
//! [`crate::consts`] when omitted.

use std::path::Path;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::sim::CharacterClass;

/// Configuration errors
#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Parse error
    #[error("Parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// A value is outside its accepted range
    #[error("Invalid value for `{field}`: {reason}")]
    Invalid { field: &'static str, reason: String },
}

/// Rectangular play area, origin at the bottom-left corner
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Playfield {
    /// Horizontal extent
    pub width: f32,
    /// Vertical extent
    pub height: f32,
}

impl Default for Playfield {
    fn default() -> Self {
        Self {
            width: FIELD_WIDTH,
            height: FIELD_HEIGHT,
        }
    }
}

impl Playfield {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Whether `pos` lies inside the field (edges included)
    pub fn contains(&self, pos: Vec2) -> bool {
        (0.0..=self.width).contains(&pos.x) && (0.0..=self.height).contains(&pos.y)
    }

    /// Clamp `pos` into the field
    pub fn clamp(&self, pos: Vec2) -> Vec2 {
        Vec2::new(pos.x.clamp(0.0, self.width), pos.y.clamp(0.0, self.height))
    }

    /// Clamp `pos` so a sprite anchored at it stays fully on screen
    pub fn clamp_sprite(&self, pos: Vec2) -> Vec2 {
        let max_x = (self.width - SPRITE_SIZE).max(0.0);
        let max_y = (self.height - SPRITE_SIZE).max(0.0);
        Vec2::new(pos.x.clamp(0.0, max_x), pos.y.clamp(0.0, max_y))
    }

    /// Centre of the field
    pub fn center(&self) -> Vec2 {
        Vec2::new(self.width / 2.0, self.height / 2.0)
    }
}

/// Session configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Play area bounds
    pub playfield: Playfield,
    /// RNG seed for spawn positions
    pub seed: u64,
    /// Character the player starts with
    pub character: CharacterClass,
    /// Seconds between enemy waves
    pub spawn_interval: f32,
    /// Seconds between special ability uses
    pub special_cooldown: f32,
    /// Retire a regular bullet at its first hit instead of after the full scan
    pub stop_bullets_at_first_hit: bool,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            playfield: Playfield::default(),
            seed: 0,
            character: CharacterClass::Sniper,
            spawn_interval: SPAWN_INTERVAL,
            special_cooldown: SPECIAL_COOLDOWN,
            stop_bullets_at_first_hit: false,
        }
    }
}

impl GameConfig {
    /// Parse and validate a JSON config
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a JSON config file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let config = Self::from_json(&json)?;
        log::info!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Check ranges that the simulation relies on
    pub fn validate(&self) -> Result<(), ConfigError> {
        let field = self.playfield;
        if !(field.width.is_finite() && field.width > SPRITE_SIZE) {
            return Err(ConfigError::Invalid {
                field: "playfield.width",
                reason: format!("must be greater than {SPRITE_SIZE}, got {}", field.width),
            });
        }
        if !(field.height.is_finite() && field.height > SPRITE_SIZE) {
            return Err(ConfigError::Invalid {
                field: "playfield.height",
                reason: format!("must be greater than {SPRITE_SIZE}, got {}", field.height),
            });
        }
        if !(self.spawn_interval.is_finite() && self.spawn_interval > 0.0) {
            return Err(ConfigError::Invalid {
                field: "spawn_interval",
                reason: format!("must be positive, got {}", self.spawn_interval),
            });
        }
        if !(self.special_cooldown.is_finite() && self.special_cooldown >= 0.0) {
            return Err(ConfigError::Invalid {
                field: "special_cooldown",
                reason: format!("must not be negative, got {}", self.special_cooldown),
            });
        }
        Ok(())
    }
}
