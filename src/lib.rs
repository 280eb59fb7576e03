//! Monster Blaster - A wave-based arena shooter
//!
//! Core modules:
//! - `sim`: Deterministic simulation (entities, collisions, waves, leveling)
//! - `session`: Command queue, seeded RNG and fixed-step driver around `sim`
//! - `config`: Data-driven playfield and balance options

pub mod config;
pub mod session;
pub mod sim;

pub use config::{ConfigError, GameConfig, Playfield};
pub use session::{Session, Snapshot};

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (60 Hz)
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;

    /// Playfield dimensions
    pub const FIELD_WIDTH: f32 = 800.0;
    pub const FIELD_HEIGHT: f32 = 600.0;
    /// Sprite extent; characters are clamped so the sprite stays on screen
    pub const SPRITE_SIZE: f32 = 32.0;

    /// Seconds between enemy waves
    pub const SPAWN_INTERVAL: f32 = 3.0;
    /// Enemies spawned per wave index
    pub const ENEMIES_PER_WAVE: u32 = 2;
    /// Fresh enemy stats (wave does not affect them)
    pub const ENEMY_BASE_HEALTH: f32 = 20.0;
    pub const ENEMY_BASE_SPEED: f32 = 1.0;
    /// Enemy speed is in "hundreds of pixels per second"
    pub const ENEMY_SPEED_SCALE: f32 = 100.0;
    /// Contact radius between an enemy and the player
    pub const ENEMY_CONTACT_RADIUS: f32 = 20.0;
    /// Damage dealt to the player on contact
    pub const ENEMY_CONTACT_DAMAGE: f32 = 10.0;

    /// Hit radius between a bullet and an enemy
    pub const BULLET_HIT_RADIUS: f32 = 15.0;
    /// Speed of a regular shot (pixels/s)
    pub const BULLET_SPEED: f32 = 300.0;

    /// Score per enemy killed
    pub const KILL_SCORE: u32 = 10;
    /// Upgrade points per enemy killed
    pub const KILL_POINTS: u32 = 1;
    /// Score needed per wave before leveling up (threshold = wave * this)
    pub const SCORE_PER_WAVE: u32 = 100;
    /// Boost applied to every live enemy on level-up
    pub const LEVEL_UP_HEALTH_BOOST: f32 = 5.0;
    pub const LEVEL_UP_SPEED_BOOST: f32 = 0.1;

    /// Upgrade increments
    pub const UPGRADE_DAMAGE: f32 = 5.0;
    pub const UPGRADE_FIRE_RATE: f32 = 0.2;
    pub const UPGRADE_MAX_HEALTH: f32 = 10.0;
    /// Hard ceiling for fire rate growth (shots/s)
    pub const MAX_FIRE_RATE: f32 = 20.0;

    /// Seconds between special ability uses
    pub const SPECIAL_COOLDOWN: f32 = 5.0;
}

/// Normalize `v`, or return `fallback` when it has no usable direction
#[inline]
pub fn normalize_or(v: Vec2, fallback: Vec2) -> Vec2 {
    v.normalize_or(fallback)
}

/// Unit vector pointing from `from` to `to` (`fallback` if they coincide)
#[inline]
pub fn direction_toward(from: Vec2, to: Vec2, fallback: Vec2) -> Vec2 {
    normalize_or(to - from, fallback)
}

/// Euclidean distance between two points
#[inline]
pub fn distance(a: Vec2, b: Vec2) -> f32 {
    a.distance(b)
}
