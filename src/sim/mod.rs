//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Elapsed time is passed in, never read from a clock
//! - Randomness comes from a caller-supplied RNG
//! - Removals are marked during a pass and compacted afterwards
//! - No rendering or platform dependencies

pub mod character;
pub mod collision;
pub mod player;
pub mod state;
pub mod tick;

pub use character::{Character, CharacterClass, ClassStats};
pub use collision::{bullet_hits_enemy, bullet_out_of_bounds, enemy_touches_player};
pub use player::{Player, UpgradeKind};
pub use state::{Bullet, Enemy, GameEvent, GamePhase, GameState};
pub use tick::{PlayerCommand, TickInput, spawn_enemies, tick};
