//! Game state and core simulation types
//!
//! Everything a tick reads or writes lives here.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::character::{Character, CharacterClass};
use super::player::Player;
use crate::config::{GameConfig, Playfield};
use crate::consts::*;
use crate::direction_toward;

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GamePhase {
    /// Active gameplay
    #[default]
    Playing,
    /// Game is paused
    Paused,
    /// Character health reached zero
    GameOver,
}

/// Something notable that happened during the last tick
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    WaveSpawned { wave: u32, count: u32 },
    PlayerDamaged { damage: f32, health: f32 },
    EnemyKilled { pos: Vec2 },
    ShotFired,
    SpecialUsed { class: CharacterClass },
    Upgraded { attribute: String },
    LevelUp { wave: u32, level: u32 },
    GameOver { score: u32, wave: u32 },
}

/// A pursuing enemy
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Enemy {
    pub pos: Vec2,
    pub health: f32,
    /// Pursuit speed in hundreds of pixels per second
    pub speed: f32,
}

impl Enemy {
    /// Fresh enemy with base stats. `pos` must be inside `field`.
    pub fn new(pos: Vec2, field: &Playfield) -> Self {
        debug_assert!(field.contains(pos), "enemy spawned outside playfield at {pos}");
        Self {
            pos: field.clamp(pos),
            health: ENEMY_BASE_HEALTH,
            speed: ENEMY_BASE_SPEED,
        }
    }

    pub fn is_alive(&self) -> bool {
        self.health > 0.0
    }

    /// Pure pursuit toward the player's current position
    pub fn update(&mut self, target: Vec2, dt: f32) {
        let dir = direction_toward(self.pos, target, Vec2::ZERO);
        self.pos += dir * self.speed * dt * ENEMY_SPEED_SCALE;
    }
}

/// A projectile travelling in a straight line
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Bullet {
    pub pos: Vec2,
    /// Unit direction, fixed at creation
    pub dir: Vec2,
    pub damage: f32,
    /// Pixels per second, fixed at creation
    pub speed: f32,
    /// Area-effect bullets survive hits
    pub is_aoe: bool,
}

impl Bullet {
    /// `dir` is normalized here (zero falls back to +x). `speed` must not be negative.
    pub fn new(pos: Vec2, dir: Vec2, damage: f32, speed: f32, is_aoe: bool) -> Self {
        debug_assert!(speed >= 0.0, "bullet created with negative speed {speed}");
        Self {
            pos,
            dir: crate::normalize_or(dir, Vec2::X),
            damage,
            speed: speed.max(0.0),
            is_aoe,
        }
    }

    pub fn update(&mut self, dt: f32) {
        self.pos += self.dir * self.speed * dt;
    }
}

/// Complete game state (deterministic, serializable)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    /// Play area bounds
    pub field: Playfield,
    /// Current phase
    pub phase: GamePhase,
    /// The player and their character
    pub player: Player,
    /// Live enemies (order irrelevant)
    pub enemies: Vec<Enemy>,
    /// Live bullets (order irrelevant)
    pub bullets: Vec<Bullet>,
    /// Seconds until the next wave spawns
    pub spawn_timer: f32,
    /// Seconds between waves
    pub spawn_interval: f32,
    /// Seconds between special ability uses
    pub special_interval: f32,
    /// Difficulty tier, starts at 1
    pub wave: u32,
    /// Score
    pub score: u32,
    /// Simulation tick counter (ticks with elapsed time only)
    pub time_ticks: u64,
    /// Simulated seconds
    pub elapsed: f32,
    /// Retire regular bullets at their first hit
    pub stop_bullets_at_first_hit: bool,
    /// Events produced by the last tick
    #[serde(skip)]
    pub events: Vec<GameEvent>,
}

impl GameState {
    /// Create a new game with the character centred in the field
    pub fn new(class: CharacterClass, field: Playfield) -> Self {
        let character = Character::new(class, field.center());
        Self {
            field,
            phase: GamePhase::Playing,
            player: Player::new(character),
            enemies: Vec::new(),
            bullets: Vec::new(),
            spawn_timer: SPAWN_INTERVAL,
            spawn_interval: SPAWN_INTERVAL,
            special_interval: SPECIAL_COOLDOWN,
            wave: 1,
            score: 0,
            time_ticks: 0,
            elapsed: 0.0,
            stop_bullets_at_first_hit: false,
            events: Vec::new(),
        }
    }

    /// Create a new game from a session config
    pub fn from_config(config: &GameConfig) -> Self {
        let mut state = Self::new(config.character, config.playfield);
        state.spawn_timer = config.spawn_interval;
        state.spawn_interval = config.spawn_interval;
        state.special_interval = config.special_cooldown;
        state.stop_bullets_at_first_hit = config.stop_bullets_at_first_hit;
        state
    }

    /// Score needed to leave the current wave
    pub fn level_up_threshold(&self) -> u32 {
        self.wave.saturating_mul(SCORE_PER_WAVE)
    }

    /// Spawn a single enemy at `pos`
    pub fn spawn_enemy_at(&mut self, pos: Vec2) {
        self.enemies.push(Enemy::new(pos, &self.field));
    }

    pub fn is_over(&self) -> bool {
        self.phase == GamePhase::GameOver
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_state() {
        let state = GameState::new(CharacterClass::Mage, Playfield::default());
        assert_eq!(state.wave, 1);
        assert_eq!(state.score, 0);
        assert_eq!(state.spawn_timer, 3.0);
        assert_eq!(state.player.level, 1);
        assert_eq!(state.player.points, 0);
        assert_eq!(state.player.character.pos, Vec2::new(400.0, 300.0));
        assert!(state.enemies.is_empty());
        assert!(state.bullets.is_empty());
        assert_eq!(state.level_up_threshold(), 100);
    }

    #[test]
    fn test_enemy_pursues_player() {
        let field = Playfield::default();
        let mut enemy = Enemy::new(Vec2::new(100.0, 100.0), &field);
        enemy.update(Vec2::new(200.0, 100.0), 0.1);
        // speed 1 * 0.1 s * 100 = 10 px toward +x
        assert!((enemy.pos.x - 110.0).abs() < 1e-4);
        assert!((enemy.pos.y - 100.0).abs() < 1e-4);
    }

    #[test]
    fn test_enemy_on_target_stays_put() {
        let field = Playfield::default();
        let mut enemy = Enemy::new(Vec2::new(50.0, 50.0), &field);
        enemy.update(Vec2::new(50.0, 50.0), 1.0);
        assert_eq!(enemy.pos, Vec2::new(50.0, 50.0));
        assert!(enemy.pos.is_finite());
    }

    #[test]
    fn test_bullet_moves_along_direction() {
        let mut bullet = Bullet::new(Vec2::ZERO, Vec2::new(3.0, 4.0), 10.0, 100.0, false);
        assert!((bullet.dir.length() - 1.0).abs() < 1e-6);
        bullet.update(0.5);
        assert!((bullet.pos.x - 30.0).abs() < 1e-4);
        assert!((bullet.pos.y - 40.0).abs() < 1e-4);
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "enemy spawned outside playfield")]
    fn test_enemy_outside_field_panics_in_debug() {
        let field = Playfield::default();
        Enemy::new(Vec2::new(900.0, 0.0), &field);
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "bullet created with negative speed")]
    fn test_negative_bullet_speed_panics_in_debug() {
        Bullet::new(Vec2::ZERO, Vec2::X, 10.0, -1.0, false);
    }

    #[test]
    #[cfg(not(debug_assertions))]
    fn test_bad_construction_is_sanitized_in_release() {
        let field = Playfield::default();
        let enemy = Enemy::new(Vec2::new(900.0, -10.0), &field);
        assert_eq!(enemy.pos, Vec2::new(800.0, 0.0));

        let bullet = Bullet::new(Vec2::ZERO, Vec2::X, 10.0, -1.0, false);
        assert_eq!(bullet.speed, 0.0);
    }

    #[test]
    fn test_bullet_zero_direction_defaults_right() {
        let bullet = Bullet::new(Vec2::ZERO, Vec2::ZERO, 10.0, 100.0, false);
        assert_eq!(bullet.dir, Vec2::X);
    }
}
