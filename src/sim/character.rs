//! Playable characters
//!
//! Every class shares the same stat block; they differ only in base stats
//! and in what the special ability does.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::state::Bullet;
use crate::config::Playfield;
use crate::consts::MAX_FIRE_RATE;

/// Base stats for a character class
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClassStats {
    pub health: f32,
    pub speed: f32,
    pub damage: f32,
    /// Shots per second
    pub fire_rate: f32,
}

/// Character classes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CharacterClass {
    /// Fragile, heavy single shots
    #[default]
    Sniper,
    /// Durable, heals itself
    Tank,
    /// Slow caster, area-effect bolts
    Mage,
    /// Fast mover, fire rate burst
    Rogue,
}

impl CharacterClass {
    pub const ALL: [CharacterClass; 4] = [
        CharacterClass::Sniper,
        CharacterClass::Tank,
        CharacterClass::Mage,
        CharacterClass::Rogue,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            CharacterClass::Sniper => "Sniper",
            CharacterClass::Tank => "Tank",
            CharacterClass::Mage => "Mage",
            CharacterClass::Rogue => "Rogue",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "sniper" => Some(CharacterClass::Sniper),
            "tank" => Some(CharacterClass::Tank),
            "mage" => Some(CharacterClass::Mage),
            "rogue" => Some(CharacterClass::Rogue),
            _ => None,
        }
    }

    /// Starting stats for this class
    pub fn stats(&self) -> ClassStats {
        match self {
            CharacterClass::Sniper => ClassStats {
                health: 50.0,
                speed: 2.0,
                damage: 20.0,
                fire_rate: 0.5,
            },
            CharacterClass::Tank => ClassStats {
                health: 100.0,
                speed: 1.0,
                damage: 15.0,
                fire_rate: 0.8,
            },
            CharacterClass::Mage => ClassStats {
                health: 70.0,
                speed: 1.5,
                damage: 10.0,
                fire_rate: 0.3,
            },
            CharacterClass::Rogue => ClassStats {
                health: 60.0,
                speed: 3.0,
                damage: 8.0,
                fire_rate: 1.2,
            },
        }
    }
}

/// Sniper special: double damage shot
const SNIPER_DAMAGE_MULT: f32 = 2.0;
const SNIPER_SHOT_SPEED: f32 = 300.0;
/// Tank special: flat heal
const TANK_HEAL: f32 = 20.0;
/// Mage special: area-effect bolt
const MAGE_DAMAGE_MULT: f32 = 1.5;
const MAGE_SHOT_SPEED: f32 = 150.0;
/// Rogue special: fire rate multiplier
const ROGUE_FIRE_RATE_MULT: f32 = 2.0;

/// The player's character
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Character {
    pub class: CharacterClass,
    /// Current health, always within [0, max_health]
    pub health: f32,
    pub max_health: f32,
    /// Movement multiplier applied to input deltas
    pub speed: f32,
    /// Damage per regular shot
    pub damage: f32,
    /// Shots per second
    pub fire_rate: f32,
    pub pos: Vec2,
    /// Last aimed direction (unit length); used when no aim is available
    pub facing: Vec2,
}

impl Character {
    pub fn new(class: CharacterClass, pos: Vec2) -> Self {
        let stats = class.stats();
        Self {
            class,
            health: stats.health,
            max_health: stats.health,
            speed: stats.speed,
            damage: stats.damage,
            fire_rate: stats.fire_rate,
            pos,
            facing: Vec2::X,
        }
    }

    pub fn name(&self) -> &'static str {
        self.class.as_str()
    }

    pub fn is_alive(&self) -> bool {
        self.health > 0.0
    }

    /// Move by an input delta scaled by speed, keeping the sprite on screen
    pub fn move_by(&mut self, dx: f32, dy: f32, field: &Playfield) {
        if !(dx.is_finite() && dy.is_finite()) {
            log::trace!("Ignoring non-finite move ({dx}, {dy})");
            return;
        }
        let target = self.pos + Vec2::new(dx, dy) * self.speed;
        self.pos = field.clamp_sprite(target);
    }

    /// Lose health, flooring at zero
    pub fn take_damage(&mut self, amount: f32) {
        let amount = amount.max(0.0);
        self.health = (self.health - amount).max(0.0);
    }

    /// Regain health, capped at max_health
    pub fn heal(&mut self, amount: f32) {
        let amount = amount.max(0.0);
        self.health = (self.health + amount).min(self.max_health);
    }

    /// Raise fire rate, never past [`MAX_FIRE_RATE`]
    pub fn boost_fire_rate(&mut self, new_rate: f32) {
        self.fire_rate = new_rate.min(MAX_FIRE_RATE);
    }

    /// Class-specific effect. Shots travel along `facing`.
    pub fn special_ability(&mut self, bullets: &mut Vec<Bullet>) {
        match self.class {
            CharacterClass::Sniper => bullets.push(Bullet::new(
                self.pos,
                self.facing,
                self.damage * SNIPER_DAMAGE_MULT,
                SNIPER_SHOT_SPEED,
                false,
            )),
            CharacterClass::Tank => self.heal(TANK_HEAL),
            CharacterClass::Mage => bullets.push(Bullet::new(
                self.pos,
                self.facing,
                self.damage * MAGE_DAMAGE_MULT,
                MAGE_SHOT_SPEED,
                true,
            )),
            CharacterClass::Rogue => self.boost_fire_rate(self.fire_rate * ROGUE_FIRE_RATE_MULT),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_class_table() {
        let tank = Character::new(CharacterClass::Tank, Vec2::ZERO);
        assert_eq!(tank.health, 100.0);
        assert_eq!(tank.max_health, 100.0);
        assert_eq!(tank.speed, 1.0);
        assert_eq!(tank.damage, 15.0);
        assert_eq!(tank.fire_rate, 0.8);
        assert_eq!(tank.name(), "Tank");

        for class in CharacterClass::ALL {
            assert_eq!(CharacterClass::from_str(class.as_str()), Some(class));
        }
        assert_eq!(CharacterClass::from_str("wizard"), None);
    }

    #[test]
    fn test_move_scales_by_speed_and_clamps() {
        let field = Playfield::default();
        let mut rogue = Character::new(CharacterClass::Rogue, Vec2::new(400.0, 300.0));
        rogue.move_by(2.0, -1.0, &field);
        assert_eq!(rogue.pos, Vec2::new(406.0, 297.0));

        rogue.move_by(1000.0, 1000.0, &field);
        assert_eq!(rogue.pos, Vec2::new(768.0, 568.0));

        rogue.move_by(-1000.0, -1000.0, &field);
        assert_eq!(rogue.pos, Vec2::ZERO);
    }

    #[test]
    fn test_take_damage_floors_at_zero() {
        let mut sniper = Character::new(CharacterClass::Sniper, Vec2::ZERO);
        sniper.take_damage(30.0);
        assert_eq!(sniper.health, 20.0);
        sniper.take_damage(500.0);
        assert_eq!(sniper.health, 0.0);
        assert!(!sniper.is_alive());
    }

    #[test]
    fn test_sniper_special_fires_heavy_shot() {
        let mut sniper = Character::new(CharacterClass::Sniper, Vec2::new(10.0, 20.0));
        let mut bullets = Vec::new();
        sniper.special_ability(&mut bullets);
        assert_eq!(bullets.len(), 1);
        assert_eq!(bullets[0].damage, 40.0);
        assert_eq!(bullets[0].speed, 300.0);
        assert_eq!(bullets[0].dir, Vec2::X);
        assert!(!bullets[0].is_aoe);
    }

    #[test]
    fn test_tank_special_heals_up_to_max() {
        let mut tank = Character::new(CharacterClass::Tank, Vec2::ZERO);
        let mut bullets = Vec::new();
        tank.take_damage(30.0);
        tank.special_ability(&mut bullets);
        assert_eq!(tank.health, 90.0);
        tank.special_ability(&mut bullets);
        assert_eq!(tank.health, 100.0);
        assert!(bullets.is_empty());
    }

    #[test]
    fn test_mage_special_fires_aoe_bolt() {
        let mut mage = Character::new(CharacterClass::Mage, Vec2::ZERO);
        mage.facing = Vec2::Y;
        let mut bullets = Vec::new();
        mage.special_ability(&mut bullets);
        assert_eq!(bullets.len(), 1);
        assert_eq!(bullets[0].damage, 15.0);
        assert_eq!(bullets[0].speed, 150.0);
        assert_eq!(bullets[0].dir, Vec2::Y);
        assert!(bullets[0].is_aoe);
    }

    #[test]
    fn test_rogue_fire_rate_doubles_up_to_cap() {
        let mut rogue = Character::new(CharacterClass::Rogue, Vec2::ZERO);
        let mut bullets = Vec::new();
        rogue.special_ability(&mut bullets);
        assert!((rogue.fire_rate - 2.4).abs() < 1e-6);
        for _ in 0..10 {
            rogue.special_ability(&mut bullets);
        }
        assert_eq!(rogue.fire_rate, MAX_FIRE_RATE);
    }

    proptest! {
        #[test]
        fn prop_take_damage_stays_in_range(health in 0.0f32..500.0, damage in 0.0f32..1000.0) {
            let mut tank = Character::new(CharacterClass::Tank, Vec2::ZERO);
            tank.max_health = 500.0;
            tank.health = health;
            tank.take_damage(damage);
            prop_assert!(tank.health >= 0.0);
            prop_assert!(tank.health <= health);
        }
    }
}
