//! Player controller: fire cooldown, upgrade points and the special ability

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::character::Character;
use super::state::Bullet;
use crate::consts::*;
use crate::direction_toward;

/// Stats that upgrade points can be spent on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum UpgradeKind {
    Damage,
    FireRate,
    MaxHealth,
}

impl UpgradeKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            UpgradeKind::Damage => "damage",
            UpgradeKind::FireRate => "fireRate",
            UpgradeKind::MaxHealth => "health",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "damage" => Some(UpgradeKind::Damage),
            "fireRate" | "fire_rate" => Some(UpgradeKind::FireRate),
            "health" => Some(UpgradeKind::MaxHealth),
            _ => None,
        }
    }
}

/// The player: one character plus shooting and progression state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub character: Character,
    /// Seconds until the next shot; may go negative
    pub fire_cooldown: f32,
    /// Seconds until the special ability is ready; may go negative
    pub special_cooldown: f32,
    /// Starts at 1
    pub level: u32,
    /// Spendable upgrade currency
    pub points: u32,
}

impl Player {
    pub fn new(character: Character) -> Self {
        Self {
            character,
            fire_cooldown: 0.0,
            special_cooldown: 0.0,
            level: 1,
            points: 0,
        }
    }

    pub fn pos(&self) -> Vec2 {
        self.character.pos
    }

    pub fn can_shoot(&self) -> bool {
        self.fire_cooldown <= 0.0
    }

    /// Fire toward `target` if the cooldown allows it. Returns whether a shot was fired.
    pub fn shoot(&mut self, target: Vec2, bullets: &mut Vec<Bullet>) -> bool {
        if !self.can_shoot() {
            return false;
        }
        let character = &mut self.character;
        let dir = direction_toward(character.pos, target, character.facing);
        character.facing = dir;
        bullets.push(Bullet::new(
            character.pos,
            dir,
            character.damage,
            BULLET_SPEED,
            false,
        ));
        self.fire_cooldown = 1.0 / character.fire_rate;
        true
    }

    /// Spend one point on `attribute`. Unknown names and an empty purse are ignored.
    pub fn upgrade(&mut self, attribute: &str) -> bool {
        let Some(kind) = UpgradeKind::from_str(attribute) else {
            log::trace!("Ignoring unknown upgrade {attribute:?}");
            return false;
        };
        self.apply_upgrade(kind)
    }

    pub fn apply_upgrade(&mut self, kind: UpgradeKind) -> bool {
        if self.points == 0 {
            return false;
        }
        self.points -= 1;
        let character = &mut self.character;
        match kind {
            UpgradeKind::Damage => character.damage += UPGRADE_DAMAGE,
            UpgradeKind::FireRate => {
                character.boost_fire_rate(character.fire_rate + UPGRADE_FIRE_RATE)
            }
            UpgradeKind::MaxHealth => character.max_health += UPGRADE_MAX_HEALTH,
        }
        true
    }

    /// Trigger the character's special ability if it is off cooldown
    pub fn use_special(&mut self, bullets: &mut Vec<Bullet>, cooldown: f32) -> bool {
        if self.special_cooldown > 0.0 {
            return false;
        }
        self.character.special_ability(bullets);
        self.special_cooldown = cooldown;
        true
    }

    /// Advance cooldowns; they are deliberately left unclamped
    pub fn decay_cooldowns(&mut self, dt: f32) {
        self.fire_cooldown -= dt;
        self.special_cooldown -= dt;
    }
}
