//! Proximity and bounds checks
//!
//! All contacts are point-to-point distance tests with strict `<` radii.

use glam::Vec2;

use crate::config::Playfield;
use crate::consts::{BULLET_HIT_RADIUS, ENEMY_CONTACT_RADIUS};
use crate::distance;

/// Enemy is close enough to hurt the player
#[inline]
pub fn enemy_touches_player(enemy_pos: Vec2, player_pos: Vec2) -> bool {
    distance(enemy_pos, player_pos) < ENEMY_CONTACT_RADIUS
}

/// Bullet is close enough to damage the enemy
#[inline]
pub fn bullet_hits_enemy(bullet_pos: Vec2, enemy_pos: Vec2) -> bool {
    distance(bullet_pos, enemy_pos) < BULLET_HIT_RADIUS
}

/// Bullet has left the playfield on either axis
#[inline]
pub fn bullet_out_of_bounds(bullet_pos: Vec2, field: &Playfield) -> bool {
    bullet_pos.x < 0.0
        || bullet_pos.x > field.width
        || bullet_pos.y < 0.0
        || bullet_pos.y > field.height
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_enemy_contact_radius_is_strict() {
        let player = Vec2::new(400.0, 300.0);
        assert!(enemy_touches_player(Vec2::new(419.0, 300.0), player));
        assert!(!enemy_touches_player(Vec2::new(420.0, 300.0), player));
        assert!(!enemy_touches_player(Vec2::new(421.0, 300.0), player));
    }

    #[test]
    fn test_bullet_hit_radius_is_strict() {
        let enemy = Vec2::new(100.0, 100.0);
        assert!(bullet_hits_enemy(Vec2::new(100.0, 114.9), enemy));
        assert!(!bullet_hits_enemy(Vec2::new(100.0, 115.0), enemy));
    }

    #[test]
    fn test_bullet_bounds() {
        let field = Playfield::default();
        assert!(!bullet_out_of_bounds(Vec2::new(0.0, 0.0), &field));
        assert!(!bullet_out_of_bounds(Vec2::new(800.0, 600.0), &field));
        assert!(bullet_out_of_bounds(Vec2::new(801.0, 300.0), &field));
        assert!(bullet_out_of_bounds(Vec2::new(-0.1, 300.0), &field));
        assert!(bullet_out_of_bounds(Vec2::new(400.0, 601.0), &field));
        assert!(bullet_out_of_bounds(Vec2::new(400.0, -1.0), &field));
    }
}
