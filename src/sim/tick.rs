//! Simulation tick
//!
//! Core game loop step. Phases run in a fixed order:
//! commands, cooldowns, spawning, enemies, bullets, level-up.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::collision::{bullet_hits_enemy, bullet_out_of_bounds, enemy_touches_player};
use super::state::{GameEvent, GamePhase, GameState};
use crate::consts::*;

/// A player action, applied at the next tick boundary
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum PlayerCommand {
    /// Displace the character by (dx, dy) * speed
    Move { dx: f32, dy: f32 },
    /// Fire a regular shot toward a point
    ShootAt { x: f32, y: f32 },
    /// Spend a point on a named stat ("damage", "fireRate", "health")
    Upgrade(String),
    /// Trigger the character's special ability
    Special,
    /// Pause/unpause
    TogglePause,
}

/// Input commands for a single tick (deterministic)
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    pub commands: Vec<PlayerCommand>,
}

impl TickInput {
    pub fn new(commands: Vec<PlayerCommand>) -> Self {
        Self { commands }
    }
}

/// Advance the game state by `dt` seconds
pub fn tick(state: &mut GameState, input: &TickInput, dt: f32, rng: &mut impl Rng) {
    state.events.clear();

    for command in &input.commands {
        apply_command(state, command);
    }

    // Don't tick if paused or game over
    if state.phase != GamePhase::Playing {
        return;
    }

    // No elapsed time means nothing moves
    if !(dt.is_finite() && dt > 0.0) {
        if dt != 0.0 {
            log::trace!("Skipping tick with invalid dt {dt}");
        }
        return;
    }

    state.time_ticks += 1;
    state.elapsed += dt;

    state.player.decay_cooldowns(dt);
    update_spawn_timer(state, dt, rng);
    update_enemies(state, dt);
    update_bullets(state, dt);
    check_level_up(state);

    if !state.player.character.is_alive() {
        state.phase = GamePhase::GameOver;
        log::info!("Game over: score {} at wave {}", state.score, state.wave);
        state.events.push(GameEvent::GameOver {
            score: state.score,
            wave: state.wave,
        });
    }
}

/// Apply one queued command
fn apply_command(state: &mut GameState, command: &PlayerCommand) {
    match state.phase {
        GamePhase::Playing => {}
        GamePhase::Paused => {
            if *command == PlayerCommand::TogglePause {
                state.phase = GamePhase::Playing;
            } else {
                log::trace!("Ignoring {command:?} while paused");
            }
            return;
        }
        GamePhase::GameOver => {
            log::trace!("Ignoring {command:?} after game over");
            return;
        }
    }

    match command {
        PlayerCommand::Move { dx, dy } => {
            let field = state.field;
            state.player.character.move_by(*dx, *dy, &field);
        }
        PlayerCommand::ShootAt { x, y } => {
            if state.player.shoot(Vec2::new(*x, *y), &mut state.bullets) {
                state.events.push(GameEvent::ShotFired);
            }
        }
        PlayerCommand::Upgrade(attribute) => {
            if state.player.upgrade(attribute) {
                state.events.push(GameEvent::Upgraded {
                    attribute: attribute.clone(),
                });
            }
        }
        PlayerCommand::Special => {
            let cooldown = state.special_interval;
            if state.player.use_special(&mut state.bullets, cooldown) {
                state.events.push(GameEvent::SpecialUsed {
                    class: state.player.character.class,
                });
            }
        }
        PlayerCommand::TogglePause => state.phase = GamePhase::Paused,
    }
}

fn update_spawn_timer(state: &mut GameState, dt: f32, rng: &mut impl Rng) {
    state.spawn_timer -= dt;
    if state.spawn_timer <= 0.0 {
        spawn_enemies(state, rng);
        state.spawn_timer = state.spawn_interval;
    }
}

/// Spawn `wave * 2` fresh enemies at uniformly random positions
pub fn spawn_enemies(state: &mut GameState, rng: &mut impl Rng) {
    let count = state.wave.saturating_mul(ENEMIES_PER_WAVE);
    let (width, height) = (state.field.width, state.field.height);
    for _ in 0..count {
        let x = rng.random_range(0.0..=width);
        let y = rng.random_range(0.0..=height);
        state.spawn_enemy_at(Vec2::new(x, y));
    }
    log::debug!("Wave {}: spawned {} enemies", state.wave, count);
    state.events.push(GameEvent::WaveSpawned {
        wave: state.wave,
        count,
    });
}

/// Move enemies; those reaching the player hurt it and are removed
fn update_enemies(state: &mut GameState, dt: f32) {
    let GameState {
        player,
        enemies,
        events,
        ..
    } = state;
    let target = player.pos();

    enemies.retain_mut(|enemy| {
        enemy.update(target, dt);
        if !enemy_touches_player(enemy.pos, target) {
            return true;
        }
        player.character.take_damage(ENEMY_CONTACT_DAMAGE);
        events.push(GameEvent::PlayerDamaged {
            damage: ENEMY_CONTACT_DAMAGE,
            health: player.character.health,
        });
        false
    });
}

/// Move bullets and resolve bullet/enemy hits
///
/// Each bullet scans every live enemy. A regular bullet is retired after the
/// scan, so it can damage several overlapping enemies in the same tick unless
/// `stop_bullets_at_first_hit` is set. Killed enemies are skipped by later
/// bullets and compacted once the pass ends.
fn update_bullets(state: &mut GameState, dt: f32) {
    let GameState {
        field,
        player,
        enemies,
        bullets,
        score,
        events,
        stop_bullets_at_first_hit,
        ..
    } = state;

    bullets.retain_mut(|bullet| {
        bullet.update(dt);

        let mut spent = false;
        for enemy in enemies.iter_mut().filter(|e| e.is_alive()) {
            if !bullet_hits_enemy(bullet.pos, enemy.pos) {
                continue;
            }
            enemy.health -= bullet.damage;
            if !enemy.is_alive() {
                *score += KILL_SCORE;
                player.points += KILL_POINTS;
                events.push(GameEvent::EnemyKilled { pos: enemy.pos });
            }
            if !bullet.is_aoe {
                spent = true;
                if *stop_bullets_at_first_hit {
                    break;
                }
            }
        }

        !(spent || bullet_out_of_bounds(bullet.pos, field))
    });

    enemies.retain(|e| e.is_alive());
}

/// One level per tick at most; only enemies alive right now get stronger
fn check_level_up(state: &mut GameState) {
    if state.score < state.level_up_threshold() {
        return;
    }

    state.wave += 1;
    state.player.level += 1;
    for enemy in &mut state.enemies {
        enemy.health += LEVEL_UP_HEALTH_BOOST;
        enemy.speed += LEVEL_UP_SPEED_BOOST;
    }

    log::info!(
        "Level up: wave {} (player level {}, {} enemies boosted)",
        state.wave,
        state.player.level,
        state.enemies.len()
    );
    state.events.push(GameEvent::LevelUp {
        wave: state.wave,
        level: state.player.level,
    });
}
