//! Monster Blaster headless entry point
//!
//! Runs a session with a simple autopilot standing in for the presentation
//! layer, then prints the final snapshot as JSON.
//!
//! Usage: `monster-blaster [config.json] [seconds]`

use glam::Vec2;

use monster_blaster::consts::SIM_DT;
use monster_blaster::sim::{GameEvent, UpgradeKind};
use monster_blaster::{GameConfig, Session};

/// Default run length in simulated seconds
const DEFAULT_RUN_SECS: f32 = 60.0;
/// Autopilot backs away from enemies closer than this
const RETREAT_RADIUS: f32 = 120.0;

fn main() {
    env_logger::init();
    log::info!("Monster Blaster (headless) starting...");

    let mut args = std::env::args().skip(1);
    let config = match args.next() {
        Some(path) => match GameConfig::load(&path) {
            Ok(config) => config,
            Err(e) => {
                log::error!("Failed to load {path}: {e}");
                std::process::exit(1);
            }
        },
        None => GameConfig::default(),
    };
    let run_secs = args
        .next()
        .and_then(|s| s.parse::<f32>().ok())
        .filter(|s| s.is_finite() && *s > 0.0)
        .unwrap_or(DEFAULT_RUN_SECS);

    let mut session = Session::new(&config);
    let frames = (run_secs / SIM_DT).ceil() as u64;
    let upgrades = [UpgradeKind::Damage, UpgradeKind::FireRate, UpgradeKind::MaxHealth];
    let mut next_upgrade = 0;

    for _ in 0..frames {
        autopilot(&mut session);
        if session.state().player.points > 0 {
            session.apply_upgrade(upgrades[next_upgrade % upgrades.len()].as_str());
            next_upgrade += 1;
        }

        for event in session.advance(SIM_DT) {
            match event {
                GameEvent::LevelUp { wave, level } => {
                    log::info!("Reached wave {wave} (level {level})")
                }
                GameEvent::PlayerDamaged { health, .. } => log::debug!("Player hit, health {health}"),
                GameEvent::GameOver { .. } => log::warn!("Player defeated"),
                _ => {}
            }
        }

        if session.is_over() {
            break;
        }
    }

    match serde_json::to_string_pretty(&session.snapshot()) {
        Ok(json) => println!("{json}"),
        Err(e) => {
            log::error!("Failed to serialize snapshot: {e}");
            std::process::exit(1);
        }
    }
}

/// Aim at the nearest enemy and back away when it gets close
fn autopilot(session: &mut Session) {
    let state = session.state();
    let pos = state.player.pos();
    let Some(nearest) = state
        .enemies
        .iter()
        .map(|e| e.pos)
        .min_by(|a, b| a.distance(pos).total_cmp(&b.distance(pos)))
    else {
        return;
    };

    let can_shoot = state.player.can_shoot();
    let special_ready = state.player.special_cooldown <= 0.0;

    let away = pos - nearest;
    if away.length() < RETREAT_RADIUS {
        let step = away.normalize_or(Vec2::Y);
        session.move_player(step.x, step.y);
    }
    if can_shoot {
        session.shoot_at(nearest.x, nearest.y);
    }
    if special_ready {
        session.use_special();
    }
}
