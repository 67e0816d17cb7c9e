//! Enemy spawning, power-up drops and explosion bursts

use glam::Vec2;
use rand::Rng;

use super::state::{Enemy, EnemyKind, GameState, Particle, PowerUp, PowerUpKind};
use crate::consts::*;

/// Milliseconds between enemy spawns at `level`
pub fn spawn_interval_ms(level: u32) -> f64 {
    (BASE_SPAWN_INTERVAL_MS - level as f64 * SPAWN_INTERVAL_STEP_MS).max(MIN_SPAWN_INTERVAL_MS)
}

/// Map a uniform roll in [0, 1) to an enemy kind
pub fn roll_enemy_kind(roll: f32) -> EnemyKind {
    if roll > 0.85 {
        EnemyKind::Heavy
    } else if roll > 0.65 {
        EnemyKind::Fast
    } else {
        EnemyKind::Basic
    }
}

/// Spawn one enemy if the spawn interval has elapsed since the last one
pub fn spawn_enemies(state: &mut GameState, now_ms: f64) -> bool {
    let interval = spawn_interval_ms(state.progression.level);
    let due = match state.last_spawn_ms {
        Some(last) => now_ms - last >= interval,
        None => true,
    };
    if !due {
        return false;
    }

    let kind = roll_enemy_kind(state.rng.random());
    let profile = kind.profile();
    let x = state.rng.random::<f32>() * (PLAYFIELD_WIDTH - profile.size.x);
    let drift = (state.rng.random::<f32>() - 0.5) * 2.0 * profile.drift;
    let fall = profile.speed + state.progression.level as f32 * LEVEL_SPEED_BONUS;

    let id = state.next_entity_id();
    let enemy = Enemy::new(id, kind, Vec2::new(x, -profile.size.y), Vec2::new(drift, fall));
    log::debug!("Spawned {:?} enemy {} at x={:.0}", kind, id, x);
    state.enemies.push(enemy);
    state.last_spawn_ms = Some(now_ms);
    true
}

/// Decide whether a destroyed enemy drops a power-up, and which.
///
/// `drop_roll` and `kind_roll` are uniform in [0, 1).
pub fn roll_power_up(drop_roll: f32, kind_roll: f32) -> Option<PowerUpKind> {
    if drop_roll >= POWERUP_DROP_CHANCE {
        return None;
    }
    Some(if kind_roll < 0.5 {
        PowerUpKind::TripleShot
    } else {
        PowerUpKind::Shield
    })
}

/// Maybe create a power-up centered at `center`
pub fn drop_power_up(state: &mut GameState, center: Vec2) -> Option<PowerUp> {
    let drop_roll = state.rng.random();
    let kind_roll = state.rng.random();
    let kind = roll_power_up(drop_roll, kind_roll)?;
    let id = state.next_entity_id();
    log::debug!("Dropped {:?} power-up {}", kind, id);
    Some(PowerUp::new(id, kind, center))
}

/// Build a burst of `count` explosion particles at `center`
pub fn explosion(state: &mut GameState, center: Vec2, color: u32, count: usize) -> Vec<Particle> {
    (0..count)
        .map(|_| {
            let vel = Vec2::new(
                (state.rng.random::<f32>() - 0.5) * 12.0,
                (state.rng.random::<f32>() - 0.5) * 12.0,
            );
            let size = state.rng.random::<f32>() * 5.0 + 2.0;
            Particle {
                id: state.next_entity_id(),
                pos: center,
                vel,
                color,
                life: 1.0,
                max_life: 1.0,
                size,
            }
        })
        .collect()
}
