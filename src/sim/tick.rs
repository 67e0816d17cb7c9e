//! Per-frame simulation tick
//!
//! Core game loop: input, firing, spawning, motion, collisions, progression.

use glam::Vec2;

use super::collision::resolve_collisions;
use super::events::{GameEvent, SoundCue};
use super::spawn::spawn_enemies;
use super::state::{Bullet, FireMode, GamePhase, GameState, GameStats};
use crate::consts::*;

/// Input snapshot for a single tick
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    pub left: bool,
    pub right: bool,
    pub up: bool,
    pub down: bool,
    /// Drag target for the player's top-left corner (touch/mouse), in playfield units
    pub pointer_target: Option<Vec2>,
    /// Fire held (manual mode only)
    pub fire: bool,
    /// Pause toggle
    pub pause: bool,
    /// Leave the title screen
    pub start: bool,
    /// Play again after game over
    pub restart: bool,
    /// Idle/demo mode - autopilot flies the ship
    pub idle_mode: bool,
}

impl TickInput {
    /// Directional intent as a unit-step vector
    pub fn direction(&self) -> Vec2 {
        let mut dir = Vec2::ZERO;
        if self.left {
            dir.x -= 1.0;
        }
        if self.right {
            dir.x += 1.0;
        }
        if self.up {
            dir.y -= 1.0;
        }
        if self.down {
            dir.y += 1.0;
        }
        dir
    }
}

/// What a tick produced
#[derive(Debug, Clone)]
pub struct TickReport {
    /// HUD stats after the tick
    pub stats: GameStats,
    /// Events in the order they happened
    pub events: Vec<GameEvent>,
    /// False when the phase kept the simulation frozen
    pub advanced: bool,
}

/// Advance the game by one frame at elapsed time `now_ms`
pub fn tick(state: &mut GameState, input: &TickInput, now_ms: f64) -> TickReport {
    // Commands are phase transitions, applied before any simulation
    if input.start {
        state.start();
    }
    if input.restart {
        state.restart();
    }
    if input.pause {
        state.toggle_pause();
    }

    if state.phase != GamePhase::Playing {
        return TickReport {
            stats: state.stats(),
            events: Vec::new(),
            advanced: false,
        };
    }

    let input = if input.idle_mode {
        autopilot(state, input)
    } else {
        input.clone()
    };
    let mut events = Vec::new();

    state.time_ticks += 1;

    // Player movement; a pointer drag takes precedence over keys
    match input.pointer_target {
        Some(target) => state.player.follow(target),
        None => state.player.steer(input.direction()),
    }

    let wants_fire = match state.fire_mode {
        FireMode::Automatic => true,
        FireMode::Manual => input.fire,
    };
    if wants_fire {
        fire(state, now_ms, &mut events);
    }

    state.player.decay_effects();

    spawn_enemies(state, now_ms);

    advance_entities(state);

    for particle in state.particles.iter_mut() {
        particle.age();
    }
    state.particles.retain(|p| p.is_alive());

    resolve_collisions(state, &mut events);

    if state.phase == GamePhase::Playing {
        if state.progression.check_level_up(&mut events) {
            state.enemies.clear();
        }
        state.progression.distance_traveled += SCROLL_SPEED;
    }

    TickReport {
        stats: state.stats(),
        events,
        advanced: true,
    }
}

/// Fire a volley if the cooldown has elapsed
pub fn fire(state: &mut GameState, now_ms: f64, events: &mut Vec<GameEvent>) -> bool {
    if let Some(last) = state.last_shot_ms {
        if now_ms - last < FIRE_COOLDOWN_MS {
            return false;
        }
    }

    let body = state.player.body;
    let muzzle = Vec2::new(body.center().x, body.pos.y);

    let id = state.next_entity_id();
    state.bullets.push(Bullet::player_shot(id, muzzle, 0.0, None));
    if state.player.has_triple_shot() {
        for side in [-1.0, 1.0] {
            let id = state.next_entity_id();
            state.bullets.push(Bullet::player_shot(
                id,
                muzzle,
                side * SPREAD_DRIFT,
                Some(side * SPREAD_ANGLE),
            ));
        }
    }

    events.push(GameEvent::Sound(SoundCue::Laser));
    state.last_shot_ms = Some(now_ms);
    true
}

/// Move enemies, bullets and power-ups; sweep anything that left the field
fn advance_entities(state: &mut GameState) {
    let mut escaped = 0u64;
    state.enemies.retain_mut(|enemy| {
        enemy.body.advance();
        // Reflect off the side walls
        if enemy.body.pos.x <= 0.0 {
            enemy.body.vel.x = enemy.body.vel.x.abs();
        } else if enemy.body.right() >= PLAYFIELD_WIDTH {
            enemy.body.vel.x = -enemy.body.vel.x.abs();
        }
        if enemy.body.pos.y > PLAYFIELD_HEIGHT {
            escaped += 1;
            false
        } else {
            true
        }
    });
    if escaped > 0 {
        log::debug!("{} enemies escaped", escaped);
        state.progression.penalize(escaped * ESCAPE_PENALTY);
    }

    state.bullets.retain_mut(|bullet| {
        bullet.body.advance();
        !bullet.out_of_bounds()
    });

    state.power_ups.retain_mut(|power_up| {
        power_up.body.advance();
        !power_up.out_of_bounds()
    });
}

/// Synthesize input for idle/demo mode.
///
/// Dodges enemies bearing down on the ship, otherwise chases the nearest
/// power-up, otherwise lines up under the lowest enemy. Always holds fire.
pub fn autopilot(state: &GameState, input: &TickInput) -> TickInput {
    let mut input = TickInput {
        left: false,
        right: false,
        up: false,
        down: false,
        pointer_target: None,
        fire: true,
        ..input.clone()
    };

    let ship = &state.player.body;
    let ship_x = ship.center().x;

    // Enemies in our lane and close above
    let threat = state
        .enemies
        .iter()
        .filter(|e| e.body.bottom() > ship.pos.y - 180.0 && e.body.pos.y < ship.bottom())
        .filter(|e| e.body.pos.x < ship.right() + 10.0 && e.body.right() > ship.pos.x - 10.0)
        .max_by(|a, b| a.body.pos.y.total_cmp(&b.body.pos.y));

    let target_x = if let Some(enemy) = threat {
        // Sidestep away from it, or back across if the wall is in the way
        let away = if enemy.body.center().x > ship_x { -1.0 } else { 1.0 };
        let dodge = ship_x + away * PLAYER_SIZE * 2.0;
        if dodge < PLAYER_SIZE || dodge > PLAYFIELD_WIDTH - PLAYER_SIZE {
            ship_x - away * PLAYER_SIZE * 2.0
        } else {
            dodge
        }
    } else if let Some(power_up) = state.power_ups.iter().min_by(|a, b| {
        a.body
            .center()
            .distance_squared(ship.center())
            .total_cmp(&b.body.center().distance_squared(ship.center()))
    }) {
        power_up.body.center().x
    } else if let Some(enemy) = state
        .enemies
        .iter()
        .max_by(|a, b| a.body.pos.y.total_cmp(&b.body.pos.y))
    {
        enemy.body.center().x
    } else {
        PLAYFIELD_WIDTH / 2.0
    };

    let dx = target_x - ship_x;
    if dx < -PLAYER_SPEED {
        input.left = true;
    } else if dx > PLAYER_SPEED {
        input.right = true;
    }
    input
}
