//! Simulation module
//!
//! All gameplay logic lives here:
//! - One tick per display frame, driven by an external scheduler
//! - Seeded RNG only
//! - No rendering, audio or platform dependencies

pub mod collision;
pub mod events;
pub mod progression;
pub mod spawn;
pub mod state;
pub mod tick;

pub use collision::{aabb_overlap, resolve_collisions};
pub use events::{GameEvent, SoundCue};
pub use progression::Progression;
pub use spawn::{roll_enemy_kind, spawn_interval_ms};
pub use state::{
    Body, Bullet, Enemy, EnemyKind, EnemyProfile, FireMode, GamePhase, GameState, GameStats,
    Particle, Player, PowerUp, PowerUpKind, Snapshot,
};
pub use tick::{TickInput, TickReport, autopilot, fire, tick};
