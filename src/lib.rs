//! Nova Strike - A vertically scrolling space shooter
//!
//! Core modules:
//! - `sim`: Per-tick simulation (motion, spawning, collisions, progression)
//! - `achievements`: Achievement catalog and unlock bookkeeping
//! - `settings`: Session configuration

pub mod achievements;
pub mod settings;
pub mod sim;

pub use achievements::{Achievement, AchievementBook, AchievementId};
pub use settings::{QualityPreset, Settings, SettingsError};

use glam::Vec2;

/// Game configuration constants
///
/// Speeds and frame counters are per tick; the external scheduler drives one
/// tick per display frame.
pub mod consts {
    /// Playfield dimensions
    pub const PLAYFIELD_WIDTH: f32 = 800.0;
    pub const PLAYFIELD_HEIGHT: f32 = 900.0;

    /// Player defaults
    pub const PLAYER_SIZE: f32 = 40.0;
    pub const PLAYER_SPEED: f32 = 5.0;
    pub const PLAYER_MAX_HEALTH: u32 = 3;
    /// Distance of the player's spawn point from the bottom edge
    pub const PLAYER_SPAWN_OFFSET: f32 = 100.0;
    /// Fraction of the remaining distance covered per tick when dragging
    pub const POINTER_FOLLOW: f32 = 0.2;

    /// Bullet defaults
    pub const BULLET_WIDTH: f32 = 4.0;
    pub const BULLET_HEIGHT: f32 = 15.0;
    pub const BULLET_SPEED: f32 = 8.0;
    pub const BULLET_DAMAGE: i32 = 1;
    /// Horizontal drift of the side bullets in a triple-shot volley
    pub const SPREAD_DRIFT: f32 = 2.5;
    /// Render angle of the side bullets (radians)
    pub const SPREAD_ANGLE: f32 = 0.25;
    /// Bullets live until this far past the top/bottom edge
    pub const BULLET_MARGIN: f32 = 50.0;
    /// Minimum time between volleys
    pub const FIRE_COOLDOWN_MS: f64 = 200.0;

    /// Power-up defaults
    pub const POWERUP_SIZE: f32 = 30.0;
    pub const POWERUP_SPEED: f32 = 2.0;
    pub const POWERUP_DROP_CHANCE: f32 = 0.12;
    pub const TRIPLE_SHOT_TICKS: u32 = 600;

    /// Ticks of immunity after taking a hull hit
    pub const INVINCIBILITY_TICKS: u32 = 120;

    /// Spawn pacing
    pub const BASE_SPAWN_INTERVAL_MS: f64 = 2000.0;
    pub const SPAWN_INTERVAL_STEP_MS: f64 = 150.0;
    pub const MIN_SPAWN_INTERVAL_MS: f64 = 400.0;
    /// Extra downward speed per level
    pub const LEVEL_SPEED_BONUS: f32 = 0.25;

    /// Score lost when an enemy slips past the bottom edge
    pub const ESCAPE_PENALTY: u64 = 50;
    /// Score needed per level (level N ends at N * this)
    pub const LEVEL_SCORE_STEP: u64 = 5000;

    /// Particle life lost per tick
    pub const PARTICLE_DECAY: f32 = 0.02;
    pub const KILL_BURST: usize = 18;
    pub const SHIELD_BURST: usize = 25;
    pub const HULL_BURST: usize = 30;

    /// Distance units scrolled per tick
    pub const SCROLL_SPEED: f32 = 1.0;
}

/// Top-left corner of a `size` box centered on `center`
#[inline]
pub fn centered_at(center: Vec2, size: Vec2) -> Vec2 {
    center - size * 0.5
}

/// Clamp a top-left position so a `size` box stays inside the playfield
#[inline]
pub fn clamp_to_playfield(pos: Vec2, size: Vec2) -> Vec2 {
    let max = Vec2::new(consts::PLAYFIELD_WIDTH, consts::PLAYFIELD_HEIGHT) - size;
    pos.clamp(Vec2::ZERO, max.max(Vec2::ZERO))
}
