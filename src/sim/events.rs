//! Notifications emitted by the simulation for presentation and audio

use serde::Serialize;

use super::state::GameStats;
use crate::achievements::AchievementId;

/// Audio triggers; synthesis happens outside the simulation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SoundCue {
    /// Player fired a volley
    Laser,
    /// Any explosion burst
    Explosion,
    /// Power-up collected or shield consumed
    PowerUp,
    LevelUp,
}

/// Discrete events produced during a tick, in the order they happened
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum GameEvent {
    AchievementUnlocked(AchievementId),
    LevelUp(u32),
    /// Carries the stats at the moment the player was destroyed
    GameOver(GameStats),
    Sound(SoundCue),
}
