//! Score, level and achievement tracking

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use super::events::{GameEvent, SoundCue};
use super::state::{GameStats, Player};
use crate::achievements::AchievementId;
use crate::consts::*;

pub const FIRST_BLOOD_KILLS: u32 = 1;
pub const ACE_PILOT_KILLS: u32 = 50;
pub const SHARPSHOOTER_SCORE: u64 = 10_000;
pub const POWER_HUNGRY_PICKUPS: u32 = 5;
pub const SURVIVOR_LEVEL: u32 = 5;

/// Running totals for the current game plus the achievements fired this session
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Progression {
    pub score: u64,
    pub level: u32,
    pub enemies_killed: u32,
    pub power_ups_collected: u32,
    pub distance_traveled: f32,
    /// Achievements already announced; never cleared by `reset`
    fired: BTreeSet<AchievementId>,
}

impl Default for Progression {
    fn default() -> Self {
        Self::new()
    }
}

impl Progression {
    pub fn new() -> Self {
        Self {
            score: 0,
            level: 1,
            enemies_killed: 0,
            power_ups_collected: 0,
            distance_traveled: 0.0,
            fired: BTreeSet::new(),
        }
    }

    /// Zero the per-game counters
    pub fn reset(&mut self) {
        self.score = 0;
        self.level = 1;
        self.enemies_killed = 0;
        self.power_ups_collected = 0;
        self.distance_traveled = 0.0;
    }

    pub fn stats(&self, player: &Player) -> GameStats {
        GameStats {
            score: self.score,
            level: self.level,
            health: player.health,
            max_health: player.max_health,
            enemies_killed: self.enemies_killed,
            power_ups_collected: self.power_ups_collected,
            distance_traveled: self.distance_traveled,
        }
    }

    /// Score needed to leave the current level
    pub fn next_level_score(&self) -> u64 {
        self.level as u64 * LEVEL_SCORE_STEP
    }

    /// Emit an unlock event unless this achievement already fired
    fn unlock(&mut self, id: AchievementId, events: &mut Vec<GameEvent>) {
        if self.fired.insert(id) {
            log::info!("Achievement condition met: {id}");
            events.push(GameEvent::AchievementUnlocked(id));
        }
    }

    /// Credit a destroyed enemy
    pub fn record_kill(&mut self, score_value: u64, events: &mut Vec<GameEvent>) {
        self.score = self.score.saturating_add(score_value);
        self.enemies_killed += 1;

        if self.enemies_killed == FIRST_BLOOD_KILLS {
            self.unlock(AchievementId::FirstBlood, events);
        }
        if self.enemies_killed == ACE_PILOT_KILLS {
            self.unlock(AchievementId::AcePilot, events);
        }
        if self.score >= SHARPSHOOTER_SCORE {
            self.unlock(AchievementId::Sharpshooter, events);
        }
    }

    /// Credit a collected power-up
    pub fn record_pickup(&mut self, events: &mut Vec<GameEvent>) {
        self.power_ups_collected += 1;
        if self.power_ups_collected == POWER_HUNGRY_PICKUPS {
            self.unlock(AchievementId::PowerHungry, events);
        }
    }

    /// Deduct points, never going below zero
    pub fn penalize(&mut self, amount: u64) {
        self.score = self.score.saturating_sub(amount);
    }

    /// Advance one level if the score threshold is reached.
    ///
    /// Returns true when a level was gained; the caller clears the enemies.
    pub fn check_level_up(&mut self, events: &mut Vec<GameEvent>) -> bool {
        if self.score < self.next_level_score() {
            return false;
        }
        self.level += 1;
        log::info!("Level up! Now level {} (score {})", self.level, self.score);
        events.push(GameEvent::Sound(SoundCue::LevelUp));
        events.push(GameEvent::LevelUp(self.level));
        if self.level == SURVIVOR_LEVEL {
            self.unlock(AchievementId::Survivor, events);
        }
        true
    }
}
