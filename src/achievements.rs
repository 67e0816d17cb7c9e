//! Achievement catalog
//!
//! The simulation only decides *when* an achievement fires. Display metadata
//! and the unlocked flags shown to the player live here, on the presentation
//! side.

use serde::{Deserialize, Serialize};

/// Stable achievement identifiers
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AchievementId {
    FirstBlood,
    Survivor,
    PowerHungry,
    Sharpshooter,
    AcePilot,
}

impl AchievementId {
    pub const ALL: [AchievementId; 5] = [
        AchievementId::FirstBlood,
        AchievementId::Survivor,
        AchievementId::PowerHungry,
        AchievementId::Sharpshooter,
        AchievementId::AcePilot,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            AchievementId::FirstBlood => "first_blood",
            AchievementId::Survivor => "survivor",
            AchievementId::PowerHungry => "power_hungry",
            AchievementId::Sharpshooter => "sharpshooter",
            AchievementId::AcePilot => "ace_pilot",
        }
    }

    /// Display metadata for this id
    pub fn info(&self) -> Achievement {
        let (title, description, icon) = match self {
            AchievementId::FirstBlood => ("First Blood", "Shoot down your first enemy", "Target"),
            AchievementId::Survivor => ("Survivor", "Reach level 5", "Shield"),
            AchievementId::PowerHungry => ("Power Hungry", "Collect 5 power-ups", "Zap"),
            AchievementId::Sharpshooter => ("Sharpshooter", "Reach 10,000 points", "Crosshair"),
            AchievementId::AcePilot => ("Ace Pilot", "Shoot down 50 enemies", "Trophy"),
        };
        Achievement {
            id: *self,
            title,
            description,
            icon,
            unlocked: false,
        }
    }
}

impl std::fmt::Display for AchievementId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An achievement as shown to the player
#[derive(Debug, Clone, Serialize)]
pub struct Achievement {
    pub id: AchievementId,
    pub title: &'static str,
    pub description: &'static str,
    /// Icon name for the presentation layer
    pub icon: &'static str,
    pub unlocked: bool,
}

/// Presentation-side record of which achievements the player holds
#[derive(Debug, Clone, Serialize)]
pub struct AchievementBook {
    pub entries: Vec<Achievement>,
}

impl Default for AchievementBook {
    fn default() -> Self {
        Self::new()
    }
}

impl AchievementBook {
    /// Full catalog, all locked
    pub fn new() -> Self {
        Self {
            entries: AchievementId::ALL.iter().map(|id| id.info()).collect(),
        }
    }

    /// Mark an achievement unlocked.
    ///
    /// Returns the entry only the first time, so callers can show a popup
    /// without tracking state themselves.
    pub fn unlock(&mut self, id: AchievementId) -> Option<&Achievement> {
        let entry = self.entries.iter_mut().find(|a| a.id == id)?;
        if entry.unlocked {
            return None;
        }
        entry.unlocked = true;
        log::info!("Achievement unlocked: {}", entry.title);
        Some(entry)
    }

    pub fn is_unlocked(&self, id: AchievementId) -> bool {
        self.entries.iter().any(|a| a.id == id && a.unlocked)
    }

    pub fn unlocked_count(&self) -> usize {
        self.entries.iter().filter(|a| a.unlocked).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_matches_serde_name() {
        for id in AchievementId::ALL {
            let json = serde_json::to_string(&id).unwrap();
            assert_eq!(json, format!("\"{id}\""));
        }
    }

    #[test]
    fn test_serde_uses_snake_case() {
        let json = serde_json::to_string(&AchievementId::AcePilot).unwrap();
        assert_eq!(json, "\"ace_pilot\"");
    }

    #[test]
    fn test_unlock_reports_once() {
        let mut book = AchievementBook::new();
        assert_eq!(book.unlocked_count(), 0);

        let first = book.unlock(AchievementId::FirstBlood).map(|a| a.title);
        assert_eq!(first, Some("First Blood"));
        assert!(book.is_unlocked(AchievementId::FirstBlood));

        assert!(book.unlock(AchievementId::FirstBlood).is_none());
        assert_eq!(book.unlocked_count(), 1);
    }
}
