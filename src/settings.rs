//! Game settings and preferences
//!
//! Loaded once per session from a JSON file. Missing fields take defaults.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::sim::FireMode;

/// Quality preset levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum QualityPreset {
    Low,
    #[default]
    Medium,
    High,
}

impl QualityPreset {
    pub fn as_str(&self) -> &'static str {
        match self {
            QualityPreset::Low => "Low",
            QualityPreset::Medium => "Medium",
            QualityPreset::High => "High",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "low" => Some(QualityPreset::Low),
            "medium" | "med" => Some(QualityPreset::Medium),
            "high" => Some(QualityPreset::High),
            _ => None,
        }
    }

    /// Maximum particles for this preset
    pub fn max_particles(&self) -> usize {
        match self {
            QualityPreset::Low => 100,
            QualityPreset::Medium => 500,
            QualityPreset::High => 2000,
        }
    }
}

/// Errors from reading a settings file
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("failed to read settings from {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid settings JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("unknown quality preset '{0}' (expected low, medium or high)")]
    UnknownQuality(String),
}

/// Session settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Manual (hold fire) or automatic firing
    pub fire_mode: FireMode,
    /// Graphics quality preset
    pub quality: QualityPreset,
    /// Particle effects (explosions)
    pub particles: bool,
    /// Fixed RNG seed; random when absent
    pub seed: Option<u64>,
    /// Tick budget for the headless demo
    pub demo_ticks: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            fire_mode: FireMode::Manual,
            quality: QualityPreset::Medium,
            particles: true,
            seed: None,
            // Ten minutes at 60 Hz
            demo_ticks: 36_000,
        }
    }
}

impl Settings {
    /// Effective particle count cap
    pub fn max_particles(&self) -> usize {
        if !self.particles {
            0
        } else {
            self.quality.max_particles()
        }
    }

    /// Seed to use for this session
    pub fn resolve_seed(&self) -> u64 {
        self.seed.unwrap_or_else(rand::random)
    }

    /// Override the quality preset by name, e.g. from `--quality high`
    pub fn set_quality(&mut self, name: &str) -> Result<(), SettingsError> {
        self.quality = QualityPreset::from_str(name)
            .ok_or_else(|| SettingsError::UnknownQuality(name.to_string()))?;
        Ok(())
    }

    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load settings from a JSON file
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| SettingsError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let settings = Self::from_json(&json)?;
        log::info!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    /// Load settings, falling back to defaults on any error
    pub fn load_or_default(path: Option<&Path>) -> Self {
        let Some(path) = path else {
            log::info!("Using default settings");
            return Self::default();
        };
        match Self::load_from(path) {
            Ok(settings) => settings,
            Err(err) => {
                log::warn!("{err}; using default settings");
                Self::default()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_json_fills_defaults() {
        let settings = Settings::from_json(r#"{ "fire_mode": "Automatic", "seed": 7 }"#).unwrap();
        assert_eq!(settings.fire_mode, FireMode::Automatic);
        assert_eq!(settings.seed, Some(7));
        assert_eq!(settings.quality, QualityPreset::Medium);
        assert!(settings.particles);
    }

    #[test]
    fn test_bad_json_is_parse_error() {
        let err = Settings::from_json("{ not json").unwrap_err();
        assert!(matches!(err, SettingsError::Parse(_)));
    }

    #[test]
    fn test_missing_file_falls_back() {
        let path = Path::new("/definitely/not/here/settings.json");
        assert!(matches!(
            Settings::load_from(path),
            Err(SettingsError::Io { .. })
        ));
        let settings = Settings::load_or_default(Some(path));
        assert_eq!(settings.fire_mode, FireMode::Manual);
    }

    #[test]
    fn test_max_particles() {
        let mut settings = Settings::default();
        assert_eq!(settings.max_particles(), 500);
        settings.quality = QualityPreset::Low;
        assert_eq!(settings.max_particles(), 100);
        settings.particles = false;
        assert_eq!(settings.max_particles(), 0);
    }

    #[test]
    fn test_preset_from_str() {
        assert_eq!(QualityPreset::from_str("HIGH"), Some(QualityPreset::High));
        assert_eq!(QualityPreset::from_str("med"), Some(QualityPreset::Medium));
        assert_eq!(QualityPreset::from_str("ultra"), None);
        assert_eq!(QualityPreset::from_str(QualityPreset::Low.as_str()), Some(QualityPreset::Low));
    }

    #[test]
    fn test_set_quality_override() {
        let mut settings = Settings::default();
        settings.set_quality("High").unwrap();
        assert_eq!(settings.quality, QualityPreset::High);
        assert_eq!(settings.max_particles(), 2000);

        let err = settings.set_quality("ultra").unwrap_err();
        assert!(matches!(err, SettingsError::UnknownQuality(ref name) if name == "ultra"));
        // A rejected name leaves the previous preset in place
        assert_eq!(settings.quality, QualityPreset::High);
    }
}
