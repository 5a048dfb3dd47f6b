//! Game settings
//!
//! Persisted as a JSON file next to the high scores. Every field has a
//! default, so partial files are fine.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::tuning::Tuning;

/// Default high score file name
pub const DEFAULT_SCORES_FILE: &str = "highscores.json";

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("failed to read settings {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("invalid settings {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("failed to write settings {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to encode settings: {0}")]
    Encode(#[from] serde_json::Error),
}

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Where the high score table lives
    pub high_score_path: PathBuf,
    /// Fixed RNG seed; random per session when absent
    pub seed: Option<u64>,
    /// Gameplay balance
    pub tuning: Tuning,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            high_score_path: PathBuf::from(DEFAULT_SCORES_FILE),
            seed: None,
            tuning: Tuning::default(),
        }
    }
}

impl Settings {
    /// Strictly read settings from `path`
    pub fn read(path: &Path) -> Result<Self, SettingsError> {
        let json = fs::read_to_string(path).map_err(|source| SettingsError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let mut settings: Settings =
            serde_json::from_str(&json).map_err(|source| SettingsError::Parse {
                path: path.to_path_buf(),
                source,
            })?;
        settings.tuning.sanitize();
        Ok(settings)
    }

    /// Load settings, falling back to defaults when the file is missing or bad
    pub fn load(path: &Path) -> Self {
        match Self::read(path) {
            Ok(settings) => {
                log::info!("Loaded settings from {}", path.display());
                settings
            }
            Err(SettingsError::Read { source, .. }) if source.kind() == io::ErrorKind::NotFound => {
                log::info!("No settings at {}, using defaults", path.display());
                Self::default()
            }
            Err(e) => {
                log::warn!("{e}; using default settings");
                Self::default()
            }
        }
    }

    /// Save settings as pretty JSON
    pub fn save(&self, path: &Path) -> Result<(), SettingsError> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json).map_err(|source| SettingsError::Write {
            path: path.to_path_buf(),
            source,
        })?;
        log::info!("Settings saved");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = TempDir::new().unwrap();
        let settings = Settings::load(&dir.path().join("settings.json"));
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn test_malformed_file_gives_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("settings.json");
        fs::write(&path, "[1, 2").unwrap();
        assert!(matches!(Settings::read(&path), Err(SettingsError::Parse { .. })));
        assert_eq!(Settings::load(&path), Settings::default());
    }

    #[test]
    fn test_partial_file_and_sanitize() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("settings.json");
        fs::write(
            &path,
            r#"{ "seed": 7, "tuning": { "spawn_interval": -1.0, "player_speed": 250.0 } }"#,
        )
        .unwrap();

        let settings = Settings::load(&path);
        assert_eq!(settings.seed, Some(7));
        assert_eq!(settings.high_score_path, PathBuf::from(DEFAULT_SCORES_FILE));
        assert_eq!(settings.tuning.player_speed, 250.0);
        assert_eq!(settings.tuning.spawn_interval, Tuning::default().spawn_interval);
    }

    #[test]
    fn test_out_of_range_speed_falls_back_and_spawns() {
        use crate::sim::AsteroidField;
        use rand::SeedableRng;
        use rand_pcg::Pcg32;

        let dir = TempDir::new().unwrap();
        let path = dir.path().join("settings.json");
        // Overflows f32 to infinity
        fs::write(&path, r#"{ "tuning": { "spawn_max_speed": 1e39 } }"#).unwrap();

        let settings = Settings::load(&path);
        let tuning = &settings.tuning;
        assert_eq!(tuning.spawn_max_speed, Tuning::default().spawn_max_speed);

        let field = AsteroidField::new(tuning);
        let mut rng = Pcg32::seed_from_u64(9);
        for _ in 0..50 {
            let body = field.roll_asteroid(tuning, &mut rng);
            assert!(body.vel.is_finite());
            assert!(body.vel.length() <= tuning.spawn_max_speed + 1e-3);
        }
    }

    #[test]
    fn test_save_then_load() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("settings.json");
        let settings = Settings {
            seed: Some(1234),
            high_score_path: dir.path().join("scores.json"),
            ..Default::default()
        };
        settings.save(&path).unwrap();
        assert_eq!(Settings::load(&path), settings);
    }
}
