//! TOML-based application configuration.
//!
//! Stores user preferences for the quiz host:
//! - Badge bar shape (tier count, first tier size)
//! - An optional custom subjects file
//!
//! Configuration is stored at `~/.config/shadowguess/config.toml`. Every
//! field is serde-defaulted, so a missing or partial file always loads.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use super::data_dir;
use crate::error::ConfigError;

/// Badge bar configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BadgesConfig {
    /// Number of reward tiers in the badge bar.
    #[serde(default = "default_badge_count")]
    pub count: usize,
    /// Streak size of the first tier.
    #[serde(default = "default_initial_step")]
    pub initial_step: f64,
}

/// Game configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GameConfig {
    /// Newline-separated subject list overriding the embedded catalog.
    #[serde(default)]
    pub subjects_file: Option<PathBuf>,
}

/// Application configuration.
///
/// Serialized to/from TOML at `~/.config/shadowguess/config.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub badges: BadgesConfig,
    #[serde(default)]
    pub game: GameConfig,
}

// Default functions
fn default_badge_count() -> usize {
    8
}
fn default_initial_step() -> f64 {
    1.0
}

impl Default for BadgesConfig {
    fn default() -> Self {
        Self {
            count: default_badge_count(),
            initial_step: default_initial_step(),
        }
    }
}

impl Config {
    /// Path of the config file inside the data directory.
    pub fn path() -> Result<PathBuf, ConfigError> {
        let dir = data_dir().map_err(|e| ConfigError::LoadFailed {
            path: PathBuf::from("~/.config/shadowguess"),
            message: e.to_string(),
        })?;
        Ok(dir.join("config.toml"))
    }

    /// Load the configuration, falling back to defaults when the file does
    /// not exist yet.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(&Self::path()?)
    }

    /// Load from an explicit path (used by tests).
    pub fn load_from(path: &PathBuf) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(path).map_err(|e| ConfigError::LoadFailed {
            path: path.clone(),
            message: e.to_string(),
        })?;

        toml::from_str(&contents).map_err(|e| ConfigError::ParseFailed(e.to_string()))
    }

    /// Write the configuration back out as TOML.
    pub fn save_to(&self, path: &PathBuf) -> Result<(), ConfigError> {
        let contents = toml::to_string_pretty(self).map_err(|e| ConfigError::SaveFailed {
            path: path.clone(),
            message: e.to_string(),
        })?;

        std::fs::write(path, contents).map_err(|e| ConfigError::SaveFailed {
            path: path.clone(),
            message: e.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_original_badge_bar() {
        let config = Config::default();

        assert_eq!(config.badges.count, 8);
        assert_eq!(config.badges.initial_step, 1.0);
        assert!(config.game.subjects_file.is_none());
    }

    #[test]
    fn missing_file_loads_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.badges.count, 8);
    }

    #[test]
    fn partial_file_fills_in_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[badges]\ncount = 5\n").unwrap();

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.badges.count, 5);
        assert_eq!(config.badges.initial_step, 1.0);
    }

    #[test]
    fn round_trips_through_toml() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");

        let mut config = Config::default();
        config.badges.count = 6;
        config.game.subjects_file = Some(PathBuf::from("/tmp/creatures.txt"));
        config.save_to(&path).unwrap();

        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded.badges.count, 6);
        assert_eq!(
            loaded.game.subjects_file,
            Some(PathBuf::from("/tmp/creatures.txt"))
        );
    }

    #[test]
    fn garbage_file_is_a_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "count = [not toml").unwrap();

        assert!(matches!(
            Config::load_from(&path),
            Err(ConfigError::ParseFailed(_))
        ));
    }
}
