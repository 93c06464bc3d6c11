//! Session configuration, loaded from TOML.

use std::path::Path;

use chess_core::Color;
use serde::{Deserialize, Serialize};

use crate::difficulty::{MAX_LEVEL, MIN_LEVEL};
use crate::error::ConfigError;

/// Settings for one game session.
///
/// Every field has a default, so an empty file is a valid configuration:
///
/// ```toml
/// initial_level = 5      # adaptive strength, 1-10
/// preset = 0             # 0 = adaptive, 1 = Easy .. 4 = Grandmaster
/// engine_color = "black"
/// seed = 42              # omit to seed from entropy
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EngineConfig {
    /// Adaptive level a fresh controller starts at
    pub initial_level: u8,
    /// Locked preset number, 0 for adaptive mode
    pub preset: u8,
    /// Side the engine plays
    pub engine_color: Color,
    /// Seed for blunder randomness (None = entropy)
    pub seed: Option<u64>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            initial_level: 5,
            preset: 0,
            engine_color: Color::Black,
            seed: None,
        }
    }
}

impl EngineConfig {
    /// Load and validate a config file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&contents)
    }

    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        let config: EngineConfig = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(MIN_LEVEL..=MAX_LEVEL).contains(&self.initial_level) {
            return Err(ConfigError::Level(self.initial_level));
        }
        if self.preset > 4 {
            return Err(ConfigError::Preset(self.preset));
        }
        Ok(())
    }

    /// The side the human (or sparring partner) plays.
    pub fn player_color(&self) -> Color {
        self.engine_color.other()
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod config_tests;
