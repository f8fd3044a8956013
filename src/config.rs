//! Runtime configuration.
//!
//! Every field has a default, so an empty JSON object is a valid config.

use crate::core::{Facing, Position};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors raised while loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Invalid config: {0}")]
    Invalid(String),
}

/// Top-level configuration for a robot gateway and its clients.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RobotConfig {
    /// Buffered events per relay subscriber before it starts lagging
    #[serde(default = "default_relay_capacity")]
    pub relay_capacity: usize,
    /// History length returned when a caller does not ask for one
    #[serde(default = "default_history_count")]
    pub history_count: usize,
    /// Cell used when a client places the robot without choosing one
    #[serde(default)]
    pub default_placement: PlacementConfig,
}

/// Where a fresh robot lands.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlacementConfig {
    #[serde(default)]
    pub x: i32,
    #[serde(default)]
    pub y: i32,
    #[serde(default)]
    pub facing: Facing,
}

impl Default for PlacementConfig {
    fn default() -> Self {
        Self {
            x: 0,
            y: 0,
            facing: Facing::North,
        }
    }
}

impl PlacementConfig {
    /// The placement as a position, if it lies on the table.
    pub fn position(&self) -> Option<Position> {
        Position::new(self.x, self.y, self.facing)
    }
}

impl Default for RobotConfig {
    fn default() -> Self {
        Self {
            relay_capacity: default_relay_capacity(),
            history_count: default_history_count(),
            default_placement: PlacementConfig::default(),
        }
    }
}

impl RobotConfig {
    /// Parse and validate a JSON config.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a JSON config file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&json)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.relay_capacity == 0 {
            return Err(ConfigError::Invalid(
                "relay_capacity must be at least 1".to_string(),
            ));
        }
        if self.history_count == 0 {
            return Err(ConfigError::Invalid(
                "history_count must be at least 1".to_string(),
            ));
        }
        if self.default_placement.position().is_none() {
            return Err(ConfigError::Invalid(format!(
                "default_placement ({}, {}) is off the table",
                self.default_placement.x, self.default_placement.y
            )));
        }
        Ok(())
    }
}

fn default_relay_capacity() -> usize {
    64
}

fn default_history_count() -> usize {
    10
}
