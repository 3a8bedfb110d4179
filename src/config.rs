//! Match configuration.
//!
//! Configuration is plain JSON. Every field has a default, so an empty object
//! describes a standard four-player match on an 8x7 hex board.

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info, instrument};

use crate::game::{Color, Topology};

/// Errors raised while loading or validating a configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The file could not be read.
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    /// The file is not valid configuration JSON.
    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),
    /// The configuration parsed but describes an impossible match.
    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Costs and yields of the build action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rules {
    /// Resources debited for a new unit.
    #[serde(default = "default_unit_cost")]
    pub unit_cost: u32,
    /// Strength of a newly built unit.
    #[serde(default = "default_unit_strength")]
    pub unit_strength: u32,
}

const fn default_unit_cost() -> u32 {
    5
}

const fn default_unit_strength() -> u32 {
    1
}

impl Default for Rules {
    fn default() -> Self {
        Self {
            unit_cost: default_unit_cost(),
            unit_strength: default_unit_strength(),
        }
    }
}

impl Rules {
    /// Check that the rules allow a legal build.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Invalid` if new units would have no strength.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.unit_strength == 0 {
            return Err(ConfigError::Invalid(
                "unit_strength must be positive".into(),
            ));
        }
        Ok(())
    }
}

/// Parameters of a single match.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchConfig {
    /// Board height.
    #[serde(default = "default_rows")]
    pub rows: u16,
    /// Board width.
    #[serde(default = "default_cols")]
    pub cols: u16,
    /// Neighbor relation of the board.
    #[serde(default)]
    pub topology: Topology,
    /// Number of end-turns after which a match is called a draw.
    #[serde(default = "default_max_turns")]
    pub max_turns: u32,
    /// Seated colors in turn order.
    #[serde(default = "default_colors")]
    pub colors: Vec<Color>,
    /// Build rules.
    #[serde(default)]
    pub rules: Rules,
}

const fn default_rows() -> u16 {
    8
}

const fn default_cols() -> u16 {
    7
}

const fn default_max_turns() -> u32 {
    200
}

fn default_colors() -> Vec<Color> {
    Color::PLAYERS.to_vec()
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            rows: default_rows(),
            cols: default_cols(),
            topology: Topology::default(),
            max_turns: default_max_turns(),
            colors: default_colors(),
            rules: Rules::default(),
        }
    }
}

impl MatchConfig {
    /// Load and validate a configuration file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed, or fails
    /// [`MatchConfig::validate`].
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        debug!("Loading match config");
        let content = std::fs::read_to_string(path.as_ref())?;
        let config: Self = serde_json::from_str(&content)?;
        config.validate()?;
        info!(
            rows = config.rows,
            cols = config.cols,
            players = config.colors.len(),
            "Match config loaded"
        );
        Ok(config)
    }

    /// Check that the configuration describes a playable match.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Invalid` for an empty board, fewer than two or
    /// repeated player colors, the `empty` color, or invalid rules.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.rows < 2 || self.cols < 2 {
            return Err(ConfigError::Invalid(format!(
                "board must be at least 2x2, got {}x{}",
                self.rows, self.cols
            )));
        }
        if self.colors.len() < 2 {
            return Err(ConfigError::Invalid("a match needs at least two players".into()));
        }
        for (i, color) in self.colors.iter().enumerate() {
            if !color.is_player() {
                return Err(ConfigError::Invalid(format!("{color} cannot be seated")));
            }
            if self.colors[..i].contains(color) {
                return Err(ConfigError::Invalid(format!("{color} is seated twice")));
            }
        }
        self.rules.validate()
    }
}
