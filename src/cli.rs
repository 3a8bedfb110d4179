//! CLI command implementations for Hextowns.

pub(crate) mod run;
pub(crate) mod tournament;

mod output;

use clap::ValueEnum;
use hextowns::config::{ConfigError, MatchConfig};
use hextowns::tournament::TournamentError;
use hextowns::{Color, Topology};
use std::path::PathBuf;
use thiserror::Error;

/// Output format for the `run` command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub(crate) enum OutputFormat {
    /// Human-readable text output.
    Text,
    /// Machine-readable JSON output.
    Json,
}

/// Output format for the `tournament` command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub(crate) enum TournamentFormat {
    /// Human-readable text output.
    Text,
    /// Machine-readable JSON output.
    Json,
    /// CSV format.
    Csv,
}

/// CLI error type.
#[derive(Error, Debug)]
pub(crate) enum CliError {
    /// Configuration could not be loaded.
    #[error(transparent)]
    Config(#[from] ConfigError),
    /// A match failed.
    #[error(transparent)]
    Tournament(#[from] TournamentError),
    /// Output could not be serialized.
    #[error("JSON serialization failed: {0}")]
    Json(#[from] serde_json::Error),
    /// Anything else.
    #[error("{0}")]
    Other(String),
}

/// Match settings shared by every command; flags win over the config file.
#[derive(Debug, Clone, Default, clap::Args)]
pub(crate) struct MatchArgs {
    /// JSON match config file
    #[arg(short, long)]
    pub(crate) config: Option<PathBuf>,

    /// Board rows (default: 8)
    #[arg(long)]
    pub(crate) rows: Option<u16>,

    /// Board columns (default: 7)
    #[arg(long)]
    pub(crate) cols: Option<u16>,

    /// Grid type: hex or square (default: hex)
    #[arg(long)]
    pub(crate) topology: Option<Topology>,

    /// Maximum turns before a draw (default: 200)
    #[arg(short = 't', long)]
    pub(crate) max_turns: Option<u32>,

    /// Seated colors in turn order, comma separated (default: all four)
    #[arg(long, value_delimiter = ',')]
    pub(crate) colors: Option<Vec<Color>>,
}

impl MatchArgs {
    /// Build the effective match config.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file is unreadable or the result is invalid.
    pub(crate) fn resolve(self) -> Result<MatchConfig, CliError> {
        let mut config = match &self.config {
            Some(path) => MatchConfig::from_json_file(path)?,
            None => MatchConfig::default(),
        };
        if let Some(rows) = self.rows {
            config.rows = rows;
        }
        if let Some(cols) = self.cols {
            config.cols = cols;
        }
        if let Some(topology) = self.topology {
            config.topology = topology;
        }
        if let Some(max_turns) = self.max_turns {
            config.max_turns = max_turns;
        }
        if let Some(colors) = self.colors {
            config.colors = colors;
        }
        config.validate()?;
        Ok(config)
    }
}

/// Seed from the command line, or one derived from the clock.
pub(crate) fn seed_or_now(seed: Option<u64>) -> u64 {
    seed.unwrap_or_else(|| {
        use std::time::{SystemTime, UNIX_EPOCH};
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or(42)
    })
}
