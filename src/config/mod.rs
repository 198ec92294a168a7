//! Configuration loading and validation.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::{parse_rounds, RoundsError};

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),

    #[error("Failed to parse config: {0}")]
    ParseError(#[from] toml::de::Error),

    #[error("Invalid round selection: {0}")]
    RoundsError(#[from] RoundsError),

    #[error("Invalid configuration: {0}")]
    ValidationError(String),
}

/// Tournament selection.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TournamentConfig {
    /// Provider tournament ID, used in data file names
    #[serde(default = "default_tournament_id")]
    pub id: String,

    /// Display name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Rounds to aggregate (e.g., "4-8", "4-8,12-16")
    #[serde(default = "default_rounds")]
    pub rounds: String,
}

fn default_tournament_id() -> String {
    "394299".to_string()
}

fn default_rounds() -> String {
    "4-8".to_string()
}

impl Default for TournamentConfig {
    fn default() -> Self {
        Self {
            id: default_tournament_id(),
            name: None,
            rounds: default_rounds(),
        }
    }
}

/// Summary output configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SummaryConfig {
    /// Minimum decided matches for an archetype to be ranked
    #[serde(default = "default_min_matches")]
    pub min_matches: u32,

    /// Number of archetypes to list
    #[serde(default = "default_top_n")]
    pub top_n: usize,
}

fn default_min_matches() -> u32 {
    10
}

fn default_top_n() -> usize {
    5
}

impl Default for SummaryConfig {
    fn default() -> Self {
        Self {
            min_matches: default_min_matches(),
            top_n: default_top_n(),
        }
    }
}

/// Main application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,

    #[serde(default = "default_log_level")]
    pub log_level: String,

    #[serde(default)]
    pub tournament: TournamentConfig,

    #[serde(default)]
    pub summary: SummaryConfig,
}

fn default_data_dir() -> PathBuf {
    PathBuf::from("./data")
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            log_level: default_log_level(),
            tournament: TournamentConfig::default(),
            summary: SummaryConfig::default(),
        }
    }
}

impl AppConfig {
    /// Load configuration from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        let config: AppConfig = toml::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Load from `path` if it exists. `None` means no file is there.
    pub fn load_optional(path: &Path) -> Result<Option<Self>, ConfigError> {
        if path.exists() {
            Self::from_file(path).map(Some)
        } else {
            Ok(None)
        }
    }

    /// Selected rounds, parsed.
    pub fn rounds(&self) -> Result<Vec<u32>, RoundsError> {
        parse_rounds(&self.tournament.rounds)
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.tournament.id.trim().is_empty() {
            return Err(ConfigError::ValidationError(
                "Tournament id must not be empty".to_string(),
            ));
        }

        if self.summary.top_n == 0 {
            return Err(ConfigError::ValidationError(
                "Summary top_n must be greater than 0".to_string(),
            ));
        }

        self.rounds()?;

        Ok(())
    }
}
