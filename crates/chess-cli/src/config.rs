//! Configuration file loading for the terminal front-end.
//!
//! Settings come from `chess.toml` in the current directory unless another
//! path is given. A missing file means defaults.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors that can occur when loading or parsing configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to read the configuration file from disk.
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),
    /// Failed to parse the configuration file as valid TOML.
    #[error("Failed to parse config: {0}")]
    ParseError(#[from] toml::de::Error),
    /// The configured log level is not one tracing knows.
    #[error("Unknown log level: {0}")]
    InvalidLogLevel(String),
}

/// Display and startup settings.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq)]
pub struct CliConfig {
    /// Draw pieces with Unicode chess glyphs instead of FEN letters.
    #[serde(default)]
    pub unicode_pieces: bool,
    /// Print file letters and rank numbers around the board.
    #[serde(default = "default_true")]
    pub show_coordinates: bool,
    /// Mark destinations when listing moves for a piece.
    #[serde(default = "default_true")]
    pub highlight_legal: bool,
    /// Maximum level for diagnostics written to stderr.
    #[serde(default = "default_log_level")]
    pub log_level: String,
    /// Position to start from instead of the standard setup.
    #[serde(default)]
    pub start_fen: Option<String>,
}

fn default_true() -> bool {
    true
}

fn default_log_level() -> String {
    "warn".to_string()
}

impl Default for CliConfig {
    fn default() -> Self {
        CliConfig {
            unicode_pieces: false,
            show_coordinates: true,
            highlight_legal: true,
            log_level: default_log_level(),
            start_fen: None,
        }
    }
}

impl CliConfig {
    /// Loads the configuration from `path`, or from [`Self::config_path()`]
    /// when none is given. A missing file yields the defaults.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::ReadError`] if the file exists but cannot be read,
    /// or [`ConfigError::ParseError`] if the file contains invalid TOML.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let config_path = path.map(Path::to_path_buf).unwrap_or_else(Self::config_path);
        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            Self::parse(&content)
        } else {
            Ok(Self::default())
        }
    }

    /// Parses configuration from TOML text.
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    /// Returns the default path of the configuration file.
    pub fn config_path() -> PathBuf {
        PathBuf::from("chess.toml")
    }

    /// Returns the configured log level.
    pub fn level(&self) -> Result<tracing::Level, ConfigError> {
        self.log_level
            .parse()
            .map_err(|_| ConfigError::InvalidLogLevel(self.log_level.clone()))
    }
}
