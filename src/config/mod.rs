//! Configuration management for tablesort.
//!
//! This module handles loading, saving, and validating the user
//! configuration: sorter defaults and terminal UI settings.

mod settings;

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info};

pub use settings::UiSettings;

use crate::sort::SortOptions;

/// Errors that can occur while handling configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The platform configuration directory could not be determined.
    #[error("could not determine configuration directory")]
    NoConfigDir,

    /// The configuration directory could not be created.
    #[error("failed to create configuration directory: {0}")]
    CreateDirError(std::io::Error),

    /// The configuration file could not be read.
    #[error("failed to read configuration file: {0}")]
    ReadError(std::io::Error),

    /// The configuration file could not be written.
    #[error("failed to write configuration file: {0}")]
    WriteError(std::io::Error),

    /// The configuration file is not valid TOML.
    #[error("failed to parse configuration file: {0}")]
    ParseError(#[from] toml::de::Error),

    /// The configuration could not be serialized.
    #[error("failed to serialize configuration: {0}")]
    SerializeError(#[from] toml::ser::Error),

    /// A value is out of range or malformed.
    #[error("invalid configuration: {0}")]
    ValidationError(String),
}

/// Result type for configuration operations.
pub type Result<T> = std::result::Result<T, ConfigError>;

/// The complete configuration file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Defaults for every sorter.
    pub sort: SortOptions,
    /// Terminal UI settings.
    pub ui: UiSettings,
}

impl Config {
    /// Path of the configuration file in the platform config directory.
    ///
    /// - Linux: `~/.config/tablesort/config.toml`
    /// - macOS: `~/Library/Application Support/tablesort/config.toml`
    /// - Windows: `C:\Users\<User>\AppData\Roaming\tablesort\config.toml`
    pub fn config_path() -> Result<PathBuf> {
        let base = dirs::config_dir().ok_or(ConfigError::NoConfigDir)?;
        Ok(base.join("tablesort").join("config.toml"))
    }

    /// Load the configuration from the default path.
    ///
    /// A missing file yields the defaults.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    /// Load the configuration from `path`; a missing file yields the defaults.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            debug!(path = %path.display(), "No configuration file, using defaults");
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path).map_err(ConfigError::ReadError)?;
        let config: Config = toml::from_str(&content)?;
        config.validate()?;
        info!(path = %path.display(), "Loaded configuration");
        Ok(config)
    }

    /// Write the configuration to `path`, creating parent directories.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        self.validate()?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(ConfigError::CreateDirError)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content).map_err(ConfigError::WriteError)?;
        Ok(())
    }

    /// Validate the configuration.
    ///
    /// Checks that:
    /// - The class prefix is non-empty and has no whitespace
    /// - Method aliases have valid names
    /// - The tick rate is positive
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError::ValidationError` describing the first problem.
    pub fn validate(&self) -> Result<()> {
        let prefix = self.sort.prefix.trim_end_matches('-');
        if prefix.is_empty() {
            return Err(ConfigError::ValidationError(
                "sort prefix cannot be empty".to_string(),
            ));
        }
        if prefix.contains(char::is_whitespace) {
            return Err(ConfigError::ValidationError(format!(
                "sort prefix '{}' cannot contain whitespace",
                self.sort.prefix
            )));
        }

        for alias in self.sort.method_aliases.keys() {
            if alias.is_empty() || alias.contains(char::is_whitespace) {
                return Err(ConfigError::ValidationError(format!(
                    "sort method alias '{}' must be a single word",
                    alias
                )));
            }
        }

        if self.ui.tick_rate_ms == 0 {
            return Err(ConfigError::ValidationError(
                "tick_rate_ms must be greater than zero".to_string(),
            ));
        }

        Ok(())
    }
}
