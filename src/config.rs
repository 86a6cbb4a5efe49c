//! Runtime configuration support.
//!
//! Configuration comes from a TOML file (`rota.toml` in standard locations)
//! or from environment variables, covering the repository backend selection
//! and the calendar grid's day-window boundary.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::models::{DayGrid, InvalidHourError, DEFAULT_DAY_START_HOUR};

/// Error type for configuration loading.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Read(String),
    #[error("Failed to parse config file: {0}")]
    Parse(String),
    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Scheduler configuration from file or environment.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SchedulerConfig {
    #[serde(default)]
    pub repository: RepositorySettings,
    #[serde(default)]
    pub grid: GridSettings,
}

/// Repository backend settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RepositorySettings {
    #[serde(rename = "type", default = "default_repository_type")]
    pub repo_type: String,
}

/// Calendar grid settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GridSettings {
    /// Hour at which the rendered day window opens.
    #[serde(default = "default_day_start_hour")]
    pub day_start_hour: u32,
}

fn default_repository_type() -> String {
    "local".to_string()
}

fn default_day_start_hour() -> u32 {
    DEFAULT_DAY_START_HOUR
}

impl Default for RepositorySettings {
    fn default() -> Self {
        Self {
            repo_type: default_repository_type(),
        }
    }
}

impl Default for GridSettings {
    fn default() -> Self {
        Self {
            day_start_hour: default_day_start_hour(),
        }
    }
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            repository: RepositorySettings::default(),
            grid: GridSettings::default(),
        }
    }
}

impl SchedulerConfig {
    /// Load configuration from a TOML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content =
            fs::read_to_string(path.as_ref()).map_err(|e| ConfigError::Read(e.to_string()))?;

        let config: SchedulerConfig =
            toml::from_str(&content).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from the default location.
    ///
    /// Searches for `rota.toml` in the current directory, a `config/`
    /// subdirectory, then the parent directory. Falls back to defaults when
    /// no file exists.
    pub fn from_default_location() -> Result<Self, ConfigError> {
        let search_paths = vec![
            PathBuf::from("rota.toml"),
            PathBuf::from("config/rota.toml"),
            PathBuf::from("../rota.toml"),
        ];

        for path in search_paths {
            if path.exists() {
                return Self::from_file(&path);
            }
        }

        Ok(Self::default())
    }

    /// Build configuration from environment variables.
    ///
    /// Reads `ROTA_REPOSITORY_TYPE` and `ROTA_DAY_START_HOUR`; unset
    /// variables keep their defaults.
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Ok(repo_type) = std::env::var("ROTA_REPOSITORY_TYPE") {
            config.repository.repo_type = repo_type;
        }
        if let Ok(raw) = std::env::var("ROTA_DAY_START_HOUR") {
            config.grid.day_start_hour = raw.parse().map_err(|_| {
                ConfigError::Invalid(format!("ROTA_DAY_START_HOUR is not an hour: {}", raw))
            })?;
        }

        config.validate()?;
        Ok(config)
    }

    /// Check the configuration for consistency.
    pub fn validate(&self) -> Result<(), ConfigError> {
        match self.repository.repo_type.as_str() {
            "local" => {}
            other => {
                return Err(ConfigError::Invalid(format!(
                    "Unknown repository type: {}",
                    other
                )))
            }
        }

        if self.grid.day_start_hour > 23 {
            return Err(ConfigError::Invalid(format!(
                "day_start_hour must be 0..=23, got {}",
                self.grid.day_start_hour
            )));
        }
        Ok(())
    }

    /// The day window described by this configuration.
    pub fn day_grid(&self) -> Result<DayGrid, InvalidHourError> {
        DayGrid::new(self.grid.day_start_hour)
    }
}
