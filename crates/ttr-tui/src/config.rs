//! Startup defaults for the calculator, read from a TOML file.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use ttr_core::{EligibilityFlags, Rating, DEFAULT_RATING, RATING_MAX, RATING_MIN};

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Config file not found: {0}")]
    NotFound(PathBuf),
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),
    #[error("Failed to parse config: {0}")]
    ParseError(#[from] toml::de::Error),
}

/// Values the form starts with. Every field is optional in the file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub current_rating: Rating,
    pub default_opponent_rating: Rating,
    pub show_graphs: bool,
    pub flags: EligibilityFlags,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            current_rating: DEFAULT_RATING,
            default_opponent_rating: DEFAULT_RATING,
            show_graphs: true,
            flags: EligibilityFlags::default(),
        }
    }
}

impl Config {
    /// Load from `path`, or from the user config directory when no path is
    /// given. A missing default file yields the defaults; a missing explicit
    /// file is an error.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let (path, explicit) = match path {
            Some(p) => (p.to_path_buf(), true),
            None => (Self::default_path(), false),
        };

        if !path.exists() {
            if explicit {
                return Err(ConfigError::NotFound(path));
            }
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(&path)?;
        let config = Self::from_toml(&content)?;
        tracing::info!(path = %path.display(), "loaded config");
        Ok(config)
    }

    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let config: Config = toml::from_str(content)?;
        Ok(config.clamped())
    }

    pub fn default_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("ttr-calc")
            .join("config.toml")
    }

    fn clamped(self) -> Self {
        Self {
            current_rating: self.current_rating.clamp(RATING_MIN, RATING_MAX),
            default_opponent_rating: self.default_opponent_rating.clamp(RATING_MIN, RATING_MAX),
            ..self
        }
    }
}
