//! Server configuration
//!
//! Settings come from three places, highest precedence first: command line
//! flags, an optional TOML file, and built-in defaults.
//!
//! ```toml
//! database = "/var/lib/habits/habits.db"
//! max_lookback_days = 3650
//! log_level = "info"
//! ```

use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

use crate::domain::DEFAULT_MAX_LOOKBACK_DAYS;

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Read(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Server settings
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ServerConfig {
    /// SQLite database file; a per-user default location when unset
    pub database: Option<PathBuf>,
    /// Upper bound on days the streak scan visits
    pub max_lookback_days: u32,
    /// tracing filter level (error, warn, info, debug, trace)
    pub log_level: Option<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            database: None,
            max_lookback_days: DEFAULT_MAX_LOOKBACK_DAYS,
            log_level: None,
        }
    }
}

impl ServerConfig {
    /// Load and validate configuration from a TOML file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::parse(&content)
    }

    /// Parse and validate configuration from a TOML string
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        let config: ServerConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_lookback_days == 0 {
            return Err(ConfigError::Invalid(
                "max_lookback_days must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    /// The configured database path, or a writable default location
    pub fn database_path(&self) -> Result<PathBuf, ConfigError> {
        match &self.database {
            Some(path) => {
                if let Some(parent) = path.parent() {
                    if !parent.as_os_str().is_empty() && !parent.exists() {
                        std::fs::create_dir_all(parent)?;
                    }
                }
                Ok(path.clone())
            }
            None => default_database_path(),
        }
    }
}

/// Get the default database path with a fallback strategy
///
/// Tries the home, data and config directories, then the working directory,
/// keeping the first one that is writable. Falls back to the temp directory.
pub fn default_database_path() -> Result<PathBuf, ConfigError> {
    let candidates = [
        dirs::home_dir().map(|p| p.join(".habit_streak")),
        dirs::data_dir().map(|p| p.join("habit_streak")),
        dirs::config_dir().map(|p| p.join("habit_streak")),
        std::env::current_dir().ok().map(|p| p.join(".habit_streak")),
    ];

    for dir in candidates.iter().flatten() {
        if is_writable_dir(dir) {
            return Ok(dir.join("habits.db"));
        }
    }

    let temp_dir = std::env::temp_dir().join("habit_streak");
    std::fs::create_dir_all(&temp_dir)?;
    tracing::warn!("Using temporary directory for database: {}", temp_dir.display());
    Ok(temp_dir.join("habits.db"))
}

fn is_writable_dir(dir: &Path) -> bool {
    if std::fs::create_dir_all(dir).is_err() {
        return false;
    }
    let marker = dir.join(".test_write");
    if std::fs::write(&marker, "test").is_err() {
        return false;
    }
    let _ = std::fs::remove_file(&marker);
    true
}
