//! Service configuration.
//!
//! Loaded from a TOML file (default `terrain_watch.toml`); a missing file
//! means defaults. Environment variables, including any from a `.env`
//! file, override file values:
//!
//! - `TERRAIN_WATCH_STORE` — path of the reading store
//! - `TERRAIN_WATCH_LOG_LEVEL` — debug | info | warn | error
//! - `TERRAIN_WATCH_LOG_FILE` — append log entries to this file

use serde::Deserialize;
use std::fmt;
use std::fs;
use std::io;
use std::path::Path;

use crate::ingest::store::DEFAULT_STORE_FILE;
use crate::logging::LogLevel;
use crate::regions::all_region_names;

pub const DEFAULT_CONFIG_FILE: &str = "terrain_watch.toml";

pub const ENV_STORE: &str = "TERRAIN_WATCH_STORE";
pub const ENV_LOG_LEVEL: &str = "TERRAIN_WATCH_LOG_LEVEL";
pub const ENV_LOG_FILE: &str = "TERRAIN_WATCH_LOG_FILE";

// ============================================================================
// Errors
// ============================================================================

#[derive(Debug)]
pub enum ConfigError {
    Io(io::Error),
    Parse(toml::de::Error),
    InvalidValue { key: &'static str, message: String },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "Failed to read config: {}", e),
            ConfigError::Parse(e) => write!(f, "Failed to parse config: {}", e),
            ConfigError::InvalidValue { key, message } => {
                write!(f, "Invalid value for {}: {}", key, message)
            }
        }
    }
}

impl std::error::Error for ConfigError {}

// ============================================================================
// Config structures
// ============================================================================

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    /// "debug", "info", "warn" or "error"
    pub level: String,
    pub file: Option<String>,
    pub console_timestamps: bool,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            file: None,
            console_timestamps: false,
        }
    }
}

impl LogConfig {
    pub fn min_level(&self) -> Result<LogLevel, ConfigError> {
        self.level
            .parse()
            .map_err(|message| ConfigError::InvalidValue {
                key: "log.level",
                message,
            })
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Config {
    pub store_path: String,
    pub log: LogConfig,
    /// Regions offered for new readings.
    pub regions: Vec<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            store_path: DEFAULT_STORE_FILE.to_string(),
            log: LogConfig::default(),
            regions: all_region_names().into_iter().map(String::from).collect(),
        }
    }
}

// ============================================================================
// Loading
// ============================================================================

/// Parses configuration text. Omitted keys take their defaults.
pub fn parse_config(text: &str) -> Result<Config, ConfigError> {
    let config: Config = toml::from_str(text).map_err(ConfigError::Parse)?;
    config.log.min_level()?;
    Ok(config)
}

/// Loads the config file at `path`, or defaults if it does not exist.
pub fn load_config_file<P: AsRef<Path>>(path: P) -> Result<Config, ConfigError> {
    match fs::read_to_string(path.as_ref()) {
        Ok(text) => parse_config(&text),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(Config::default()),
        Err(e) => Err(ConfigError::Io(e)),
    }
}

/// Applies overrides from `lookup` (normally the process environment).
pub fn apply_overrides<F>(mut config: Config, lookup: F) -> Result<Config, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(store) = lookup(ENV_STORE) {
        config.store_path = store;
    }
    if let Some(level) = lookup(ENV_LOG_LEVEL) {
        config.log.level = level;
        config.log.min_level()?;
    }
    if let Some(file) = lookup(ENV_LOG_FILE) {
        config.log.file = Some(file);
    }
    Ok(config)
}

/// Full load: `.env`, then the config file, then environment overrides.
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<Config, ConfigError> {
    dotenv::dotenv().ok();
    let config = load_config_file(path)?;
    apply_overrides(config, |key| std::env::var(key).ok())
}

// ============================================================================
// Tests
// ============================================================================
