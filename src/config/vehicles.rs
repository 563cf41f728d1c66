//! Vehicle seed configuration loaded from `config.toml`
//!
//! The vehicles listed here are inserted on startup when they are not in the
//! database yet. A missing file simply means there is nothing to seed.

use crate::errors::{Error, Result};
use serde::Deserialize;
use std::path::Path;
use tracing::debug;

/// Environment variable that overrides the config file location
pub const CONFIG_PATH_VAR: &str = "FILLUP_CONFIG";

/// Configuration structure representing the entire config.toml file
#[derive(Debug, Default, Deserialize)]
pub struct Config {
    /// Vehicles to seed
    #[serde(default)]
    pub vehicles: Vec<VehicleConfig>,
}

/// Configuration for a single vehicle
#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct VehicleConfig {
    /// Manufacturer
    pub make: String,
    /// Model name
    pub model: String,
    /// Model year
    pub year: i32,
    /// Exterior color
    #[serde(default)]
    pub color: String,
    /// Display nickname
    #[serde(default)]
    pub nickname: String,
    /// Owner of the vehicle
    pub owner: String,
    /// Free-form notes
    #[serde(default)]
    pub notes: String,
}

/// Loads vehicle configuration from a TOML file
///
/// # Errors
/// Returns [`Error::Config`] if the file cannot be read or the TOML is invalid.
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<Config> {
    let contents = std::fs::read_to_string(path.as_ref()).map_err(|e| Error::Config {
        message: format!("Failed to read config file {}: {e}", path.as_ref().display()),
    })?;

    toml::from_str(&contents).map_err(|e| Error::Config {
        message: format!("Failed to parse config.toml: {e}"),
    })
}

/// Loads configuration from `$FILLUP_CONFIG` or `./config.toml`.
///
/// Returns an empty configuration when the file does not exist.
pub fn load_default_config() -> Result<Config> {
    let path = std::env::var(CONFIG_PATH_VAR).unwrap_or_else(|_| "config.toml".to_string());
    if !Path::new(&path).exists() {
        debug!("No config file at {path}, nothing to seed");
        return Ok(Config::default());
    }
    load_config(path)
}
