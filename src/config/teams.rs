//! Seed team configuration loading from config.toml
//!
//! The dashboard comes up with a fixed set of teams (name, monthly budget,
//! chart color) defined in a TOML file. They are used to seed the record
//! store on first run or whenever a configured team is missing.

use crate::errors::{Error, Result};
use serde::Deserialize;
use std::path::Path;

/// Configuration structure representing the entire config.toml file
#[derive(Debug, Deserialize)]
pub struct Config {
    /// List of team configurations to seed
    pub teams: Vec<TeamConfig>,
}

/// Configuration for a single team
#[derive(Debug, Deserialize, Clone)]
pub struct TeamConfig {
    /// Display name of the team
    pub name: String,
    /// Monthly budget cap in currency units
    pub budget: f64,
    /// Hex color for the team's chart line
    pub color: String,
}

/// Loads team configuration from a TOML file
///
/// # Errors
/// Returns an error if:
/// - The file cannot be read
/// - The TOML syntax is invalid
/// - Required fields are missing
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<Config> {
    let contents = std::fs::read_to_string(path.as_ref()).map_err(|e| Error::Config {
        message: format!("Failed to read config file: {e}"),
    })?;

    toml::from_str(&contents).map_err(|e| Error::Config {
        message: format!("Failed to parse config.toml: {e}"),
    })
}

/// Loads team configuration from the default location (./config.toml)
pub fn load_default_config() -> Result<Config> {
    load_config("config.toml")
}
