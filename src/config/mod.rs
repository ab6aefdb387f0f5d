//! Configuration management for the budget tracker.
//!
//! Assembles the application configuration from `config.toml` (seed teams)
//! and environment variables (store backend selection). A set
//! `DATABASE_URL` selects the relational store; otherwise the JSON-file
//! fallback at `LOCAL_STORE_PATH` (or its default) is used, mirroring the
//! original deployment's remote-store/local-fallback switch.

/// Database connection and schema creation
pub mod database;

/// Seed team configuration loading from config.toml
pub mod teams;

use crate::errors::Result;
use std::path::PathBuf;
use tracing::info;

/// Default path of the JSON fallback store.
pub const DEFAULT_LOCAL_STORE_PATH: &str = "data/budget_tracker.json";

/// Fully resolved application configuration.
#[derive(Debug)]
pub struct AppConfig {
    /// Database URL when the relational backend is selected
    pub database_url: Option<String>,
    /// Path of the JSON fallback store
    pub local_store_path: PathBuf,
    /// Teams to seed on startup
    pub seed_teams: Vec<teams::TeamConfig>,
}

/// Loads the application configuration from config.toml and the
/// environment.
///
/// # Errors
/// Fails when config.toml is missing or malformed; the environment
/// variables are optional.
pub fn load_app_configuration() -> Result<AppConfig> {
    let config = teams::load_default_config()?;

    let database_url = std::env::var("DATABASE_URL").ok().filter(|v| !v.is_empty());
    let local_store_path = std::env::var("LOCAL_STORE_PATH")
        .ok()
        .filter(|v| !v.is_empty())
        .map_or_else(|| PathBuf::from(DEFAULT_LOCAL_STORE_PATH), PathBuf::from);

    match &database_url {
        Some(url) => info!(%url, "using relational store"),
        None => info!(path = %local_store_path.display(), "no DATABASE_URL set, using local store"),
    }

    Ok(AppConfig {
        database_url,
        local_store_path,
        seed_teams: config.teams,
    })
}
