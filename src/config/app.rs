//! Main application configuration
//!
//! This module defines the top-level configuration for season-elo runs,
//! including environment variable and TOML file loading and validation.

use crate::config::rating::RatingConfig;
use crate::rating::EngineKind;
use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};
use std::env;
use std::path::Path;

/// Main application configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub service: ServiceSettings,
    pub rating: RatingConfig,
}

/// Run-level settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceSettings {
    /// Name used in log output
    pub name: String,
    /// Log level (trace, debug, info, warn, error)
    pub log_level: String,
    /// How many teams to print in standings
    pub standings_limit: usize,
}

impl Default for ServiceSettings {
    fn default() -> Self {
        Self {
            name: "season-elo".to_string(),
            log_level: "info".to_string(),
            standings_limit: 25,
        }
    }
}

/// Parse an environment variable if it is set
fn env_override<V: std::str::FromStr>(key: &str) -> Result<Option<V>> {
    match env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| anyhow!("Invalid {} value: {}", key, raw)),
        Err(_) => Ok(None),
    }
}

impl AppConfig {
    /// Load configuration from environment variables with fallback to defaults
    pub fn from_env() -> Result<Self> {
        let mut config = Self::default();
        config.apply_env()?;

        validate_config(&config)?;
        Ok(config)
    }

    /// Load configuration from a TOML file, then apply environment overrides
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;

        let mut config = Self::from_toml(&contents)
            .with_context(|| format!("Failed to parse config file {}", path.display()))?;
        config.apply_env()?;

        validate_config(&config)?;
        Ok(config)
    }

    /// Parse configuration from TOML text without consulting the environment
    pub fn from_toml(contents: &str) -> Result<Self> {
        let config: AppConfig = toml::from_str(contents)?;
        validate_config(&config)?;
        Ok(config)
    }

    fn apply_env(&mut self) -> Result<()> {
        // Service settings
        if let Ok(name) = env::var("SERVICE_NAME") {
            self.service.name = name;
        }
        if let Ok(log_level) = env::var("LOG_LEVEL") {
            self.service.log_level = log_level;
        }
        if let Some(limit) = env_override("STANDINGS_LIMIT")? {
            self.service.standings_limit = limit;
        }

        // Rating settings
        if let Some(engine) = env_override::<EngineKind>("RATING_ENGINE")? {
            self.rating.engine = engine;
        }
        if let Some(initial) = env_override("INITIAL_RATING")? {
            self.rating.initial_rating = initial;
        }
        if let Some(k_factor) = env_override::<f64>("K_FACTOR")? {
            self.rating.sequential.k_factor = k_factor;
            self.rating.batch.k_factor = k_factor;
        }
        if let Some(apply) = env_override("APPLY_HOME_BONUS")? {
            self.rating.sequential.apply_home_bonus = apply;
        }
        if let Some(apply) = env_override("APPLY_MARGIN_OF_VICTORY")? {
            self.rating.sequential.apply_margin_of_victory = apply;
        }

        Ok(())
    }
}

/// Validate configuration values
pub fn validate_config(config: &AppConfig) -> Result<()> {
    // Validate log level
    match config.service.log_level.to_lowercase().as_str() {
        "trace" | "debug" | "info" | "warn" | "error" => {}
        _ => return Err(anyhow!("Invalid log level: {}", config.service.log_level)),
    }

    if config.service.name.is_empty() {
        return Err(anyhow!("Service name cannot be empty"));
    }

    config.rating.validate()?;

    Ok(())
}
