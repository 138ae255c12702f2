//! Application configuration module
//!
//! This module provides type-safe configuration loading from environment
//! variables using the `config` and `dotenvy` crates. Configuration is
//! loaded with the `GIVEBOX` prefix and nested values use double
//! underscores as separators.
//!
//! # Example
//!
//! ```no_run
//! use givebox::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//! ```

mod database;
mod donations;
mod error;
mod gateway;

pub use database::DatabaseConfig;
pub use donations::DonationsConfig;
pub use error::{ConfigError, ValidationError};
pub use gateway::GatewayConfig;

use serde::Deserialize;

/// Root application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Database configuration (PostgreSQL connection)
    pub database: DatabaseConfig,

    /// Payment gateway configuration (credentials, endpoint, timeout)
    pub gateway: GatewayConfig,

    /// Donation workflow configuration (backend key, confirmation step)
    #[serde(default)]
    pub donations: DonationsConfig,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// This function:
    /// 1. Loads `.env` file if present (for development)
    /// 2. Reads environment variables with the `GIVEBOX` prefix
    /// 3. Uses `__` (double underscore) to separate nested values
    /// 4. Deserializes into typed configuration structs
    ///
    /// # Environment Variable Format
    ///
    /// - `GIVEBOX__DATABASE__URL=...` -> `database.url = ...`
    /// - `GIVEBOX__GATEWAY__LOGIN_ID=...` -> `gateway.login_id = ...`
    /// - `GIVEBOX__DONATIONS__REQUIRE_CONFIRMATION=true`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if required variables are missing or values
    /// cannot be parsed into the expected types.
    pub fn load() -> Result<Self, ConfigError> {
        // Load .env file if present (development)
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix("GIVEBOX")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Validate all configuration values
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` if any configuration value is invalid.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.database.validate()?;
        self.gateway.validate()?;
        self.donations.validate(&["authorize_net"])?;
        Ok(())
    }
}
