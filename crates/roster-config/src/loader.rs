//! Configuration loader with layered sources.

use crate::AppConfig;
use config::{Config, ConfigError, Environment, File};
use roster_core::RosterError;
use std::path::Path;
use std::time::Duration;
use tracing::{debug, info};

/// Longest accepted lifetime for the cached collection.
pub const MAX_CACHE_TTL: Duration = Duration::from_secs(7 * 24 * 60 * 60);

/// Longest accepted bound on a single cache call.
pub const MAX_CACHE_OPERATION_TIMEOUT: Duration = Duration::from_secs(60);

/// Layered configuration loader.
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    config: AppConfig,
}

impl ConfigLoader {
    /// Creates a new configuration loader.
    ///
    /// Configuration is loaded from multiple sources in order:
    /// 1. `config/default.toml` - Default values
    /// 2. `config/{environment}.toml` - Environment-specific overrides
    /// 3. `config/local.toml` - Local overrides
    /// 4. Environment variables with the `ROSTER__` prefix
    pub fn new(config_dir: impl AsRef<str>) -> Result<Self, RosterError> {
        let config = Self::load_config(config_dir.as_ref())?;
        Ok(Self { config })
    }

    /// Loads configuration from the default location (`./config`).
    pub fn from_default_location() -> Result<Self, RosterError> {
        Self::new("./config")
    }

    /// Consumes the loader, returning the configuration.
    #[must_use]
    pub fn into_config(self) -> AppConfig {
        self.config
    }

    fn load_config(config_dir: &str) -> Result<AppConfig, RosterError> {
        if let Err(e) = dotenvy::dotenv() {
            debug!("No .env file found or error loading it: {}", e);
        }

        let environment =
            std::env::var("ROSTER_ENVIRONMENT").unwrap_or_else(|_| "development".to_string());

        info!("Loading configuration for environment: {}", environment);

        let mut builder = Config::builder();

        for name in ["default", environment.as_str(), "local"] {
            let path = format!("{}/{}.toml", config_dir, name);
            if Path::new(&path).exists() {
                debug!("Loading config from: {}", path);
                builder = builder.add_source(File::with_name(&path).required(false));
            }
        }

        builder = builder.add_source(
            Environment::with_prefix("ROSTER")
                .prefix_separator("__")
                .separator("__")
                .try_parsing(true),
        );

        let app_config: AppConfig = builder
            .build()
            .and_then(|c| c.try_deserialize())
            .map_err(config_error_to_roster_error)?;

        validate_config(&app_config)?;

        Ok(app_config)
    }
}

/// Rejects configurations the server cannot start with.
pub fn validate_config(config: &AppConfig) -> Result<(), RosterError> {
    if config.database.url.is_empty() {
        return Err(RosterError::Configuration(
            "Database URL is required".to_string(),
        ));
    }

    if config.cache.ttl_secs == 0 {
        return Err(RosterError::Configuration(
            "cache.ttl_secs must be greater than zero".to_string(),
        ));
    }

    if config.cache.ttl() > MAX_CACHE_TTL {
        return Err(RosterError::Configuration(format!(
            "cache.ttl_secs must be at most {}",
            MAX_CACHE_TTL.as_secs()
        )));
    }

    if config.cache.operation_timeout_ms == 0
        || config.cache.operation_timeout() > MAX_CACHE_OPERATION_TIMEOUT
    {
        return Err(RosterError::Configuration(format!(
            "cache.operation_timeout_ms must be between 1 and {}",
            MAX_CACHE_OPERATION_TIMEOUT.as_millis()
        )));
    }

    if config.redis.enabled && config.redis.url.is_empty() {
        return Err(RosterError::Configuration(
            "Redis URL is required when redis.enabled is set".to_string(),
        ));
    }

    Ok(())
}

fn config_error_to_roster_error(err: ConfigError) -> RosterError {
    RosterError::Configuration(err.to_string())
}
