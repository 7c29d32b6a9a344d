//! Configuration loading from the process environment.

use thiserror::Error;

use crate::config::schema::AppConfig;
use crate::config::validation::{validate_config, ValidationError};

/// Error type for configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value {value:?} for {name}: {reason}")]
    Parse {
        name: &'static str,
        value: String,
        reason: String,
    },

    #[error("validation failed: {}", join(.0))]
    Validation(Vec<ValidationError>),
}

fn join(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

impl AppConfig {
    /// Load and validate configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Load and validate configuration through an arbitrary variable lookup.
    ///
    /// Empty values are treated as unset, so `APP_ENV=` still reports `local`.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());
        let mut config = AppConfig::default();

        if let Some(host) = var("HOST") {
            config.listener.host = host;
        }
        if let Some(port) = var("PORT") {
            config.listener.port = parse("PORT", port)?;
        }
        if let Some(environment) = var("APP_ENV") {
            config.service.environment = environment;
        }
        if let Some(version) = var("APP_VERSION") {
            config.service.version = version;
        }
        if let Some(timeout) = var("SHUTDOWN_TIMEOUT_MS") {
            config.lifecycle.shutdown_timeout_ms = parse("SHUTDOWN_TIMEOUT_MS", timeout)?;
        }
        if let Some(format) = var("LOG_FORMAT") {
            config.observability.log_format = parse("LOG_FORMAT", format)?;
        }
        if let Some(addr) = var("METRICS_ADDRESS") {
            config.observability.metrics_address = Some(parse("METRICS_ADDRESS", addr)?);
        }

        validate_config(&config).map_err(ConfigError::Validation)?;

        Ok(config)
    }
}

fn parse<T>(name: &'static str, value: String) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    let parsed = value.trim().parse::<T>();
    parsed.map_err(|e| ConfigError::Parse {
        name,
        reason: e.to_string(),
        value,
    })
}
