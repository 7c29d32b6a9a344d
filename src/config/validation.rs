//! Configuration validation.
//!
//! Semantic checks on a parsed [`AppConfig`]. All errors are collected and
//! returned together rather than stopping at the first.

use std::net::{IpAddr, SocketAddr};
use thiserror::Error;

use crate::config::schema::AppConfig;

/// A single semantic problem with the configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("HOST {0:?} is not an IP address")]
    InvalidHost(String),

    #[error("PORT must be non-zero")]
    ZeroPort,

    #[error("SHUTDOWN_TIMEOUT_MS must be greater than zero")]
    ZeroShutdownTimeout,

    #[error("METRICS_ADDRESS {0} collides with the service listener")]
    MetricsAddressCollision(SocketAddr),
}

/// Validate a configuration, returning every problem found.
pub fn validate_config(config: &AppConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    let host = config.listener.host.parse::<IpAddr>();
    if host.is_err() {
        errors.push(ValidationError::InvalidHost(config.listener.host.clone()));
    }
    if config.listener.port == 0 {
        errors.push(ValidationError::ZeroPort);
    }
    if config.lifecycle.shutdown_timeout_ms == 0 {
        errors.push(ValidationError::ZeroShutdownTimeout);
    }

    if let (Some(addr), Ok(ip)) = (config.observability.metrics_address, host) {
        if addr.port() == config.listener.port
            && (addr.ip() == ip || ip.is_unspecified() || addr.ip().is_unspecified())
        {
            errors.push(ValidationError::MetricsAddressCollision(addr));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
