//! TCP listener binding.
//!
//! # Responsibilities
//! - Resolve the configured host and port into a socket address
//! - Bind the listener, failing fast on error
//!
//! The returned listener is owned by the HTTP server and dropped the moment
//! draining starts, so the kernel refuses new connections from then on.

use std::net::{IpAddr, SocketAddr};
use thiserror::Error;
use tokio::net::TcpListener;

use crate::config::ListenerConfig;

/// Error type for listener operations.
#[derive(Debug, Error)]
pub enum ListenerError {
    /// The configured host is not an IP address.
    #[error("invalid listen host {host:?}")]
    InvalidHost { host: String },

    /// Failed to bind to address.
    #[error("failed to bind {addr}: {source}")]
    Bind {
        addr: SocketAddr,
        #[source]
        source: std::io::Error,
    },
}

/// Resolve the socket address described by the listener config.
pub fn socket_addr(config: &ListenerConfig) -> Result<SocketAddr, ListenerError> {
    let ip: IpAddr = config
        .host
        .parse()
        .map_err(|_| ListenerError::InvalidHost {
            host: config.host.clone(),
        })?;
    Ok(SocketAddr::new(ip, config.port))
}

/// Bind to the configured address.
pub async fn bind(config: &ListenerConfig) -> Result<TcpListener, ListenerError> {
    let addr = socket_addr(config)?;

    let listener = TcpListener::bind(addr)
        .await
        .map_err(|source| ListenerError::Bind { addr, source })?;

    let local_addr = listener
        .local_addr()
        .map_err(|source| ListenerError::Bind { addr, source })?;

    tracing::info!(address = %local_addr, "Listener bound");

    Ok(listener)
}
