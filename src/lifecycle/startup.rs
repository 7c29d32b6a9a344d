//! Startup orchestration.
//!
//! Ordered: metrics exporter → listener → signal handlers → serve.
//! Any startup error is fatal.

use thiserror::Error;

use crate::config::AppConfig;
use crate::http::HttpServer;
use crate::lifecycle::signals::{watch_signals, Signals};
use crate::lifecycle::{Shutdown, ShutdownOutcome};
use crate::net::{listener, ListenerError};
use crate::observability::metrics;

/// Errors that abort startup or the serve loop.
#[derive(Debug, Error)]
pub enum StartupError {
    #[error(transparent)]
    Listener(#[from] ListenerError),

    #[error("failed to register signal handlers: {0}")]
    Signals(#[source] std::io::Error),

    #[error("failed to install metrics exporter: {0}")]
    Metrics(#[from] metrics_exporter_prometheus::BuildError),

    #[error("server error: {0}")]
    Serve(#[source] std::io::Error),
}

/// Start every subsystem and serve until shutdown completes.
pub async fn run(config: AppConfig) -> Result<ShutdownOutcome, StartupError> {
    tracing::info!(
        host = %config.listener.host,
        port = config.listener.port,
        environment = %config.service.environment,
        version = %config.service.version,
        shutdown_timeout_ms = config.lifecycle.shutdown_timeout_ms,
        "Configuration loaded"
    );

    if let Some(addr) = config.observability.metrics_address {
        metrics::init_metrics(addr)?;
    }

    let listener = listener::bind(&config.listener).await?;

    let shutdown = Shutdown::new();
    let signals = Signals::register().map_err(StartupError::Signals)?;
    tokio::spawn(watch_signals(signals, shutdown.clone()));

    let server = HttpServer::new(config);
    server
        .run(listener, shutdown)
        .await
        .map_err(StartupError::Serve)
}
