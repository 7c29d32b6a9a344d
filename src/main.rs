//! envpromote-ecs-app
//!
//! A small JSON service for ECS behind an ALB: `GET /health` for liveness,
//! `GET /` for deployment metadata, and a bounded graceful shutdown on
//! SIGTERM/SIGINT.
//!
//! # Lifecycle
//!
//! ```text
//!   RUNNING ──signal──▶ DRAINING ──drained──▶ TERMINATED        (exit 0)
//!                          │
//!                          ├──grace elapsed──▶ FORCE_TERMINATED (exit 1)
//!                          └──second signal──▶ FORCE_TERMINATED (exit 1)
//! ```

use std::process::ExitCode;

use envpromote_ecs_app::config::{AppConfig, ObservabilityConfig};
use envpromote_ecs_app::lifecycle::startup;
use envpromote_ecs_app::observability::logging::init_logging;

#[tokio::main]
async fn main() -> ExitCode {
    let config = AppConfig::from_env();

    match &config {
        Ok(config) => init_logging(&config.observability),
        Err(_) => init_logging(&ObservabilityConfig::default()),
    }

    tracing::info!("envpromote-ecs-app v{} starting", env!("CARGO_PKG_VERSION"));

    let config = match config {
        Ok(config) => config,
        Err(e) => {
            tracing::error!(error = %e, "Invalid configuration");
            return ExitCode::FAILURE;
        }
    };

    match startup::run(config).await {
        Ok(outcome) if outcome.exit_code() == 0 => {
            tracing::info!("Shutdown complete");
            ExitCode::SUCCESS
        }
        Ok(outcome) => {
            // Abandoned connection tasks must not hold the runtime open.
            std::process::exit(outcome.exit_code());
        }
        Err(e) => {
            tracing::error!(error = %e, "Fatal startup error");
            ExitCode::FAILURE
        }
    }
}
