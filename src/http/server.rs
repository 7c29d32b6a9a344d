//! HTTP server setup and the drain sequence.
//!
//! # Responsibilities
//! - Create the Axum router with both handlers
//! - Wire up middleware (request id, tracing, metrics, in-flight tracking)
//! - Serve on an owned listener until shutdown is triggered
//! - Race connection drain against the grace period and escalation

use axum::{middleware, routing::get, Router};
use std::future::IntoFuture;
use std::time::Duration;
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;

use crate::config::AppConfig;
use crate::http::handlers::{health, root, AppState};
use crate::http::middleware::{record_metrics, track_in_flight};
use crate::http::request::{make_request_span, request_id_layer};
use crate::lifecycle::{Shutdown, ShutdownOutcome};
use crate::net::InFlightTracker;
use crate::observability::metrics;

/// HTTP server for the service.
pub struct HttpServer {
    router: Router,
    config: AppConfig,
}

impl HttpServer {
    /// Create a new HTTP server with the given configuration.
    pub fn new(config: AppConfig) -> Self {
        let state = AppState::new(&config.service);
        let router = build_router(state);
        Self { router, config }
    }

    /// Run the server on `listener` until `shutdown` is triggered and the
    /// drain completes or is cut short.
    pub async fn run(
        self,
        listener: TcpListener,
        shutdown: Shutdown,
    ) -> Result<ShutdownOutcome, std::io::Error> {
        let grace = self.config.lifecycle.shutdown_timeout();
        serve_with_drain(listener, self.router, shutdown, grace).await
    }

    /// The fully layered router, for in-process requests.
    pub fn router(&self) -> Router {
        self.router.clone()
    }
}

/// Build the Axum router with all middleware layers.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/", get(root))
        .with_state(state)
        .layer(middleware::from_fn(record_metrics))
        .layer(
            ServiceBuilder::new()
                .layer(request_id_layer())
                .layer(TraceLayer::new_for_http().make_span_with(make_request_span)),
        )
}

/// Serve `router` on `listener`, then drain once `shutdown` leaves `Running`.
///
/// The listener is dropped as soon as draining starts. In-flight requests get
/// `grace` to finish; after that, or on escalation, the remaining work is
/// abandoned and a forced outcome is returned. The caller is expected to exit
/// the process right away in that case.
pub async fn serve_with_drain(
    listener: TcpListener,
    router: Router,
    shutdown: Shutdown,
    grace: Duration,
) -> Result<ShutdownOutcome, std::io::Error> {
    let addr = listener.local_addr()?;
    let tracker = InFlightTracker::new();
    let app = router.layer(middleware::from_fn_with_state(
        tracker.clone(),
        track_in_flight,
    ));

    tracing::info!(address = %addr, "HTTP server starting");

    let mut drain = shutdown.subscribe();
    let serve = axum::serve(listener, app)
        .with_graceful_shutdown(async move { drain.draining().await })
        .into_future();
    tokio::pin!(serve);

    let mut signal = shutdown.subscribe();
    let drained_early = tokio::select! {
        result = &mut serve => {
            result?;
            true
        }
        _ = signal.draining() => false,
    };

    let outcome = if drained_early {
        ShutdownOutcome::Graceful
    } else {
        tracing::info!(
            in_flight = tracker.active(),
            grace_ms = grace.as_millis() as u64,
            "No longer accepting connections, draining"
        );

        tokio::select! {
            result = &mut serve => {
                result?;
                ShutdownOutcome::Graceful
            }
            _ = tokio::time::sleep(grace) => ShutdownOutcome::TimedOut {
                in_flight: tracker.active(),
            },
            _ = signal.forced() => ShutdownOutcome::Escalated {
                in_flight: tracker.active(),
            },
        }
    };

    shutdown.advance(outcome.state());
    metrics::record_shutdown(outcome.as_str());

    match outcome {
        ShutdownOutcome::Graceful => {
            tracing::info!("Server closed successfully");
        }
        ShutdownOutcome::TimedOut { in_flight } => {
            tracing::error!(
                in_flight,
                grace_ms = grace.as_millis() as u64,
                "Grace period elapsed, forcing shutdown"
            );
        }
        ShutdownOutcome::Escalated { in_flight } => {
            tracing::error!(in_flight, "Shutdown escalated, forcing exit");
        }
    }

    Ok(outcome)
}
