//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (axum::serve, graceful drain)
//!     → middleware.rs (in-flight guard, metrics)
//!     → request.rs (request id, trace span)
//!     → handlers.rs (GET /health, GET /)
//!     → 404 for anything else (framework default)
//! ```
//!
//! probe.rs is the client half, used by the container health check.

pub mod handlers;
pub mod middleware;
pub mod probe;
pub mod request;
pub mod server;

pub use handlers::{AppState, HealthStatus, ServiceInfo};
pub use probe::{probe_health, ProbeError};
pub use request::X_REQUEST_ID;
pub use server::{build_router, serve_with_drain, HttpServer};
