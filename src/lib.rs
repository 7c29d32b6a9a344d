//! envpromote-ecs-app library
//!
//! Health and metadata endpoints plus a bounded graceful shutdown sequence,
//! exposed as a library so the lifecycle can be driven from tests.

// Core subsystems
pub mod config;
pub mod http;
pub mod net;

// Cross-cutting concerns
pub mod lifecycle;
pub mod observability;

pub use config::AppConfig;
pub use http::HttpServer;
pub use lifecycle::{LifecycleState, Shutdown, ShutdownOutcome};
