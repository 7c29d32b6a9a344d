//! Network layer subsystem.
//!
//! # Data Flow
//! ```text
//! ListenerConfig
//!     → listener.rs (resolve & bind, fail fast)
//!     → TcpListener handed to the HTTP server
//!
//! Each request
//!     → inflight.rs (guard held until the response is produced)
//! ```

pub mod inflight;
pub mod listener;

pub use inflight::{InFlightGuard, InFlightTracker};
pub use listener::ListenerError;
