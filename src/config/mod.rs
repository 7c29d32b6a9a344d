//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! process environment (PORT, APP_ENV, APP_VERSION, ...)
//!     → loader.rs (lookup & parse, empty values count as unset)
//!     → validation.rs (semantic checks)
//!     → AppConfig (validated, immutable)
//! ```
//!
//! # Design Decisions
//! - Config is read once at startup and never mutated
//! - All fields have defaults so an empty environment is a valid one
//! - Loading goes through an injectable lookup so tests never touch `std::env`

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::ConfigError;
pub use schema::{
    AppConfig, LifecycleConfig, ListenerConfig, LogFormat, ObservabilityConfig, ServiceConfig,
};
