//! Lifecycle management subsystem.
//!
//! # Data Flow
//! ```text
//! Startup (startup.rs):
//!     Load config → Init logging/metrics → Bind listener → Watch signals → Serve
//!
//! Signals (signals.rs):
//!     first SIGTERM/SIGINT  → Shutdown::trigger   (Running → Draining)
//!     second SIGTERM/SIGINT → Shutdown::escalate  (Draining → ForceTerminated)
//!
//! Shutdown (shutdown.rs + http::server):
//!     Draining: listener dropped, in-flight requests finish, countdown runs
//!     drained first   → Terminated       (exit 0)
//!     countdown first → ForceTerminated  (exit 1)
//! ```

pub mod shutdown;
pub mod signals;
pub mod startup;

pub use shutdown::{Shutdown, ShutdownOutcome, ShutdownSignal};

use std::fmt;

/// Process lifecycle state. Only moves forward.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LifecycleState {
    /// Accepting and serving connections.
    Running,
    /// Listener closed, waiting for in-flight requests.
    Draining,
    /// Drained within the grace period.
    Terminated,
    /// Grace period elapsed or shutdown was escalated.
    ForceTerminated,
}

impl LifecycleState {
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Terminated | Self::ForceTerminated)
    }

    /// Whether `self → next` is a legal transition.
    pub fn can_advance_to(self, next: Self) -> bool {
        matches!(
            (self, next),
            (Self::Running, Self::Draining)
                | (Self::Draining, Self::Terminated)
                | (Self::Draining, Self::ForceTerminated)
        )
    }
}

impl fmt::Display for LifecycleState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Running => "running",
            Self::Draining => "draining",
            Self::Terminated => "terminated",
            Self::ForceTerminated => "force_terminated",
        };
        f.write_str(name)
    }
}
