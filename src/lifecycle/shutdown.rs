//! Shutdown coordination.
//!
//! [`Shutdown`] owns the lifecycle state and publishes it through a watch
//! channel. Long-running tasks hold a [`ShutdownSignal`] and wait on it.

use std::sync::Arc;
use tokio::sync::watch;

use super::LifecycleState;

/// Coordinator for graceful shutdown.
///
/// Cheap to clone; every clone drives the same state.
#[derive(Debug, Clone)]
pub struct Shutdown {
    tx: Arc<watch::Sender<LifecycleState>>,
}

impl Shutdown {
    /// Create a new coordinator in the `Running` state.
    pub fn new() -> Self {
        let (tx, _) = watch::channel(LifecycleState::Running);
        Self { tx: Arc::new(tx) }
    }

    /// Subscribe to state changes.
    pub fn subscribe(&self) -> ShutdownSignal {
        ShutdownSignal {
            rx: self.tx.subscribe(),
        }
    }

    /// Current lifecycle state.
    pub fn state(&self) -> LifecycleState {
        *self.tx.borrow()
    }

    /// Begin draining. Returns `false` if shutdown was already under way.
    pub fn trigger(&self) -> bool {
        self.advance(LifecycleState::Draining)
    }

    /// Abandon the drain and terminate now. Only legal while draining.
    pub fn escalate(&self) -> bool {
        self.advance(LifecycleState::ForceTerminated)
    }

    /// Move to `next` if the transition is legal. Returns whether it happened.
    pub fn advance(&self, next: LifecycleState) -> bool {
        let mut from = None;
        let changed = self.tx.send_if_modified(|state| {
            if state.can_advance_to(next) {
                from = Some(*state);
                *state = next;
                true
            } else {
                false
            }
        });
        if let Some(from) = from {
            tracing::info!(from = %from, to = %next, "Lifecycle state changed");
        }
        changed
    }
}

impl Default for Shutdown {
    fn default() -> Self {
        Self::new()
    }
}

/// Receiving half handed to tasks that react to shutdown.
#[derive(Debug, Clone)]
pub struct ShutdownSignal {
    rx: watch::Receiver<LifecycleState>,
}

impl ShutdownSignal {
    /// Current lifecycle state (non-blocking).
    pub fn state(&self) -> LifecycleState {
        *self.rx.borrow()
    }

    /// Resolve once the process has left `Running`.
    ///
    /// A dropped coordinator counts as a shutdown request.
    pub async fn draining(&mut self) {
        let _ = self
            .rx
            .wait_for(|state| *state != LifecycleState::Running)
            .await;
    }

    /// Resolve once shutdown has been escalated to a forced exit.
    ///
    /// Never resolves if the coordinator is dropped first.
    pub async fn forced(&mut self) {
        let closed = self
            .rx
            .wait_for(|state| *state == LifecycleState::ForceTerminated)
            .await
            .is_err();
        if closed {
            std::future::pending::<()>().await;
        }
    }
}

/// How a shutdown sequence ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShutdownOutcome {
    /// Every in-flight request finished inside the grace period.
    Graceful,
    /// The grace period elapsed with requests still in flight.
    TimedOut { in_flight: u64 },
    /// A second termination signal arrived while draining.
    Escalated { in_flight: u64 },
}

impl ShutdownOutcome {
    /// Process exit code for this outcome.
    pub fn exit_code(self) -> i32 {
        match self {
            Self::Graceful => 0,
            Self::TimedOut { .. } | Self::Escalated { .. } => 1,
        }
    }

    /// Terminal lifecycle state this outcome corresponds to.
    pub fn state(self) -> LifecycleState {
        match self {
            Self::Graceful => LifecycleState::Terminated,
            Self::TimedOut { .. } | Self::Escalated { .. } => LifecycleState::ForceTerminated,
        }
    }

    /// Short label for logs and metrics.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Graceful => "graceful",
            Self::TimedOut { .. } => "timed_out",
            Self::Escalated { .. } => "escalated",
        }
    }
}
