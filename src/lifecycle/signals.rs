//! OS signal handling.
//!
//! SIGTERM (ECS `StopTask`) and SIGINT (Ctrl+C) are treated the same way.
//! The first one starts the drain, a second one while draining forces exit.

use std::fmt;

use super::{LifecycleState, Shutdown};

/// A termination signal delivered to the process.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Signal {
    Interrupt,
    Terminate,
}

impl fmt::Display for Signal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Interrupt => f.write_str("SIGINT"),
            Self::Terminate => f.write_str("SIGTERM"),
        }
    }
}

/// Registered signal streams.
///
/// Registration happens once, up front, so a signal delivered between two
/// `recv` calls is not lost.
#[cfg(unix)]
pub struct Signals {
    sigterm: tokio::signal::unix::Signal,
    sigint: tokio::signal::unix::Signal,
}

#[cfg(unix)]
impl Signals {
    /// Register SIGTERM and SIGINT handlers.
    pub fn register() -> std::io::Result<Self> {
        use tokio::signal::unix::{signal, SignalKind};

        Ok(Self {
            sigterm: signal(SignalKind::terminate())?,
            sigint: signal(SignalKind::interrupt())?,
        })
    }

    /// Wait for the next termination signal.
    pub async fn recv(&mut self) -> Signal {
        tokio::select! {
            _ = self.sigterm.recv() => Signal::Terminate,
            _ = self.sigint.recv() => Signal::Interrupt,
        }
    }
}

#[cfg(not(unix))]
pub struct Signals {
    ctrl_c: tokio::signal::windows::CtrlC,
}

#[cfg(not(unix))]
impl Signals {
    pub fn register() -> std::io::Result<Self> {
        Ok(Self {
            ctrl_c: tokio::signal::windows::ctrl_c()?,
        })
    }

    pub async fn recv(&mut self) -> Signal {
        self.ctrl_c.recv().await;
        Signal::Interrupt
    }
}

/// Apply one received signal to the coordinator.
pub fn on_signal(shutdown: &Shutdown, signal: Signal) {
    match shutdown.state() {
        LifecycleState::Running => {
            tracing::info!(signal = %signal, "Signal received, shutting down gracefully");
            shutdown.trigger();
        }
        LifecycleState::Draining => {
            tracing::warn!(signal = %signal, "Second signal received while draining, forcing exit");
            shutdown.escalate();
        }
        state => {
            tracing::debug!(signal = %signal, state = %state, "Signal ignored");
        }
    }
}

/// Drive the coordinator from OS signals until a terminal state is reached.
pub async fn watch_signals(mut signals: Signals, shutdown: Shutdown) {
    while !shutdown.state().is_terminal() {
        let signal = signals.recv().await;
        on_signal(&shutdown, signal);
    }
}
