//! Fork-based lifecycle for platforms without a service manager.

use super::{LifecycleError, NodeLaunch, Outcome, PlatformLifecycle, RunMode};
use crate::node::Shutdown;

/// Result of a fork, seen from the process that continues.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ForkOutcome {
    /// The original process; `child` is the new process id.
    Parent {
        /// Process id of the child
        child: i32,
    },
    /// The new process.
    Child,
}

/// Creates the background process and detaches it.
///
/// Abstracted so tests can pick either side of the fork without creating
/// a process.
pub trait Forker {
    /// Splits the process in two.
    ///
    /// # Errors
    ///
    /// Returns [`LifecycleError::Fork`] if no child could be created.
    fn fork(&self) -> Result<ForkOutcome, LifecycleError>;

    /// Called in the child only: leaves the controlling terminal, points
    /// the standard streams at the null device and changes to `/`.
    ///
    /// # Errors
    ///
    /// Returns [`LifecycleError::Detach`] if any step fails.
    fn detach(&self) -> Result<(), LifecycleError>;
}

/// Lifecycle that runs the node in the foreground or in a forked child.
#[derive(Debug, Default)]
pub struct PosixLifecycle<F> {
    forker: F,
}

impl<F: Forker> PosixLifecycle<F> {
    /// Creates a lifecycle using the given forker.
    #[must_use]
    pub const fn new(forker: F) -> Self {
        Self { forker }
    }

    fn detach(&self, launch: NodeLaunch) -> Result<Outcome, LifecycleError> {
        match self.forker.fork()? {
            ForkOutcome::Parent { child } => {
                tracing::info!("Daemon started in background with pid {child}");
                Ok(Outcome::HandedOff)
            }
            ForkOutcome::Child => {
                self.forker.detach()?;
                launch.run(Shutdown::OsSignal)?;
                Ok(Outcome::Stopped)
            }
        }
    }
}

impl<F: Forker> PlatformLifecycle for PosixLifecycle<F> {
    fn transition(&self, mode: RunMode, launch: NodeLaunch) -> Result<Outcome, LifecycleError> {
        match mode {
            RunMode::Interactive => super::run_foreground(launch),
            RunMode::Detach => self.detach(launch),
            RunMode::Service => Err(LifecycleError::Unsupported {
                mode: "Running as a Windows service",
            }),
        }
    }
}
