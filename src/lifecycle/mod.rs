//! Process lifecycle transitions.
//!
//! Once a node mode is selected, the process either runs the node in the
//! foreground, detaches it into the background, or runs it under the host
//! service manager. How detaching works depends on the platform:
//!
//! - **Unix**: [`PosixLifecycle`] forks; the parent exits and the child
//!   runs the node in a new session.
//! - **Windows**: [`ServiceLifecycle`] registers a relaunch of this program,
//!   with its paths pinned to the resolved configuration and
//!   [`SERVICE_MARKER`] appended, and starts it as a service.
//!
//! [`platform`] picks the implementation at build time so callers never
//! branch on the platform.

mod error;
mod launch;
mod posix;
mod service;

#[cfg(unix)]
mod fork;
#[cfg(windows)]
mod windows;


pub use error::LifecycleError;
pub use launch::{NodeLaunch, SERVICE_MARKER, ServiceLaunch};
pub use posix::{ForkOutcome, Forker, PosixLifecycle};
pub use service::{ServiceLifecycle, ServiceManager};

#[cfg(unix)]
pub use fork::SystemForker;
#[cfg(windows)]
pub use windows::ScmManager;

use crate::config::{EffectiveConfig, Invocation};
use crate::node::Shutdown;

/// The transition a node mode asks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunMode {
    /// Run in the foreground until Ctrl+C or SIGTERM.
    Interactive,
    /// Move the node into the background and let this process exit.
    Detach,
    /// Run under the host service manager until it stops the service.
    Service,
}

/// How a transition ended for the current process.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// The node ran in this process and has stopped.
    Stopped,
    /// The node was handed to another process; this one is done.
    HandedOff,
}

/// A platform's way of carrying out a [`RunMode`].
pub trait PlatformLifecycle {
    /// Carries out `mode` for `launch`.
    ///
    /// # Errors
    ///
    /// Returns an error if the transition or the node fails. All such
    /// failures are fatal.
    fn transition(&self, mode: RunMode, launch: NodeLaunch) -> Result<Outcome, LifecycleError>;
}

/// Lifecycle used by this build.
#[cfg(unix)]
pub type Platform = PosixLifecycle<SystemForker>;

/// Lifecycle used by this build.
#[cfg(windows)]
pub type Platform = ServiceLifecycle<ScmManager>;

/// Creates the lifecycle for this build.
///
/// # Errors
///
/// On Windows, fails if the program path needed for the service relaunch
/// is unknown.
#[cfg(unix)]
pub fn platform(
    _invocation: &Invocation,
    _config: &EffectiveConfig,
) -> Result<Platform, LifecycleError> {
    Ok(PosixLifecycle::new(SystemForker))
}

/// Creates the lifecycle for this build.
///
/// # Errors
///
/// On Windows, fails if the program path needed for the service relaunch
/// is unknown.
#[cfg(windows)]
pub fn platform(
    invocation: &Invocation,
    config: &EffectiveConfig,
) -> Result<Platform, LifecycleError> {
    let relaunch = ServiceLaunch::current(invocation.arguments(), config)?;
    Ok(ServiceLifecycle::new(
        ScmManager,
        crate::config::defaults::SERVICE_NAME,
        relaunch,
    ))
}

fn run_foreground(launch: NodeLaunch) -> Result<Outcome, LifecycleError> {
    tracing::debug!("Running in the foreground");
    launch.run(Shutdown::OsSignal)?;
    Ok(Outcome::Stopped)
}
