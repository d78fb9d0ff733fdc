//! Error types for process lifecycle transitions.

use std::io;

use thiserror::Error;

use crate::node::NodeError;

/// Error type for daemonization and service management.
///
/// Every variant is fatal to the bootstrap.
#[derive(Debug, Error)]
pub enum LifecycleError {
    /// The background child process could not be created.
    #[error("Failed to fork daemon process: {0}")]
    Fork(#[source] io::Error),

    /// The child could not detach from the controlling terminal.
    #[error("Failed to detach daemon process: {0}")]
    Detach(#[source] io::Error),

    /// The path of the running program is unknown.
    #[error("Cannot determine the program path for the service: {0}")]
    ProgramPath(#[source] io::Error),

    /// Registering the service with the host service manager failed.
    #[error("Failed to install service '{name}': {source}")]
    ServiceInstall {
        /// Service name
        name: String,
        /// Underlying error
        #[source]
        source: io::Error,
    },

    /// The service was registered but could not be started.
    #[error("Failed to start service '{name}': {source}")]
    ServiceStart {
        /// Service name
        name: String,
        /// Underlying error
        #[source]
        source: io::Error,
    },

    /// Removing the service registration failed.
    #[error("Failed to uninstall service '{name}': {source}")]
    ServiceUninstall {
        /// Service name
        name: String,
        /// Underlying error
        #[source]
        source: io::Error,
    },

    /// Handing control to the host service manager failed.
    #[error("Failed to connect service '{name}' to the service manager: {source}")]
    ServiceDispatch {
        /// Service name
        name: String,
        /// Underlying error
        #[source]
        source: io::Error,
    },

    /// The requested transition has no implementation on this platform.
    #[error("{mode} is not supported on this platform")]
    Unsupported {
        /// Human-readable name of the transition
        mode: &'static str,
    },

    /// The node failed while running.
    #[error(transparent)]
    Node(#[from] NodeError),
}
