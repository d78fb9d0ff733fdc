//! Mode selection.
//!
//! Every invocation runs exactly one [`Mode`]. The choice is a priority
//! chain where the first match wins:
//!
//! 1. `--help` → [`Mode::Help`]
//! 2. `--version` / `--os-version` → [`Mode::SystemQuery`]
//! 3. positional command tokens → [`Mode::RemoteCommand`]
//! 4. the service marker → [`Mode::WindowsService`]
//! 5. `--detach` → [`Mode::Detach`]
//! 6. otherwise [`Mode::Interactive`]
//!
//! A forwarded command is checked before any daemonizing mode, so an
//! invocation carrying one never starts a node.


use crate::config::{EffectiveConfig, Endpoint, Invocation};
use crate::lifecycle::RunMode;
use crate::system::SystemQuery;

/// The execution mode selected for this invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mode {
    /// Print usage and exit.
    Help,
    /// Print version or OS information and exit.
    SystemQuery(SystemQuery),
    /// Forward a command to a running instance and exit.
    RemoteCommand {
        /// Control endpoint of the running instance
        endpoint: Endpoint,
        /// Command tokens, in order
        command: Vec<String>,
    },
    /// Run under the host service manager (relaunched with the marker).
    WindowsService,
    /// Move the node into the background.
    Detach,
    /// Run the node in the foreground.
    Interactive,
}

impl Mode {
    /// The lifecycle transition a node mode needs, or `None` for modes
    /// that never start a node.
    #[must_use]
    pub const fn run_mode(&self) -> Option<RunMode> {
        match self {
            Self::Help | Self::SystemQuery(_) | Self::RemoteCommand { .. } => None,
            Self::WindowsService => Some(RunMode::Service),
            Self::Detach => Some(RunMode::Detach),
            Self::Interactive => Some(RunMode::Interactive),
        }
    }
}

/// Selects a mode that needs no configuration: help or a system query.
///
/// Returns `None` when the invocation asks for neither, in which case the
/// caller resolves the configuration and calls [`select`].
#[must_use]
pub fn informational(invocation: &Invocation) -> Option<Mode> {
    let cli = &invocation.cli;

    if cli.help {
        return Some(Mode::Help);
    }

    if cli.is_system_query() {
        return Some(Mode::SystemQuery(SystemQuery {
            version: cli.version,
            os: cli.os_version,
        }));
    }

    None
}

/// Selects the mode for an invocation and its effective configuration.
#[must_use]
pub fn select(invocation: &Invocation, config: &EffectiveConfig) -> Mode {
    if let Some(mode) = informational(invocation) {
        return mode;
    }

    let cli = &invocation.cli;

    if !cli.command.is_empty() {
        return Mode::RemoteCommand {
            endpoint: config.rpc.clone(),
            command: cli.command.clone(),
        };
    }

    if cli.run_as_service {
        return Mode::WindowsService;
    }

    if cli.detach {
        return Mode::Detach;
    }

    Mode::Interactive
}
