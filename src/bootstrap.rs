//! Process bootstrap: turns an argument vector into one completed mode.
//!
//! The order is fixed: parse the invocation, answer help and system
//! queries, resolve the configuration, select the mode, then either forward
//! a command or initialize logging and hand the node to the platform
//! lifecycle. Logging is only initialized for node modes; every earlier
//! failure is reported on stderr by the caller.

use std::ffi::OsString;
use std::io::{self, Write};
use std::process::ExitCode;

use thiserror::Error;

use crate::config::{Cli, ConfigError, EffectiveConfig, Endpoint, Invocation};
use crate::dispatch::{self, Mode};
use crate::lifecycle::{self, LifecycleError, NodeLaunch, Outcome, PlatformLifecycle, RunMode};
use crate::logging::{self, LogDestination, LogLevel, LoggingError, SinkSet};
use crate::node::StandbyNode;
use crate::rpc::{CommandClient, CommandError, CommandReply, HttpError, ReqwestClient};

#[cfg(test)]
#[path = "bootstrap_tests.rs"]
mod tests;

/// Application exit codes.
pub mod exit_code {
    use std::process::ExitCode;

    /// Success (exit code 0), including help, system queries and a
    /// forwarded command that the running instance accepted.
    pub const SUCCESS: ExitCode = ExitCode::SUCCESS;

    /// Any failure (exit code 1).
    pub const FAILURE: ExitCode = ExitCode::FAILURE;
}

/// Error type for everything that can end the bootstrap early.
#[derive(Debug, Error)]
pub enum BootstrapError {
    /// The command line could not be parsed.
    #[error("{0}")]
    Usage(#[from] clap::Error),

    /// The configuration could not be resolved.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// A forwarded command failed.
    #[error(transparent)]
    Command(#[from] CommandError),

    /// The HTTP client for a forwarded command could not be built.
    #[error("Failed to create HTTP client: {0}")]
    HttpClient(#[source] HttpError),

    /// The async runtime for a forwarded command could not be built.
    #[error("Failed to start async runtime: {0}")]
    Runtime(#[source] io::Error),

    /// Logging could not be initialized.
    #[error(transparent)]
    Logging(#[from] LoggingError),

    /// A lifecycle transition or the node failed.
    #[error(transparent)]
    Lifecycle(#[from] LifecycleError),

    /// Writing the result to standard output failed.
    #[error("Failed to write output: {0}")]
    Output(#[from] io::Error),
}

/// Runs the bootstrap for `args` (program name first) and maps the result
/// to an exit code.
///
/// Errors are printed to stderr. Node modes start [`StandbyNode`] under
/// the platform lifecycle.
pub fn run<I, T>(args: I) -> ExitCode
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    report(execute(args, &mut io::stdout(), start_node))
}

/// Maps a finished bootstrap to its exit code, printing any error.
///
/// Every node outcome is a success for this process: a handed-off node
/// carries on in its own process.
fn report(result: Result<(), BootstrapError>) -> ExitCode {
    match result {
        Ok(()) => exit_code::SUCCESS,
        Err(BootstrapError::Usage(e)) => {
            let _ = e.print();
            exit_code::FAILURE
        }
        Err(e) => {
            eprintln!("Error: {e}");
            exit_code::FAILURE
        }
    }
}

/// Runs the bootstrap, writing user-facing output to `out`.
///
/// `start` is called once, and only for node modes, with the transition and
/// the resolved configuration.
///
/// # Errors
///
/// Returns the first failure; nothing is retried.
pub fn execute<I, T, W, S>(args: I, out: &mut W, start: S) -> Result<(), BootstrapError>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
    W: Write,
    S: FnOnce(&Invocation, RunMode, EffectiveConfig) -> Result<Outcome, BootstrapError>,
{
    let invocation = Invocation::try_from_args(args)?;

    // Help and system queries must not touch the data directory
    if let Some(mode) = dispatch::informational(&invocation) {
        return answer(&mode, out);
    }

    let config = EffectiveConfig::load(&invocation.cli)?;
    let mode = dispatch::select(&invocation, &config);

    if let Some(run_mode) = mode.run_mode() {
        start(&invocation, run_mode, config)?;
        return Ok(());
    }

    match mode {
        Mode::RemoteCommand { endpoint, command } => {
            let reply = forward(&endpoint, &command, &config)?;
            if !reply.output.is_empty() {
                writeln!(out, "{}", reply.output.trim_end())?;
            }
            Ok(())
        }
        informational => answer(&informational, out),
    }
}

/// Starts the node for `run_mode`: logging first, then the lifecycle.
///
/// # Errors
///
/// Returns an error if logging cannot be installed or the transition fails.
pub fn start_node(
    invocation: &Invocation,
    run_mode: RunMode,
    config: EffectiveConfig,
) -> Result<Outcome, BootstrapError> {
    let sinks = sinks_for(run_mode, &config);
    let mut logging = logging::init(&sinks, LogLevel::default())?;
    logging.apply(config.log_level);

    let outcome = lifecycle::platform(invocation, &config)
        .and_then(|platform| platform.transition(run_mode, NodeLaunch::new(StandbyNode, config)))
        .inspect_err(|e| tracing::error!("{e}"))?;

    Ok(outcome)
}

/// Log outputs for a node mode: the file always, the console only when
/// running in the foreground.
#[must_use]
pub fn sinks_for(run_mode: RunMode, config: &EffectiveConfig) -> SinkSet {
    let file = LogDestination::resolve(config);

    match run_mode {
        RunMode::Interactive => SinkSet::with_console(file),
        RunMode::Detach | RunMode::Service => SinkSet::file_only(file),
    }
}

fn answer<W: Write>(mode: &Mode, out: &mut W) -> Result<(), BootstrapError> {
    match mode {
        Mode::Help => write!(out, "{}", Cli::render_help())?,
        Mode::SystemQuery(query) => {
            for line in query.report() {
                writeln!(out, "{line}")?;
            }
        }
        _ => {}
    }

    Ok(())
}

fn forward(
    endpoint: &Endpoint,
    command: &[String],
    config: &EffectiveConfig,
) -> Result<CommandReply, BootstrapError> {
    let client = ReqwestClient::with_timeout(config.rpc_timeout).map_err(BootstrapError::HttpClient)?;

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(BootstrapError::Runtime)?;

    let reply = runtime.block_on(CommandClient::new(client).forward(endpoint, command))?;
    Ok(reply)
}
