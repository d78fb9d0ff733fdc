//! CLI argument parsing using clap.
//!
//! Defines the command-line surface: named options, the hidden service
//! marker, and trailing positional tokens forming a forwarded command.

use std::ffi::OsString;
use std::path::PathBuf;

use clap::{CommandFactory, Parser};

/// coind: coin node daemon
///
/// Starts the node in the foreground, detaches it into the background, or
/// forwards a command to an already-running instance.
#[derive(Debug, Parser)]
#[command(name = "coind")]
#[command(version, about, long_about = None)]
#[command(disable_help_flag = true, disable_version_flag = true)]
#[command(override_usage = "coind [OPTIONS] [COMMAND]...")]
#[allow(clippy::struct_excessive_bools)] // CLI flags are naturally boolean
pub struct Cli {
    /// Print this help message and exit
    #[arg(long, short = 'h')]
    pub help: bool,

    /// Print version information and exit
    #[arg(long, short = 'V')]
    pub version: bool,

    /// Print operating system information and exit
    #[arg(long = "os-version")]
    pub os_version: bool,

    /// Data directory holding the config and log files
    #[arg(long = "data-dir", value_name = "DIR")]
    pub data_dir: Option<PathBuf>,

    /// Configuration file (absolute, or relative to the data directory)
    #[arg(long = "config-file", value_name = "FILE")]
    pub config_file: Option<PathBuf>,

    /// Run as a background daemon
    #[arg(long)]
    pub detach: bool,

    /// Log file (absolute, or relative to the data directory)
    #[arg(long = "log-file", value_name = "FILE")]
    pub log_file: Option<PathBuf>,

    /// Log verbosity, 0 (least) to 4 (most)
    #[arg(long = "log-level", value_name = "LEVEL", allow_negative_numbers = true)]
    pub log_level: Option<i64>,

    /// Bind address of the control endpoint
    #[arg(long = "rpc-bind-ip", value_name = "IP")]
    pub rpc_bind_ip: Option<String>,

    /// Port of the control endpoint
    #[arg(long = "rpc-bind-port", value_name = "PORT")]
    pub rpc_bind_port: Option<String>,

    /// Bind address for peer-to-peer connections
    #[arg(long = "p2p-bind-ip", value_name = "IP")]
    pub p2p_bind_ip: Option<String>,

    /// Port for peer-to-peer connections
    #[arg(long = "p2p-bind-port", value_name = "PORT")]
    pub p2p_bind_port: Option<String>,

    /// Peer to connect to at startup (can be specified multiple times)
    #[arg(long = "add-peer", value_name = "HOST:PORT")]
    pub add_peers: Vec<String>,

    /// Do not announce the p2p port to other peers
    #[arg(long = "hide-my-port")]
    pub hide_my_port: bool,

    /// Seconds to wait for a forwarded command's reply
    #[arg(long = "rpc-timeout", value_name = "SECS")]
    pub rpc_timeout: Option<u64>,

    /// Set when relaunched by the host service manager
    #[arg(long = "run-as-service", hide = true)]
    pub run_as_service: bool,

    /// Command forwarded to a running daemon
    #[arg(value_name = "COMMAND")]
    pub command: Vec<String>,
}

impl Cli {
    /// Parses CLI arguments from an iterator (useful for testing).
    ///
    /// # Panics
    ///
    /// Exits the process on invalid arguments, like [`Parser::parse_from`].
    pub fn parse_from_iter<I, T>(iter: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        Self::parse_from(iter)
    }

    /// Renders the usage text built from the visible options.
    #[must_use]
    pub fn render_help() -> String {
        Self::command().render_help().to_string()
    }

    /// Returns true if a system-information query was requested.
    #[must_use]
    pub const fn is_system_query(&self) -> bool {
        self.version || self.os_version
    }
}

/// The raw invocation: parsed options plus the argument vector they came from.
///
/// The original arguments are retained so a service-managed relaunch can
/// reproduce the same invocation.
#[derive(Debug)]
pub struct Invocation {
    /// Parsed command line
    pub cli: Cli,
    args: Vec<OsString>,
}

impl Invocation {
    /// Parses an invocation from a full argument vector (program name first).
    ///
    /// # Errors
    ///
    /// Returns the clap error for unknown options, missing values, or values
    /// of the wrong type.
    pub fn try_from_args<I, T>(iter: I) -> Result<Self, clap::Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        let args: Vec<OsString> = iter.into_iter().map(Into::into).collect();
        let cli = Cli::try_parse_from(&args)?;
        Ok(Self { cli, args })
    }

    /// Arguments after the program name, in their original order.
    #[must_use]
    pub fn arguments(&self) -> &[OsString] {
        self.args.get(1..).unwrap_or_default()
    }
}
