//! Effective configuration after merging defaults, the config file and the CLI.
//!
//! This module contains the final configuration read by every other
//! component. It is built once per process start and never mutated.

use std::fmt;
use std::path::{Path, PathBuf};
use std::time::Duration;

use super::cli::Cli;
use super::defaults;
use super::error::{ConfigError, key};
use super::paths;
use super::toml::TomlConfig;

/// A host/port pair as configured, not yet validated.
///
/// Validation is left to the component that connects or binds, so an
/// invalid address only fails the mode that needs it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoint {
    /// Host part, expected to be a dotted IPv4 literal
    pub ip: String,
    /// Port part, expected to be in `1..=65535`
    pub port: String,
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.ip, self.port)
    }
}

/// Fully merged configuration ready for use by the application.
///
/// # Construction
///
/// Use [`EffectiveConfig::load`] in production: it resolves the data
/// directory, creates it, and reads the config file if present.
/// [`EffectiveConfig::from_sources`] performs only the merge and is what
/// tests exercise directly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EffectiveConfig {
    /// Absolute data directory
    pub data_dir: PathBuf,

    /// Config file location (absolute unless the data directory was not)
    pub config_file: PathBuf,

    /// Whether the config file existed and was merged
    pub config_file_loaded: bool,

    /// Log file as configured; relative paths are resolved by the logging
    /// initializer against `data_dir`
    pub log_file: PathBuf,

    /// Requested log verbosity, not yet range-checked
    pub log_level: i64,

    /// Control endpoint address
    pub rpc: Endpoint,

    /// Peer-to-peer listener address
    pub p2p: Endpoint,

    /// Peers to connect to at startup
    pub add_peers: Vec<String>,

    /// Whether the p2p port is hidden from peers
    pub hide_my_port: bool,

    /// Timeout for a forwarded command
    pub rpc_timeout: Duration,
}

impl fmt::Display for EffectiveConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let config_file_str = if self.config_file_loaded {
            self.config_file.display().to_string()
        } else {
            "none".to_string()
        };

        write!(
            f,
            "Config {{ data_dir: {}, config_file: {}, log_file: {}, log_level: {}, rpc: {}, \
             p2p: {}, peers: {}, hide_my_port: {}, rpc_timeout: {}s }}",
            self.data_dir.display(),
            config_file_str,
            self.log_file.display(),
            self.log_level,
            self.rpc,
            self.p2p,
            self.add_peers.len(),
            self.hide_my_port,
            self.rpc_timeout.as_secs(),
        )
    }
}

impl EffectiveConfig {
    /// Merges the three sources for an already-resolved data directory.
    ///
    /// Priority for every key: CLI explicit > config file > default.
    /// A non-empty CLI peer list replaces the file list. Boolean flags are
    /// enabled if either source enables them.
    ///
    /// # Errors
    ///
    /// Returns an error if `rpc-timeout` resolves to zero.
    pub fn from_sources(
        cli: &Cli,
        data_dir: PathBuf,
        toml: Option<&TomlConfig>,
    ) -> Result<Self, ConfigError> {
        let config_file = Self::config_file_path(cli, &data_dir);

        let log_file = cli
            .log_file
            .clone()
            .or_else(|| toml.and_then(|t| t.log_file.clone()))
            .unwrap_or_else(|| PathBuf::from(defaults::LOG_FILE));

        let log_level = cli
            .log_level
            .or_else(|| toml.and_then(|t| t.log_level))
            .unwrap_or(defaults::LOG_LEVEL);

        let rpc = Endpoint {
            ip: pick_text(
                cli.rpc_bind_ip.as_deref(),
                toml.and_then(|t| t.rpc_bind_ip.clone()),
                defaults::RPC_BIND_IP,
            ),
            port: pick_text(
                cli.rpc_bind_port.as_deref(),
                toml.and_then(|t| t.rpc_bind_port.as_ref().map(ToString::to_string)),
                defaults::RPC_BIND_PORT,
            ),
        };

        let p2p = Endpoint {
            ip: pick_text(
                cli.p2p_bind_ip.as_deref(),
                toml.and_then(|t| t.p2p_bind_ip.clone()),
                defaults::P2P_BIND_IP,
            ),
            port: pick_text(
                cli.p2p_bind_port.as_deref(),
                toml.and_then(|t| t.p2p_bind_port.as_ref().map(ToString::to_string)),
                defaults::P2P_BIND_PORT,
            ),
        };

        // CLI peers replace file peers entirely
        let add_peers = if cli.add_peers.is_empty() {
            toml.map(|t| t.add_peer.clone()).unwrap_or_default()
        } else {
            cli.add_peers.clone()
        };

        let hide_my_port = cli.hide_my_port || toml.is_some_and(|t| t.hide_my_port);

        let rpc_timeout = Self::resolve_rpc_timeout(cli, toml)?;

        Ok(Self {
            data_dir,
            config_file,
            config_file_loaded: toml.is_some(),
            log_file,
            log_level,
            rpc,
            p2p,
            add_peers,
            hide_my_port,
            rpc_timeout,
        })
    }

    /// Resolves the data directory, creates it, and merges the config file.
    ///
    /// A missing config file is not an error; the merge then only sees
    /// defaults and CLI values.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The data directory cannot be made absolute or created
    /// - The config file exists but cannot be read or parsed
    /// - A merged value is invalid
    pub fn load(cli: &Cli) -> Result<Self, ConfigError> {
        let requested = cli
            .data_dir
            .clone()
            .unwrap_or_else(paths::default_data_dir);

        let data_dir =
            paths::absolute_data_dir(&requested).map_err(|e| ConfigError::DataDir {
                path: requested.clone(),
                source: e,
            })?;

        std::fs::create_dir_all(&data_dir).map_err(|e| ConfigError::DataDir {
            path: data_dir.clone(),
            source: e,
        })?;

        let config_path = Self::config_file_path(cli, &data_dir);
        let toml = if config_path.exists() {
            tracing::debug!("Loading config file {}", config_path.display());
            Some(TomlConfig::load(&config_path)?)
        } else {
            None
        };

        Self::from_sources(cli, data_dir, toml.as_ref())
    }

    /// Returns the log file resolved against the data directory.
    #[must_use]
    pub fn log_file_path(&self) -> PathBuf {
        paths::resolve_against(&self.data_dir, &self.log_file)
    }

    fn config_file_path(cli: &Cli, data_dir: &Path) -> PathBuf {
        let requested = cli
            .config_file
            .clone()
            .unwrap_or_else(|| PathBuf::from(defaults::CONFIG_FILE));

        paths::resolve_against(data_dir, &requested)
    }

    fn resolve_rpc_timeout(cli: &Cli, toml: Option<&TomlConfig>) -> Result<Duration, ConfigError> {
        // Priority: CLI explicit > TOML > default
        let seconds = cli
            .rpc_timeout
            .or_else(|| toml.and_then(|t| t.rpc_timeout))
            .unwrap_or(defaults::RPC_TIMEOUT_SECS);

        if seconds == 0 {
            return Err(ConfigError::invalid(
                key::RPC_TIMEOUT,
                "must be greater than 0",
            ));
        }

        Ok(Duration::from_secs(seconds))
    }
}

fn pick_text(cli: Option<&str>, toml: Option<String>, default: &str) -> String {
    cli.map(str::to_string)
        .or(toml)
        .unwrap_or_else(|| default.to_string())
}
