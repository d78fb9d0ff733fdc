//! TOML configuration file parsing.
//!
//! The file is flat: top-level keys only, named exactly like the
//! corresponding command-line options.

use std::fmt;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use super::ConfigError;

/// Settings read from the configuration file.
///
/// All fields are optional to allow partial configuration that is merged
/// with CLI arguments. Invocation-only options (`data-dir`, `config-file`,
/// `detach`) are not accepted here and are rejected as unknown keys.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
pub struct TomlConfig {
    /// Log file path
    pub log_file: Option<PathBuf>,

    /// Log verbosity
    pub log_level: Option<i64>,

    /// Control endpoint bind address
    pub rpc_bind_ip: Option<String>,

    /// Control endpoint port
    pub rpc_bind_port: Option<PortValue>,

    /// Peer-to-peer bind address
    pub p2p_bind_ip: Option<String>,

    /// Peer-to-peer port
    pub p2p_bind_port: Option<PortValue>,

    /// Peers to connect to at startup
    #[serde(default)]
    pub add_peer: Vec<String>,

    /// Do not announce the p2p port
    #[serde(default)]
    pub hide_my_port: bool,

    /// Forwarded-command timeout in seconds
    pub rpc_timeout: Option<u64>,
}

/// A port as written in the file: either `18081` or `"18081"`.
///
/// Ports stay textual until the component using them validates the value,
/// matching how they arrive from the command line.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum PortValue {
    /// Bare integer
    Number(i64),
    /// Quoted string
    Text(String),
}

impl fmt::Display for PortValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{n}"),
            Self::Text(s) => f.write_str(s),
        }
    }
}

impl TomlConfig {
    /// Loads configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::FileRead {
            path: path.to_path_buf(),
            source: e,
        })?;

        Self::parse(&content).map_err(|e| ConfigError::FileParse {
            path: path.to_path_buf(),
            source: e,
        })
    }

    /// Parses configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML is invalid or has unknown keys.
    pub fn parse(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }
}
