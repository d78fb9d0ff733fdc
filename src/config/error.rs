//! Error types for configuration resolution.

use std::path::PathBuf;

use thiserror::Error;

/// Error type for configuration operations.
///
/// Every variant is fatal: the process does not proceed to any mode.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The data directory could not be created or made absolute.
    #[error("Failed to prepare data directory '{}': {source}", path.display())]
    DataDir {
        /// Path of the data directory
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// Failed to read the configuration file.
    #[error("Failed to read config file '{}': {source}", path.display())]
    FileRead {
        /// Path to the config file
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// The configuration file is malformed or contains unknown keys.
    #[error("Failed to parse config file '{}': {source}", path.display())]
    FileParse {
        /// Path to the config file
        path: PathBuf,
        /// Underlying TOML error
        #[source]
        source: toml::de::Error,
    },

    /// A setting holds a value that can never be valid.
    #[error("Invalid value for {key}: {reason}")]
    InvalidValue {
        /// Option name as written on the command line / in the file
        key: &'static str,
        /// Reason for invalidity
        reason: String,
    },
}

/// Well-known option names used in error messages.
///
/// Use these constants for compile-time safety when matching option names.
pub mod key {
    /// The forwarded-command timeout option.
    pub const RPC_TIMEOUT: &str = "rpc-timeout";
}

impl ConfigError {
    /// Creates an `InvalidValue` error for the given option.
    #[must_use]
    pub fn invalid(key: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidValue {
            key,
            reason: reason.into(),
        }
    }
}
