//! Errors shared across components.

use thiserror::Error;

/// A value failed a local check before any side effect was attempted.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// The host is not a dotted IPv4 literal.
    #[error("Invalid IP: {value}")]
    InvalidHost {
        /// Host as configured
        value: String,
    },

    /// The port is not an integer in `1..=65535`.
    #[error("Invalid port: {value}")]
    InvalidPort {
        /// Port as configured
        value: String,
    },

    /// A log level outside the supported range.
    #[error("Wrong log level value: {value} (expected {min}..={max})")]
    LogLevelOutOfRange {
        /// Requested level
        value: i64,
        /// Lowest accepted level
        min: u8,
        /// Highest accepted level
        max: u8,
    },
}
