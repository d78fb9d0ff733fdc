//! Error types for forwarded commands.

use thiserror::Error;

use crate::error::ValidationError;

/// Error type for HTTP operations.
///
/// Describes what went wrong at the transport level.
#[derive(Debug, Error)]
pub enum HttpError {
    /// Network connection failed.
    ///
    /// This includes DNS resolution failures, connection refused,
    /// and other network-level errors.
    #[error("Connection error: {0}")]
    Connection(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// Request timed out.
    #[error("Request timed out")]
    Timeout,

    /// The provided URL is invalid.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),
}

/// The control endpoint could not be reached or answered unusably.
///
/// Fatal for the invocation; never retried.
#[derive(Debug, Error)]
pub enum NetworkError {
    /// Connection refused, unreachable, or timed out.
    #[error("Failed to reach daemon at {target}: {source}")]
    Unreachable {
        /// Target as `ip:port`
        target: String,
        /// Transport error
        #[source]
        source: HttpError,
    },

    /// The endpoint answered with a non-success status.
    #[error("Daemon at {target} answered with status {status}")]
    Status {
        /// Target as `ip:port`
        target: String,
        /// Status code received
        status: http::StatusCode,
    },

    /// The reply body was not a valid command reply.
    #[error("Malformed reply from daemon at {target}: {source}")]
    MalformedReply {
        /// Target as `ip:port`
        target: String,
        /// Decoding error
        #[source]
        source: serde_json::Error,
    },
}

/// Error type for forwarding a command to a running instance.
#[derive(Debug, Error)]
pub enum CommandError {
    /// The target address failed local validation; nothing was sent.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Transport or protocol failure.
    #[error(transparent)]
    Network(#[from] NetworkError),

    /// The running instance does not recognize the command.
    #[error("Unknown command: {command}")]
    UnknownCommand {
        /// The command as typed, tokens joined with spaces
        command: String,
    },

    /// The command could not be encoded as a request body.
    #[error("Failed to encode command: {0}")]
    Encode(#[source] serde_json::Error),

    /// No command tokens were given.
    #[error("No command to forward")]
    EmptyCommand,
}
