//! Default values for configuration options.
//!
//! Centralized constants to avoid magic numbers scattered across the codebase.

/// Default configuration file name, resolved against the data directory.
pub const CONFIG_FILE: &str = "coind.toml";

/// Default log file name, resolved against the data directory.
pub const LOG_FILE: &str = "coind.log";

/// Directory name used under the platform data directory.
pub const DATA_DIR_NAME: &str = "coind";

/// Hidden directory name used under the home directory on Unix-like systems.
pub const HIDDEN_DATA_DIR_NAME: &str = ".coind";

/// Log level every process starts with before the requested level is applied.
pub const LOG_LEVEL: i64 = 0;

/// Default bind address of the control (RPC) endpoint.
pub const RPC_BIND_IP: &str = "127.0.0.1";

/// Default port of the control (RPC) endpoint.
pub const RPC_BIND_PORT: &str = "18081";

/// Default bind address of the peer-to-peer listener.
pub const P2P_BIND_IP: &str = "0.0.0.0";

/// Default port of the peer-to-peer listener.
pub const P2P_BIND_PORT: &str = "18080";

/// Default timeout for a forwarded command, in seconds.
pub const RPC_TIMEOUT_SECS: u64 = 10;

/// Display name registered with the host service manager.
pub const SERVICE_NAME: &str = "Coin Daemon";
