//! Configuration layer for coind.
//!
//! This module provides:
//! - CLI argument parsing ([`Cli`], [`Invocation`])
//! - TOML configuration file parsing ([`TomlConfig`])
//! - The merged, immutable configuration ([`EffectiveConfig`])
//! - Path rules ([`paths`]) and default values ([`defaults`])
//!
//! # Priority
//!
//! Configuration values are resolved with the following priority (highest to lowest):
//!
//! 1. **Explicit CLI arguments** - Values explicitly passed via command line
//! 2. **TOML config file** - Values from the configuration file
//! 3. **Built-in defaults** - Hardcoded default values
//!
//! For the peer list (`add-peer`), CLI entries **replace** file entries
//! entirely (not merged).
//!
//! # Paths
//!
//! The data directory is resolved first and made absolute. The config file
//! and the log file, when given as relative paths, are resolved against the
//! data directory and never against the working directory.
//!
//! # Invocation-Only Options
//!
//! `data-dir`, `config-file`, `detach`, the help and system-query flags and
//! the hidden service marker are accepted on the command line only. Writing
//! them in the config file is an unknown-key error.

mod cli;
pub mod defaults;
mod effective;
mod error;
pub mod paths;
mod toml;

#[cfg(test)]
mod effective_tests;
#[cfg(test)]
mod toml_tests;

pub use cli::{Cli, Invocation};
pub use effective::{EffectiveConfig, Endpoint};
pub use error::{ConfigError, key};
pub use toml::{PortValue, TomlConfig};
