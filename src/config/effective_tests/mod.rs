//! Tests for the effective configuration.

use std::path::{Path, PathBuf};
use std::time::Duration;

use super::ConfigError;
use super::cli::Cli;
use super::effective::EffectiveConfig;
use super::toml::TomlConfig;

/// Helper to create CLI args from a slice
fn cli(args: &[&str]) -> Cli {
    let mut full_args = vec!["coind"];
    full_args.extend(args);
    Cli::parse_from_iter(full_args)
}

/// Helper to parse TOML config
fn toml(content: &str) -> TomlConfig {
    TomlConfig::parse(content).unwrap()
}

/// Fixed absolute data directory for pure merge tests
fn data_dir() -> PathBuf {
    if cfg!(windows) {
        PathBuf::from(r"C:\coind-data")
    } else {
        PathBuf::from("/srv/coind-data")
    }
}

mod loading_tests;
