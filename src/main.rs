//! coind: coin node daemon
//!
//! Entry point for the coind binary.

use std::panic;
use std::process::ExitCode;

use coind::bootstrap::{self, exit_code};

/// Main entry point.
///
/// Excluded from coverage as it's the thin wrapper around testable components.
#[cfg(not(tarpaulin_include))]
fn main() -> ExitCode {
    // The panic hook has already printed the message; only the exit code is left
    panic::catch_unwind(|| bootstrap::run(std::env::args_os())).unwrap_or(exit_code::FAILURE)
}
