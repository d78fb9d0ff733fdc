//! Logging initializer.
//!
//! Builds the process-wide `tracing` subscriber from a [`SinkSet`]: a file
//! sink that is always present, plus a console sink for interactive runs.
//! The active level sits behind a reload layer so the requested level can
//! be applied (or rejected) after the subscriber is installed.
//!
//! Nothing may log through `tracing` before [`init`] returns; earlier
//! failures are reported on stderr by the caller.

mod destination;
mod level;

#[cfg(test)]
mod logging_tests;

use std::io::{self, IsTerminal};

use thiserror::Error;
use tracing::Subscriber;
use tracing::level_filters::LevelFilter;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::{Registry, fmt, reload};

pub use destination::{LogDestination, default_log_file};
pub use level::LogLevel;

/// Error type for logging setup.
#[derive(Debug, Error)]
pub enum LoggingError {
    /// A global subscriber was already installed.
    #[error("failed to install logging subscriber: {0}")]
    Subscriber(#[from] tracing::subscriber::SetGlobalDefaultError),
}

/// The set of active log outputs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SinkSet {
    /// File sink location
    pub file: LogDestination,
    /// Whether events are also written to the console (stderr)
    pub console: bool,
}

impl SinkSet {
    /// File sink only, for detached and service runs.
    #[must_use]
    pub const fn file_only(file: LogDestination) -> Self {
        Self {
            file,
            console: false,
        }
    }

    /// File and console sinks, for interactive runs.
    #[must_use]
    pub const fn with_console(file: LogDestination) -> Self {
        Self {
            file,
            console: true,
        }
    }
}

/// Handle to the installed logging context.
///
/// Holds the current level and the reload handle used to change it.
pub struct LogHandle {
    level: LogLevel,
    reload: reload::Handle<LevelFilter, Registry>,
    file_error: Option<String>,
}

impl std::fmt::Debug for LogHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LogHandle")
            .field("level", &self.level)
            .field("file_error", &self.file_error)
            .finish_non_exhaustive()
    }
}

impl LogHandle {
    /// Currently active level.
    #[must_use]
    pub const fn level(&self) -> LogLevel {
        self.level
    }

    /// Reports sink degradations: a fallback log location or a file sink
    /// that could not be opened.
    pub fn report_setup(&self, sinks: &SinkSet) {
        if let Some(requested) = &sinks.file.replaced {
            tracing::warn!(
                "Log directory for {} does not exist, logging to {}",
                requested.display(),
                sinks.file.path().display()
            );
        }

        if let Some(e) = &self.file_error {
            tracing::warn!(
                "File logging disabled, cannot open {}: {e}",
                sinks.file.path().display()
            );
        }
    }

    /// Applies a requested level.
    ///
    /// An out-of-range request is reported as a warning and leaves the
    /// current level unchanged. Returns the level in effect afterwards.
    pub fn apply(&mut self, requested: i64) -> LogLevel {
        let level = match LogLevel::new(requested) {
            Ok(level) => level,
            Err(e) => {
                tracing::warn!("{e}");
                return self.level;
            }
        };

        if level == self.level {
            return self.level;
        }

        match self.reload.modify(|filter| *filter = level.filter()) {
            Ok(()) => {
                self.level = level;
                tracing::info!("Log level set to {level}");
            }
            Err(e) => tracing::warn!("Failed to change log level: {e}"),
        }

        self.level
    }
}

/// Builds the subscriber without installing it.
///
/// A log file that cannot be opened is not fatal: the subscriber is built
/// without the file sink and [`LogHandle::report_setup`] warns about it.
#[must_use]
pub fn build(sinks: &SinkSet, level: LogLevel) -> (Box<dyn Subscriber + Send + Sync>, LogHandle) {
    let (filter, reload) = reload::Layer::new(level.filter());

    let appender = RollingFileAppender::builder()
        .rotation(Rotation::NEVER)
        .filename_prefix(sinks.file.file_name.to_string_lossy())
        .build(&sinks.file.directory);

    let (file_layer, file_error) = match appender {
        Ok(appender) => (Some(fmt::layer().with_writer(appender).with_ansi(false)), None),
        Err(e) => (None, Some(e.to_string())),
    };

    let console_layer = sinks.console.then(|| {
        fmt::layer()
            .with_target(false)
            .with_writer(io::stderr)
            .with_ansi(io::stderr().is_terminal())
    });

    let subscriber = Registry::default()
        .with(filter)
        .with(file_layer)
        .with(console_layer);

    let handle = LogHandle {
        level,
        reload,
        file_error,
    };

    (Box::new(subscriber), handle)
}

/// Installs the process-wide logging context.
///
/// # Errors
///
/// Returns an error if a global subscriber is already installed.
pub fn init(sinks: &SinkSet, level: LogLevel) -> Result<LogHandle, LoggingError> {
    let (subscriber, handle) = build(sinks, level);
    tracing::subscriber::set_global_default(subscriber)?;
    handle.report_setup(sinks);

    Ok(handle)
}
