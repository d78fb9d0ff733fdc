//! Bounded integer log level.

use std::fmt;

use tracing::level_filters::LevelFilter;

use crate::error::ValidationError;

/// Log verbosity in the closed range [`LogLevel::MIN`]..=[`LogLevel::MAX`].
///
/// Level 0 logs essential information only; each step adds detail.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub struct LogLevel(u8);

impl LogLevel {
    /// Lowest accepted level.
    pub const MIN: u8 = 0;
    /// Highest accepted level.
    pub const MAX: u8 = 4;

    /// Validates a requested level.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::LogLevelOutOfRange`] when `value` is outside
    /// the supported range.
    pub fn new(value: i64) -> Result<Self, ValidationError> {
        u8::try_from(value)
            .ok()
            .filter(|v| (Self::MIN..=Self::MAX).contains(v))
            .map(Self)
            .ok_or(ValidationError::LogLevelOutOfRange {
                value,
                min: Self::MIN,
                max: Self::MAX,
            })
    }

    /// Returns the numeric level.
    #[must_use]
    pub const fn get(self) -> u8 {
        self.0
    }

    /// Maps the level onto a `tracing` filter.
    #[must_use]
    pub const fn filter(self) -> LevelFilter {
        match self.0 {
            0 => LevelFilter::INFO,
            1 => LevelFilter::DEBUG,
            _ => LevelFilter::TRACE,
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
