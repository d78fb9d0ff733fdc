//! Log file location with fallback to a platform default.

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use crate::config::{EffectiveConfig, defaults};

/// Where the file sink writes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogDestination {
    /// Directory holding the log file
    pub directory: PathBuf,
    /// File name inside `directory`
    pub file_name: OsString,
    /// The requested path, when it was unusable and the default was taken
    pub replaced: Option<PathBuf>,
}

impl LogDestination {
    /// Resolves the destination from the effective configuration.
    #[must_use]
    pub fn resolve(config: &EffectiveConfig) -> Self {
        Self::from_candidate(config.log_file_path())
    }

    /// Uses `candidate` if its parent directory exists, else the platform
    /// default log file.
    #[must_use]
    pub fn from_candidate(candidate: PathBuf) -> Self {
        match split(&candidate) {
            Some((directory, file_name)) if directory.is_dir() => Self {
                directory,
                file_name,
                replaced: None,
            },
            _ => {
                let fallback = default_log_file();
                let (directory, file_name) = split(&fallback).unwrap_or_else(|| {
                    (std::env::temp_dir(), OsString::from(defaults::LOG_FILE))
                });
                Self {
                    directory,
                    file_name,
                    replaced: Some(candidate),
                }
            }
        }
    }

    /// Full path of the log file.
    #[must_use]
    pub fn path(&self) -> PathBuf {
        self.directory.join(&self.file_name)
    }
}

/// Returns the platform default log file.
///
/// This is `coind.log` next to the running executable, or in the temporary
/// directory when the executable location is unknown.
#[must_use]
pub fn default_log_file() -> PathBuf {
    std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(Path::to_path_buf))
        .unwrap_or_else(std::env::temp_dir)
        .join(defaults::LOG_FILE)
}

fn split(path: &Path) -> Option<(PathBuf, OsString)> {
    let file_name = path.file_name()?.to_os_string();
    let directory = path.parent().filter(|p| !p.as_os_str().is_empty())?;
    Some((directory.to_path_buf(), file_name))
}
