//! Filesystem path rules shared by the resolver and the logging initializer.

use std::io;
use std::path::{Path, PathBuf};

use super::defaults;

/// Returns the platform default data directory.
///
/// - Windows / macOS: `<platform data dir>/coind`
/// - Other platforms: `~/.coind`
///
/// Falls back to `.coind` in the working directory when no home directory
/// can be determined.
#[must_use]
pub fn default_data_dir() -> PathBuf {
    if cfg!(any(windows, target_os = "macos")) {
        if let Some(dir) = dirs::data_dir() {
            return dir.join(defaults::DATA_DIR_NAME);
        }
    } else if let Some(home) = dirs::home_dir() {
        return home.join(defaults::HIDDEN_DATA_DIR_NAME);
    }

    PathBuf::from(defaults::HIDDEN_DATA_DIR_NAME)
}

/// Expands a leading `~` to the home directory.
///
/// Paths that do not start with `~`, or hosts without a home directory,
/// are returned unchanged.
#[must_use]
pub fn expand_tilde(path: &Path) -> PathBuf {
    let Ok(rest) = path.strip_prefix("~") else {
        return path.to_path_buf();
    };

    dirs::home_dir().map_or_else(|| path.to_path_buf(), |home| home.join(rest))
}

/// Makes the data directory absolute.
///
/// This is the only path resolved against the process working directory.
///
/// # Errors
///
/// Returns an error if the working directory cannot be determined.
pub fn absolute_data_dir(path: &Path) -> io::Result<PathBuf> {
    std::path::absolute(expand_tilde(path))
}

/// Resolves `path` against `data_dir` when it is relative.
///
/// Absolute and `~`-prefixed paths are not joined with the data directory.
#[must_use]
pub fn resolve_against(data_dir: &Path, path: &Path) -> PathBuf {
    let path = expand_tilde(path);
    if path.is_relative() {
        data_dir.join(path)
    } else {
        path
    }
}
