//! What a lifecycle transition starts: the node in this process, or this
//! program again under the host service manager.

use std::ffi::{OsStr, OsString};
use std::path::PathBuf;

use super::LifecycleError;
use crate::config::EffectiveConfig;
use crate::node::{NodeError, NodeRuntime, Shutdown};

/// Option appended to a relaunch so the new process runs as a service.
pub const SERVICE_MARKER: &str = "--run-as-service";

/// A node ready to run, paired with the configuration it runs with.
pub struct NodeLaunch {
    runtime: Box<dyn NodeRuntime>,
    config: EffectiveConfig,
}

impl std::fmt::Debug for NodeLaunch {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NodeLaunch")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl NodeLaunch {
    /// Pairs a runtime with its configuration.
    #[must_use]
    pub fn new(runtime: impl NodeRuntime + 'static, config: EffectiveConfig) -> Self {
        Self {
            runtime: Box::new(runtime),
            config,
        }
    }

    /// Runs the node on the calling thread until `shutdown` fires.
    ///
    /// # Errors
    ///
    /// Returns the node's error if it fails to start or while running.
    pub fn run(mut self, shutdown: Shutdown) -> Result<(), NodeError> {
        self.runtime.run(&self.config, shutdown)
    }
}

// Path options rewritten to the resolved paths in a relaunch
const DATA_DIR: &str = "--data-dir";
const CONFIG_FILE: &str = "--config-file";
const LOG_FILE: &str = "--log-file";

/// How the host service manager relaunches this program.
///
/// The service starts under another account and working directory, so
/// path options are pinned to the absolute paths this invocation resolved.
/// Every other argument is kept in its original order and
/// [`SERVICE_MARKER`] is appended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceLaunch {
    program: PathBuf,
    args: Vec<OsString>,
}

impl ServiceLaunch {
    /// Builds a relaunch of `program` from the original `args` and the
    /// configuration they resolved to.
    #[must_use]
    pub fn relaunch<I, T>(program: impl Into<PathBuf>, args: I, config: &EffectiveConfig) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString>,
    {
        let mut pinned: Vec<OsString> = vec![
            DATA_DIR.into(),
            config.data_dir.clone().into(),
            CONFIG_FILE.into(),
            config.config_file.clone().into(),
        ];
        let mut kept: Vec<OsString> = Vec::new();
        let mut log_file_given = false;

        let mut args = args.into_iter().map(Into::<OsString>::into);
        while let Some(arg) = args.next() {
            if arg == SERVICE_MARKER {
                continue;
            }

            match path_option(&arg) {
                Some((option, inline)) => {
                    log_file_given |= option == LOG_FILE;
                    if !inline {
                        args.next();
                    }
                }
                None => kept.push(arg),
            }
        }

        if log_file_given {
            pinned.push(LOG_FILE.into());
            pinned.push(config.log_file_path().into());
        }

        pinned.extend(kept);
        pinned.push(SERVICE_MARKER.into());

        Self {
            program: program.into(),
            args: pinned,
        }
    }

    /// Builds a relaunch of the running executable.
    ///
    /// # Errors
    ///
    /// Returns [`LifecycleError::ProgramPath`] if the executable path is
    /// unknown.
    pub fn current<I, T>(args: I, config: &EffectiveConfig) -> Result<Self, LifecycleError>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString>,
    {
        let program = std::env::current_exe().map_err(LifecycleError::ProgramPath)?;
        Ok(Self::relaunch(program, args, config))
    }

    /// Renders a Windows command line that `CommandLineToArgvW` splits back
    /// into the program and the same arguments.
    #[must_use]
    pub fn command_line(&self) -> String {
        let mut line = String::new();
        push_quoted(&mut line, self.program.as_os_str(), true);

        for arg in &self.args {
            line.push(' ');
            push_quoted(&mut line, arg, false);
        }

        line
    }
}

/// Matches `--opt VALUE` (inline `false`) or `--opt=VALUE` (inline `true`)
/// for the path options.
fn path_option(arg: &OsStr) -> Option<(&'static str, bool)> {
    let arg = arg.to_str()?;

    [DATA_DIR, CONFIG_FILE, LOG_FILE].into_iter().find_map(|option| {
        let rest = arg.strip_prefix(option)?;
        match rest.chars().next() {
            None => Some((option, false)),
            Some('=') => Some((option, true)),
            Some(_) => None,
        }
    })
}

fn push_quoted(line: &mut String, arg: &OsStr, force: bool) {
    let arg = arg.to_string_lossy();

    if !force && !arg.is_empty() && !arg.contains([' ', '\t', '\n', '"']) {
        line.push_str(&arg);
        return;
    }

    line.push('"');
    let mut backslashes = 0;
    for c in arg.chars() {
        match c {
            '\\' => backslashes += 1,
            '"' => {
                // Backslashes before a quote are doubled and the quote escaped
                push_backslashes(line, backslashes * 2 + 1);
                line.push('"');
                backslashes = 0;
            }
            _ => {
                push_backslashes(line, backslashes);
                line.push(c);
                backslashes = 0;
            }
        }
    }
    push_backslashes(line, backslashes * 2);
    line.push('"');
}

fn push_backslashes(line: &mut String, count: usize) {
    line.extend(std::iter::repeat_n('\\', count));
}
