//! Unix fork and session detach using `nix`.

use std::fs::OpenOptions;
use std::os::fd::AsRawFd;

use nix::unistd::{self, ForkResult};

use super::{ForkOutcome, Forker, LifecycleError};

/// [`Forker`] backed by `fork(2)`, `setsid(2)` and `dup2(2)`.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemForker;

impl Forker for SystemForker {
    fn fork(&self) -> Result<ForkOutcome, LifecycleError> {
        // SAFETY: the bootstrap is single-threaded here. No async runtime or
        // worker thread exists yet, and the log file writer is synchronous.
        match unsafe { unistd::fork() } {
            Ok(ForkResult::Parent { child }) => Ok(ForkOutcome::Parent {
                child: child.as_raw(),
            }),
            Ok(ForkResult::Child) => Ok(ForkOutcome::Child),
            Err(e) => Err(LifecycleError::Fork(e.into())),
        }
    }

    fn detach(&self) -> Result<(), LifecycleError> {
        unistd::setsid().map_err(|e| LifecycleError::Detach(e.into()))?;

        let null = OpenOptions::new()
            .read(true)
            .write(true)
            .open("/dev/null")
            .map_err(LifecycleError::Detach)?;

        for fd in 0..=2 {
            unistd::dup2(null.as_raw_fd(), fd).map_err(|e| LifecycleError::Detach(e.into()))?;
        }

        std::env::set_current_dir("/").map_err(LifecycleError::Detach)?;

        tracing::debug!("Detached from terminal");
        Ok(())
    }
}
