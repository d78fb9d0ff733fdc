//! Service-managed lifecycle: detaching means registering this program with
//! the host service manager and letting it start a relaunch.

use super::{LifecycleError, NodeLaunch, Outcome, PlatformLifecycle, RunMode, ServiceLaunch};

/// The host service manager's operations used by [`ServiceLifecycle`].
pub trait ServiceManager {
    /// Registers a service that starts `launch`.
    ///
    /// # Errors
    ///
    /// Returns [`LifecycleError::ServiceInstall`] on failure.
    fn install(&self, name: &str, launch: &ServiceLaunch) -> Result<(), LifecycleError>;

    /// Starts a registered service.
    ///
    /// # Errors
    ///
    /// Returns [`LifecycleError::ServiceStart`] on failure.
    fn start(&self, name: &str) -> Result<(), LifecycleError>;

    /// Removes a service registration.
    ///
    /// # Errors
    ///
    /// Returns [`LifecycleError::ServiceUninstall`] on failure.
    fn uninstall(&self, name: &str) -> Result<(), LifecycleError>;

    /// Connects the current process to the service manager as service
    /// `name` and runs the node until the manager stops it.
    ///
    /// # Errors
    ///
    /// Returns [`LifecycleError::ServiceDispatch`] if the process was not
    /// started by the manager, or the node's error.
    fn run_dispatcher(&self, name: &str, launch: NodeLaunch) -> Result<(), LifecycleError>;
}

/// Lifecycle for hosts where background processes are services.
#[derive(Debug)]
pub struct ServiceLifecycle<M> {
    manager: M,
    name: String,
    relaunch: ServiceLaunch,
}

impl<M: ServiceManager> ServiceLifecycle<M> {
    /// Creates a lifecycle registering service `name` as `relaunch`.
    #[must_use]
    pub fn new(manager: M, name: impl Into<String>, relaunch: ServiceLaunch) -> Self {
        Self {
            manager,
            name: name.into(),
            relaunch,
        }
    }

    /// Installs and starts the service. A service that installs but fails
    /// to start is uninstalled again before the start error is returned.
    fn detach(&self) -> Result<Outcome, LifecycleError> {
        tracing::debug!(
            "Installing service '{}' as {}",
            self.name,
            self.relaunch.command_line()
        );
        self.manager.install(&self.name, &self.relaunch)?;

        if let Err(e) = self.manager.start(&self.name) {
            tracing::warn!("Service '{}' did not start, uninstalling", self.name);
            if let Err(rollback) = self.manager.uninstall(&self.name) {
                tracing::error!("{rollback}");
            }
            return Err(e);
        }

        tracing::info!("Service '{}' installed and started", self.name);
        Ok(Outcome::HandedOff)
    }
}

impl<M: ServiceManager> PlatformLifecycle for ServiceLifecycle<M> {
    fn transition(&self, mode: RunMode, launch: NodeLaunch) -> Result<Outcome, LifecycleError> {
        match mode {
            RunMode::Interactive => super::run_foreground(launch),
            RunMode::Detach => self.detach(),
            RunMode::Service => {
                self.manager.run_dispatcher(&self.name, launch)?;
                Ok(Outcome::Stopped)
            }
        }
    }
}
