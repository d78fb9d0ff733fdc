//! The node runtime seam.
//!
//! The bootstrap never runs consensus, storage or the RPC server itself; it
//! hands an [`EffectiveConfig`] to a [`NodeRuntime`] and tells it when to
//! stop through a [`Shutdown`].

use std::io;

use thiserror::Error;
use tokio::signal;
use tokio::sync::watch;

use crate::config::EffectiveConfig;

#[cfg(test)]
#[path = "node_tests.rs"]
mod tests;

/// Error type for node runtime failures.
#[derive(Debug, Error)]
pub enum NodeError {
    /// The async runtime backing the node could not be built.
    #[error("Failed to start node runtime: {0}")]
    Runtime(#[source] io::Error),

    /// A shutdown signal handler could not be installed.
    #[error("Failed to install {signal} handler: {source}")]
    Signal {
        /// Signal name
        signal: &'static str,
        /// Underlying error
        #[source]
        source: io::Error,
    },
}

/// When a running node should stop.
#[derive(Debug)]
pub enum Shutdown {
    /// Stop on Ctrl+C, or SIGTERM on Unix.
    OsSignal,
    /// Stop when the paired [`ShutdownTrigger`] fires or is dropped.
    Requested(watch::Receiver<bool>),
}

/// Sending half of [`Shutdown::Requested`].
#[derive(Debug, Clone)]
pub struct ShutdownTrigger(watch::Sender<bool>);

impl ShutdownTrigger {
    /// Asks the paired node to stop.
    pub fn trigger(&self) {
        self.0.send_replace(true);
    }
}

impl Shutdown {
    /// Creates a shutdown that fires on request, e.g. from a service
    /// manager's stop control.
    #[must_use]
    pub fn requested() -> (ShutdownTrigger, Self) {
        let (tx, rx) = watch::channel(false);
        (ShutdownTrigger(tx), Self::Requested(rx))
    }

    /// Waits until shutdown is due.
    ///
    /// # Errors
    ///
    /// Returns an error if an OS signal handler cannot be installed.
    pub async fn wait(self) -> Result<(), NodeError> {
        match self {
            Self::OsSignal => os_signal().await,
            Self::Requested(mut rx) => {
                // A dropped trigger can never fire, so treat it as a stop
                let _ = rx.wait_for(|stop| *stop).await;
                Ok(())
            }
        }
    }
}

/// Waits for Ctrl+C or, on Unix, SIGTERM.
async fn os_signal() -> Result<(), NodeError> {
    #[cfg(unix)]
    let mut sigterm = signal::unix::signal(signal::unix::SignalKind::terminate()).map_err(
        |source| NodeError::Signal {
            signal: "SIGTERM",
            source,
        },
    )?;

    #[cfg(unix)]
    let terminate = sigterm.recv();

    #[cfg(not(unix))]
    let terminate = std::future::pending::<Option<()>>();

    tokio::select! {
        result = signal::ctrl_c() => result.map_err(|source| NodeError::Signal {
            signal: "Ctrl+C",
            source,
        }),
        _ = terminate => Ok(()),
    }
}

/// A node that can be started by the lifecycle manager.
///
/// `run` blocks the calling thread until `shutdown` fires or the node
/// fails. Implementations build their own async runtime: the lifecycle
/// manager may fork before calling it, so none may exist beforehand.
pub trait NodeRuntime: Send {
    /// Runs the node until shutdown.
    ///
    /// # Errors
    ///
    /// Returns an error if the node cannot start or fails while running.
    fn run(&mut self, config: &EffectiveConfig, shutdown: Shutdown) -> Result<(), NodeError>;
}

/// Node runtime used when no real node is linked in.
///
/// Reports the resolved settings and idles until shutdown.
#[derive(Debug, Clone, Copy, Default)]
pub struct StandbyNode;

impl NodeRuntime for StandbyNode {
    fn run(&mut self, config: &EffectiveConfig, shutdown: Shutdown) -> Result<(), NodeError> {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(NodeError::Runtime)?;

        tracing::info!("coind v{} starting", env!("CARGO_PKG_VERSION"));
        tracing::info!("{config}");
        tracing::debug!(
            "Control endpoint {}, p2p listener {}, {} startup peer(s)",
            config.rpc,
            config.p2p,
            config.add_peers.len()
        );

        runtime.block_on(shutdown.wait())?;

        tracing::info!("Shutdown requested, node stopped");
        Ok(())
    }
}
