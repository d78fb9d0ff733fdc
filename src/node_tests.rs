//! Tests for the node runtime seam.

use std::path::PathBuf;
use std::thread;
use std::time::Duration;

use super::*;
use crate::config::Cli;

fn config() -> EffectiveConfig {
    let cli = Cli::parse_from_iter(["coind"]);
    EffectiveConfig::from_sources(&cli, PathBuf::from("/srv/coind-data"), None).unwrap()
}

mod shutdown {
    use super::*;

    #[tokio::test]
    async fn requested_completes_after_trigger() {
        let (trigger, shutdown) = Shutdown::requested();
        trigger.trigger();

        shutdown.wait().await.unwrap();
    }

    #[tokio::test]
    async fn dropped_trigger_counts_as_stop() {
        let (trigger, shutdown) = Shutdown::requested();
        drop(trigger);

        shutdown.wait().await.unwrap();
    }

    #[tokio::test]
    async fn requested_waits_for_trigger() {
        let (trigger, shutdown) = Shutdown::requested();

        let pending = tokio::time::timeout(Duration::from_millis(50), shutdown.wait()).await;

        assert!(pending.is_err(), "shutdown completed without a trigger");
        drop(trigger);
    }
}

mod standby_node {
    use super::*;

    #[test]
    fn stops_when_triggered_from_another_thread() {
        let (trigger, shutdown) = Shutdown::requested();
        let stopper = thread::spawn(move || {
            thread::sleep(Duration::from_millis(20));
            trigger.trigger();
        });

        StandbyNode.run(&config(), shutdown).unwrap();

        stopper.join().unwrap();
    }

    #[test]
    fn is_object_safe_and_send() {
        fn assert_send<T: Send>(_: &T) {}
        let node: Box<dyn NodeRuntime> = Box::new(StandbyNode);
        assert_send(&node);
    }
}

mod node_error {
    use super::*;

    #[test]
    fn signal_error_names_the_signal() {
        let error = NodeError::Signal {
            signal: "SIGTERM",
            source: io::Error::other("denied"),
        };

        assert_eq!(
            error.to_string(),
            "Failed to install SIGTERM handler: denied"
        );
    }

    #[test]
    fn runtime_error_displays_source() {
        let error = NodeError::Runtime(io::Error::other("no threads"));
        assert!(error.to_string().contains("no threads"));
    }
}
