//! Tests for the logging initializer.

use std::path::PathBuf;

use super::*;
use crate::error::ValidationError;

fn file_sink(dir: &std::path::Path) -> SinkSet {
    SinkSet::file_only(LogDestination::from_candidate(dir.join("test.log")))
}

fn read_log(dir: &std::path::Path) -> String {
    std::fs::read_to_string(dir.join("test.log")).unwrap_or_default()
}

mod log_level {
    use super::*;

    #[test]
    fn accepts_bounds() {
        assert_eq!(LogLevel::new(0).unwrap().get(), 0);
        assert_eq!(LogLevel::new(4).unwrap().get(), 4);
    }

    #[test]
    fn rejects_values_outside_range() {
        for value in [-1, 5, 99, i64::MAX, i64::MIN] {
            assert!(
                matches!(
                    LogLevel::new(value),
                    Err(ValidationError::LogLevelOutOfRange { .. })
                ),
                "{value} should be rejected"
            );
        }
    }

    #[test]
    fn error_message_names_value() {
        let err = LogLevel::new(99).unwrap_err();
        assert!(err.to_string().contains("99"));
    }

    #[test]
    fn maps_to_increasing_verbosity() {
        assert_eq!(LogLevel::new(0).unwrap().filter(), LevelFilter::INFO);
        assert_eq!(LogLevel::new(1).unwrap().filter(), LevelFilter::DEBUG);
        assert_eq!(LogLevel::new(4).unwrap().filter(), LevelFilter::TRACE);
    }

    #[test]
    fn default_is_minimum() {
        assert_eq!(LogLevel::default().get(), LogLevel::MIN);
    }
}

mod destination {
    use super::*;

    #[test]
    fn existing_parent_is_used() {
        let dir = tempfile::tempdir().unwrap();
        let candidate = dir.path().join("node.log");

        let destination = LogDestination::from_candidate(candidate.clone());

        assert_eq!(destination.path(), candidate);
        assert!(destination.replaced.is_none());
    }

    #[test]
    fn missing_parent_falls_back_to_platform_default() {
        let dir = tempfile::tempdir().unwrap();
        let candidate = dir.path().join("no-such-dir").join("node.log");

        let destination = LogDestination::from_candidate(candidate.clone());

        assert_eq!(destination.path(), default_log_file());
        assert_eq!(destination.replaced, Some(candidate));
    }

    #[test]
    fn bare_file_name_falls_back_to_platform_default() {
        let destination = LogDestination::from_candidate(PathBuf::from("node.log"));

        assert_eq!(destination.path(), default_log_file());
    }

    #[test]
    fn default_log_file_uses_fixed_name() {
        assert!(default_log_file().ends_with("coind.log"));
    }
}

mod sinks {
    use super::*;

    #[test]
    fn file_only_has_no_console() {
        let dir = tempfile::tempdir().unwrap();
        assert!(!file_sink(dir.path()).console);
    }

    #[test]
    fn with_console_enables_console() {
        let dir = tempfile::tempdir().unwrap();
        let sinks = SinkSet::with_console(LogDestination::from_candidate(dir.path().join("a.log")));

        assert!(sinks.console);
    }
}

mod subscriber {
    use super::*;

    #[test]
    fn file_sink_receives_events() {
        let dir = tempfile::tempdir().unwrap();
        let sinks = file_sink(dir.path());
        let (subscriber, _handle) = build(&sinks, LogLevel::default());

        tracing::subscriber::with_default(subscriber, || {
            tracing::info!("node starting");
        });

        assert!(dir.path().join("test.log").is_file());
        assert!(read_log(dir.path()).contains("node starting"));
    }

    #[test]
    fn level_zero_filters_debug_events() {
        let dir = tempfile::tempdir().unwrap();
        let (subscriber, _handle) = build(&file_sink(dir.path()), LogLevel::default());

        tracing::subscriber::with_default(subscriber, || {
            tracing::debug!("hidden detail");
        });

        assert!(!read_log(dir.path()).contains("hidden detail"));
    }

    #[test]
    fn apply_valid_level_changes_filter() {
        let dir = tempfile::tempdir().unwrap();
        let (subscriber, mut handle) = build(&file_sink(dir.path()), LogLevel::default());

        tracing::subscriber::with_default(subscriber, || {
            let level = handle.apply(1);
            assert_eq!(level.get(), 1);
            tracing::debug!("now visible");
        });

        assert_eq!(handle.level().get(), 1);
        assert!(read_log(dir.path()).contains("now visible"));
    }

    #[test]
    fn apply_out_of_range_level_warns_and_keeps_level() {
        let dir = tempfile::tempdir().unwrap();
        let (subscriber, mut handle) = build(&file_sink(dir.path()), LogLevel::default());

        tracing::subscriber::with_default(subscriber, || {
            let level = handle.apply(99);
            assert_eq!(level, LogLevel::default());
        });

        let log = read_log(dir.path());
        assert_eq!(handle.level(), LogLevel::default());
        assert!(log.contains("WARN"));
        assert!(log.contains("Wrong log level value: 99"));
    }

    #[test]
    fn apply_same_level_is_silent() {
        let dir = tempfile::tempdir().unwrap();
        let (subscriber, mut handle) = build(&file_sink(dir.path()), LogLevel::default());

        tracing::subscriber::with_default(subscriber, || {
            handle.apply(0);
        });

        assert!(!read_log(dir.path()).contains("Log level set"));
    }

    #[test]
    fn fallback_location_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let requested = dir.path().join("missing").join("node.log");
        let mut sinks = file_sink(dir.path());
        sinks.file.replaced = Some(requested);
        let (subscriber, handle) = build(&sinks, LogLevel::default());

        tracing::subscriber::with_default(subscriber, || {
            handle.report_setup(&sinks);
        });

        assert!(read_log(dir.path()).contains("does not exist"));
    }
}
