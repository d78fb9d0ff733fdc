//! Tests for TOML configuration parsing.

use std::path::PathBuf;

use super::ConfigError;
use super::toml::{PortValue, TomlConfig};

mod parsing {
    use super::*;

    #[test]
    fn parse_empty_config() {
        let config = TomlConfig::parse("").unwrap();

        assert!(config.log_file.is_none());
        assert!(config.log_level.is_none());
        assert!(config.add_peer.is_empty());
        assert!(!config.hide_my_port);
    }

    #[test]
    fn parse_full_config() {
        let toml = r#"
            log-file = "logs/coind.log"
            log-level = 2
            rpc-bind-ip = "127.0.0.1"
            rpc-bind-port = 28081
            p2p-bind-ip = "0.0.0.0"
            p2p-bind-port = "28080"
            add-peer = ["1.2.3.4:18080", "5.6.7.8:18080"]
            hide-my-port = true
            rpc-timeout = 30
        "#;

        let config = TomlConfig::parse(toml).unwrap();

        assert_eq!(config.log_file, Some(PathBuf::from("logs/coind.log")));
        assert_eq!(config.log_level, Some(2));
        assert_eq!(config.rpc_bind_ip.as_deref(), Some("127.0.0.1"));
        assert_eq!(config.rpc_bind_port, Some(PortValue::Number(28081)));
        assert_eq!(
            config.p2p_bind_port,
            Some(PortValue::Text("28080".to_string()))
        );
        assert_eq!(config.add_peer.len(), 2);
        assert!(config.hide_my_port);
        assert_eq!(config.rpc_timeout, Some(30));
    }

    #[test]
    fn comments_are_ignored() {
        let toml = r"
            # verbosity
            log-level = 1 # inline
        ";

        let config = TomlConfig::parse(toml).unwrap();
        assert_eq!(config.log_level, Some(1));
    }
}

mod port_value {
    use super::*;

    #[test]
    fn number_displays_as_digits() {
        assert_eq!(PortValue::Number(18081).to_string(), "18081");
    }

    #[test]
    fn text_displays_verbatim() {
        assert_eq!(PortValue::Text("abc".to_string()).to_string(), "abc");
    }
}

mod errors {
    use super::*;

    #[test]
    fn unknown_key_is_rejected() {
        let result = TomlConfig::parse("no-such-key = 1");
        assert!(result.is_err());
    }

    #[test]
    fn invocation_only_keys_are_rejected() {
        assert!(TomlConfig::parse(r#"data-dir = "/tmp""#).is_err());
        assert!(TomlConfig::parse(r#"config-file = "x.toml""#).is_err());
        assert!(TomlConfig::parse("detach = true").is_err());
    }

    #[test]
    fn sections_are_rejected() {
        let result = TomlConfig::parse("[rpc]\nbind-ip = \"127.0.0.1\"");
        assert!(result.is_err());
    }

    #[test]
    fn malformed_syntax_is_rejected() {
        let result = TomlConfig::parse("log-level = = 3");
        assert!(result.is_err());
    }

    #[test]
    fn wrong_type_is_rejected() {
        let result = TomlConfig::parse(r#"log-level = "verbose""#);
        assert!(result.is_err());
    }

    #[test]
    fn load_missing_file_reports_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.toml");

        let err = TomlConfig::load(&path).unwrap_err();

        assert!(matches!(err, ConfigError::FileRead { .. }));
        assert!(err.to_string().contains("absent.toml"));
    }

    #[test]
    fn load_malformed_file_reports_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.toml");
        std::fs::write(&path, "log-level = [").unwrap();

        let err = TomlConfig::load(&path).unwrap_err();

        assert!(matches!(err, ConfigError::FileParse { .. }));
        assert!(err.to_string().contains("broken.toml"));
    }
}
