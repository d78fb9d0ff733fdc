//! Tests for loading configuration from disk.

use super::*;

fn data_dir_arg(dir: &Path) -> Vec<String> {
    vec![
        "coind".to_string(),
        "--data-dir".to_string(),
        dir.display().to_string(),
    ]
}

#[test]
fn load_creates_missing_data_dir() {
    let temp = tempfile::tempdir().unwrap();
    let data = temp.path().join("nested").join("data");
    let cli = Cli::parse_from_iter(data_dir_arg(&data));

    let config = EffectiveConfig::load(&cli).unwrap();

    assert!(data.is_dir());
    assert_eq!(config.data_dir, data);
}

#[test]
fn load_is_idempotent_for_existing_data_dir() {
    let temp = tempfile::tempdir().unwrap();
    let cli = Cli::parse_from_iter(data_dir_arg(temp.path()));

    EffectiveConfig::load(&cli).unwrap();
    let second = EffectiveConfig::load(&cli);

    assert!(second.is_ok());
}

#[test]
fn load_without_config_file_uses_defaults() {
    let temp = tempfile::tempdir().unwrap();
    let cli = Cli::parse_from_iter(data_dir_arg(temp.path()));

    let config = EffectiveConfig::load(&cli).unwrap();

    assert!(!config.config_file_loaded);
    assert_eq!(config.log_level, 0);
}

#[test]
fn load_reads_default_config_file_from_data_dir() {
    let temp = tempfile::tempdir().unwrap();
    std::fs::write(temp.path().join("coind.toml"), "log-level = 3\n").unwrap();
    let cli = Cli::parse_from_iter(data_dir_arg(temp.path()));

    let config = EffectiveConfig::load(&cli).unwrap();

    assert!(config.config_file_loaded);
    assert_eq!(config.log_level, 3);
}

#[test]
fn load_reads_relative_config_file_from_data_dir_not_cwd() {
    let temp = tempfile::tempdir().unwrap();
    std::fs::create_dir(temp.path().join("conf")).unwrap();
    std::fs::write(temp.path().join("conf").join("alt.toml"), "log-level = 2\n").unwrap();
    let mut args = data_dir_arg(temp.path());
    args.extend(["--config-file".to_string(), "conf/alt.toml".to_string()]);

    let config = EffectiveConfig::load(&Cli::parse_from_iter(args)).unwrap();

    assert_eq!(config.config_file, temp.path().join("conf").join("alt.toml"));
    assert_eq!(config.log_level, 2);
}

#[test]
fn load_cli_overrides_file() {
    let temp = tempfile::tempdir().unwrap();
    std::fs::write(temp.path().join("coind.toml"), "log-level = 3\n").unwrap();
    let mut args = data_dir_arg(temp.path());
    args.extend(["--log-level".to_string(), "1".to_string()]);

    let config = EffectiveConfig::load(&Cli::parse_from_iter(args)).unwrap();

    assert_eq!(config.log_level, 1);
}

#[test]
fn load_malformed_file_is_fatal() {
    let temp = tempfile::tempdir().unwrap();
    std::fs::write(temp.path().join("coind.toml"), "log-level = = 3\n").unwrap();
    let cli = Cli::parse_from_iter(data_dir_arg(temp.path()));

    let result = EffectiveConfig::load(&cli);

    assert!(matches!(result, Err(ConfigError::FileParse { .. })));
}

#[test]
fn load_unknown_key_is_fatal() {
    let temp = tempfile::tempdir().unwrap();
    std::fs::write(temp.path().join("coind.toml"), "mining-threads = 4\n").unwrap();
    let cli = Cli::parse_from_iter(data_dir_arg(temp.path()));

    let err = EffectiveConfig::load(&cli).unwrap_err();

    assert!(err.to_string().contains("coind.toml"));
}

#[test]
fn load_fails_when_data_dir_is_a_file() {
    let temp = tempfile::tempdir().unwrap();
    let file = temp.path().join("not-a-dir");
    std::fs::write(&file, "").unwrap();
    let cli = Cli::parse_from_iter(data_dir_arg(&file));

    let result = EffectiveConfig::load(&cli);

    assert!(matches!(result, Err(ConfigError::DataDir { .. })));
}
