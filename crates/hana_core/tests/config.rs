use hana_core::{ConfigError, HanaConfig, ScoreWeights};
use std::path::PathBuf;

#[test]
fn empty_object_yields_defaults() {
    let config = HanaConfig::from_json("{}").unwrap();
    assert_eq!(config, HanaConfig::default());
    assert_eq!(config.db_path, PathBuf::from("hana.sqlite3"));
    assert_eq!(config.storage_key, "poems");
    assert_eq!(config.top_n, 10);
    assert_eq!(config.scoring.weights, ScoreWeights::default());
    assert_eq!(config.scoring.themes.len(), 10);
    assert!(config.baseline_path.is_none());
}

#[test]
fn partial_scoring_section_keeps_other_defaults() {
    let config = HanaConfig::from_json(
        r#"{
            "top_n": 3,
            "scoring": {
                "themes": ["sea", "salt"],
                "weights": {"diversity": 50, "structural": 0, "sentiment": 0, "theme": 25, "cohesion": 25}
            }
        }"#,
    )
    .unwrap();

    assert_eq!(config.top_n, 3);
    assert_eq!(config.scoring.themes, vec!["sea", "salt"]);
    assert_eq!(config.scoring.weights.diversity, 50.0);
    assert_eq!(config.scoring.embedding_dim, HanaConfig::default().scoring.embedding_dim);
}

#[test]
fn weights_must_sum_to_hundred() {
    let err = HanaConfig::from_json(r#"{"scoring": {"weights": {"diversity": 90}}}"#).unwrap_err();
    assert!(matches!(err, ConfigError::Invalid(_)));
    assert!(err.to_string().contains("sum to 100"));
}

#[test]
fn negative_weight_is_rejected() {
    let err = HanaConfig::from_json(
        r#"{"scoring": {"weights": {"diversity": -10, "structural": 20, "sentiment": 30, "theme": 30, "cohesion": 30}}}"#,
    )
    .unwrap_err();
    assert!(matches!(err, ConfigError::Invalid(_)));
}

#[test]
fn zero_top_n_is_rejected() {
    let err = HanaConfig::from_json(r#"{"top_n": 0}"#).unwrap_err();
    assert!(matches!(err, ConfigError::Invalid(_)));
}

#[test]
fn blank_theme_and_storage_key_are_rejected() {
    assert!(matches!(
        HanaConfig::from_json(r#"{"scoring": {"themes": ["ok", "  "]}}"#),
        Err(ConfigError::Invalid(_))
    ));
    assert!(matches!(
        HanaConfig::from_json(r#"{"storage_key": ""}"#),
        Err(ConfigError::Invalid(_))
    ));
}

#[test]
fn unknown_fields_fail_to_parse() {
    let err = HanaConfig::from_json(r#"{"top": 5}"#).unwrap_err();
    assert!(matches!(err, ConfigError::Parse(_)));
}

#[test]
fn load_reads_file_from_disk() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("hana.json");
    std::fs::write(&path, r#"{"log_level": "debug", "db_path": "/tmp/poems.db"}"#).unwrap();

    let config = HanaConfig::load(&path).unwrap();
    assert_eq!(config.log_level.as_deref(), Some("debug"));
    assert_eq!(config.effective_log_level(), "debug");
    assert_eq!(config.db_path, PathBuf::from("/tmp/poems.db"));
}

#[test]
fn missing_file_reports_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = HanaConfig::load(dir.path().join("absent.json")).unwrap_err();
    assert!(matches!(err, ConfigError::Io { .. }));
}

#[test]
fn stderr_logging_defaults_to_warn_unless_level_is_set() {
    let config = HanaConfig::default();
    assert_eq!(config.effective_log_level(), "warn");

    let to_files = HanaConfig::from_json(r#"{"log_dir": "/var/log/hana"}"#).unwrap();
    assert_eq!(to_files.effective_log_level(), hana_core::default_log_level());

    let explicit = HanaConfig::from_json(r#"{"log_level": "info"}"#).unwrap();
    assert_eq!(explicit.effective_log_level(), "info");
}
