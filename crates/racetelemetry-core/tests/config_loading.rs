use std::fs;

use racetelemetry_core::config::{ConfigError, GeneratorConfig};
use tempfile::tempdir;

#[test]
fn test_load_from_file() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("telemetry.json");
    fs::write(
        &path,
        r#"{
            "base_rpm": 9500,
            "base_soc": 80,
            "lap_threshold_min_secs": 60,
            "lap_threshold_max_secs": 75
        }"#,
    )
    .unwrap();

    let config = GeneratorConfig::load(&path).unwrap();
    assert_eq!(config.base_rpm, 9500.0);
    assert_eq!(config.base_soc, 80.0);
    assert_eq!(config.lap_threshold_min_secs, 60.0);
    assert_eq!(config.lap_threshold_max_secs, 75.0);
    assert_eq!(config.base_tire_temp, 85.0);
}

#[test]
fn test_missing_file_is_io_error() {
    let dir = tempdir().unwrap();
    let err = GeneratorConfig::load(dir.path().join("absent.json")).unwrap_err();
    assert!(matches!(err, ConfigError::Io(_)));
}

#[test]
fn test_rejects_out_of_range_values() {
    for (json, field) in [
        (r#"{ "base_soc": 150 }"#, "base_soc"),
        (r#"{ "base_soc": 95 }"#, "base_soc"),
        (r#"{ "base_soc": 5 }"#, "base_soc"),
        (r#"{ "initial_throttle": 1.5 }"#, "initial_throttle"),
        (r#"{ "lap_threshold_min_secs": -1 }"#, "lap_threshold_min_secs"),
    ] {
        match GeneratorConfig::from_json(json) {
            Err(ConfigError::Invalid { field: got, .. }) => assert_eq!(got, field),
            other => panic!("expected invalid {field}, got {other:?}"),
        }
    }
}

#[test]
fn test_round_trips_through_json() {
    let config = GeneratorConfig::default();
    let json = serde_json::to_string_pretty(&config).unwrap();
    assert_eq!(GeneratorConfig::from_json(&json).unwrap(), config);
}
