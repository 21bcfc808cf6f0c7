use std::fs;

use jgrad_core::GradError;
use jgrad_pipeline::EstimateConfig;

#[test]
fn defaults_follow_original_estimator() {
    let config = EstimateConfig::default();
    assert_eq!(config.precision, 16);
    assert_eq!(config.sample_count, 50);
}

#[test]
fn partial_yaml_fills_defaults() {
    let config = EstimateConfig::from_yaml_str("precision: 8\n").unwrap();
    assert_eq!(config, EstimateConfig::new(8, 50));
}

#[test]
fn full_yaml_round_trips_through_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("estimate.yaml");
    fs::write(&path, "precision: 12\nsample_count: 200\n").unwrap();
    let config = EstimateConfig::load(&path).unwrap();
    assert_eq!(config, EstimateConfig::new(12, 200));
}

#[test]
fn zero_fields_are_rejected() {
    let err = EstimateConfig::from_yaml_str("precision: 0\n").unwrap_err();
    assert_eq!(err.code(), "zero-precision");
    let err = EstimateConfig::from_yaml_str("sample_count: 0\n").unwrap_err();
    assert_eq!(err.code(), "zero-samples");
}

#[test]
fn unreadable_config_is_a_serde_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = EstimateConfig::load(&dir.path().join("missing.yaml")).unwrap_err();
    assert!(matches!(err, GradError::Serde(ref info) if info.code == "config-read"));
    let err = EstimateConfig::from_yaml_str("precision: [1, 2]\n").unwrap_err();
    assert_eq!(err.code(), "yaml-deserialize");
}
