use horary::config::PerfectionConfig;
use horary::error::HoraryError;
use std::path::PathBuf;

fn workspace_config() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../configs/perfection.toml")
}

#[test]
fn test_shipped_config_matches_defaults() {
    let config = PerfectionConfig::load(workspace_config()).unwrap();
    assert_eq!(config, PerfectionConfig::default());
}

#[test]
fn test_load_missing_file() {
    let err = PerfectionConfig::load("does/not/exist.toml").unwrap_err();
    assert!(err.to_string().contains("Failed to read"));
}

#[test]
fn test_overrides() {
    let config = PerfectionConfig::from_toml_str(
        r#"
        [timing]
        allow_out_of_sign = true

        [collection]
        require_collector_dignity = true
        minimum_dignity_score = 3
        "#,
    )
    .unwrap();
    assert!(config.timing.allow_out_of_sign);
    assert_eq!(config.timing.station_speed_threshold, 0.1);
    assert!(config.collection.require_collector_dignity);
    assert_eq!(config.collection.minimum_dignity_score, 3);
    assert_eq!(config.collection.max_application_deg, None);
}

#[test]
fn test_invalid_values_rejected() {
    let err = PerfectionConfig::from_toml_str("[timing]\nstation_speed_threshold = 0.0\n").unwrap_err();
    match err {
        HoraryError::InvalidConfig { field, .. } => assert_eq!(field, "timing.station_speed_threshold"),
        other => panic!("unexpected error: {other}"),
    }

    let err = PerfectionConfig::from_toml_str("[confidence]\nhard_square_penalty = -5\n").unwrap_err();
    assert!(err.to_string().contains("hard_square_penalty"));
}
