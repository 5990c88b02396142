use std::{env, fs, time::Duration};

use cavequest_rendering_macroquad::{BackendConfig, ConfigError};

#[test]
fn config_round_trips_through_a_file() {
    let path = env::temp_dir().join("cavequest-backend-config-test.toml");
    fs::write(&path, "scale = 8.0\nmin_frame_ms = 50\n").expect("write temp config");

    let config = BackendConfig::load(&path).expect("load config");
    assert!((config.scale - 8.0).abs() < f32::EPSILON);
    assert_eq!(config.frame_budget(), Duration::from_millis(50));

    fs::remove_file(&path).expect("remove temp config");
}

#[test]
fn malformed_config_surfaces_a_parse_error() {
    let path = env::temp_dir().join("cavequest-backend-config-bad.toml");
    fs::write(&path, "scale = \"huge\"\n").expect("write temp config");

    let error = BackendConfig::load(&path).expect_err("invalid value type");
    assert!(matches!(error, ConfigError::Parse(_)));

    fs::remove_file(&path).expect("remove temp config");
}
