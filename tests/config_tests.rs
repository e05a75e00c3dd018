// Config loading and validation tests

use hostwatch::alerts::{AlertThresholds, Threshold};
use hostwatch::config::AppConfig;

const VALID_CONFIG: &str = r#"
[server]
port = 8081
host = "0.0.0.0"

[database]
path = "data/alerts.db"
max_pool_size = 4

[monitoring]
sample_interval_ms = 1000
stats_log_interval_secs = 60
"#;

#[test]
fn test_config_loads_from_str() {
    let config = AppConfig::load_from_str(VALID_CONFIG).expect("load_from_str");
    assert_eq!(config.server.port, 8081);
    assert_eq!(config.server.host, "0.0.0.0");
    assert_eq!(config.database.path, "data/alerts.db");
    assert_eq!(config.database.max_pool_size, 4);
    assert_eq!(config.monitoring.sample_interval_ms, 1000);
}

#[test]
fn test_config_defaults_when_sections_omitted() {
    let config = AppConfig::load_from_str(VALID_CONFIG).unwrap();
    assert_eq!(config.monitoring.history_capacity, 360);
    assert_eq!(config.monitoring.disk_mount, "/");
    assert!(!config.monitoring.force_synthetic);
    assert_eq!(config.monitoring.synthetic_seed, None);
    assert_eq!(config.alerts, AlertThresholds::default());
}

#[test]
fn test_config_partial_alert_override() {
    let toml = format!(
        "{}\n[alerts.cpu]\nwarning = 50.0\ncritical = 75.0\n",
        VALID_CONFIG
    );
    let config = AppConfig::load_from_str(&toml).unwrap();
    assert_eq!(config.alerts.cpu, Threshold::new(50.0, 75.0));
    assert_eq!(config.alerts.memory, AlertThresholds::default().memory);
}

#[test]
fn test_config_single_level_override_keeps_kind_default() {
    let toml = format!("{}\n[alerts.cpu]\nwarning = 50.0\n", VALID_CONFIG);
    let config = AppConfig::load_from_str(&toml).unwrap();
    assert_eq!(config.alerts.cpu, Threshold::new(50.0, 85.0));

    let toml = format!("{}\n[alerts.disk]\ncritical = 99.0\n", VALID_CONFIG);
    let config = AppConfig::load_from_str(&toml).unwrap();
    assert_eq!(config.alerts.disk, Threshold::new(80.0, 99.0));
}

#[test]
fn test_config_single_level_override_still_validated() {
    let toml = format!("{}\n[alerts.cpu]\nwarning = 90.0\n", VALID_CONFIG);
    let err = AppConfig::load_from_str(&toml).unwrap_err();
    assert!(err.to_string().contains("cpu"));
}

#[test]
fn test_config_rejects_unknown_threshold_field() {
    let toml = format!("{}\n[alerts.cpu]\nwarn = 50.0\n", VALID_CONFIG);
    assert!(AppConfig::load_from_str(&toml).is_err());
}

#[test]
fn test_config_validation_rejects_invalid_port() {
    let bad = VALID_CONFIG.replace("port = 8081", "port = 0");
    let err = AppConfig::load_from_str(&bad).unwrap_err();
    assert!(err.to_string().contains("server.port"));
}

#[test]
fn test_config_validation_rejects_empty_db_path() {
    let bad = VALID_CONFIG.replace("path = \"data/alerts.db\"", "path = \"\"");
    let err = AppConfig::load_from_str(&bad).unwrap_err();
    assert!(err.to_string().contains("database.path"));
}

#[test]
fn test_config_validation_rejects_max_pool_size_zero() {
    let bad = VALID_CONFIG.replace("max_pool_size = 4", "max_pool_size = 0");
    let err = AppConfig::load_from_str(&bad).unwrap_err();
    assert!(err.to_string().contains("max_pool_size"));
}

#[test]
fn test_config_validation_rejects_zero_sample_interval() {
    let bad = VALID_CONFIG.replace("sample_interval_ms = 1000", "sample_interval_ms = 0");
    let err = AppConfig::load_from_str(&bad).unwrap_err();
    assert!(err.to_string().contains("sample_interval_ms"));
}

#[test]
fn test_config_validation_rejects_zero_stats_log_interval() {
    let bad = VALID_CONFIG.replace("stats_log_interval_secs = 60", "stats_log_interval_secs = 0");
    let err = AppConfig::load_from_str(&bad).unwrap_err();
    assert!(err.to_string().contains("stats_log_interval_secs"));
}

#[test]
fn test_config_validation_rejects_zero_history_capacity() {
    let toml = format!("{}history_capacity = 0\n", VALID_CONFIG);
    let err = AppConfig::load_from_str(&toml).unwrap_err();
    assert!(err.to_string().contains("history_capacity"));
}

#[test]
fn test_config_validation_rejects_threshold_above_100() {
    let toml = format!(
        "{}\n[alerts.disk]\nwarning = 80.0\ncritical = 120.0\n",
        VALID_CONFIG
    );
    let err = AppConfig::load_from_str(&toml).unwrap_err();
    let msg = err.to_string();
    assert!(msg.contains("disk"), "{}", msg);
    assert!(msg.contains("critical"), "{}", msg);
}

#[test]
fn test_config_validation_rejects_warning_not_below_critical() {
    let toml = format!(
        "{}\n[alerts.memory]\nwarning = 90.0\ncritical = 90.0\n",
        VALID_CONFIG
    );
    let err = AppConfig::load_from_str(&toml).unwrap_err();
    assert!(err.to_string().contains("memory"));
}

#[test]
fn test_config_rejects_missing_section() {
    let bad = VALID_CONFIG.replace("[database]", "[db]");
    assert!(AppConfig::load_from_str(&bad).is_err());
}
