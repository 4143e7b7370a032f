// SPDX-FileCopyrightText: 2026 SmartFarm Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Integration tests for the SmartFarm configuration system.

use figment::Jail;
use smartfarm_config::diagnostic::ConfigError;
use smartfarm_config::model::SmartfarmConfig;
use smartfarm_config::{
    load_and_validate_str, load_config, load_config_from_path, load_config_from_str,
};

#[test]
fn full_toml_deserializes() {
    let toml = r#"
[app]
name = "granja-los-robles"
log_level = "debug"

[storage]
database_path = "/var/lib/smartfarm/farm.db"
wal_mode = false

[ingestion]
http_timeout_secs = 10
modbus_timeout_secs = 2
max_batch_size = 500

[reports]
history_window_hours = 48
export_window_hours = 168
"#;

    let config = load_config_from_str(toml).expect("valid TOML should deserialize");
    assert_eq!(config.app.name, "granja-los-robles");
    assert_eq!(config.app.log_level, "debug");
    assert_eq!(config.storage.database_path, "/var/lib/smartfarm/farm.db");
    assert!(!config.storage.wal_mode);
    assert_eq!(config.ingestion.http_timeout_secs, 10);
    assert_eq!(config.ingestion.modbus_timeout_secs, 2);
    assert_eq!(config.ingestion.max_batch_size, 500);
    assert_eq!(config.reports.history_window_hours, 48);
    assert_eq!(config.reports.export_window_hours, 168);
}

#[test]
fn empty_toml_yields_defaults() {
    let config = load_config_from_str("").unwrap();
    assert_eq!(config.storage.database_path, "smartfarm.db");
    assert_eq!(config.ingestion.http_timeout_secs, 5);
}

#[test]
fn partial_section_keeps_other_defaults() {
    let config = load_config_from_str("[ingestion]\nmax_batch_size = 50\n").unwrap();
    assert_eq!(config.ingestion.max_batch_size, 50);
    assert_eq!(config.ingestion.modbus_timeout_secs, 3);
}

#[test]
fn unknown_key_gets_suggestion_and_span() {
    let toml = "[storage]\ndatabse_path = \"x.db\"\n";
    let errors = load_and_validate_str(toml).unwrap_err();
    assert_eq!(errors.len(), 1);
    match &errors[0] {
        ConfigError::UnknownKey {
            key,
            suggestion,
            valid_keys,
            ..
        } => {
            assert_eq!(key, "databse_path");
            assert_eq!(suggestion.as_deref(), Some("database_path"));
            assert!(valid_keys.contains("wal_mode"));
        }
        other => panic!("expected UnknownKey, got {other:?}"),
    }
}

#[test]
fn unknown_section_is_rejected() {
    let errors = load_and_validate_str("[telemetry]\nenabled = true\n").unwrap_err();
    assert!(matches!(&errors[0], ConfigError::UnknownKey { key, .. } if key == "telemetry"));
}

#[test]
fn wrong_type_is_reported() {
    let errors = load_and_validate_str("[ingestion]\nmax_batch_size = \"lots\"\n").unwrap_err();
    assert!(matches!(
        &errors[0],
        ConfigError::InvalidType { key, .. } if key.contains("max_batch_size")
    ));
}

#[test]
fn validation_runs_after_deserialization() {
    let toml = "[ingestion]\nhttp_timeout_secs = 0\n[reports]\nhistory_window_hours = 1000\n";
    let errors = load_and_validate_str(toml).unwrap_err();
    assert_eq!(errors.len(), 2);
    assert!(errors.iter().all(|e| matches!(e, ConfigError::Validation { .. })));
}

#[test]
fn defaults_serialize_to_toml() {
    let rendered = toml::to_string(&SmartfarmConfig::default()).unwrap();
    assert!(rendered.contains("[ingestion]"));
    assert!(rendered.contains("max_batch_size = 10000"));
}

#[test]
fn local_file_and_env_overrides_layer() {
    Jail::expect_with(|jail| {
        jail.create_file(
            "smartfarm.toml",
            "[storage]\ndatabase_path = \"local.db\"\n[ingestion]\nhttp_timeout_secs = 8\n",
        )?;
        jail.set_env("SMARTFARM_INGESTION_HTTP_TIMEOUT_SECS", "12");
        jail.set_env("SMARTFARM_APP_LOG_LEVEL", "warn");

        let config = load_config()?;
        assert_eq!(config.storage.database_path, "local.db");
        assert_eq!(config.ingestion.http_timeout_secs, 12);
        assert_eq!(config.app.log_level, "warn");
        Ok(())
    });
}

#[test]
fn env_key_with_underscores_maps_to_section_field() {
    Jail::expect_with(|jail| {
        jail.set_env("SMARTFARM_STORAGE_DATABASE_PATH", "/tmp/env.db");
        jail.set_env("SMARTFARM_REPORTS_EXPORT_WINDOW_HOURS", "72");

        let config = load_config()?;
        assert_eq!(config.storage.database_path, "/tmp/env.db");
        assert_eq!(config.reports.export_window_hours, 72);
        Ok(())
    });
}

#[test]
fn explicit_path_is_loaded() {
    Jail::expect_with(|jail| {
        jail.create_file("custom.toml", "[app]\nname = \"barn\"\n")?;
        let config = load_config_from_path(std::path::Path::new("custom.toml"))?;
        assert_eq!(config.app.name, "barn");
        Ok(())
    });
}
