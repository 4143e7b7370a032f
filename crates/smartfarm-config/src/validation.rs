// SPDX-FileCopyrightText: 2026 SmartFarm Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Post-deserialization validation for configuration values.

use crate::diagnostic::ConfigError;
use crate::model::SmartfarmConfig;

const LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];
const MAX_WINDOW_HOURS: u32 = 720;

/// Validate a deserialized configuration for semantic correctness.
///
/// Returns `Ok(())` if all validations pass, or `Err(Vec<ConfigError>)` with
/// all collected validation errors (does not fail fast).
pub fn validate_config(config: &SmartfarmConfig) -> Result<(), Vec<ConfigError>> {
    let mut errors = Vec::new();
    let mut invalid = |message: String| errors.push(ConfigError::Validation { message });

    let level = config.app.log_level.trim().to_ascii_lowercase();
    if !LOG_LEVELS.contains(&level.as_str()) {
        invalid(format!(
            "app.log_level `{}` must be one of: {}",
            config.app.log_level,
            LOG_LEVELS.join(", ")
        ));
    }

    if config.storage.database_path.trim().is_empty() {
        invalid("storage.database_path must not be empty".to_string());
    }

    let http = config.ingestion.http_timeout_secs;
    if !(1..=20).contains(&http) {
        invalid(format!(
            "ingestion.http_timeout_secs must be within 1..=20, got {http}"
        ));
    }

    if config.ingestion.modbus_timeout_secs < 1 {
        invalid("ingestion.modbus_timeout_secs must be at least 1".to_string());
    }

    if config.ingestion.max_batch_size < 1 {
        invalid("ingestion.max_batch_size must be at least 1".to_string());
    }

    for (key, hours) in [
        ("reports.history_window_hours", config.reports.history_window_hours),
        ("reports.export_window_hours", config.reports.export_window_hours),
    ] {
        if !(1..=MAX_WINDOW_HOURS).contains(&hours) {
            invalid(format!(
                "{key} must be within 1..={MAX_WINDOW_HOURS}, got {hours}"
            ));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
