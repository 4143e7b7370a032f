// SPDX-FileCopyrightText: 2026 SmartFarm Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration model structs for the SmartFarm monitoring platform.
//!
//! All structs use `#[serde(deny_unknown_fields)]` to reject unrecognized
//! config keys at startup, providing actionable error messages.

use serde::{Deserialize, Serialize};

/// Top-level SmartFarm configuration.
///
/// All sections are optional and default to sensible values.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct SmartfarmConfig {
    #[serde(default)]
    pub app: AppConfig,

    /// Persistence store settings.
    #[serde(default)]
    pub storage: StorageConfig,

    /// Protocol adapter and batch limits.
    #[serde(default)]
    pub ingestion: IngestionConfig,

    /// Trend and export windows.
    #[serde(default)]
    pub reports: ReportsConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct AppConfig {
    /// Display name shown in CLI headers.
    #[serde(default = "default_app_name")]
    pub name: String,

    /// Logging level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            name: default_app_name(),
            log_level: default_log_level(),
        }
    }
}

fn default_app_name() -> String {
    "smartfarm".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Storage backend configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct StorageConfig {
    /// Path to the SQLite database file.
    #[serde(default = "default_database_path")]
    pub database_path: String,

    /// Enable WAL (Write-Ahead Logging) mode.
    #[serde(default = "default_wal_mode")]
    pub wal_mode: bool,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            database_path: default_database_path(),
            wal_mode: default_wal_mode(),
        }
    }
}

fn default_database_path() -> String {
    "smartfarm.db".to_string()
}

fn default_wal_mode() -> bool {
    true
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct IngestionConfig {
    /// Pull-HTTP timeout used when a source does not set its own.
    #[serde(default = "default_http_timeout_secs")]
    pub http_timeout_secs: u64,

    /// Modbus connect-and-read timeout used when a source does not set its own.
    #[serde(default = "default_modbus_timeout_secs")]
    pub modbus_timeout_secs: u64,

    /// Largest number of candidate records accepted in one batch.
    #[serde(default = "default_max_batch_size")]
    pub max_batch_size: usize,
}

impl Default for IngestionConfig {
    fn default() -> Self {
        Self {
            http_timeout_secs: default_http_timeout_secs(),
            modbus_timeout_secs: default_modbus_timeout_secs(),
            max_batch_size: default_max_batch_size(),
        }
    }
}

fn default_http_timeout_secs() -> u64 {
    5
}

fn default_modbus_timeout_secs() -> u64 {
    3
}

fn default_max_batch_size() -> usize {
    10_000
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ReportsConfig {
    #[serde(default = "default_window_hours")]
    pub history_window_hours: u32,

    #[serde(default = "default_window_hours")]
    pub export_window_hours: u32,
}

impl Default for ReportsConfig {
    fn default() -> Self {
        Self {
            history_window_hours: default_window_hours(),
            export_window_hours: default_window_hours(),
        }
    }
}

fn default_window_hours() -> u32 {
    24
}
