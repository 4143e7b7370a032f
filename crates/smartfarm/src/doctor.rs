// SPDX-FileCopyrightText: 2026 SmartFarm Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `smartfarm doctor` command implementation.
//!
//! Checks that the configured database opens with foreign keys enforced and
//! that every stored source configuration still decodes.

use std::path::Path;
use std::time::{Duration, Instant};

use colored::Colorize;
use smartfarm_config::SmartfarmConfig;
use smartfarm_core::types::HealthStatus;
use smartfarm_core::{SmartfarmError, StorageAdapter};
use smartfarm_storage::SqliteStorage;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CheckStatus {
    Pass,
    Warn,
    Fail,
}

#[derive(Debug, Clone)]
pub struct CheckResult {
    pub name: String,
    pub status: CheckStatus,
    pub message: String,
    pub duration: Duration,
}

impl CheckResult {
    fn new(name: &str, status: CheckStatus, message: impl Into<String>, start: Instant) -> Self {
        Self {
            name: name.to_string(),
            status,
            message: message.into(),
            duration: start.elapsed(),
        }
    }
}

pub async fn run_doctor(config: &SmartfarmConfig) -> Result<(), SmartfarmError> {
    let results = collect_checks(config).await;

    println!();
    println!("  smartfarm doctor");
    println!("  {}", "-".repeat(50));

    let mut issues = 0;
    for result in &results {
        let duration_ms = result.duration.as_millis();
        let (symbol, message) = match result.status {
            CheckStatus::Pass => ("✓".green(), result.message.normal()),
            CheckStatus::Warn => {
                issues += 1;
                ("!".yellow(), result.message.yellow())
            }
            CheckStatus::Fail => {
                issues += 1;
                ("✗".red(), result.message.red())
            }
        };
        println!("    {symbol} {:<20} {message} ({duration_ms}ms)", result.name);
    }

    println!();
    if issues > 0 {
        let word = if issues == 1 { "issue" } else { "issues" };
        println!("  {issues} {word} found.");
    } else {
        println!("  All checks passed.");
    }
    println!();
    Ok(())
}

pub async fn collect_checks(config: &SmartfarmConfig) -> Vec<CheckResult> {
    let mut results = vec![CheckResult::new(
        "Configuration",
        CheckStatus::Pass,
        format!("valid (log level {})", config.app.log_level),
        Instant::now(),
    )];

    let start = Instant::now();
    let path = &config.storage.database_path;
    if !Path::new(path).exists() {
        results.push(CheckResult::new(
            "Database",
            CheckStatus::Warn,
            format!("not found: {path} (run `smartfarm init`)"),
            start,
        ));
        return results;
    }

    let storage = match SqliteStorage::open(config.storage.clone()).await {
        Ok(storage) => storage,
        Err(e) => {
            results.push(CheckResult::new("Database", CheckStatus::Fail, e.to_string(), start));
            return results;
        }
    };

    results.push(match storage.health_check().await {
        Ok(HealthStatus::Healthy) => {
            CheckResult::new("Database", CheckStatus::Pass, "connected", start)
        }
        Ok(HealthStatus::Degraded(msg)) => {
            CheckResult::new("Database", CheckStatus::Warn, msg, start)
        }
        Ok(HealthStatus::Unhealthy(msg)) => {
            CheckResult::new("Database", CheckStatus::Fail, msg, start)
        }
        Err(e) => CheckResult::new("Database", CheckStatus::Fail, e.to_string(), start),
    });
    results.push(check_sources(&storage).await);

    if let Err(e) = storage.close().await {
        tracing::warn!(error = %e, "closing database after doctor checks");
    }
    results
}

/// Every stored source must decode into its typed configuration.
async fn check_sources(store: &dyn StorageAdapter) -> CheckResult {
    let start = Instant::now();
    let sites = match store.list_sites().await {
        Ok(sites) => sites,
        Err(e) => {
            return CheckResult::new("Sensor sources", CheckStatus::Fail, e.to_string(), start);
        }
    };
    if sites.is_empty() {
        return CheckResult::new(
            "Sensor sources",
            CheckStatus::Warn,
            "no sites yet (run `smartfarm seed` for demo data)",
            start,
        );
    }

    let mut total = 0;
    let mut broken = Vec::new();
    for site in &sites {
        let sources = match store.list_sources(site.site_id).await {
            Ok(sources) => sources,
            Err(e) => {
                return CheckResult::new("Sensor sources", CheckStatus::Fail, e.to_string(), start);
            }
        };
        for source in sources {
            total += 1;
            if let Err(e) = source.config().and_then(|c| c.validate()) {
                broken.push(format!("{}: {e}", source.id));
            }
        }
    }

    if broken.is_empty() {
        CheckResult::new(
            "Sensor sources",
            CheckStatus::Pass,
            format!("{total} configured on {} site(s)", sites.len()),
            start,
        )
    } else {
        CheckResult::new(
            "Sensor sources",
            CheckStatus::Warn,
            format!("{} of {total} unusable ({})", broken.len(), broken.join("; ")),
            start,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use smartfarm_core::types::SensorSource;

    fn config_at(path: &Path) -> SmartfarmConfig {
        let mut config = SmartfarmConfig::default();
        config.storage.database_path = path.to_string_lossy().to_string();
        config
    }

    #[tokio::test]
    async fn missing_database_is_a_warning() {
        let dir = tempfile::tempdir().unwrap();
        let results = collect_checks(&config_at(&dir.path().join("absent.db"))).await;
        assert_eq!(results.len(), 2);
        assert_eq!(results[1].status, CheckStatus::Warn);
        assert!(!dir.path().join("absent.db").exists());
    }

    #[tokio::test]
    async fn broken_source_config_is_reported() {
        let harness = smartfarm_test_utils::TestHarness::new().await.unwrap();
        harness
            .storage
            .create_source(&SensorSource {
                id: 0,
                site_id: harness.site_id,
                name: "gateway".to_string(),
                protocol: "LORAWAN".to_string(),
                config_json: "{}".to_string(),
                enabled: true,
            })
            .await
            .unwrap();
        harness.add_source("MANUAL", "{}").await.unwrap();

        let result = check_sources(harness.storage.as_ref()).await;
        assert_eq!(result.status, CheckStatus::Warn);
        assert!(result.message.starts_with("1 of 2 unusable"), "{}", result.message);
    }
}
