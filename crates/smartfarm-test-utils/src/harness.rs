// SPDX-FileCopyrightText: 2026 SmartFarm Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Test harness backed by a temporary SQLite database.
//!
//! `TestHarness` opens a fresh store, creates one client and one poultry
//! site (or the full demo data set), and keeps the temp directory alive
//! until it is dropped.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use smartfarm_config::SmartfarmConfig;
use smartfarm_core::types::{Client, NormalizedReading, SensorSource, Site, SiteKind, Threshold};
use smartfarm_core::{SmartfarmError, StorageAdapter};
use smartfarm_storage::{SqliteStorage, seed_demo};

pub struct TestHarnessBuilder {
    seed_demo_at: Option<DateTime<Utc>>,
    config: SmartfarmConfig,
}

impl TestHarnessBuilder {
    fn new() -> Self {
        Self {
            seed_demo_at: None,
            config: SmartfarmConfig::default(),
        }
    }

    /// Load the demo data set instead of a bare client and site.
    pub fn with_demo_data(mut self, now: DateTime<Utc>) -> Self {
        self.seed_demo_at = Some(now);
        self
    }

    pub fn with_max_batch_size(mut self, size: usize) -> Self {
        self.config.ingestion.max_batch_size = size;
        self
    }

    pub async fn build(self) -> Result<TestHarness, SmartfarmError> {
        let temp_dir = tempfile::TempDir::new().map_err(SmartfarmError::storage)?;
        let db_path = temp_dir.path().join("test.db");

        let mut config = self.config;
        config.storage.database_path = db_path.to_string_lossy().to_string();

        let storage = SqliteStorage::open(config.storage.clone()).await?;
        let storage: Arc<dyn StorageAdapter> = Arc::new(storage);

        let (client_id, site_id) = match self.seed_demo_at {
            Some(now) => {
                let site_id = seed_demo(storage.as_ref(), now)
                    .await?
                    .ok_or_else(|| SmartfarmError::Internal("demo seed skipped".to_string()))?;
                let site = storage
                    .get_site(site_id)
                    .await?
                    .ok_or(SmartfarmError::NotFound { entity: "site", id: site_id })?;
                (site.client_id, site_id)
            }
            None => {
                let client_id = storage
                    .create_client(&Client {
                        id: 0,
                        name: "Test Farm".to_string(),
                        phone: None,
                        email: None,
                        address: None,
                        notes: None,
                    })
                    .await?;
                let site_id = storage
                    .create_site(&Site {
                        id: 0,
                        client_id,
                        name: "Test Site".to_string(),
                        location: None,
                        kind: SiteKind::Poultry,
                    })
                    .await?;
                (client_id, site_id)
            }
        };

        Ok(TestHarness {
            storage,
            config,
            client_id,
            site_id,
            _temp_dir: temp_dir,
        })
    }
}

pub struct TestHarness {
    /// SQLite store (temp DB, removed on drop).
    pub storage: Arc<dyn StorageAdapter>,
    /// Configuration pointing at the temp database.
    pub config: SmartfarmConfig,
    pub client_id: i64,
    pub site_id: i64,
    _temp_dir: tempfile::TempDir,
}

impl TestHarness {
    pub fn builder() -> TestHarnessBuilder {
        TestHarnessBuilder::new()
    }

    /// Shorthand for a harness with one client and one site.
    pub async fn new() -> Result<Self, SmartfarmError> {
        Self::builder().build().await
    }

    /// Register a source on the harness site.
    pub async fn add_source(
        &self,
        protocol: &str,
        config_json: &str,
    ) -> Result<i64, SmartfarmError> {
        self.storage
            .create_source(&SensorSource {
                id: 0,
                site_id: self.site_id,
                name: format!("{protocol} test source"),
                protocol: protocol.to_string(),
                config_json: config_json.to_string(),
                enabled: true,
            })
            .await
    }

    /// Set both bands for a metric on the harness site.
    pub async fn set_threshold(
        &self,
        metric: &str,
        critical: (Option<f64>, Option<f64>),
        warn: (Option<f64>, Option<f64>),
    ) -> Result<i64, SmartfarmError> {
        self.storage
            .upsert_threshold(&Threshold {
                id: 0,
                site_id: self.site_id,
                metric: metric.to_string(),
                critical_min: critical.0,
                critical_max: critical.1,
                warn_min: warn.0,
                warn_max: warn.1,
                enabled: true,
            })
            .await
    }

    /// Write one reading directly, bypassing normalization.
    pub async fn record(&self, ts: &str, metric: &str, value: f64) -> Result<(), SmartfarmError> {
        self.storage
            .insert_readings(
                self.site_id,
                None,
                &[NormalizedReading {
                    ts: ts.to_string(),
                    metric: metric.to_string(),
                    value,
                    meta_json: None,
                }],
            )
            .await
            .map(|_| ())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[tokio::test]
    async fn bare_harness_has_one_site() {
        let harness = TestHarness::new().await.unwrap();
        let sites = harness.storage.list_sites().await.unwrap();
        assert_eq!(sites.len(), 1);
        assert_eq!(sites[0].site_id, harness.site_id);
        assert_eq!(sites[0].client_name, "Test Farm");
    }

    #[tokio::test]
    async fn demo_harness_carries_seed_data() {
        let now = Utc.with_ymd_and_hms(2026, 1, 4, 12, 0, 0).unwrap();
        let harness = TestHarness::builder().with_demo_data(now).build().await.unwrap();
        assert_eq!(harness.storage.list_thresholds(harness.site_id).await.unwrap().len(), 2);
        assert_eq!(harness.storage.list_sources(harness.site_id).await.unwrap().len(), 1);
    }
}
