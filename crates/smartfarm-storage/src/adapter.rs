// SPDX-FileCopyrightText: 2026 SmartFarm Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! SQLite implementation of the StorageAdapter trait.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::OnceCell;
use tracing::debug;

use smartfarm_config::model::StorageConfig;
use smartfarm_core::source_config::Protocol;
use smartfarm_core::types::{
    BatchWrite, Client, Equipment, EquipmentStatus, HealthStatus, HistoryPoint,
    MaintenanceRecord, MaintenanceStatus, MetricSample, NormalizedReading, SensorReading,
    SensorSource, Site, SiteSummary, Threshold,
};
use smartfarm_core::{SmartfarmError, StorageAdapter};

use crate::database::Database;
use crate::queries;

/// SQLite-backed store.
///
/// The database is opened by [`StorageAdapter::initialize`]; every other
/// call fails until then.
pub struct SqliteStorage {
    config: StorageConfig,
    db: OnceCell<Database>,
}

impl SqliteStorage {
    pub fn new(config: StorageConfig) -> Self {
        Self {
            config,
            db: OnceCell::new(),
        }
    }

    /// Create and initialize in one step.
    pub async fn open(config: StorageConfig) -> Result<Self, SmartfarmError> {
        let storage = Self::new(config);
        storage.initialize().await?;
        Ok(storage)
    }

    fn db(&self) -> Result<&Database, SmartfarmError> {
        self.db.get().ok_or_else(|| SmartfarmError::Storage {
            source: "storage not initialized -- call initialize() first".into(),
        })
    }
}

#[async_trait]
impl StorageAdapter for SqliteStorage {
    async fn initialize(&self) -> Result<(), SmartfarmError> {
        let db = Database::open(&self.config.database_path, self.config.wal_mode).await?;
        self.db.set(db).map_err(|_| SmartfarmError::Storage {
            source: "storage already initialized".into(),
        })?;
        debug!(path = %self.config.database_path, "SQLite storage initialized");
        Ok(())
    }

    async fn close(&self) -> Result<(), SmartfarmError> {
        if self.config.wal_mode {
            self.db()?.checkpoint().await?;
            debug!("WAL checkpoint complete");
        }
        Ok(())
    }

    async fn health_check(&self) -> Result<HealthStatus, SmartfarmError> {
        let db = self.db()?;
        let fk_on = db
            .connection()
            .call(|conn| -> Result<bool, rusqlite::Error> {
                conn.execute_batch("SELECT 1;")?;
                conn.pragma_query_value(None, "foreign_keys", |row| row.get(0))
            })
            .await
            .map_err(crate::database::map_tr_err)?;
        if fk_on {
            Ok(HealthStatus::Healthy)
        } else {
            Ok(HealthStatus::Degraded(
                "foreign key enforcement is off".to_string(),
            ))
        }
    }

    // --- Clients and sites ---

    async fn create_client(&self, client: &Client) -> Result<i64, SmartfarmError> {
        queries::clients::create_client(self.db()?, client).await
    }

    async fn get_client(&self, id: i64) -> Result<Option<Client>, SmartfarmError> {
        queries::clients::get_client(self.db()?, id).await
    }

    async fn list_clients(&self) -> Result<Vec<Client>, SmartfarmError> {
        queries::clients::list_clients(self.db()?).await
    }

    async fn delete_client(&self, id: i64) -> Result<(), SmartfarmError> {
        queries::clients::delete_client(self.db()?, id).await
    }

    async fn create_site(&self, site: &Site) -> Result<i64, SmartfarmError> {
        queries::sites::create_site(self.db()?, site).await
    }

    async fn get_site(&self, id: i64) -> Result<Option<Site>, SmartfarmError> {
        queries::sites::get_site(self.db()?, id).await
    }

    async fn list_sites(&self) -> Result<Vec<SiteSummary>, SmartfarmError> {
        queries::sites::list_sites(self.db()?).await
    }

    async fn delete_site(&self, id: i64) -> Result<(), SmartfarmError> {
        queries::sites::delete_site(self.db()?, id).await
    }

    // --- Equipment ---

    async fn create_equipment(&self, equipment: &Equipment) -> Result<i64, SmartfarmError> {
        queries::equipment::create_equipment(self.db()?, equipment).await
    }

    async fn list_equipment(&self, site_id: i64) -> Result<Vec<Equipment>, SmartfarmError> {
        queries::equipment::list_equipment(self.db()?, site_id).await
    }

    async fn update_equipment_status(
        &self,
        id: i64,
        status: EquipmentStatus,
    ) -> Result<(), SmartfarmError> {
        queries::equipment::update_equipment_status(self.db()?, id, status).await
    }

    async fn delete_equipment(&self, id: i64) -> Result<(), SmartfarmError> {
        queries::equipment::delete_equipment(self.db()?, id).await
    }

    // --- Sensor sources ---

    async fn create_source(&self, source: &SensorSource) -> Result<i64, SmartfarmError> {
        queries::sources::create_source(self.db()?, source).await
    }

    async fn get_source(&self, id: i64) -> Result<Option<SensorSource>, SmartfarmError> {
        queries::sources::get_source(self.db()?, id).await
    }

    async fn list_sources(&self, site_id: i64) -> Result<Vec<SensorSource>, SmartfarmError> {
        queries::sources::list_sources(self.db()?, site_id).await
    }

    async fn latest_source_for_protocol(
        &self,
        site_id: i64,
        protocol: Protocol,
    ) -> Result<Option<SensorSource>, SmartfarmError> {
        queries::sources::latest_source_for_protocol(self.db()?, site_id, protocol).await
    }

    async fn set_source_enabled(&self, id: i64, enabled: bool) -> Result<(), SmartfarmError> {
        queries::sources::set_source_enabled(self.db()?, id, enabled).await
    }

    async fn delete_source(&self, id: i64) -> Result<(), SmartfarmError> {
        queries::sources::delete_source(self.db()?, id).await
    }

    // --- Readings ---

    async fn insert_readings(
        &self,
        site_id: i64,
        source_id: Option<i64>,
        readings: &[NormalizedReading],
    ) -> Result<BatchWrite, SmartfarmError> {
        queries::readings::insert_readings(self.db()?, site_id, source_id, readings).await
    }

    async fn latest_per_metric(&self, site_id: i64) -> Result<Vec<MetricSample>, SmartfarmError> {
        queries::readings::latest_per_metric(self.db()?, site_id).await
    }

    async fn history(
        &self,
        site_id: i64,
        metric: &str,
        since: DateTime<Utc>,
    ) -> Result<Vec<HistoryPoint>, SmartfarmError> {
        queries::readings::history(self.db()?, site_id, metric, since).await
    }

    async fn readings_since(
        &self,
        site_id: i64,
        since: DateTime<Utc>,
    ) -> Result<Vec<MetricSample>, SmartfarmError> {
        queries::readings::readings_since(self.db()?, site_id, since).await
    }

    async fn list_readings(&self, site_id: i64) -> Result<Vec<SensorReading>, SmartfarmError> {
        queries::readings::list_readings(self.db()?, site_id).await
    }

    // --- Thresholds ---

    async fn upsert_threshold(&self, threshold: &Threshold) -> Result<i64, SmartfarmError> {
        queries::thresholds::upsert_threshold(self.db()?, threshold).await
    }

    async fn list_thresholds(&self, site_id: i64) -> Result<Vec<Threshold>, SmartfarmError> {
        queries::thresholds::list_thresholds(self.db()?, site_id).await
    }

    async fn delete_threshold(&self, id: i64) -> Result<(), SmartfarmError> {
        queries::thresholds::delete_threshold(self.db()?, id).await
    }

    // --- Maintenance ---

    async fn create_maintenance(&self, record: &MaintenanceRecord) -> Result<i64, SmartfarmError> {
        queries::maintenance::create_maintenance(self.db()?, record).await
    }

    async fn list_maintenance(
        &self,
        site_id: i64,
    ) -> Result<Vec<MaintenanceRecord>, SmartfarmError> {
        queries::maintenance::list_maintenance(self.db()?, site_id).await
    }

    async fn update_maintenance_status(
        &self,
        id: i64,
        status: MaintenanceStatus,
        today: &str,
    ) -> Result<(), SmartfarmError> {
        queries::maintenance::update_maintenance_status(self.db()?, id, status, today).await
    }

    async fn delete_maintenance(&self, id: i64) -> Result<(), SmartfarmError> {
        queries::maintenance::delete_maintenance(self.db()?, id).await
    }
}
