// SPDX-FileCopyrightText: 2026 SmartFarm Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Storage adapter trait for persistence backends (SQLite, etc.).

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::error::SmartfarmError;
use crate::source_config::Protocol;
use crate::types::{
    BatchWrite, Client, Equipment, EquipmentStatus, HealthStatus, HistoryPoint,
    MaintenanceRecord, MaintenanceStatus, MetricSample, NormalizedReading, SensorReading,
    SensorSource, Site, SiteSummary, Threshold,
};

/// The persistence store.
///
/// Deleting a site cascades to its equipment, sources, readings, thresholds,
/// and maintenance records. Deleting a source nulls `source_id` on its
/// readings; deleting equipment nulls `equipment_id` on its maintenance
/// records. Delete and update operations return
/// [`SmartfarmError::NotFound`] when the row does not exist.
#[async_trait]
pub trait StorageAdapter: Send + Sync {
    /// Opens the backend and applies pending migrations.
    async fn initialize(&self) -> Result<(), SmartfarmError>;

    /// Flushes pending writes and releases the backend.
    async fn close(&self) -> Result<(), SmartfarmError>;

    async fn health_check(&self) -> Result<HealthStatus, SmartfarmError>;

    // --- Clients and sites ---

    async fn create_client(&self, client: &Client) -> Result<i64, SmartfarmError>;
    async fn get_client(&self, id: i64) -> Result<Option<Client>, SmartfarmError>;
    async fn list_clients(&self) -> Result<Vec<Client>, SmartfarmError>;
    async fn delete_client(&self, id: i64) -> Result<(), SmartfarmError>;

    async fn create_site(&self, site: &Site) -> Result<i64, SmartfarmError>;
    async fn get_site(&self, id: i64) -> Result<Option<Site>, SmartfarmError>;
    /// Sites joined with their client name, ordered by client then site name.
    async fn list_sites(&self) -> Result<Vec<SiteSummary>, SmartfarmError>;
    async fn delete_site(&self, id: i64) -> Result<(), SmartfarmError>;

    // --- Equipment ---

    async fn create_equipment(&self, equipment: &Equipment) -> Result<i64, SmartfarmError>;
    async fn list_equipment(&self, site_id: i64) -> Result<Vec<Equipment>, SmartfarmError>;
    async fn update_equipment_status(
        &self,
        id: i64,
        status: EquipmentStatus,
    ) -> Result<(), SmartfarmError>;
    async fn delete_equipment(&self, id: i64) -> Result<(), SmartfarmError>;

    // --- Sensor sources ---

    async fn create_source(&self, source: &SensorSource) -> Result<i64, SmartfarmError>;
    async fn get_source(&self, id: i64) -> Result<Option<SensorSource>, SmartfarmError>;
    /// Sources of a site, newest first.
    async fn list_sources(&self, site_id: i64) -> Result<Vec<SensorSource>, SmartfarmError>;
    /// The most recently created source of a site using the given protocol.
    async fn latest_source_for_protocol(
        &self,
        site_id: i64,
        protocol: Protocol,
    ) -> Result<Option<SensorSource>, SmartfarmError>;
    async fn set_source_enabled(&self, id: i64, enabled: bool) -> Result<(), SmartfarmError>;
    async fn delete_source(&self, id: i64) -> Result<(), SmartfarmError>;

    // --- Readings ---

    /// Append a batch of readings in one transaction.
    ///
    /// A row refused by a constraint is counted in [`BatchWrite::rejected`];
    /// the remaining rows still commit together.
    async fn insert_readings(
        &self,
        site_id: i64,
        source_id: Option<i64>,
        readings: &[NormalizedReading],
    ) -> Result<BatchWrite, SmartfarmError>;

    /// The single most recent reading per distinct metric of a site, ordered
    /// by metric. Timestamp ties go to the highest row id.
    async fn latest_per_metric(&self, site_id: i64) -> Result<Vec<MetricSample>, SmartfarmError>;

    /// Readings of one metric at or after `since`, ascending by timestamp.
    async fn history(
        &self,
        site_id: i64,
        metric: &str,
        since: DateTime<Utc>,
    ) -> Result<Vec<HistoryPoint>, SmartfarmError>;

    /// All readings of a site at or after `since`, ascending by timestamp.
    async fn readings_since(
        &self,
        site_id: i64,
        since: DateTime<Utc>,
    ) -> Result<Vec<MetricSample>, SmartfarmError>;

    /// Raw reading rows of a site in insertion order.
    async fn list_readings(&self, site_id: i64) -> Result<Vec<SensorReading>, SmartfarmError>;

    // --- Thresholds ---

    /// Insert or replace the threshold for `(site_id, metric)`. Returns its id.
    async fn upsert_threshold(&self, threshold: &Threshold) -> Result<i64, SmartfarmError>;
    /// Thresholds of a site ordered by metric, then id.
    async fn list_thresholds(&self, site_id: i64) -> Result<Vec<Threshold>, SmartfarmError>;
    async fn delete_threshold(&self, id: i64) -> Result<(), SmartfarmError>;

    // --- Maintenance ---

    async fn create_maintenance(&self, record: &MaintenanceRecord) -> Result<i64, SmartfarmError>;
    /// Maintenance records of a site, most recent scheduled/performed date first.
    async fn list_maintenance(
        &self,
        site_id: i64,
    ) -> Result<Vec<MaintenanceRecord>, SmartfarmError>;
    /// Change a ticket's status. Closing a ticket stamps `performed_at` with
    /// `today` when it is not already set.
    async fn update_maintenance_status(
        &self,
        id: i64,
        status: MaintenanceStatus,
        today: &str,
    ) -> Result<(), SmartfarmError>;
    async fn delete_maintenance(&self, id: i64) -> Result<(), SmartfarmError>;
}
