// SPDX-FileCopyrightText: 2026 SmartFarm Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Domain types shared by the store, the adapters, and the monitoring layer.
//!
//! Entity structs carry their database row id. Insert operations ignore the
//! `id` field and return the id assigned by the store.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use strum::{Display, EnumString};

use crate::error::SmartfarmError;
use crate::source_config::SourceConfig;

/// Health status reported by store health checks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HealthStatus {
    Healthy,
    Degraded(String),
    Unhealthy(String),
}

/// Type classification of a monitored site.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
#[serde(rename_all = "snake_case")]
pub enum SiteKind {
    Poultry,
    Swine,
    Mixed,
}

/// Operational status of a piece of equipment.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
#[serde(rename_all = "snake_case")]
pub enum EquipmentStatus {
    Operative,
    UnderObservation,
    OutOfService,
}

/// Whether a maintenance ticket is planned upkeep or a repair.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
#[serde(rename_all = "snake_case")]
pub enum MaintenanceKind {
    Preventive,
    Corrective,
}

/// Lifecycle state of a maintenance ticket.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
#[serde(rename_all = "snake_case")]
pub enum MaintenanceStatus {
    Scheduled,
    InProgress,
    Closed,
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
#[serde(rename_all = "snake_case")]
pub enum Priority {
    Low,
    Medium,
    High,
}

/// Severity assigned by the threshold evaluator.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
#[strum(serialize_all = "UPPERCASE")]
#[serde(rename_all = "UPPERCASE")]
pub enum AlertStatus {
    Ok,
    Warning,
    Critical,
}

// --- Organizational entities ---

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Client {
    pub id: i64,
    pub name: String,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub address: Option<String>,
    pub notes: Option<String>,
}

/// A physical farm location belonging to one client.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Site {
    pub id: i64,
    pub client_id: i64,
    pub name: String,
    pub location: Option<String>,
    pub kind: SiteKind,
}

/// A site joined with its owning client's name, for selection lists.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SiteSummary {
    pub site_id: i64,
    pub site_name: String,
    pub kind: SiteKind,
    pub client_name: String,
}

impl SiteSummary {
    /// Human-readable label, e.g. `Granja Los Robles / Site 1 (poultry)`.
    pub fn label(&self) -> String {
        format!("{} / {} ({})", self.client_name, self.site_name, self.kind)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Equipment {
    pub id: i64,
    pub site_id: i64,
    pub name: String,
    pub category: Option<String>,
    pub model: Option<String>,
    pub serial: Option<String>,
    /// ISO-8601 date.
    pub install_date: Option<String>,
    pub status: EquipmentStatus,
}

// --- Ingestion configuration ---

/// A configured ingestion channel for one site.
///
/// The configuration blob is stored exactly as written; it is only
/// interpreted by [`SensorSource::config`], which selects the typed variant
/// matching the protocol tag.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SensorSource {
    pub id: i64,
    pub site_id: i64,
    pub name: String,
    pub protocol: String,
    pub config_json: String,
    pub enabled: bool,
}

impl SensorSource {
    /// Decode the stored configuration into its strongly-typed variant.
    pub fn config(&self) -> Result<SourceConfig, SmartfarmError> {
        SourceConfig::from_parts(&self.protocol, &self.config_json)
    }
}

// --- Time series ---

/// A persisted reading row. Readings are append-only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SensorReading {
    pub id: i64,
    pub site_id: i64,
    pub source_id: Option<i64>,
    pub ts: String,
    pub metric: String,
    pub value: f64,
    pub meta_json: Option<String>,
}

/// A reading that passed coercion and is ready to be written.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NormalizedReading {
    pub ts: String,
    pub metric: String,
    pub value: f64,
    /// Extra keys of the incoming record, serialized as a JSON object.
    pub meta_json: Option<String>,
}

/// Row counts of one reading batch write.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchWrite {
    pub inserted: usize,
    /// Rows refused by a constraint (e.g. a dangling source reference).
    pub rejected: usize,
}

/// One `(metric, value, ts)` observation as returned by read-side queries.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricSample {
    pub metric: String,
    pub value: f64,
    pub ts: String,
}

/// One point of a single-metric history series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryPoint {
    pub ts: String,
    pub value: f64,
}

// --- Thresholds and alerts ---

/// Two-band bounds for one metric of one site.
///
/// Every bound is independently optional; an unset bound places no
/// constraint on that side.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Threshold {
    #[serde(default)]
    pub id: i64,
    #[serde(default)]
    pub site_id: i64,
    pub metric: String,
    #[serde(default)]
    pub critical_min: Option<f64>,
    #[serde(default)]
    pub critical_max: Option<f64>,
    #[serde(default)]
    pub warn_min: Option<f64>,
    #[serde(default)]
    pub warn_max: Option<f64>,
    #[serde(default = "default_enabled")]
    pub enabled: bool,
}

fn default_enabled() -> bool {
    true
}

/// Evaluator output for one metric.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlertRecord {
    pub metric: String,
    pub value: f64,
    pub status: AlertStatus,
    pub message: String,
}

// --- Maintenance ---

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MaintenanceRecord {
    pub id: i64,
    pub site_id: i64,
    /// Nulled by the store when the equipment is deleted.
    pub equipment_id: Option<i64>,
    pub kind: MaintenanceKind,
    pub status: MaintenanceStatus,
    pub priority: Priority,
    pub scheduled_for: Option<String>,
    pub performed_at: Option<String>,
    pub description: Option<String>,
    pub actions_taken: Option<String>,
    pub parts_used: Option<String>,
    pub next_due: Option<String>,
}

// --- Adapter wire shapes ---

/// A raw record as produced by a protocol adapter, before coercion.
///
/// Usually an object with `metric`, `value`, and an optional `timestamp`
/// (or legacy `ts`) key; any other key is carried through as metadata.
/// Nothing is validated at this layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CandidateRecord(pub Value);

impl CandidateRecord {
    /// Build a well-formed candidate from its three core fields.
    pub fn new(metric: impl Into<String>, value: Value, timestamp: Option<String>) -> Self {
        let mut map = Map::new();
        map.insert("metric".to_string(), Value::String(metric.into()));
        map.insert("value".to_string(), value);
        if let Some(ts) = timestamp {
            map.insert("timestamp".to_string(), Value::String(ts));
        }
        CandidateRecord(Value::Object(map))
    }
}

impl From<Value> for CandidateRecord {
    fn from(value: Value) -> Self {
        CandidateRecord(value)
    }
}

/// Result of a single adapter fetch.
///
/// On failure `records` is always empty and `message` carries the diagnostic.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FetchResult {
    pub success: bool,
    pub message: String,
    pub records: Vec<CandidateRecord>,
}

impl FetchResult {
    /// Message of a plain successful fetch with nothing else to report.
    pub const OK_MESSAGE: &'static str = "OK";

    pub fn ok(records: Vec<CandidateRecord>) -> Self {
        Self {
            success: true,
            message: Self::OK_MESSAGE.to_string(),
            records,
        }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
            records: Vec::new(),
        }
    }
}

/// Result of an ingestion action, shown to the operator after every run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IngestOutcome {
    /// False when the adapter failed before any record was seen.
    pub success: bool,
    pub message: String,
    pub saved: usize,
    pub failed: usize,
}

impl IngestOutcome {
    pub fn transport_failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
            saved: 0,
            failed: 0,
        }
    }
}
