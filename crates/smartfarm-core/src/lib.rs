// SPDX-FileCopyrightText: 2026 SmartFarm Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Core library for the SmartFarm monitoring platform.
//!
//! This crate provides the trait seams, error type, and domain types shared by
//! the store, the protocol adapters, the ingestion pipeline, and the
//! monitoring layer.

pub mod error;
pub mod source_config;
pub mod time;
pub mod traits;
pub mod types;

pub use error::SmartfarmError;
pub use source_config::{Protocol, SourceConfig};
pub use traits::{ReadingSink, SourceAdapter, StorageAdapter};
pub use types::{
    AlertRecord, AlertStatus, CandidateRecord, FetchResult, HealthStatus, IngestOutcome,
};

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{EquipmentStatus, MaintenanceStatus, Priority, SiteKind, SiteSummary};
    use std::str::FromStr;

    #[test]
    fn error_messages_name_the_entity() {
        let err = SmartfarmError::NotFound {
            entity: "site",
            id: 42,
        };
        assert_eq!(err.to_string(), "site 42 not found");

        let err = SmartfarmError::storage(std::io::Error::other("disk full"));
        assert_eq!(err.to_string(), "storage error: disk full");
    }

    #[test]
    fn status_enums_parse_case_insensitively() {
        assert_eq!(
            EquipmentStatus::from_str("Under_Observation").unwrap(),
            EquipmentStatus::UnderObservation
        );
        assert_eq!(
            MaintenanceStatus::from_str("in_progress").unwrap(),
            MaintenanceStatus::InProgress
        );
        assert_eq!(Priority::from_str("HIGH").unwrap(), Priority::High);
        assert!(SiteKind::from_str("aquaculture").is_err());
    }

    #[test]
    fn alert_status_displays_uppercase() {
        assert_eq!(AlertStatus::Ok.to_string(), "OK");
        assert_eq!(AlertStatus::Warning.to_string(), "WARNING");
        assert_eq!(
            serde_json::to_string(&AlertStatus::Critical).unwrap(),
            "\"CRITICAL\""
        );
    }

    #[test]
    fn candidate_record_carries_optional_timestamp() {
        let with_ts = CandidateRecord::new(
            "temp_c",
            serde_json::json!(22.5),
            Some("2026-01-04T12:00:00Z".to_string()),
        );
        assert_eq!(with_ts.0["timestamp"], "2026-01-04T12:00:00Z");

        let without = CandidateRecord::new("hum_pct", serde_json::json!(60), None);
        assert!(without.0.get("timestamp").is_none());
    }

    #[test]
    fn failed_fetch_has_no_records() {
        let result = FetchResult::failure("connection refused");
        assert!(!result.success);
        assert!(result.records.is_empty());
        assert_eq!(FetchResult::ok(Vec::new()).message, "OK");
    }

    #[test]
    fn site_summary_label() {
        let summary = SiteSummary {
            site_id: 1,
            site_name: "Site 1 - Sheds".to_string(),
            kind: SiteKind::Poultry,
            client_name: "Granja Los Robles".to_string(),
        };
        assert_eq!(summary.label(), "Granja Los Robles / Site 1 - Sheds (poultry)");
    }
}
