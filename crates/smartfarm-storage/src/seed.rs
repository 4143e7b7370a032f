// SPDX-FileCopyrightText: 2026 SmartFarm Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Demo data for a fresh database.

use chrono::{DateTime, Duration, Utc};
use serde_json::json;
use smartfarm_core::time::format_timestamp;
use smartfarm_core::types::{
    Client, Equipment, EquipmentStatus, MaintenanceKind, MaintenanceRecord, MaintenanceStatus,
    NormalizedReading, Priority, SensorSource, Site, SiteKind, Threshold,
};
use smartfarm_core::{SmartfarmError, StorageAdapter};
use tracing::info;

/// Number of half-hourly samples seeded per metric.
pub const DEMO_SAMPLES: usize = 48;

const DEMO_EQUIPMENT: &[(&str, &str, &str, &str, &str, EquipmentStatus)] = &[
    (
        "Temperature Controller ITC10",
        "Climate",
        "ITC10",
        "SN-ITC10-001",
        "2025-11-01",
        EquipmentStatus::Operative,
    ),
    (
        "Spiral Feed Conveyor",
        "Feeding",
        "Spiral-01",
        "SN-SP-009",
        "2025-10-15",
        EquipmentStatus::Operative,
    ),
    (
        "Drinker Line",
        "Water",
        "WaterLine-X",
        "SN-WL-120",
        "2025-10-20",
        EquipmentStatus::UnderObservation,
    ),
    (
        "Infrared Radiant Heater",
        "Heating",
        "IR-Heat",
        "SN-IR-777",
        "2025-10-18",
        EquipmentStatus::Operative,
    ),
];

/// `(metric, critical band, warning band)` of the demo site.
const DEMO_THRESHOLDS: &[(&str, (f64, f64), (f64, f64))] = &[
    ("temp_c", (18.0, 28.0), (19.0, 27.0)),
    ("hum_pct", (45.0, 70.0), (50.0, 65.0)),
];

/// Populate an empty store with one client, one poultry site, and a day of
/// readings. Returns the new site id, or `None` when the store already holds
/// clients.
pub async fn seed_demo(
    store: &dyn StorageAdapter,
    now: DateTime<Utc>,
) -> Result<Option<i64>, SmartfarmError> {
    if !store.list_clients().await?.is_empty() {
        info!("store already has data, skipping demo seed");
        return Ok(None);
    }

    let client_id = store
        .create_client(&Client {
            id: 0,
            name: "Granja Los Robles".to_string(),
            phone: Some("+56 9 1234 5678".to_string()),
            email: Some("contacto@cliente.cl".to_string()),
            address: Some("Región del Maule".to_string()),
            notes: Some("Demo client".to_string()),
        })
        .await?;

    let site_id = store
        .create_site(&Site {
            id: 0,
            client_id,
            name: "Site 1 - Sheds".to_string(),
            location: Some("Maule, Chile".to_string()),
            kind: SiteKind::Poultry,
        })
        .await?;

    let mut equipment_ids = Vec::with_capacity(DEMO_EQUIPMENT.len());
    for &(name, category, model, serial, installed, status) in DEMO_EQUIPMENT {
        let id = store
            .create_equipment(&Equipment {
                id: 0,
                site_id,
                name: name.to_string(),
                category: Some(category.to_string()),
                model: Some(model.to_string()),
                serial: Some(serial.to_string()),
                install_date: Some(installed.to_string()),
                status,
            })
            .await?;
        equipment_ids.push(id);
    }

    for &(metric, critical, warn) in DEMO_THRESHOLDS {
        store
            .upsert_threshold(&Threshold {
                id: 0,
                site_id,
                metric: metric.to_string(),
                critical_min: Some(critical.0),
                critical_max: Some(critical.1),
                warn_min: Some(warn.0),
                warn_max: Some(warn.1),
                enabled: true,
            })
            .await?;
    }

    let source_id = store
        .create_source(&SensorSource {
            id: 0,
            site_id,
            name: "Demo sensors".to_string(),
            protocol: "MANUAL".to_string(),
            config_json: json!({
                "note": "Demo source. Replace with HTTP/MQTT/Modbus in production."
            })
            .to_string(),
            enabled: true,
        })
        .await?;

    let readings = demo_readings(now);
    store.insert_readings(site_id, Some(source_id), &readings).await?;

    store
        .create_maintenance(&MaintenanceRecord {
            id: 0,
            site_id,
            equipment_id: equipment_ids.first().copied(),
            kind: MaintenanceKind::Preventive,
            status: MaintenanceStatus::Scheduled,
            priority: Priority::Medium,
            scheduled_for: Some((now + Duration::days(7)).date_naive().to_string()),
            performed_at: None,
            description: Some(
                "Temperature controller check / sensor cleaning / relay verification".to_string(),
            ),
            actions_taken: None,
            parts_used: None,
            next_due: Some((now + Duration::days(90)).date_naive().to_string()),
        })
        .await?;

    info!(site_id, readings = readings.len(), "demo data seeded");
    Ok(Some(site_id))
}

/// `temp_c` and `hum_pct` every 30 minutes going back from `now`.
fn demo_readings(now: DateTime<Utc>) -> Vec<NormalizedReading> {
    (0..DEMO_SAMPLES)
        .flat_map(|i| {
            let ts = format_timestamp(now - Duration::minutes(30 * i as i64));
            let step = i as f64;
            [
                ("temp_c", 22.0 + (step % 6.0) * 0.2),
                ("hum_pct", 58.0 + (step % 5.0) * 0.6),
            ]
            .map(|(metric, value)| NormalizedReading {
                ts: ts.clone(),
                metric: metric.to_string(),
                value,
                meta_json: None,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::SqliteStorage;
    use chrono::TimeZone;
    use smartfarm_config::model::StorageConfig;

    #[tokio::test]
    async fn seeds_once() {
        let dir = tempfile::tempdir().unwrap();
        let storage = SqliteStorage::open(StorageConfig {
            database_path: dir.path().join("seed.db").to_str().unwrap().to_string(),
            wal_mode: true,
        })
        .await
        .unwrap();
        let now = Utc.with_ymd_and_hms(2026, 1, 4, 12, 0, 0).unwrap();

        let site_id = seed_demo(&storage, now).await.unwrap().unwrap();
        assert!(seed_demo(&storage, now).await.unwrap().is_none());

        assert_eq!(storage.list_equipment(site_id).await.unwrap().len(), 4);
        assert_eq!(storage.list_thresholds(site_id).await.unwrap().len(), 2);
        assert_eq!(storage.list_readings(site_id).await.unwrap().len(), 2 * DEMO_SAMPLES);

        let latest = storage.latest_per_metric(site_id).await.unwrap();
        assert_eq!(latest.len(), 2);
        assert_eq!(latest[1].metric, "temp_c");
        assert_eq!(latest[1].value, 22.0);
        assert_eq!(latest[1].ts, "2026-01-04T12:00:00.000Z");

        let tickets = storage.list_maintenance(site_id).await.unwrap();
        assert_eq!(tickets[0].scheduled_for.as_deref(), Some("2026-01-11"));
        assert_eq!(tickets[0].next_due.as_deref(), Some("2026-04-04"));
    }
}
