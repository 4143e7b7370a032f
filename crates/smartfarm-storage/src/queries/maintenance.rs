// SPDX-FileCopyrightText: 2026 SmartFarm Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Maintenance ticket operations.

use rusqlite::params;
use smartfarm_core::SmartfarmError;
use smartfarm_core::types::{MaintenanceRecord, MaintenanceStatus};

use super::enum_column;
use crate::database::{Database, map_tr_err};

pub async fn create_maintenance(
    db: &Database,
    record: &MaintenanceRecord,
) -> Result<i64, SmartfarmError> {
    let m = record.clone();
    db.connection()
        .call(move |conn| {
            conn.execute(
                "INSERT INTO maintenance
                     (site_id, equipment_id, kind, status, priority, scheduled_for,
                      performed_at, description, actions_taken, parts_used, next_due)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)",
                params![
                    m.site_id,
                    m.equipment_id,
                    m.kind.to_string(),
                    m.status.to_string(),
                    m.priority.to_string(),
                    m.scheduled_for,
                    m.performed_at,
                    m.description,
                    m.actions_taken,
                    m.parts_used,
                    m.next_due,
                ],
            )?;
            Ok(conn.last_insert_rowid())
        })
        .await
        .map_err(map_tr_err)
}

/// Tickets of a site, most recent performed (or scheduled) date first.
pub async fn list_maintenance(
    db: &Database,
    site_id: i64,
) -> Result<Vec<MaintenanceRecord>, SmartfarmError> {
    db.connection()
        .call(move |conn| {
            let mut stmt = conn.prepare(
                "SELECT id, site_id, equipment_id, kind, status, priority, scheduled_for,
                        performed_at, description, actions_taken, parts_used, next_due
                 FROM maintenance WHERE site_id = ?1
                 ORDER BY COALESCE(performed_at, scheduled_for) DESC, id DESC",
            )?;
            let rows = stmt
                .query_map(params![site_id], |row| {
                    Ok(MaintenanceRecord {
                        id: row.get(0)?,
                        site_id: row.get(1)?,
                        equipment_id: row.get(2)?,
                        kind: enum_column(row, 3)?,
                        status: enum_column(row, 4)?,
                        priority: enum_column(row, 5)?,
                        scheduled_for: row.get(6)?,
                        performed_at: row.get(7)?,
                        description: row.get(8)?,
                        actions_taken: row.get(9)?,
                        parts_used: row.get(10)?,
                        next_due: row.get(11)?,
                    })
                })?
                .collect::<Result<Vec<_>, _>>()?;
            Ok(rows)
        })
        .await
        .map_err(map_tr_err)
}

/// Change a ticket's status. Closing stamps `performed_at = today` unless it
/// is already set.
pub async fn update_maintenance_status(
    db: &Database,
    id: i64,
    status: MaintenanceStatus,
    today: &str,
) -> Result<(), SmartfarmError> {
    let today = today.to_string();
    let closing = status == MaintenanceStatus::Closed;
    let affected = db
        .connection()
        .call(move |conn| {
            conn.execute(
                "UPDATE maintenance
                 SET status = ?1,
                     performed_at = CASE WHEN ?2 AND performed_at IS NULL
                                         THEN ?3 ELSE performed_at END
                 WHERE id = ?4",
                params![status.to_string(), closing, today, id],
            )
        })
        .await
        .map_err(map_tr_err)?;
    super::require_row(affected, "maintenance record", id)
}

pub async fn delete_maintenance(db: &Database, id: i64) -> Result<(), SmartfarmError> {
    let affected = db
        .connection()
        .call(move |conn| conn.execute("DELETE FROM maintenance WHERE id = ?1", params![id]))
        .await
        .map_err(map_tr_err)?;
    super::require_row(affected, "maintenance record", id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::queries::equipment::{create_equipment, delete_equipment};
    use crate::queries::test_support::open_db_with_site;
    use smartfarm_core::types::{Equipment, EquipmentStatus, MaintenanceKind, Priority};

    fn ticket(site_id: i64, equipment_id: Option<i64>, scheduled_for: &str) -> MaintenanceRecord {
        MaintenanceRecord {
            id: 0,
            site_id,
            equipment_id,
            kind: MaintenanceKind::Preventive,
            status: MaintenanceStatus::Scheduled,
            priority: Priority::Medium,
            scheduled_for: Some(scheduled_for.to_string()),
            performed_at: None,
            description: Some("Sensor cleaning".to_string()),
            actions_taken: None,
            parts_used: None,
            next_due: None,
        }
    }

    #[tokio::test]
    async fn closing_stamps_performed_date_once() {
        let (db, _dir, site_id) = open_db_with_site().await;
        let id = create_maintenance(&db, &ticket(site_id, None, "2026-01-10"))
            .await
            .unwrap();

        update_maintenance_status(&db, id, MaintenanceStatus::InProgress, "2026-01-09")
            .await
            .unwrap();
        assert_eq!(list_maintenance(&db, site_id).await.unwrap()[0].performed_at, None);

        update_maintenance_status(&db, id, MaintenanceStatus::Closed, "2026-01-11")
            .await
            .unwrap();
        update_maintenance_status(&db, id, MaintenanceStatus::Closed, "2026-02-01")
            .await
            .unwrap();
        let record = &list_maintenance(&db, site_id).await.unwrap()[0];
        assert_eq!(record.status, MaintenanceStatus::Closed);
        assert_eq!(record.performed_at.as_deref(), Some("2026-01-11"));
    }

    #[tokio::test]
    async fn list_orders_most_recent_first() {
        let (db, _dir, site_id) = open_db_with_site().await;
        create_maintenance(&db, &ticket(site_id, None, "2026-01-05")).await.unwrap();
        create_maintenance(&db, &ticket(site_id, None, "2026-03-01")).await.unwrap();
        let dates: Vec<_> = list_maintenance(&db, site_id)
            .await
            .unwrap()
            .into_iter()
            .filter_map(|m| m.scheduled_for)
            .collect();
        assert_eq!(dates, vec!["2026-03-01", "2026-01-05"]);
    }

    #[tokio::test]
    async fn history_survives_equipment_removal() {
        let (db, _dir, site_id) = open_db_with_site().await;
        let equipment_id = create_equipment(
            &db,
            &Equipment {
                id: 0,
                site_id,
                name: "Controller ITC10".to_string(),
                category: None,
                model: None,
                serial: None,
                install_date: None,
                status: EquipmentStatus::Operative,
            },
        )
        .await
        .unwrap();
        create_maintenance(&db, &ticket(site_id, Some(equipment_id), "2026-01-10"))
            .await
            .unwrap();

        delete_equipment(&db, equipment_id).await.unwrap();

        let records = list_maintenance(&db, site_id).await.unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].equipment_id, None);
    }
}
