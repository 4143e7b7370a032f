// SPDX-FileCopyrightText: 2026 SmartFarm Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Equipment CRUD operations.

use rusqlite::params;
use smartfarm_core::SmartfarmError;
use smartfarm_core::types::{Equipment, EquipmentStatus};

use super::enum_column;
use crate::database::{Database, map_tr_err};

pub async fn create_equipment(db: &Database, equipment: &Equipment) -> Result<i64, SmartfarmError> {
    let e = equipment.clone();
    db.connection()
        .call(move |conn| {
            conn.execute(
                "INSERT INTO equipment
                     (site_id, name, category, model, serial, install_date, status)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
                params![
                    e.site_id,
                    e.name,
                    e.category,
                    e.model,
                    e.serial,
                    e.install_date,
                    e.status.to_string(),
                ],
            )?;
            Ok(conn.last_insert_rowid())
        })
        .await
        .map_err(map_tr_err)
}

/// Equipment of a site ordered by name.
pub async fn list_equipment(db: &Database, site_id: i64) -> Result<Vec<Equipment>, SmartfarmError> {
    db.connection()
        .call(move |conn| {
            let mut stmt = conn.prepare(
                "SELECT id, site_id, name, category, model, serial, install_date, status
                 FROM equipment WHERE site_id = ?1 ORDER BY name, id",
            )?;
            let rows = stmt
                .query_map(params![site_id], |row| {
                    Ok(Equipment {
                        id: row.get(0)?,
                        site_id: row.get(1)?,
                        name: row.get(2)?,
                        category: row.get(3)?,
                        model: row.get(4)?,
                        serial: row.get(5)?,
                        install_date: row.get(6)?,
                        status: enum_column(row, 7)?,
                    })
                })?
                .collect::<Result<Vec<_>, _>>()?;
            Ok(rows)
        })
        .await
        .map_err(map_tr_err)
}

pub async fn update_equipment_status(
    db: &Database,
    id: i64,
    status: EquipmentStatus,
) -> Result<(), SmartfarmError> {
    let affected = db
        .connection()
        .call(move |conn| {
            conn.execute(
                "UPDATE equipment SET status = ?1 WHERE id = ?2",
                params![status.to_string(), id],
            )
        })
        .await
        .map_err(map_tr_err)?;
    super::require_row(affected, "equipment", id)
}

/// Delete equipment; maintenance records referencing it keep their history
/// with a null `equipment_id`.
pub async fn delete_equipment(db: &Database, id: i64) -> Result<(), SmartfarmError> {
    let affected = db
        .connection()
        .call(move |conn| conn.execute("DELETE FROM equipment WHERE id = ?1", params![id]))
        .await
        .map_err(map_tr_err)?;
    super::require_row(affected, "equipment", id)
}
