// SPDX-FileCopyrightText: 2026 SmartFarm Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Threshold writes and lookups.
//!
//! `(site_id, metric)` is unique; writes go through an upsert so a metric
//! never has two active rows.

use rusqlite::params;
use smartfarm_core::SmartfarmError;
use smartfarm_core::types::Threshold;

use crate::database::{Database, map_tr_err};

/// Insert or replace the threshold for `(site_id, metric)`, returning its id.
pub async fn upsert_threshold(db: &Database, threshold: &Threshold) -> Result<i64, SmartfarmError> {
    let t = threshold.clone();
    if t.metric.trim().is_empty() {
        return Err(SmartfarmError::Validation(
            "threshold metric must not be empty".to_string(),
        ));
    }
    db.connection()
        .call(move |conn| {
            conn.query_row(
                "INSERT INTO thresholds
                     (site_id, metric, critical_min, critical_max, warn_min, warn_max, enabled)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
                 ON CONFLICT (site_id, metric) DO UPDATE SET
                     critical_min = excluded.critical_min,
                     critical_max = excluded.critical_max,
                     warn_min = excluded.warn_min,
                     warn_max = excluded.warn_max,
                     enabled = excluded.enabled
                 RETURNING id",
                params![
                    t.site_id,
                    t.metric.trim(),
                    t.critical_min,
                    t.critical_max,
                    t.warn_min,
                    t.warn_max,
                    t.enabled,
                ],
                |row| row.get(0),
            )
        })
        .await
        .map_err(map_tr_err)
}

/// Thresholds of a site ordered by metric, then id.
pub async fn list_thresholds(
    db: &Database,
    site_id: i64,
) -> Result<Vec<Threshold>, SmartfarmError> {
    db.connection()
        .call(move |conn| {
            let mut stmt = conn.prepare(
                "SELECT id, site_id, metric, critical_min, critical_max, warn_min, warn_max, enabled
                 FROM thresholds WHERE site_id = ?1 ORDER BY metric, id",
            )?;
            let rows = stmt
                .query_map(params![site_id], |row| {
                    Ok(Threshold {
                        id: row.get(0)?,
                        site_id: row.get(1)?,
                        metric: row.get(2)?,
                        critical_min: row.get(3)?,
                        critical_max: row.get(4)?,
                        warn_min: row.get(5)?,
                        warn_max: row.get(6)?,
                        enabled: row.get(7)?,
                    })
                })?
                .collect::<Result<Vec<_>, _>>()?;
            Ok(rows)
        })
        .await
        .map_err(map_tr_err)
}

pub async fn delete_threshold(db: &Database, id: i64) -> Result<(), SmartfarmError> {
    let affected = db
        .connection()
        .call(move |conn| conn.execute("DELETE FROM thresholds WHERE id = ?1", params![id]))
        .await
        .map_err(map_tr_err)?;
    super::require_row(affected, "threshold", id)
}
