// SPDX-FileCopyrightText: 2026 SmartFarm Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Sensor reading writes and time-series reads.
//!
//! Readings are append-only. `ts` is fixed-width UTC text, so window filters
//! and ordering compare strings.

use chrono::{DateTime, Utc};
use rusqlite::{ErrorCode, params};
use smartfarm_core::SmartfarmError;
use smartfarm_core::time::format_timestamp;
use smartfarm_core::types::{
    BatchWrite, HistoryPoint, MetricSample, NormalizedReading, SensorReading,
};
use tracing::{debug, warn};

use crate::database::{Database, map_tr_err};

/// Insert a batch of readings inside a single transaction.
///
/// A row refused by a constraint (for example a `source_id` that does not
/// exist) is counted as rejected and skipped; the other rows commit together.
/// Any other SQLite error rolls back the whole batch.
pub async fn insert_readings(
    db: &Database,
    site_id: i64,
    source_id: Option<i64>,
    readings: &[NormalizedReading],
) -> Result<BatchWrite, SmartfarmError> {
    if readings.is_empty() {
        return Ok(BatchWrite::default());
    }
    let readings = readings.to_vec();
    db.connection()
        .call(move |conn| {
            let tx = conn.transaction()?;
            let mut outcome = BatchWrite::default();
            {
                let mut stmt = tx.prepare(
                    "INSERT INTO sensor_readings (site_id, source_id, ts, metric, value, meta_json)
                     VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
                )?;
                for r in &readings {
                    match stmt.execute(params![
                        site_id,
                        source_id,
                        r.ts,
                        r.metric,
                        r.value,
                        r.meta_json
                    ]) {
                        Ok(_) => outcome.inserted += 1,
                        Err(rusqlite::Error::SqliteFailure(err, detail))
                            if err.code == ErrorCode::ConstraintViolation =>
                        {
                            warn!(
                                site_id,
                                metric = %r.metric,
                                detail = detail.as_deref().unwrap_or("constraint violation"),
                                "reading rejected by store"
                            );
                            outcome.rejected += 1;
                        }
                        Err(e) => return Err(e),
                    }
                }
            }
            tx.commit()?;
            debug!(
                site_id,
                inserted = outcome.inserted,
                rejected = outcome.rejected,
                "reading batch committed"
            );
            Ok(outcome)
        })
        .await
        .map_err(map_tr_err)
}

/// The newest reading per metric of a site, ordered by metric.
///
/// Ties on `ts` go to the highest id, i.e. the last inserted row.
pub async fn latest_per_metric(
    db: &Database,
    site_id: i64,
) -> Result<Vec<MetricSample>, SmartfarmError> {
    db.connection()
        .call(move |conn| {
            let mut stmt = conn.prepare(
                "SELECT r.metric, r.value, r.ts
                 FROM sensor_readings r
                 WHERE r.site_id = ?1
                   AND r.id = (
                       SELECT r2.id FROM sensor_readings r2
                       WHERE r2.site_id = r.site_id AND r2.metric = r.metric
                       ORDER BY r2.ts DESC, r2.id DESC
                       LIMIT 1
                   )
                 ORDER BY r.metric",
            )?;
            let rows = stmt
                .query_map(params![site_id], sample_from_row)?
                .collect::<Result<Vec<_>, _>>()?;
            Ok(rows)
        })
        .await
        .map_err(map_tr_err)
}

/// One metric's readings at or after `since`, ascending.
pub async fn history(
    db: &Database,
    site_id: i64,
    metric: &str,
    since: DateTime<Utc>,
) -> Result<Vec<HistoryPoint>, SmartfarmError> {
    let metric = metric.to_string();
    let since = format_timestamp(since);
    db.connection()
        .call(move |conn| {
            let mut stmt = conn.prepare(
                "SELECT ts, value FROM sensor_readings
                 WHERE site_id = ?1 AND metric = ?2 AND ts >= ?3
                 ORDER BY ts ASC, id ASC",
            )?;
            let rows = stmt
                .query_map(params![site_id, metric, since], |row| {
                    Ok(HistoryPoint {
                        ts: row.get(0)?,
                        value: row.get(1)?,
                    })
                })?
                .collect::<Result<Vec<_>, _>>()?;
            Ok(rows)
        })
        .await
        .map_err(map_tr_err)
}

/// Every reading of a site at or after `since`, ascending.
pub async fn readings_since(
    db: &Database,
    site_id: i64,
    since: DateTime<Utc>,
) -> Result<Vec<MetricSample>, SmartfarmError> {
    let since = format_timestamp(since);
    db.connection()
        .call(move |conn| {
            let mut stmt = conn.prepare(
                "SELECT metric, value, ts FROM sensor_readings
                 WHERE site_id = ?1 AND ts >= ?2
                 ORDER BY ts ASC, id ASC",
            )?;
            let rows = stmt
                .query_map(params![site_id, since], sample_from_row)?
                .collect::<Result<Vec<_>, _>>()?;
            Ok(rows)
        })
        .await
        .map_err(map_tr_err)
}

/// Raw reading rows of a site in insertion order.
pub async fn list_readings(
    db: &Database,
    site_id: i64,
) -> Result<Vec<SensorReading>, SmartfarmError> {
    db.connection()
        .call(move |conn| {
            let mut stmt = conn.prepare(
                "SELECT id, site_id, source_id, ts, metric, value, meta_json
                 FROM sensor_readings WHERE site_id = ?1 ORDER BY id",
            )?;
            let rows = stmt
                .query_map(params![site_id], |row| {
                    Ok(SensorReading {
                        id: row.get(0)?,
                        site_id: row.get(1)?,
                        source_id: row.get(2)?,
                        ts: row.get(3)?,
                        metric: row.get(4)?,
                        value: row.get(5)?,
                        meta_json: row.get(6)?,
                    })
                })?
                .collect::<Result<Vec<_>, _>>()?;
            Ok(rows)
        })
        .await
        .map_err(map_tr_err)
}

fn sample_from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<MetricSample> {
    Ok(MetricSample {
        metric: row.get(0)?,
        value: row.get(1)?,
        ts: row.get(2)?,
    })
}
