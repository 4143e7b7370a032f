// SPDX-FileCopyrightText: 2026 SmartFarm Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Sensor source CRUD operations.
//!
//! The configuration blob is stored exactly as given; the protocol tag is
//! not validated here so that an unknown tag surfaces at dispatch time.

use rusqlite::{OptionalExtension, params};
use smartfarm_core::SmartfarmError;
use smartfarm_core::source_config::Protocol;
use smartfarm_core::types::SensorSource;

use crate::database::{Database, map_tr_err};

const COLUMNS: &str = "id, site_id, name, protocol, config_json, enabled";

fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<SensorSource> {
    Ok(SensorSource {
        id: row.get(0)?,
        site_id: row.get(1)?,
        name: row.get(2)?,
        protocol: row.get(3)?,
        config_json: row.get(4)?,
        enabled: row.get(5)?,
    })
}

pub async fn create_source(db: &Database, source: &SensorSource) -> Result<i64, SmartfarmError> {
    let s = source.clone();
    db.connection()
        .call(move |conn| {
            conn.execute(
                "INSERT INTO sensor_sources (site_id, name, protocol, config_json, enabled)
                 VALUES (?1, ?2, ?3, ?4, ?5)",
                params![s.site_id, s.name, s.protocol, s.config_json, s.enabled],
            )?;
            Ok(conn.last_insert_rowid())
        })
        .await
        .map_err(map_tr_err)
}

pub async fn get_source(db: &Database, id: i64) -> Result<Option<SensorSource>, SmartfarmError> {
    db.connection()
        .call(move |conn| {
            conn.query_row(
                &format!("SELECT {COLUMNS} FROM sensor_sources WHERE id = ?1"),
                params![id],
                from_row,
            )
            .optional()
        })
        .await
        .map_err(map_tr_err)
}

/// Sources of a site, newest first.
pub async fn list_sources(
    db: &Database,
    site_id: i64,
) -> Result<Vec<SensorSource>, SmartfarmError> {
    db.connection()
        .call(move |conn| {
            let mut stmt = conn.prepare(&format!(
                "SELECT {COLUMNS} FROM sensor_sources WHERE site_id = ?1 ORDER BY id DESC"
            ))?;
            let rows = stmt
                .query_map(params![site_id], from_row)?
                .collect::<Result<Vec<_>, _>>()?;
            Ok(rows)
        })
        .await
        .map_err(map_tr_err)
}

/// The newest source of a site with the given protocol tag (case-insensitive).
pub async fn latest_source_for_protocol(
    db: &Database,
    site_id: i64,
    protocol: Protocol,
) -> Result<Option<SensorSource>, SmartfarmError> {
    let tag = protocol.to_string();
    db.connection()
        .call(move |conn| {
            conn.query_row(
                &format!(
                    "SELECT {COLUMNS} FROM sensor_sources
                     WHERE site_id = ?1 AND UPPER(protocol) = ?2
                     ORDER BY id DESC LIMIT 1"
                ),
                params![site_id, tag],
                from_row,
            )
            .optional()
        })
        .await
        .map_err(map_tr_err)
}

pub async fn set_source_enabled(
    db: &Database,
    id: i64,
    enabled: bool,
) -> Result<(), SmartfarmError> {
    let affected = db
        .connection()
        .call(move |conn| {
            conn.execute(
                "UPDATE sensor_sources SET enabled = ?1 WHERE id = ?2",
                params![enabled, id],
            )
        })
        .await
        .map_err(map_tr_err)?;
    super::require_row(affected, "sensor source", id)
}

/// Delete a source; its readings survive with a null `source_id`.
pub async fn delete_source(db: &Database, id: i64) -> Result<(), SmartfarmError> {
    let affected = db
        .connection()
        .call(move |conn| conn.execute("DELETE FROM sensor_sources WHERE id = ?1", params![id]))
        .await
        .map_err(map_tr_err)?;
    super::require_row(affected, "sensor source", id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::queries::test_support::open_db_with_site;

    fn source(site_id: i64, name: &str, protocol: &str, config_json: &str) -> SensorSource {
        SensorSource {
            id: 0,
            site_id,
            name: name.to_string(),
            protocol: protocol.to_string(),
            config_json: config_json.to_string(),
            enabled: true,
        }
    }

    #[tokio::test]
    async fn config_blob_is_stored_verbatim() {
        let (db, _dir, site_id) = open_db_with_site().await;
        let blob = r#"{"url":"https://farm.test/api","headers":{"X-Key":"abc"}}"#;
        let id = create_source(&db, &source(site_id, "Gateway", "HTTP", blob))
            .await
            .unwrap();
        let stored = get_source(&db, id).await.unwrap().unwrap();
        assert_eq!(stored.config_json, blob);
        assert!(stored.enabled);
    }

    #[tokio::test]
    async fn unknown_protocol_tag_is_accepted_by_store() {
        let (db, _dir, site_id) = open_db_with_site().await;
        let id = create_source(&db, &source(site_id, "Radio", "LORAWAN", "{}"))
            .await
            .unwrap();
        assert_eq!(get_source(&db, id).await.unwrap().unwrap().protocol, "LORAWAN");
    }

    #[tokio::test]
    async fn list_is_newest_first_and_latest_matches_protocol() {
        let (db, _dir, site_id) = open_db_with_site().await;
        let old_plc = source(site_id, "Old PLC", "MODBUS", r#"{"host":"10.0.0.1"}"#);
        let first = create_source(&db, &old_plc).await.unwrap();
        let second = create_source(&db, &source(site_id, "Manual", "MANUAL", "{}"))
            .await
            .unwrap();
        let new_plc = source(site_id, "New PLC", "modbus", r#"{"host":"10.0.0.2"}"#);
        let third = create_source(&db, &new_plc).await.unwrap();

        let ids: Vec<_> = list_sources(&db, site_id).await.unwrap().iter().map(|s| s.id).collect();
        assert_eq!(ids, vec![third, second, first]);

        let latest = latest_source_for_protocol(&db, site_id, Protocol::Modbus)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(latest.id, third);
        assert!(
            latest_source_for_protocol(&db, site_id, Protocol::Mqtt)
                .await
                .unwrap()
                .is_none()
        );
    }

    #[tokio::test]
    async fn toggle_enabled() {
        let (db, _dir, site_id) = open_db_with_site().await;
        let id = create_source(&db, &source(site_id, "Manual", "MANUAL", "{}"))
            .await
            .unwrap();
        set_source_enabled(&db, id, false).await.unwrap();
        assert!(!get_source(&db, id).await.unwrap().unwrap().enabled);
        assert!(set_source_enabled(&db, id + 100, true).await.is_err());
    }
}
