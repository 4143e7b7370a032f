// SPDX-FileCopyrightText: 2026 SmartFarm Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Site CRUD operations.

use rusqlite::{OptionalExtension, params};
use smartfarm_core::SmartfarmError;
use smartfarm_core::types::{Site, SiteSummary};

use super::enum_column;
use crate::database::{Database, map_tr_err};

pub async fn create_site(db: &Database, site: &Site) -> Result<i64, SmartfarmError> {
    let site = site.clone();
    db.connection()
        .call(move |conn| {
            conn.execute(
                "INSERT INTO sites (client_id, name, location, kind) VALUES (?1, ?2, ?3, ?4)",
                params![site.client_id, site.name, site.location, site.kind.to_string()],
            )?;
            Ok(conn.last_insert_rowid())
        })
        .await
        .map_err(map_tr_err)
}

pub async fn get_site(db: &Database, id: i64) -> Result<Option<Site>, SmartfarmError> {
    db.connection()
        .call(move |conn| {
            conn.query_row(
                "SELECT id, client_id, name, location, kind FROM sites WHERE id = ?1",
                params![id],
                |row| {
                    Ok(Site {
                        id: row.get(0)?,
                        client_id: row.get(1)?,
                        name: row.get(2)?,
                        location: row.get(3)?,
                        kind: enum_column(row, 4)?,
                    })
                },
            )
            .optional()
        })
        .await
        .map_err(map_tr_err)
}

/// Every site with its client's name, ordered by client then site name.
pub async fn list_sites(db: &Database) -> Result<Vec<SiteSummary>, SmartfarmError> {
    db.connection()
        .call(|conn| {
            let mut stmt = conn.prepare(
                "SELECT s.id, s.name, s.kind, c.name
                 FROM sites s JOIN clients c ON c.id = s.client_id
                 ORDER BY c.name, s.name, s.id",
            )?;
            let sites = stmt
                .query_map([], |row| {
                    Ok(SiteSummary {
                        site_id: row.get(0)?,
                        site_name: row.get(1)?,
                        kind: enum_column(row, 2)?,
                        client_name: row.get(3)?,
                    })
                })?
                .collect::<Result<Vec<_>, _>>()?;
            Ok(sites)
        })
        .await
        .map_err(map_tr_err)
}

/// Delete a site. Equipment, sources, readings, thresholds, and maintenance
/// records cascade.
pub async fn delete_site(db: &Database, id: i64) -> Result<(), SmartfarmError> {
    let affected = db
        .connection()
        .call(move |conn| conn.execute("DELETE FROM sites WHERE id = ?1", params![id]))
        .await
        .map_err(map_tr_err)?;
    super::require_row(affected, "site", id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::queries::clients::{create_client, delete_client};
    use crate::queries::test_support::{open_db, open_db_with_site};
    use smartfarm_core::types::{Client, SiteKind};

    #[tokio::test]
    async fn get_round_trips_kind() {
        let (db, _dir, site_id) = open_db_with_site().await;
        let site = get_site(&db, site_id).await.unwrap().unwrap();
        assert_eq!(site.kind, SiteKind::Poultry);
        assert_eq!(site.name, "Site 1");
    }

    #[tokio::test]
    async fn list_joins_client_name() {
        let (db, _dir) = open_db().await;
        let client_id = create_client(
            &db,
            &Client {
                id: 0,
                name: "Porcina Sur".to_string(),
                phone: None,
                email: None,
                address: None,
                notes: None,
            },
        )
        .await
        .unwrap();
        for name in ["Shed B", "Shed A"] {
            create_site(
                &db,
                &Site {
                    id: 0,
                    client_id,
                    name: name.to_string(),
                    location: None,
                    kind: SiteKind::Swine,
                },
            )
            .await
            .unwrap();
        }

        let sites = list_sites(&db).await.unwrap();
        assert_eq!(sites.len(), 2);
        assert_eq!(sites[0].site_name, "Shed A");
        assert!(sites.iter().all(|s| s.client_name == "Porcina Sur"));
    }

    #[tokio::test]
    async fn site_for_missing_client_is_rejected() {
        let (db, _dir) = open_db().await;
        let result = create_site(
            &db,
            &Site {
                id: 0,
                client_id: 404,
                name: "Orphan".to_string(),
                location: None,
                kind: SiteKind::Mixed,
            },
        )
        .await;
        assert!(matches!(result, Err(SmartfarmError::Storage { .. })));
    }

    #[tokio::test]
    async fn deleting_client_cascades_to_sites() {
        let (db, _dir, site_id) = open_db_with_site().await;
        let site = get_site(&db, site_id).await.unwrap().unwrap();
        delete_client(&db, site.client_id).await.unwrap();
        assert!(get_site(&db, site_id).await.unwrap().is_none());
    }
}
