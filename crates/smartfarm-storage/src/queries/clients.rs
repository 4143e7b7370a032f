// SPDX-FileCopyrightText: 2026 SmartFarm Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Client CRUD operations.

use rusqlite::{OptionalExtension, params};
use smartfarm_core::SmartfarmError;
use smartfarm_core::types::Client;

use crate::database::{Database, map_tr_err};

const COLUMNS: &str = "id, name, phone, email, address, notes";

fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Client> {
    Ok(Client {
        id: row.get(0)?,
        name: row.get(1)?,
        phone: row.get(2)?,
        email: row.get(3)?,
        address: row.get(4)?,
        notes: row.get(5)?,
    })
}

/// Insert a client and return its id.
pub async fn create_client(db: &Database, client: &Client) -> Result<i64, SmartfarmError> {
    let client = client.clone();
    db.connection()
        .call(move |conn| {
            conn.execute(
                "INSERT INTO clients (name, phone, email, address, notes)
                 VALUES (?1, ?2, ?3, ?4, ?5)",
                params![client.name, client.phone, client.email, client.address, client.notes],
            )?;
            Ok(conn.last_insert_rowid())
        })
        .await
        .map_err(map_tr_err)
}

pub async fn get_client(db: &Database, id: i64) -> Result<Option<Client>, SmartfarmError> {
    db.connection()
        .call(move |conn| {
            conn.query_row(
                &format!("SELECT {COLUMNS} FROM clients WHERE id = ?1"),
                params![id],
                from_row,
            )
            .optional()
        })
        .await
        .map_err(map_tr_err)
}

/// All clients ordered by name.
pub async fn list_clients(db: &Database) -> Result<Vec<Client>, SmartfarmError> {
    db.connection()
        .call(|conn| {
            let mut stmt =
                conn.prepare(&format!("SELECT {COLUMNS} FROM clients ORDER BY name, id"))?;
            let clients = stmt.query_map([], from_row)?.collect::<Result<Vec<_>, _>>()?;
            Ok(clients)
        })
        .await
        .map_err(map_tr_err)
}

/// Delete a client; its sites and everything under them cascade.
pub async fn delete_client(db: &Database, id: i64) -> Result<(), SmartfarmError> {
    let affected = db
        .connection()
        .call(move |conn| conn.execute("DELETE FROM clients WHERE id = ?1", params![id]))
        .await
        .map_err(map_tr_err)?;
    super::require_row(affected, "client", id)
}
