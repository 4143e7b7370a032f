// SPDX-FileCopyrightText: 2026 SmartFarm Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Database connection management with PRAGMA setup, WAL mode, and lifecycle.
//!
//! All statements run on tokio-rusqlite's single background thread, so one
//! [`Database`] serializes every writer in the process.

use std::time::Duration;

use smartfarm_core::SmartfarmError;
use tracing::debug;

const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

/// An open, migrated SQLite database.
pub struct Database {
    conn: tokio_rusqlite::Connection,
}

impl Database {
    /// Open (creating if needed) the database at `path`, enable foreign keys,
    /// optionally switch to WAL journaling, and apply pending migrations.
    pub async fn open(path: &str, wal_mode: bool) -> Result<Self, SmartfarmError> {
        let conn = tokio_rusqlite::Connection::open(path)
            .await
            .map_err(SmartfarmError::storage)?;

        let journal = conn
            .call(move |conn| -> Result<String, rusqlite::Error> {
                conn.busy_timeout(BUSY_TIMEOUT)?;
                conn.pragma_update(None, "foreign_keys", "ON")?;
                if wal_mode {
                    conn.pragma_update_and_check(None, "journal_mode", "WAL", |row| row.get(0))
                } else {
                    conn.pragma_query_value(None, "journal_mode", |row| row.get(0))
                }
            })
            .await
            .map_err(map_tr_err)?;
        debug!(path, journal = %journal, "database opened");

        let migrated = conn
            .call(|conn| Ok::<_, rusqlite::Error>(crate::migrations::run_migrations(conn)))
            .await
            .map_err(map_tr_err)?;
        migrated?;

        Ok(Self { conn })
    }

    pub fn connection(&self) -> &tokio_rusqlite::Connection {
        &self.conn
    }

    /// Checkpoint the WAL into the main file.
    pub async fn checkpoint(&self) -> Result<(), SmartfarmError> {
        self.conn
            .call(|conn| -> Result<(), rusqlite::Error> {
                conn.execute_batch("PRAGMA wal_checkpoint(TRUNCATE);")?;
                Ok(())
            })
            .await
            .map_err(map_tr_err)
    }
}

/// Convert a tokio-rusqlite call error into a storage error.
pub fn map_tr_err(e: tokio_rusqlite::Error<rusqlite::Error>) -> SmartfarmError {
    SmartfarmError::Storage {
        source: Box::new(e),
    }
}
