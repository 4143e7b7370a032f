// SPDX-FileCopyrightText: 2026 SmartFarm Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Typed query modules, one per table.

pub mod clients;
pub mod equipment;
pub mod maintenance;
pub mod readings;
pub mod sites;
pub mod sources;
pub mod thresholds;

use std::str::FromStr;

use rusqlite::types::Type;
use smartfarm_core::SmartfarmError;

/// Read a strum-backed enum stored as text in column `idx`.
pub(crate) fn enum_column<T>(row: &rusqlite::Row<'_>, idx: usize) -> rusqlite::Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    let raw: String = row.get(idx)?;
    raw.parse()
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(e)))
}

/// Turn a zero affected-row count into [`SmartfarmError::NotFound`].
pub(crate) fn require_row(
    affected: usize,
    entity: &'static str,
    id: i64,
) -> Result<(), SmartfarmError> {
    if affected == 0 {
        Err(SmartfarmError::NotFound { entity, id })
    } else {
        Ok(())
    }
}
