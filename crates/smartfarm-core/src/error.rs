// SPDX-FileCopyrightText: 2026 SmartFarm Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types for the SmartFarm monitoring platform.

use thiserror::Error;

/// The primary error type used across the store, adapters, and ingestion pipeline.
#[derive(Debug, Error)]
pub enum SmartfarmError {
    /// Storage backend errors (database connection, query failure, constraint violation).
    #[error("storage error: {source}")]
    Storage {
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// A sensor source carries a protocol tag no adapter understands.
    #[error("unknown protocol: {0}")]
    UnknownProtocol(String),

    /// A sensor source configuration blob does not match its protocol's shape.
    #[error("invalid {protocol} source configuration: {message}")]
    InvalidSourceConfig { protocol: String, message: String },

    /// The referenced entity does not exist.
    #[error("{entity} {id} not found")]
    NotFound { entity: &'static str, id: i64 },

    /// Ingestion was requested from a source whose enabled flag is off.
    #[error("sensor source {0} is disabled")]
    SourceDisabled(i64),

    /// Operator input failed validation before touching the store.
    #[error("validation error: {0}")]
    Validation(String),

    /// Internal or unexpected errors.
    #[error("internal error: {0}")]
    Internal(String),
}

impl SmartfarmError {
    /// Wraps any error as a storage failure.
    pub fn storage<E>(err: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        SmartfarmError::Storage {
            source: Box::new(err),
        }
    }
}
