// SPDX-FileCopyrightText: 2026 SmartFarm Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Ingestion pipeline for the SmartFarm monitoring platform.
//!
//! The normalizer turns raw adapter output into storable rows; the service
//! drives a configured source through fetch, normalization, and one batch
//! write, and doubles as the [`ReadingSink`](smartfarm_core::ReadingSink)
//! for external collectors.

pub mod normalizer;
pub mod service;

pub use normalizer::{NormalizedBatch, RecordRejection, normalize_batch, normalize_record};
pub use service::IngestService;
