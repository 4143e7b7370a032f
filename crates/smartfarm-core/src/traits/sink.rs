// SPDX-FileCopyrightText: 2026 SmartFarm Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Write-only entry point for out-of-process collectors.

use async_trait::async_trait;

use crate::error::SmartfarmError;
use crate::types::{CandidateRecord, IngestOutcome};

/// The narrow contract a long-running collector (MQTT subscriber, Modbus
/// poller) needs: hand over raw candidates for one site and learn how many
/// were kept.
#[async_trait]
pub trait ReadingSink: Send + Sync {
    async fn submit(
        &self,
        site_id: i64,
        source_id: Option<i64>,
        candidates: Vec<CandidateRecord>,
    ) -> Result<IngestOutcome, SmartfarmError>;
}
