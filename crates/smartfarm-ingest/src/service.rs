// SPDX-FileCopyrightText: 2026 SmartFarm Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Source-driven ingestion: fetch, normalize, persist.

use std::sync::Arc;

use async_trait::async_trait;
use smartfarm_config::model::IngestionConfig;
use smartfarm_core::source_config::SourceConfig;
use smartfarm_core::time::now_timestamp;
use smartfarm_core::types::{CandidateRecord, FetchResult, IngestOutcome};
use smartfarm_core::{ReadingSink, SmartfarmError, SourceAdapter, StorageAdapter};
use smartfarm_sources::{OperatorInput, SourceDispatcher};
use tracing::{info, warn};

use crate::normalizer::normalize_batch;

/// Runs one ingestion action at a time against an explicitly passed store.
pub struct IngestService {
    store: Arc<dyn StorageAdapter>,
    dispatcher: SourceDispatcher,
    max_batch_size: usize,
}

impl IngestService {
    pub fn new(store: Arc<dyn StorageAdapter>, config: &IngestionConfig) -> Self {
        Self {
            store,
            dispatcher: SourceDispatcher::new(config),
            max_batch_size: config.max_batch_size,
        }
    }

    pub fn dispatcher(&self) -> &SourceDispatcher {
        &self.dispatcher
    }

    /// Normalize and persist a batch of raw candidates.
    ///
    /// Records failing coercion and rows refused by a constraint are both
    /// counted as failed. An oversized batch is refused before any write.
    pub async fn ingest_candidates(
        &self,
        site_id: i64,
        source_id: Option<i64>,
        candidates: &[CandidateRecord],
    ) -> Result<IngestOutcome, SmartfarmError> {
        if candidates.len() > self.max_batch_size {
            return Err(SmartfarmError::Validation(format!(
                "batch of {} records exceeds the limit of {}",
                candidates.len(),
                self.max_batch_size
            )));
        }

        let batch = normalize_batch(candidates, &now_timestamp());
        let written = if batch.readings.is_empty() {
            Default::default()
        } else {
            self.store
                .insert_readings(site_id, source_id, &batch.readings)
                .await?
        };

        let saved = written.inserted;
        let failed = batch.rejected + written.rejected;
        info!(site_id, ?source_id, saved, failed, "ingestion batch stored");

        Ok(IngestOutcome {
            success: true,
            message: format!("{saved} saved, {failed} failed"),
            saved,
            failed,
        })
    }

    /// Fetch through `adapter` and persist what it returns.
    pub async fn ingest_with_adapter(
        &self,
        site_id: i64,
        source_id: Option<i64>,
        adapter: &dyn SourceAdapter,
        config: &SourceConfig,
    ) -> Result<IngestOutcome, SmartfarmError> {
        let fetched = adapter.fetch(config).await;
        if !fetched.success {
            warn!(
                site_id,
                ?source_id,
                protocol = %adapter.protocol(),
                message = %fetched.message,
                "source fetch failed"
            );
            return Ok(IngestOutcome::transport_failure(fetched.message));
        }
        let mut outcome = self
            .ingest_candidates(site_id, source_id, &fetched.records)
            .await?;
        if fetched.message != FetchResult::OK_MESSAGE {
            outcome.message = format!("{}; {}", fetched.message, outcome.message);
        }
        Ok(outcome)
    }

    /// Ingest from a configured sensor source.
    ///
    /// Disabled sources are refused. A transport failure is returned as an
    /// unsuccessful outcome carrying the adapter message.
    pub async fn ingest_from_source(
        &self,
        source_id: i64,
        input: OperatorInput,
    ) -> Result<IngestOutcome, SmartfarmError> {
        let source = self
            .store
            .get_source(source_id)
            .await?
            .ok_or(SmartfarmError::NotFound {
                entity: "sensor source",
                id: source_id,
            })?;
        if !source.enabled {
            return Err(SmartfarmError::SourceDisabled(source_id));
        }

        let config = source.config()?;
        config.validate()?;
        let adapter = self.dispatcher.adapter_for(config.protocol(), input)?;
        self.ingest_with_adapter(source.site_id, Some(source.id), adapter.as_ref(), &config)
            .await
    }
}

#[async_trait]
impl ReadingSink for IngestService {
    async fn submit(
        &self,
        site_id: i64,
        source_id: Option<i64>,
        candidates: Vec<CandidateRecord>,
    ) -> Result<IngestOutcome, SmartfarmError> {
        self.ingest_candidates(site_id, source_id, &candidates).await
    }
}
