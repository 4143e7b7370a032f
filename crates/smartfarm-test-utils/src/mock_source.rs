// SPDX-FileCopyrightText: 2026 SmartFarm Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Mock protocol adapter for deterministic ingestion tests.

use std::collections::VecDeque;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;

use smartfarm_core::source_config::{Protocol, SourceConfig};
use smartfarm_core::types::FetchResult;
use smartfarm_core::SourceAdapter;

/// Returns queued [`FetchResult`]s in FIFO order, then empty successes.
/// Records how many times it was fetched.
pub struct MockSource {
    protocol: Protocol,
    results: Arc<Mutex<VecDeque<FetchResult>>>,
    calls: Arc<Mutex<usize>>,
}

impl MockSource {
    pub fn new(protocol: Protocol) -> Self {
        Self::with_results(protocol, Vec::new())
    }

    pub fn with_results(protocol: Protocol, results: Vec<FetchResult>) -> Self {
        Self {
            protocol,
            results: Arc::new(Mutex::new(VecDeque::from(results))),
            calls: Arc::new(Mutex::new(0)),
        }
    }

    pub async fn push(&self, result: FetchResult) {
        self.results.lock().await.push_back(result);
    }

    pub async fn calls(&self) -> usize {
        *self.calls.lock().await
    }
}

#[async_trait]
impl SourceAdapter for MockSource {
    fn protocol(&self) -> Protocol {
        self.protocol
    }

    async fn fetch(&self, _config: &SourceConfig) -> FetchResult {
        *self.calls.lock().await += 1;
        self.results
            .lock()
            .await
            .pop_front()
            .unwrap_or_else(|| FetchResult::ok(Vec::new()))
    }
}
