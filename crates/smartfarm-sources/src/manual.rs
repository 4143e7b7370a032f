// SPDX-FileCopyrightText: 2026 SmartFarm Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Manual-entry adapter: exactly one operator-typed reading.

use async_trait::async_trait;
use serde_json::Value;
use smartfarm_core::source_config::{Protocol, SourceConfig};
use smartfarm_core::types::{CandidateRecord, FetchResult};
use smartfarm_core::SourceAdapter;

/// A reading as typed by the operator. The value stays text until the
/// normalizer coerces it.
#[derive(Debug, Clone, PartialEq)]
pub struct ManualEntry {
    pub metric: String,
    pub value: String,
    pub timestamp: Option<String>,
}

pub struct ManualAdapter {
    entry: ManualEntry,
}

impl ManualAdapter {
    pub fn new(entry: ManualEntry) -> Self {
        Self { entry }
    }
}

#[async_trait]
impl SourceAdapter for ManualAdapter {
    fn protocol(&self) -> Protocol {
        Protocol::Manual
    }

    async fn fetch(&self, config: &SourceConfig) -> FetchResult {
        if !matches!(config, SourceConfig::Manual(_)) {
            return crate::mismatched(self.protocol(), config);
        }
        let timestamp = self
            .entry
            .timestamp
            .as_deref()
            .map(str::trim)
            .filter(|ts| !ts.is_empty())
            .map(str::to_string);
        FetchResult::ok(vec![CandidateRecord::new(
            self.entry.metric.trim(),
            Value::String(self.entry.value.trim().to_string()),
            timestamp,
        )])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use smartfarm_core::source_config::ManualSourceConfig;

    #[tokio::test]
    async fn builds_exactly_one_record() {
        let adapter = ManualAdapter::new(ManualEntry {
            metric: " nh3_ppm ".to_string(),
            value: "8.2".to_string(),
            timestamp: Some(String::new()),
        });
        let result = adapter
            .fetch(&SourceConfig::Manual(ManualSourceConfig::default()))
            .await;
        assert!(result.success);
        assert_eq!(result.records.len(), 1);
        assert_eq!(result.records[0].0["metric"], "nh3_ppm");
        assert_eq!(result.records[0].0["value"], "8.2");
        assert!(result.records[0].0.get("timestamp").is_none());
    }
}
