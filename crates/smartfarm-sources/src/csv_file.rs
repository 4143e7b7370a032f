// SPDX-FileCopyrightText: 2026 SmartFarm Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Bulk-file adapter for uploaded CSV tables.
//!
//! Required columns are `metric` and `value`; `timestamp` (or `ts`) is
//! optional and every other column is carried as metadata. Cells are passed
//! through as text and an empty cell counts as absent. Row-level problems are
//! left for the normalizer to count.

use async_trait::async_trait;
use serde_json::{Map, Value};
use smartfarm_core::source_config::{CsvSourceConfig, Protocol, SourceConfig};
use smartfarm_core::types::{CandidateRecord, FetchResult};
use smartfarm_core::SourceAdapter;
use tracing::debug;

const TIMESTAMP_COLUMNS: &[&str] = &["timestamp", "ts"];

pub struct CsvAdapter {
    data: Vec<u8>,
}

impl CsvAdapter {
    pub fn new(data: Vec<u8>) -> Self {
        Self { data }
    }

    fn parse(&self, config: &CsvSourceConfig) -> FetchResult {
        let delimiter = config.delimiter.unwrap_or(',');
        if !delimiter.is_ascii() {
            return FetchResult::failure(format!(
                "delimiter `{delimiter}` must be a single ASCII character"
            ));
        }

        let mut reader = csv::ReaderBuilder::new()
            .delimiter(delimiter as u8)
            .flexible(true)
            .trim(csv::Trim::All)
            .from_reader(self.data.as_slice());

        let headers: Vec<String> = match reader.headers() {
            Ok(headers) => headers.iter().map(|h| h.to_ascii_lowercase()).collect(),
            Err(e) => return FetchResult::failure(format!("cannot read CSV header: {e}")),
        };

        let missing: Vec<&str> = ["metric", "value"]
            .into_iter()
            .filter(|required| !headers.iter().any(|h| h == *required))
            .collect();
        if !missing.is_empty() {
            return FetchResult::failure(format!(
                "CSV is missing required column(s): {}",
                missing.join(", ")
            ));
        }

        let mut records = Vec::new();
        for (line, row) in reader.records().enumerate() {
            match row {
                Ok(row) => records.push(row_to_candidate(&headers, &row)),
                Err(e) => {
                    debug!(row = line + 1, error = %e, "unreadable CSV row");
                    records.push(CandidateRecord(Value::Null));
                }
            }
        }
        FetchResult::ok(records)
    }
}

fn row_to_candidate(headers: &[String], row: &csv::StringRecord) -> CandidateRecord {
    let mut map = Map::new();
    let mut has_timestamp = false;
    for (name, cell) in headers.iter().zip(row.iter()) {
        if cell.is_empty() || name.is_empty() {
            continue;
        }
        let key = if TIMESTAMP_COLUMNS.contains(&name.as_str()) {
            // `timestamp` wins when both columns are filled.
            if has_timestamp && name != "timestamp" {
                continue;
            }
            has_timestamp = true;
            "timestamp"
        } else {
            name.as_str()
        };
        map.insert(key.to_string(), Value::String(cell.to_string()));
    }
    CandidateRecord(Value::Object(map))
}

#[async_trait]
impl SourceAdapter for CsvAdapter {
    fn protocol(&self) -> Protocol {
        Protocol::Csv
    }

    async fn fetch(&self, config: &SourceConfig) -> FetchResult {
        match config {
            SourceConfig::Csv(config) => self.parse(config),
            other => crate::mismatched(self.protocol(), other),
        }
    }
}
