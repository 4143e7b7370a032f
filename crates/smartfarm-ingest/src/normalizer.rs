// SPDX-FileCopyrightText: 2026 SmartFarm Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Candidate-to-row coercion.
//!
//! Each candidate is judged on its own: a bad record is counted and skipped,
//! never aborting the batch.

use serde_json::{Map, Value};
use smartfarm_core::time::normalize_timestamp;
use smartfarm_core::types::{CandidateRecord, NormalizedReading};
use tracing::debug;

/// Timestamp keys in order of preference.
const TIMESTAMP_KEYS: &[&str] = &["timestamp", "ts"];

/// Why a single candidate was refused.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordRejection {
    NotAnObject,
    MissingMetric,
    InvalidMetric,
    MissingValue,
    NonNumericValue(String),
    NonFiniteValue,
    InvalidTimestamp(String),
}

impl std::fmt::Display for RecordRejection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotAnObject => write!(f, "record is not an object"),
            Self::MissingMetric => write!(f, "metric is missing"),
            Self::InvalidMetric => write!(f, "metric must be a non-empty string"),
            Self::MissingValue => write!(f, "value is missing"),
            Self::NonNumericValue(raw) => write!(f, "value `{raw}` is not numeric"),
            Self::NonFiniteValue => write!(f, "value is not finite"),
            Self::InvalidTimestamp(raw) => write!(f, "timestamp `{raw}` cannot be parsed"),
        }
    }
}

/// Result of normalizing one batch.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NormalizedBatch {
    pub readings: Vec<NormalizedReading>,
    pub rejected: usize,
}

/// Coerce one candidate. `now` fills a missing timestamp.
pub fn normalize_record(
    candidate: &CandidateRecord,
    now: &str,
) -> Result<NormalizedReading, RecordRejection> {
    let Value::Object(fields) = &candidate.0 else {
        return Err(RecordRejection::NotAnObject);
    };

    let metric = match fields.get("metric") {
        None | Some(Value::Null) => return Err(RecordRejection::MissingMetric),
        Some(Value::String(s)) if !s.trim().is_empty() => s.trim().to_string(),
        Some(Value::Number(n)) => n.to_string(),
        Some(_) => return Err(RecordRejection::InvalidMetric),
    };

    let value = coerce_value(fields.get("value"))?;

    let ts_key = TIMESTAMP_KEYS
        .iter()
        .copied()
        .find(|key| fields.get(*key).is_some_and(|v| !v.is_null()));
    let ts = match ts_key.and_then(|key| fields.get(key)) {
        None => now.to_string(),
        Some(Value::String(s)) if s.trim().is_empty() => now.to_string(),
        Some(Value::String(s)) => {
            normalize_timestamp(s).ok_or_else(|| RecordRejection::InvalidTimestamp(s.clone()))?
        }
        Some(other) => return Err(RecordRejection::InvalidTimestamp(other.to_string())),
    };

    // Only the timestamp key actually read is consumed; a competing alias
    // with its own value is kept.
    let meta: Map<String, Value> = fields
        .iter()
        .filter(|(key, value)| match key.as_str() {
            "metric" | "value" => false,
            k if TIMESTAMP_KEYS.contains(&k) => !value.is_null() && Some(k) != ts_key,
            _ => true,
        })
        .map(|(key, value)| (key.clone(), value.clone()))
        .collect();
    let meta_json = (!meta.is_empty()).then(|| Value::Object(meta).to_string());

    Ok(NormalizedReading {
        ts,
        metric,
        value,
        meta_json,
    })
}

fn coerce_value(raw: Option<&Value>) -> Result<f64, RecordRejection> {
    let value = match raw {
        None | Some(Value::Null) => return Err(RecordRejection::MissingValue),
        Some(Value::Number(n)) => n.as_f64().ok_or(RecordRejection::NonFiniteValue)?,
        Some(Value::String(s)) => s
            .trim()
            .parse::<f64>()
            .map_err(|_| RecordRejection::NonNumericValue(s.clone()))?,
        Some(other) => return Err(RecordRejection::NonNumericValue(other.to_string())),
    };
    if value.is_finite() {
        Ok(value)
    } else {
        Err(RecordRejection::NonFiniteValue)
    }
}

/// Coerce every candidate, counting the ones that fail.
pub fn normalize_batch(candidates: &[CandidateRecord], now: &str) -> NormalizedBatch {
    let mut batch = NormalizedBatch::default();
    for (index, candidate) in candidates.iter().enumerate() {
        match normalize_record(candidate, now) {
            Ok(reading) => batch.readings.push(reading),
            Err(reason) => {
                debug!(index, reason = %reason, "candidate rejected");
                batch.rejected += 1;
            }
        }
    }
    batch
}
