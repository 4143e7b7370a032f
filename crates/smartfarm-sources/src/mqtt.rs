// SPDX-FileCopyrightText: 2026 SmartFarm Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Publish-subscribe (MQTT) support.
//!
//! No subscription loop runs here. A separate long-running collector
//! subscribes to the topic, turns each message body into candidates with
//! [`decode_payload`], and hands them to a
//! [`ReadingSink`](smartfarm_core::ReadingSink).

use async_trait::async_trait;
use serde_json::{Value, json};
use smartfarm_core::source_config::{MqttSourceConfig, Protocol, SourceConfig};
use smartfarm_core::types::{CandidateRecord, FetchResult};
use smartfarm_core::{SmartfarmError, SourceAdapter};

pub const MQTT_HELP: &str = "MQTT sources are fed by an external collector process that \
subscribes to the topic and writes readings through the ingestion sink. \
On-demand fetching is not available for this protocol.";

/// The message shape collectors should publish.
pub fn recommended_payload() -> Value {
    json!({
        "metric": "temp_c",
        "value": 22.3,
        "ts": "2026-01-04T12:00:00",
        "site": "Site 1"
    })
}

/// Operator-facing description of a configured MQTT source.
pub fn describe(config: &MqttSourceConfig) -> String {
    format!(
        "broker {}:{}, topic `{}`\n{MQTT_HELP}\nRecommended payload: {}",
        config.broker,
        config.port,
        config.topic,
        recommended_payload()
    )
}

/// Decode one message body: an object is one candidate, an array is many.
pub fn decode_payload(payload: &[u8]) -> Result<Vec<CandidateRecord>, SmartfarmError> {
    let value: Value = serde_json::from_slice(payload)
        .map_err(|e| SmartfarmError::Validation(format!("MQTT payload is not JSON: {e}")))?;
    match value {
        Value::Object(_) => Ok(vec![CandidateRecord(value)]),
        Value::Array(items) => Ok(items.into_iter().map(CandidateRecord::from).collect()),
        _ => Err(SmartfarmError::Validation(
            "MQTT payload must be a JSON object or array".to_string(),
        )),
    }
}

pub struct MqttAdapter;

#[async_trait]
impl SourceAdapter for MqttAdapter {
    fn protocol(&self) -> Protocol {
        Protocol::Mqtt
    }

    async fn fetch(&self, config: &SourceConfig) -> FetchResult {
        match config {
            SourceConfig::Mqtt(config) => FetchResult::failure(describe(config)),
            other => crate::mismatched(self.protocol(), other),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_object_and_array() {
        let one = decode_payload(recommended_payload().to_string().as_bytes()).unwrap();
        assert_eq!(one.len(), 1);
        assert_eq!(one[0].0["site"], "Site 1");

        let many =
            decode_payload(br#"[{"metric":"a","value":1},{"metric":"b","value":2}]"#).unwrap();
        assert_eq!(many.len(), 2);
    }

    #[test]
    fn rejects_scalars_and_garbage() {
        assert!(decode_payload(b"42").is_err());
        assert!(decode_payload(b"not json").is_err());
    }

    #[tokio::test]
    async fn fetch_explains_external_collector() {
        let config = SourceConfig::Mqtt(MqttSourceConfig {
            broker: "broker.hivemq.com".to_string(),
            port: 1883,
            topic: "smartfarm/site1".to_string(),
        });
        let result = MqttAdapter.fetch(&config).await;
        assert!(!result.success);
        assert!(result.message.contains("smartfarm/site1"));
        assert!(result.message.contains("external collector"));
    }
}
