// SPDX-FileCopyrightText: 2026 SmartFarm Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Pull-HTTP adapter: one GET returning a JSON array of readings.

use std::time::Duration;

use async_trait::async_trait;
use serde_json::Value;
use smartfarm_core::source_config::{HttpSourceConfig, Protocol, SourceConfig};
use smartfarm_core::types::{CandidateRecord, FetchResult};
use smartfarm_core::SourceAdapter;
use tracing::{debug, warn};

pub struct HttpAdapter {
    client: reqwest::Client,
    default_timeout: Duration,
}

impl HttpAdapter {
    pub fn new(client: reqwest::Client, default_timeout: Duration) -> Self {
        Self {
            client,
            default_timeout,
        }
    }

    async fn get(&self, config: &HttpSourceConfig) -> FetchResult {
        let timeout = config
            .timeout_secs
            .map(Duration::from_secs)
            .unwrap_or(self.default_timeout);

        let mut request = self.client.get(config.url.trim()).timeout(timeout);
        for (name, value) in &config.headers {
            request = request.header(name.as_str(), value.as_str());
        }

        let response = match request.send().await {
            Ok(response) => response,
            Err(e) if e.is_timeout() => {
                return FetchResult::failure(format!(
                    "request to {} timed out after {}s",
                    config.url,
                    timeout.as_secs()
                ));
            }
            Err(e) => return FetchResult::failure(format!("request to {} failed: {e}", config.url)),
        };

        let response = match response.error_for_status() {
            Ok(response) => response,
            Err(e) => {
                let status = e
                    .status()
                    .map(|s| s.to_string())
                    .unwrap_or_else(|| "unknown".to_string());
                return FetchResult::failure(format!("server answered HTTP {status}"));
            }
        };

        let body: Value = match response.json().await {
            Ok(body) => body,
            Err(e) if e.is_timeout() => {
                return FetchResult::failure(format!(
                    "reading response timed out after {}s",
                    timeout.as_secs()
                ));
            }
            Err(e) => return FetchResult::failure(format!("response is not valid JSON: {e}")),
        };

        match body {
            Value::Array(items) => {
                debug!(url = %config.url, records = items.len(), "http fetch complete");
                FetchResult::ok(items.into_iter().map(CandidateRecord::from).collect())
            }
            other => FetchResult::failure(format!(
                "expected a JSON array of readings, got {}",
                json_kind(&other)
            )),
        }
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[async_trait]
impl SourceAdapter for HttpAdapter {
    fn protocol(&self) -> Protocol {
        Protocol::Http
    }

    async fn fetch(&self, config: &SourceConfig) -> FetchResult {
        let SourceConfig::Http(config) = config else {
            return crate::mismatched(self.protocol(), config);
        };
        let result = self.get(config).await;
        if !result.success {
            warn!(url = %config.url, message = %result.message, "http fetch failed");
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use super::*;
    use wiremock::matchers::{header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn adapter() -> HttpAdapter {
        HttpAdapter::new(reqwest::Client::new(), Duration::from_secs(5))
    }

    fn config(url: String) -> SourceConfig {
        SourceConfig::Http(HttpSourceConfig {
            url,
            headers: BTreeMap::new(),
            timeout_secs: None,
        })
    }

    #[tokio::test]
    async fn array_body_becomes_candidates() {
        let server = MockServer::start().await;
        let body = serde_json::json!([
            {"metric": "temp_c", "value": 22.3, "timestamp": "2026-01-04T12:00:00"},
            {"metric": "hum_pct", "value": 61}
        ]);
        Mock::given(method("GET"))
            .and(path("/readings"))
            .and(header("x-api-key", "secret"))
            .respond_with(ResponseTemplate::new(200).set_body_json(&body))
            .mount(&server)
            .await;

        let mut headers = BTreeMap::new();
        headers.insert("X-Api-Key".to_string(), "secret".to_string());
        let config = SourceConfig::Http(HttpSourceConfig {
            url: format!("{}/readings", server.uri()),
            headers,
            timeout_secs: Some(2),
        });

        let result = adapter().fetch(&config).await;
        assert!(result.success, "{}", result.message);
        assert_eq!(result.records.len(), 2);
        assert_eq!(result.records[0].0["metric"], "temp_c");
    }

    #[tokio::test]
    async fn object_body_is_a_failure() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(serde_json::json!({"metric": "temp_c"})),
            )
            .mount(&server)
            .await;

        let result = adapter().fetch(&config(server.uri())).await;
        assert!(!result.success);
        assert!(result.records.is_empty());
        assert!(result.message.contains("array"), "{}", result.message);
    }

    #[tokio::test]
    async fn server_error_is_a_failure() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&server)
            .await;

        let result = adapter().fetch(&config(server.uri())).await;
        assert!(!result.success);
        assert!(result.message.contains("503"), "{}", result.message);
    }

    #[tokio::test]
    async fn slow_server_times_out() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(serde_json::json!([]))
                    .set_delay(Duration::from_secs(3)),
            )
            .mount(&server)
            .await;

        let adapter = HttpAdapter::new(reqwest::Client::new(), Duration::from_secs(1));
        let result = adapter.fetch(&config(server.uri())).await;
        assert!(!result.success);
        assert!(result.message.contains("timed out"), "{}", result.message);
    }

    #[tokio::test]
    async fn non_json_body_is_a_failure() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
            .mount(&server)
            .await;

        let result = adapter().fetch(&config(server.uri())).await;
        assert!(!result.success);
        assert!(result.message.contains("not valid JSON"), "{}", result.message);
    }

    #[tokio::test]
    async fn wrong_config_variant_is_a_failure() {
        let result = adapter()
            .fetch(&SourceConfig::Manual(Default::default()))
            .await;
        assert!(!result.success);
    }
}
