// SPDX-FileCopyrightText: 2026 SmartFarm Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Per-protocol sensor source configuration.
//!
//! The store keeps a protocol tag and a serialized blob side by side. The
//! blob is decoded into the variant selected by the tag; an unrecognised tag
//! is reported as [`SmartfarmError::UnknownProtocol`], a blob that does not
//! fit the variant as [`SmartfarmError::InvalidSourceConfig`].

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

use crate::error::SmartfarmError;

/// Largest register block a single field-bus preview may read.
pub const MAX_REGISTER_COUNT: u16 = 64;

/// Ingestion protocol tag as stored in `sensor_sources.protocol`.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
#[strum(serialize_all = "UPPERCASE", ascii_case_insensitive)]
#[serde(rename_all = "UPPERCASE")]
pub enum Protocol {
    /// Pull-HTTP: one synchronous GET returning a JSON array.
    Http,
    /// Bulk-file: an uploaded CSV table.
    Csv,
    /// Manual entry of a single reading by the operator.
    Manual,
    /// Field-bus registers (Modbus TCP). Preview only.
    Modbus,
    /// Publish-subscribe (MQTT). Configuration only.
    Mqtt,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HttpSourceConfig {
    pub url: String,
    #[serde(default)]
    pub headers: BTreeMap<String, String>,
    /// Falls back to `ingestion.http_timeout_secs` when unset.
    #[serde(default, alias = "timeout_s")]
    pub timeout_secs: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CsvSourceConfig {
    /// Field delimiter, `,` when unset.
    #[serde(default)]
    pub delimiter: Option<char>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ManualSourceConfig {
    #[serde(default)]
    pub note: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModbusSourceConfig {
    pub host: String,
    #[serde(default = "default_modbus_port")]
    pub port: u16,
    #[serde(default = "default_unit_id")]
    pub unit_id: u8,
    #[serde(default)]
    pub address: u16,
    #[serde(default = "default_register_count")]
    pub count: u16,
    /// Falls back to `ingestion.modbus_timeout_secs` when unset.
    #[serde(default)]
    pub timeout_secs: Option<u64>,
}

fn default_modbus_port() -> u16 {
    502
}

fn default_unit_id() -> u8 {
    1
}

fn default_register_count() -> u16 {
    4
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MqttSourceConfig {
    pub broker: String,
    #[serde(default = "default_mqtt_port")]
    pub port: u16,
    pub topic: String,
}

fn default_mqtt_port() -> u16 {
    1883
}

/// Strongly-typed source configuration, one variant per protocol.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceConfig {
    Http(HttpSourceConfig),
    Csv(CsvSourceConfig),
    Manual(ManualSourceConfig),
    Modbus(ModbusSourceConfig),
    Mqtt(MqttSourceConfig),
}

impl SourceConfig {
    /// Decode a stored `(protocol, config_json)` pair.
    ///
    /// A blank blob is read as an empty object so that protocols without
    /// required fields (manual, CSV) accept it.
    pub fn from_parts(protocol: &str, config_json: &str) -> Result<Self, SmartfarmError> {
        let tag: Protocol = protocol
            .trim()
            .parse()
            .map_err(|_| SmartfarmError::UnknownProtocol(protocol.to_string()))?;
        let body = if config_json.trim().is_empty() {
            "{}"
        } else {
            config_json
        };
        let invalid = |e: serde_json::Error| SmartfarmError::InvalidSourceConfig {
            protocol: tag.to_string(),
            message: e.to_string(),
        };
        let config = match tag {
            Protocol::Http => SourceConfig::Http(serde_json::from_str(body).map_err(invalid)?),
            Protocol::Csv => SourceConfig::Csv(serde_json::from_str(body).map_err(invalid)?),
            Protocol::Manual => SourceConfig::Manual(serde_json::from_str(body).map_err(invalid)?),
            Protocol::Modbus => SourceConfig::Modbus(serde_json::from_str(body).map_err(invalid)?),
            Protocol::Mqtt => SourceConfig::Mqtt(serde_json::from_str(body).map_err(invalid)?),
        };
        Ok(config)
    }

    /// Encode into the `(protocol, config_json)` pair the store persists.
    pub fn to_parts(&self) -> Result<(Protocol, String), SmartfarmError> {
        let json = match self {
            SourceConfig::Http(c) => serde_json::to_string(c),
            SourceConfig::Csv(c) => serde_json::to_string(c),
            SourceConfig::Manual(c) => serde_json::to_string(c),
            SourceConfig::Modbus(c) => serde_json::to_string(c),
            SourceConfig::Mqtt(c) => serde_json::to_string(c),
        }
        .map_err(|e| SmartfarmError::Internal(format!("encoding source config: {e}")))?;
        Ok((self.protocol(), json))
    }

    pub fn protocol(&self) -> Protocol {
        match self {
            SourceConfig::Http(_) => Protocol::Http,
            SourceConfig::Csv(_) => Protocol::Csv,
            SourceConfig::Manual(_) => Protocol::Manual,
            SourceConfig::Modbus(_) => Protocol::Modbus,
            SourceConfig::Mqtt(_) => Protocol::Mqtt,
        }
    }

    /// Check semantic constraints serde cannot express.
    pub fn validate(&self) -> Result<(), SmartfarmError> {
        let invalid = |message: String| SmartfarmError::InvalidSourceConfig {
            protocol: self.protocol().to_string(),
            message,
        };
        match self {
            SourceConfig::Http(c) => {
                let url = c.url.trim();
                if !(url.starts_with("http://") || url.starts_with("https://")) {
                    return Err(invalid(format!("url `{url}` must use http or https")));
                }
                if let Some(t) = c.timeout_secs {
                    if !(1..=20).contains(&t) {
                        return Err(invalid(format!("timeout_secs must be within 1..=20, got {t}")));
                    }
                }
            }
            SourceConfig::Modbus(c) => {
                if c.host.trim().is_empty() {
                    return Err(invalid("host must not be empty".to_string()));
                }
                if c.count == 0 || c.count > MAX_REGISTER_COUNT {
                    return Err(invalid(format!(
                        "count must be within 1..={MAX_REGISTER_COUNT}, got {}",
                        c.count
                    )));
                }
            }
            SourceConfig::Mqtt(c) => {
                if c.broker.trim().is_empty() {
                    return Err(invalid("broker must not be empty".to_string()));
                }
                if c.topic.trim().is_empty() {
                    return Err(invalid("topic must not be empty".to_string()));
                }
            }
            SourceConfig::Csv(_) | SourceConfig::Manual(_) => {}
        }
        Ok(())
    }
}
