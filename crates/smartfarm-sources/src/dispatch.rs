// SPDX-FileCopyrightText: 2026 SmartFarm Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Protocol dispatch: pick the adapter for a source's protocol tag.

use std::time::Duration;

use smartfarm_config::model::IngestionConfig;
use smartfarm_core::source_config::Protocol;
use smartfarm_core::{SmartfarmError, SourceAdapter};

use crate::csv_file::CsvAdapter;
use crate::http::HttpAdapter;
use crate::manual::{ManualAdapter, ManualEntry};
use crate::modbus::ModbusAdapter;
use crate::mqtt::MqttAdapter;

/// What the operator supplies alongside a fetch request.
#[derive(Debug, Clone, Default)]
pub enum OperatorInput {
    #[default]
    None,
    /// Contents of an uploaded bulk file.
    Upload(Vec<u8>),
    /// A single typed reading.
    Manual(ManualEntry),
}

/// Builds adapters with shared settings and one pooled HTTP client.
pub struct SourceDispatcher {
    http: reqwest::Client,
    http_timeout: Duration,
    modbus_timeout: Duration,
}

impl SourceDispatcher {
    pub fn new(config: &IngestionConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            http_timeout: Duration::from_secs(config.http_timeout_secs),
            modbus_timeout: Duration::from_secs(config.modbus_timeout_secs),
        }
    }

    /// The adapter for `protocol`, fed with the operator input it needs.
    ///
    /// Bulk-file sources require an upload and manual sources a typed entry;
    /// anything else is a validation error.
    pub fn adapter_for(
        &self,
        protocol: Protocol,
        input: OperatorInput,
    ) -> Result<Box<dyn SourceAdapter>, SmartfarmError> {
        let adapter: Box<dyn SourceAdapter> = match (protocol, input) {
            (Protocol::Http, _) => Box::new(HttpAdapter::new(self.http.clone(), self.http_timeout)),
            (Protocol::Csv, OperatorInput::Upload(data)) => Box::new(CsvAdapter::new(data)),
            (Protocol::Csv, _) => {
                return Err(SmartfarmError::Validation(
                    "CSV ingestion needs an uploaded file".to_string(),
                ));
            }
            (Protocol::Manual, OperatorInput::Manual(entry)) => Box::new(ManualAdapter::new(entry)),
            (Protocol::Manual, _) => {
                return Err(SmartfarmError::Validation(
                    "manual ingestion needs a metric and a value".to_string(),
                ));
            }
            (Protocol::Modbus, _) => Box::new(ModbusAdapter::new(self.modbus_timeout)),
            (Protocol::Mqtt, _) => Box::new(MqttAdapter),
        };
        Ok(adapter)
    }

    pub fn modbus(&self) -> ModbusAdapter {
        ModbusAdapter::new(self.modbus_timeout)
    }
}
