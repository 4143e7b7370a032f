// SPDX-FileCopyrightText: 2026 SmartFarm Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Field-bus preview: read a block of Modbus TCP holding registers.
//!
//! Registers are returned raw. Mapping them to metrics belongs to an
//! external collector, so `fetch` never yields candidate records.

use std::time::Duration;

use async_trait::async_trait;
use smartfarm_core::source_config::{ModbusSourceConfig, Protocol, SourceConfig};
use smartfarm_core::types::FetchResult;
use smartfarm_core::SourceAdapter;
use tracing::warn;

/// Outcome of one register read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegisterRead {
    pub success: bool,
    pub message: String,
    pub registers: Vec<u16>,
}

impl RegisterRead {
    fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
            registers: Vec::new(),
        }
    }
}

pub struct ModbusAdapter {
    default_timeout: Duration,
}

impl ModbusAdapter {
    pub fn new(default_timeout: Duration) -> Self {
        Self { default_timeout }
    }

    /// Connect, read `count` holding registers from `address`, disconnect.
    pub async fn read_registers(&self, config: &ModbusSourceConfig) -> RegisterRead {
        if let Err(e) = SourceConfig::Modbus(config.clone()).validate() {
            return RegisterRead::failure(e.to_string());
        }
        let timeout = config
            .timeout_secs
            .map(Duration::from_secs)
            .unwrap_or(self.default_timeout);

        match tokio::time::timeout(timeout, read_holding(config)).await {
            Ok(read) => read,
            Err(_) => RegisterRead::failure(format!(
                "no answer from {}:{} within {}s",
                config.host,
                config.port,
                timeout.as_secs()
            )),
        }
    }
}

#[cfg(feature = "modbus")]
async fn read_holding(config: &ModbusSourceConfig) -> RegisterRead {
    use tokio_modbus::prelude::*;

    let endpoint = format!("{}:{}", config.host.trim(), config.port);
    let addr = match tokio::net::lookup_host(endpoint.as_str()).await {
        Ok(mut addrs) => match addrs.next() {
            Some(addr) => addr,
            None => {
                return RegisterRead::failure(format!("{endpoint} did not resolve to an address"));
            }
        },
        Err(e) => return RegisterRead::failure(format!("cannot resolve {endpoint}: {e}")),
    };

    let mut ctx = match tcp::connect_slave(addr, Slave(config.unit_id)).await {
        Ok(ctx) => ctx,
        Err(e) => return RegisterRead::failure(format!("connection to {endpoint} failed: {e}")),
    };

    let read = match ctx.read_holding_registers(config.address, config.count).await {
        Ok(Ok(registers)) => RegisterRead {
            success: true,
            message: format!(
                "read {} register(s) from {endpoint} starting at {}",
                registers.len(),
                config.address
            ),
            registers,
        },
        Ok(Err(exception)) => {
            RegisterRead::failure(format!("device reported exception: {exception:?}"))
        }
        Err(e) => RegisterRead::failure(format!("modbus error: {e}")),
    };
    let _ = ctx.disconnect().await;
    read
}

#[cfg(not(feature = "modbus"))]
async fn read_holding(_config: &ModbusSourceConfig) -> RegisterRead {
    RegisterRead::failure("Modbus support not compiled in (enable the `modbus` feature)")
}

#[async_trait]
impl SourceAdapter for ModbusAdapter {
    fn protocol(&self) -> Protocol {
        Protocol::Modbus
    }

    async fn fetch(&self, config: &SourceConfig) -> FetchResult {
        let SourceConfig::Modbus(config) = config else {
            return crate::mismatched(self.protocol(), config);
        };
        let read = self.read_registers(config).await;
        if !read.success {
            warn!(host = %config.host, message = %read.message, "modbus read failed");
            return FetchResult::failure(read.message);
        }
        FetchResult {
            success: true,
            message: format!(
                "{}: {:?} (register-to-metric mapping is handled by an external collector)",
                read.message, read.registers
            ),
            records: Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(host: &str, port: u16, count: u16) -> ModbusSourceConfig {
        ModbusSourceConfig {
            host: host.to_string(),
            port,
            unit_id: 1,
            address: 0,
            count,
            timeout_secs: Some(1),
        }
    }

    #[tokio::test]
    async fn oversized_block_fails_before_connecting() {
        let adapter = ModbusAdapter::new(Duration::from_secs(1));
        let read = adapter.read_registers(&config("127.0.0.1", 502, 200)).await;
        assert!(!read.success);
        assert!(read.message.contains("count"), "{}", read.message);
    }

    #[tokio::test]
    async fn unreachable_device_is_a_failure_result() {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let port = listener.local_addr().unwrap().port();
        drop(listener);

        let adapter = ModbusAdapter::new(Duration::from_secs(1));
        let result = adapter
            .fetch(&SourceConfig::Modbus(config("127.0.0.1", port, 4)))
            .await;
        assert!(!result.success);
        assert!(result.records.is_empty());
    }
}
