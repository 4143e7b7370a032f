// SPDX-FileCopyrightText: 2026 SmartFarm Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `ingest`, `modbus-probe`, and `mqtt-info` commands.

use std::path::PathBuf;
use std::sync::Arc;

use clap::Args;
use smartfarm_config::SmartfarmConfig;
use smartfarm_core::source_config::SourceConfig;
use smartfarm_core::{Protocol, SmartfarmError, StorageAdapter};
use smartfarm_ingest::IngestService;
use smartfarm_sources::mqtt::{MQTT_HELP, describe, recommended_payload};
use smartfarm_sources::{ManualEntry, OperatorInput, SourceDispatcher};

use crate::output;

#[derive(Args, Debug)]
pub struct IngestArgs {
    /// Sensor source to ingest from.
    #[arg(long)]
    pub source: i64,
    /// Bulk file to upload to a CSV source.
    #[arg(long, conflicts_with_all = ["metric", "value", "ts"])]
    pub file: Option<PathBuf>,
    /// Metric name for a manual entry.
    #[arg(long, requires = "value")]
    pub metric: Option<String>,
    /// Value for a manual entry.
    #[arg(long, requires = "metric")]
    pub value: Option<String>,
    /// Timestamp for a manual entry; now when omitted.
    #[arg(long, requires = "metric")]
    pub ts: Option<String>,
}

impl IngestArgs {
    async fn operator_input(&self) -> Result<OperatorInput, SmartfarmError> {
        if let Some(path) = &self.file {
            let data = tokio::fs::read(path).await.map_err(|e| {
                SmartfarmError::Validation(format!("cannot read {}: {e}", path.display()))
            })?;
            return Ok(OperatorInput::Upload(data));
        }
        match (&self.metric, &self.value) {
            (Some(metric), Some(value)) => Ok(OperatorInput::Manual(ManualEntry {
                metric: metric.clone(),
                value: value.clone(),
                timestamp: self.ts.clone(),
            })),
            _ => Ok(OperatorInput::None),
        }
    }
}

pub async fn run_ingest(
    store: Arc<dyn StorageAdapter>,
    config: &SmartfarmConfig,
    args: IngestArgs,
) -> Result<(), SmartfarmError> {
    let input = args.operator_input().await?;
    let service = IngestService::new(store, &config.ingestion);
    let outcome = service.ingest_from_source(args.source, input).await?;

    if outcome.success {
        output::success(&format!("source {} ingested: {}", args.source, outcome.message));
    } else {
        output::failure(&format!("fetch failed: {}", outcome.message));
    }
    output::counts(outcome.saved, outcome.failed);
    Ok(())
}

pub async fn run_modbus_probe(
    store: &dyn StorageAdapter,
    config: &SmartfarmConfig,
    site_id: i64,
) -> Result<(), SmartfarmError> {
    let Some(source) = store.latest_source_for_protocol(site_id, Protocol::Modbus).await? else {
        output::warning(&format!("site {site_id} has no MODBUS source"));
        return Ok(());
    };
    let SourceConfig::Modbus(modbus) = source.config()? else {
        return Err(SmartfarmError::Internal(format!(
            "source {} is not a MODBUS source",
            source.id
        )));
    };

    let read = SourceDispatcher::new(&config.ingestion)
        .modbus()
        .read_registers(&modbus)
        .await;
    output::heading(&format!(
        "modbus {}:{} unit {} registers {}..{}",
        modbus.host,
        modbus.port,
        modbus.unit_id,
        modbus.address,
        u32::from(modbus.address) + u32::from(modbus.count)
    ));
    if read.success {
        for (offset, value) in read.registers.iter().enumerate() {
            println!("  {:>6}  {value}", u32::from(modbus.address) + offset as u32);
        }
        println!();
        println!("  registers are not mapped to metrics; feed them through an external collector");
    } else {
        output::failure(&read.message);
    }
    println!();
    Ok(())
}

pub async fn run_mqtt_info(store: &dyn StorageAdapter, site_id: i64) -> Result<(), SmartfarmError> {
    output::heading("mqtt");
    match store.latest_source_for_protocol(site_id, Protocol::Mqtt).await? {
        Some(source) => match source.config()? {
            SourceConfig::Mqtt(mqtt) => println!("  {}", describe(&mqtt)),
            _ => println!("  {MQTT_HELP}"),
        },
        None => {
            println!("  site {site_id} has no MQTT source");
            println!("  {MQTT_HELP}");
            println!("  Recommended payload: {}", recommended_payload());
        }
    }
    println!();
    Ok(())
}
