// SPDX-FileCopyrightText: 2026 SmartFarm Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `init`, `seed`, `sites`, `source`, and `threshold` commands.

use chrono::Utc;
use clap::Subcommand;
use smartfarm_config::SmartfarmConfig;
use smartfarm_core::types::{SensorSource, Threshold};
use smartfarm_core::{SmartfarmError, SourceConfig, StorageAdapter};
use smartfarm_storage::seed_demo;

use crate::output;

#[derive(Subcommand, Debug)]
pub enum SourceCommand {
    /// Register a sensor source on a site.
    Add {
        #[arg(long)]
        site: i64,
        #[arg(long)]
        name: String,
        /// HTTP, CSV, MANUAL, MODBUS, or MQTT.
        #[arg(long)]
        protocol: String,
        /// Protocol configuration as a JSON object.
        #[arg(long, default_value = "{}")]
        config: String,
    },
    /// List the sources of a site, newest first.
    List {
        #[arg(long)]
        site: i64,
    },
    Enable {
        id: i64,
    },
    Disable {
        id: i64,
    },
}

#[derive(Subcommand, Debug)]
pub enum ThresholdCommand {
    /// Create or replace the threshold of one metric.
    Set {
        #[arg(long)]
        site: i64,
        #[arg(long)]
        metric: String,
        #[arg(long)]
        critical_min: Option<f64>,
        #[arg(long)]
        critical_max: Option<f64>,
        #[arg(long)]
        warn_min: Option<f64>,
        #[arg(long)]
        warn_max: Option<f64>,
        /// Store the threshold without evaluating it.
        #[arg(long)]
        disabled: bool,
    },
    List {
        #[arg(long)]
        site: i64,
    },
}

pub fn run_init(config: &SmartfarmConfig) -> Result<(), SmartfarmError> {
    output::success(&format!(
        "database ready at {}",
        config.storage.database_path
    ));
    Ok(())
}

pub async fn run_seed(store: &dyn StorageAdapter) -> Result<(), SmartfarmError> {
    match seed_demo(store, Utc::now()).await? {
        Some(site_id) => output::success(&format!("demo data loaded into site {site_id}")),
        None => output::warning("database already has clients; demo seed skipped"),
    }
    Ok(())
}

pub async fn run_sites(store: &dyn StorageAdapter) -> Result<(), SmartfarmError> {
    let sites = store.list_sites().await?;
    output::heading("sites");
    if sites.is_empty() {
        println!("  no sites yet; run `smartfarm seed` for demo data");
    }
    for site in &sites {
        println!("  {:>4}  {}", site.site_id, site.label());
    }
    println!();
    Ok(())
}

pub async fn run_source(
    store: &dyn StorageAdapter,
    command: SourceCommand,
) -> Result<(), SmartfarmError> {
    match command {
        SourceCommand::Add {
            site,
            name,
            protocol,
            config,
        } => {
            if store.get_site(site).await?.is_none() {
                return Err(SmartfarmError::NotFound { entity: "site", id: site });
            }
            let typed = SourceConfig::from_parts(&protocol, &config)?;
            typed.validate()?;
            let (protocol, config_json) = typed.to_parts()?;
            let id = store
                .create_source(&SensorSource {
                    id: 0,
                    site_id: site,
                    name,
                    protocol: protocol.to_string(),
                    config_json,
                    enabled: true,
                })
                .await?;
            output::success(&format!("{protocol} source {id} added to site {site}"));
        }
        SourceCommand::List { site } => {
            let sources = store.list_sources(site).await?;
            output::heading(&format!("sources of site {site}"));
            if sources.is_empty() {
                println!("  no sources configured");
            }
            for source in &sources {
                let state = if source.enabled { "enabled" } else { "disabled" };
                println!(
                    "  {:>4}  {:<8} {:<24} {state}  {}",
                    source.id, source.protocol, source.name, source.config_json
                );
            }
            println!();
        }
        SourceCommand::Enable { id } => {
            store.set_source_enabled(id, true).await?;
            output::success(&format!("source {id} enabled"));
        }
        SourceCommand::Disable { id } => {
            store.set_source_enabled(id, false).await?;
            output::success(&format!("source {id} disabled"));
        }
    }
    Ok(())
}

pub async fn run_threshold(
    store: &dyn StorageAdapter,
    command: ThresholdCommand,
) -> Result<(), SmartfarmError> {
    match command {
        ThresholdCommand::Set {
            site,
            metric,
            critical_min,
            critical_max,
            warn_min,
            warn_max,
            disabled,
        } => {
            let id = store
                .upsert_threshold(&Threshold {
                    id: 0,
                    site_id: site,
                    metric: metric.clone(),
                    critical_min,
                    critical_max,
                    warn_min,
                    warn_max,
                    enabled: !disabled,
                })
                .await?;
            output::success(&format!("threshold {id} for `{metric}` saved on site {site}"));
        }
        ThresholdCommand::List { site } => {
            let thresholds = store.list_thresholds(site).await?;
            output::heading(&format!("thresholds of site {site}"));
            if thresholds.is_empty() {
                println!("  no thresholds configured");
            }
            for t in &thresholds {
                println!(
                    "  {:<12} critical [{}, {}]  warning [{}, {}]{}",
                    t.metric,
                    bound(t.critical_min),
                    bound(t.critical_max),
                    bound(t.warn_min),
                    bound(t.warn_max),
                    if t.enabled { "" } else { "  (disabled)" }
                );
            }
            println!();
        }
    }
    Ok(())
}

fn bound(value: Option<f64>) -> String {
    value.map_or_else(|| "-".to_string(), |v| v.to_string())
}
