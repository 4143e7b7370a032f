// SPDX-FileCopyrightText: 2026 SmartFarm Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! SmartFarm - farm sensor monitoring from the command line.
//!
//! This is the binary entry point. It loads configuration, opens the store
//! once, runs one subcommand, and closes the store again.

mod admin;
mod doctor;
mod ingest;
mod output;
mod report;

use std::path::PathBuf;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use smartfarm_config::SmartfarmConfig;
use smartfarm_core::{SmartfarmError, StorageAdapter};
use smartfarm_storage::SqliteStorage;

/// SmartFarm - farm sensor monitoring.
#[derive(Parser, Debug)]
#[command(name = "smartfarm", version, about, long_about = None)]
struct Cli {
    /// Read configuration from this file instead of the standard locations.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Disable colored output.
    #[arg(long, global = true)]
    plain: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Create the database and apply migrations.
    Init,
    /// Load the demo client, site, thresholds, and readings into an empty database.
    Seed,
    /// List sites with their client.
    Sites,
    /// Manage sensor sources.
    #[command(subcommand)]
    Source(admin::SourceCommand),
    /// Manage alert thresholds.
    #[command(subcommand)]
    Threshold(admin::ThresholdCommand),
    /// Ingest readings from a configured source.
    Ingest(ingest::IngestArgs),
    /// Read the register block of a site's latest Modbus source.
    ModbusProbe {
        #[arg(long)]
        site: i64,
    },
    /// Show how to feed a site's MQTT source.
    MqttInfo {
        #[arg(long)]
        site: i64,
    },
    /// Evaluate the latest readings of a site against its thresholds.
    Alerts {
        #[arg(long)]
        site: i64,
    },
    /// Print one metric's recent history.
    History {
        #[arg(long)]
        site: i64,
        #[arg(long)]
        metric: String,
        /// Window length; defaults to `reports.history_window_hours`.
        #[arg(long)]
        hours: Option<u32>,
    },
    /// Write a site's readings to a CSV file.
    Export {
        #[arg(long)]
        site: i64,
        /// Window length; defaults to `reports.export_window_hours`.
        #[arg(long)]
        hours: Option<u32>,
        /// Output file; defaults to `readings_site_<id>_<hours>h.csv`.
        #[arg(long)]
        output: Option<PathBuf>,
    },
    /// List maintenance tickets of a site with status counts.
    Maintenance {
        #[arg(long)]
        site: i64,
    },
    /// Run diagnostic checks.
    Doctor,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let loaded = match &cli.config {
        Some(path) => smartfarm_config::load_and_validate_path(path),
        None => smartfarm_config::load_and_validate(),
    };
    let config = match loaded {
        Ok(config) => config,
        Err(errors) => {
            smartfarm_config::render_errors(&errors);
            std::process::exit(1);
        }
    };

    init_tracing(&config.app.log_level);
    output::set_color(!cli.plain);

    if let Err(e) = run(cli.command, &config).await {
        output::failure(&format!("error: {e}"));
        std::process::exit(1);
    }
}

async fn run(command: Commands, config: &SmartfarmConfig) -> Result<(), SmartfarmError> {
    if let Commands::Doctor = command {
        return doctor::run_doctor(config).await;
    }

    let storage = SqliteStorage::open(config.storage.clone()).await?;
    let store: Arc<dyn StorageAdapter> = Arc::new(storage);

    let result = match command {
        Commands::Init => admin::run_init(config),
        Commands::Seed => admin::run_seed(store.as_ref()).await,
        Commands::Sites => admin::run_sites(store.as_ref()).await,
        Commands::Source(cmd) => admin::run_source(store.as_ref(), cmd).await,
        Commands::Threshold(cmd) => admin::run_threshold(store.as_ref(), cmd).await,
        Commands::Ingest(args) => ingest::run_ingest(store.clone(), config, args).await,
        Commands::ModbusProbe { site } => {
            ingest::run_modbus_probe(store.as_ref(), config, site).await
        }
        Commands::MqttInfo { site } => ingest::run_mqtt_info(store.as_ref(), site).await,
        Commands::Alerts { site } => report::run_alerts(store.as_ref(), site).await,
        Commands::History {
            site,
            metric,
            hours,
        } => {
            let hours = hours.unwrap_or(config.reports.history_window_hours);
            report::run_history(store.as_ref(), site, &metric, hours).await
        }
        Commands::Export {
            site,
            hours,
            output,
        } => {
            let hours = hours.unwrap_or(config.reports.export_window_hours);
            report::run_export(store.as_ref(), site, hours, output).await
        }
        Commands::Maintenance { site } => report::run_maintenance(store.as_ref(), site).await,
        Commands::Doctor => Ok(()),
    };

    store.close().await?;
    result
}

/// `RUST_LOG` wins; otherwise the configured level for our crates and
/// `warn` for everything else.
fn init_tracing(log_level: &str) {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("smartfarm={log_level},warn")));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();
}
