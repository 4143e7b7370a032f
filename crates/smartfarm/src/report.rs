// SPDX-FileCopyrightText: 2026 SmartFarm Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `alerts`, `history`, `export`, and `maintenance` commands.

use std::path::PathBuf;

use chrono::Utc;
use smartfarm_core::time::window_start;
use smartfarm_core::{SmartfarmError, StorageAdapter};
use smartfarm_monitor::{
    MaintenanceKpis, MetricState, export_csv, export_file_name, query, site_overview,
};

use crate::output;

pub async fn run_alerts(store: &dyn StorageAdapter, site_id: i64) -> Result<(), SmartfarmError> {
    let overview = site_overview(store, site_id).await?;
    output::heading(&format!("alerts for site {site_id}"));

    if overview.metrics.is_empty() {
        println!("  no data");
        println!();
        return Ok(());
    }

    for metric in &overview.metrics {
        let value = metric
            .value
            .map_or_else(|| "-".to_string(), |v| v.to_string());
        let state = match &metric.state {
            MetricState::Evaluated { status, message } => {
                format!("{}  {message}", output::status(*status))
            }
            other => other.label(),
        };
        println!("  {:<12} {value:>10}  {state}", metric.metric);
    }
    println!();
    println!("  active alerts: {}", overview.active_alerts);
    match &overview.last_update {
        Some(ts) => println!("  last update:   {ts}"),
        None => println!("  last update:   no data"),
    }
    println!();
    Ok(())
}

pub async fn run_history(
    store: &dyn StorageAdapter,
    site_id: i64,
    metric: &str,
    hours: u32,
) -> Result<(), SmartfarmError> {
    let since = window_start(Utc::now(), hours);
    let points = query::history(store, site_id, metric, since).await?;
    output::heading(&format!("{metric} on site {site_id}, last {hours}h"));
    if points.is_empty() {
        println!("  no data");
    }
    for point in &points {
        println!("  {}  {}", point.ts, point.value);
    }
    println!();
    Ok(())
}

pub async fn run_export(
    store: &dyn StorageAdapter,
    site_id: i64,
    hours: u32,
    path: Option<PathBuf>,
) -> Result<(), SmartfarmError> {
    let since = window_start(Utc::now(), hours);
    let csv = export_csv(store, site_id, since).await?;
    let path = path.unwrap_or_else(|| PathBuf::from(export_file_name(site_id, hours)));
    tokio::fs::write(&path, csv.as_bytes())
        .await
        .map_err(|e| SmartfarmError::Internal(format!("writing {}: {e}", path.display())))?;
    let rows = csv.lines().count().saturating_sub(1);
    output::success(&format!("{rows} readings written to {}", path.display()));
    Ok(())
}

pub async fn run_maintenance(
    store: &dyn StorageAdapter,
    site_id: i64,
) -> Result<(), SmartfarmError> {
    let records = store.list_maintenance(site_id).await?;
    let kpis = MaintenanceKpis::from_records(&records);
    output::heading(&format!("maintenance for site {site_id}"));
    println!(
        "  open: {}  (scheduled: {}  in progress: {})  closed: {}",
        kpis.open(),
        kpis.scheduled,
        kpis.in_progress,
        kpis.closed
    );
    println!();
    for record in &records {
        let when = record
            .performed_at
            .as_deref()
            .or(record.scheduled_for.as_deref())
            .unwrap_or("-");
        println!(
            "  {:>4}  {when:<10}  {:<10} {:<11} {:<6}  {}",
            record.id,
            record.kind.to_string(),
            record.status.to_string(),
            record.priority.to_string(),
            record.description.as_deref().unwrap_or("")
        );
    }
    if records.is_empty() {
        println!("  no tickets");
    }
    println!();
    Ok(())
}
