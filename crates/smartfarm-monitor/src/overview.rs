// SPDX-FileCopyrightText: 2026 SmartFarm Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Per-site dashboard summary.
//!
//! Every metric that has data or an enabled threshold gets an explicit
//! state, so an operator never sees a blank where "no threshold configured"
//! or "no data" is the real answer.

use std::collections::BTreeMap;

use serde::Serialize;
use smartfarm_core::types::{AlertRecord, AlertStatus, MetricSample, Threshold};
use smartfarm_core::{SmartfarmError, StorageAdapter};

use crate::evaluator::evaluate;
use crate::query;

/// What the operator should see for one metric.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum MetricState {
    /// Classified by an enabled threshold.
    Evaluated { status: AlertStatus, message: String },
    /// Readings exist but no enabled threshold covers the metric.
    NoThreshold,
    /// An enabled threshold exists but nothing was ever recorded.
    NoData,
}

impl MetricState {
    pub fn label(&self) -> String {
        match self {
            MetricState::Evaluated { status, .. } => status.to_string(),
            MetricState::NoThreshold => "no threshold configured".to_string(),
            MetricState::NoData => "no data".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MetricOverview {
    pub metric: String,
    pub value: Option<f64>,
    pub ts: Option<String>,
    pub state: MetricState,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SiteOverview {
    pub site_id: i64,
    /// One entry per metric, ordered by metric.
    pub metrics: Vec<MetricOverview>,
    /// Evaluator output, ordered by metric.
    pub alerts: Vec<AlertRecord>,
    /// Alerts whose status is not OK.
    pub active_alerts: usize,
    /// Newest timestamp among the latest samples.
    pub last_update: Option<String>,
}

impl SiteOverview {
    /// Combine the latest samples and the thresholds of one site.
    pub fn build(site_id: i64, latest: &[MetricSample], thresholds: &[Threshold]) -> Self {
        let alerts = evaluate(latest, thresholds);

        let mut effective: BTreeMap<&str, &Threshold> = BTreeMap::new();
        for threshold in thresholds {
            effective.insert(threshold.metric.as_str(), threshold);
        }
        let alert_by_metric: BTreeMap<&str, &AlertRecord> =
            alerts.iter().map(|a| (a.metric.as_str(), a)).collect();

        let mut metrics: BTreeMap<String, MetricOverview> = BTreeMap::new();
        for sample in latest {
            let state = match alert_by_metric.get(sample.metric.as_str()) {
                Some(alert) => MetricState::Evaluated {
                    status: alert.status,
                    message: alert.message.clone(),
                },
                None => MetricState::NoThreshold,
            };
            metrics.insert(
                sample.metric.clone(),
                MetricOverview {
                    metric: sample.metric.clone(),
                    value: Some(sample.value),
                    ts: Some(sample.ts.clone()),
                    state,
                },
            );
        }
        for (metric, threshold) in &effective {
            if threshold.enabled && !metrics.contains_key(*metric) {
                metrics.insert(
                    metric.to_string(),
                    MetricOverview {
                        metric: metric.to_string(),
                        value: None,
                        ts: None,
                        state: MetricState::NoData,
                    },
                );
            }
        }

        let active_alerts = alerts
            .iter()
            .filter(|a| a.status != AlertStatus::Ok)
            .count();
        let last_update = latest.iter().map(|s| s.ts.clone()).max();

        Self {
            site_id,
            metrics: metrics.into_values().collect(),
            alerts,
            active_alerts,
            last_update,
        }
    }
}

/// Load and assemble the overview of one site.
pub async fn site_overview(
    store: &dyn StorageAdapter,
    site_id: i64,
) -> Result<SiteOverview, SmartfarmError> {
    let latest = query::latest_metrics(store, site_id).await?;
    let thresholds = query::thresholds(store, site_id).await?;
    Ok(SiteOverview::build(site_id, &latest, &thresholds))
}
