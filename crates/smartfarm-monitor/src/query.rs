// SPDX-FileCopyrightText: 2026 SmartFarm Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Read-side accessors feeding the evaluator and the operator views.

use chrono::{DateTime, Utc};
use smartfarm_core::types::{HistoryPoint, MetricSample, Threshold};
use smartfarm_core::{SmartfarmError, StorageAdapter};

/// Most recent sample of every metric of a site, ordered by metric.
pub async fn latest_metrics(
    store: &dyn StorageAdapter,
    site_id: i64,
) -> Result<Vec<MetricSample>, SmartfarmError> {
    store.latest_per_metric(site_id).await
}

/// One metric's readings at or after `since`, oldest first.
pub async fn history(
    store: &dyn StorageAdapter,
    site_id: i64,
    metric: &str,
    since: DateTime<Utc>,
) -> Result<Vec<HistoryPoint>, SmartfarmError> {
    store.history(site_id, metric, since).await
}

pub async fn thresholds(
    store: &dyn StorageAdapter,
    site_id: i64,
) -> Result<Vec<Threshold>, SmartfarmError> {
    store.list_thresholds(site_id).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{FixedOffset, TimeZone};
    use smartfarm_test_utils::TestHarness;

    #[tokio::test]
    async fn latest_metrics_is_stable_without_writes() {
        let harness = TestHarness::new().await.unwrap();
        harness.record("2026-01-04T10:00:00.000Z", "temp_c", 21.0).await.unwrap();
        harness.record("2026-01-04T11:00:00.000Z", "temp_c", 23.0).await.unwrap();
        harness.record("2026-01-04T10:30:00.000Z", "hum_pct", 60.0).await.unwrap();

        let store = harness.storage.as_ref();
        let first = latest_metrics(store, harness.site_id).await.unwrap();
        let second = latest_metrics(store, harness.site_id).await.unwrap();
        assert_eq!(first, second);
        assert_eq!(first.len(), 2);
        assert_eq!(first[1].metric, "temp_c");
        assert_eq!(first[1].value, 23.0);
    }

    #[tokio::test]
    async fn history_respects_cutoff() {
        let harness = TestHarness::new().await.unwrap();
        harness.record("2026-01-04T09:00:00.000Z", "temp_c", 20.0).await.unwrap();
        harness.record("2026-01-04T11:00:00.000Z", "temp_c", 22.0).await.unwrap();
        harness.record("2026-01-04T10:00:00.000Z", "temp_c", 21.0).await.unwrap();

        let since = Utc.with_ymd_and_hms(2026, 1, 4, 10, 0, 0).unwrap();
        let points = history(harness.storage.as_ref(), harness.site_id, "temp_c", since)
            .await
            .unwrap();
        let values: Vec<_> = points.iter().map(|p| p.value).collect();
        assert_eq!(values, vec![21.0, 22.0]);
    }

    #[tokio::test]
    async fn offset_cutoff_is_compared_in_utc() {
        let harness = TestHarness::new().await.unwrap();
        harness.record("2026-01-04T09:00:00.000Z", "temp_c", 20.0).await.unwrap();
        harness.record("2026-01-04T11:00:00.000Z", "temp_c", 22.0).await.unwrap();

        // 13:00 at +03:00 is 10:00 UTC.
        let since = FixedOffset::east_opt(3 * 3600)
            .unwrap()
            .with_ymd_and_hms(2026, 1, 4, 13, 0, 0)
            .unwrap()
            .with_timezone(&Utc);
        let points = history(harness.storage.as_ref(), harness.site_id, "temp_c", since)
            .await
            .unwrap();
        let values: Vec<_> = points.iter().map(|p| p.value).collect();
        assert_eq!(values, vec![22.0]);
    }
}
