// SPDX-FileCopyrightText: 2026 SmartFarm Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Read-side flows over the demo data set.

use chrono::{TimeZone, Utc};
use smartfarm_core::time::window_start;
use smartfarm_core::types::AlertStatus;
use smartfarm_monitor::{MetricState, export_csv, query, site_overview};
use smartfarm_test_utils::TestHarness;

#[tokio::test]
async fn demo_site_is_healthy_until_a_spike_arrives() {
    let now = Utc.with_ymd_and_hms(2026, 1, 4, 12, 0, 0).unwrap();
    let harness = TestHarness::builder().with_demo_data(now).build().await.unwrap();
    let store = harness.storage.as_ref();

    let overview = site_overview(store, harness.site_id).await.unwrap();
    assert_eq!(overview.active_alerts, 0);
    assert_eq!(overview.last_update.as_deref(), Some("2026-01-04T12:00:00.000Z"));
    assert!(overview.alerts.iter().all(|a| a.status == AlertStatus::Ok));

    harness.record("2026-01-04T12:05:00.000Z", "temp_c", 27.5).await.unwrap();
    let overview = site_overview(store, harness.site_id).await.unwrap();
    let temp = overview.metrics.iter().find(|m| m.metric == "temp_c").unwrap();
    match &temp.state {
        MetricState::Evaluated { status, message } => {
            assert_eq!(*status, AlertStatus::Warning);
            assert!(message.contains("[19, 27]"));
        }
        other => panic!("expected an evaluated state, got {other:?}"),
    }
    assert_eq!(overview.active_alerts, 1);
}

#[tokio::test]
async fn history_and_export_follow_the_window() {
    let now = Utc.with_ymd_and_hms(2026, 1, 4, 12, 0, 0).unwrap();
    let harness = TestHarness::builder().with_demo_data(now).build().await.unwrap();
    let store = harness.storage.as_ref();

    let six_hours = window_start(now, 6);
    let points = query::history(store, harness.site_id, "hum_pct", six_hours)
        .await
        .unwrap();
    assert_eq!(points.len(), 13);
    assert!(points.windows(2).all(|w| w[0].ts <= w[1].ts));

    let csv = export_csv(store, harness.site_id, window_start(now, 24)).await.unwrap();
    let mut lines = csv.lines();
    assert_eq!(lines.next(), Some("ts,metric,value"));
    assert_eq!(lines.count(), 96);
}
