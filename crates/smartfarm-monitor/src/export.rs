// SPDX-FileCopyrightText: 2026 SmartFarm Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Flat CSV export of a site's readings.

use chrono::{DateTime, Utc};
use serde::Serialize;
use smartfarm_core::time::format_timestamp;
use smartfarm_core::types::MetricSample;
use smartfarm_core::{SmartfarmError, StorageAdapter};
use tracing::debug;

#[derive(Serialize)]
struct ExportRow<'a> {
    ts: &'a str,
    metric: &'a str,
    value: f64,
}

/// Default download name, e.g. `readings_site_3_24h.csv`.
pub fn export_file_name(site_id: i64, hours: u32) -> String {
    format!("readings_site_{site_id}_{hours}h.csv")
}

/// Render samples as `ts,metric,value` CSV in the given order.
pub fn render_csv(samples: &[MetricSample]) -> Result<String, SmartfarmError> {
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(Vec::new());
    writer
        .write_record(["ts", "metric", "value"])
        .map_err(|e| SmartfarmError::Internal(format!("writing CSV header: {e}")))?;
    for sample in samples {
        writer
            .serialize(ExportRow {
                ts: &sample.ts,
                metric: &sample.metric,
                value: sample.value,
            })
            .map_err(|e| SmartfarmError::Internal(format!("writing CSV row: {e}")))?;
    }
    let bytes = writer
        .into_inner()
        .map_err(|e| SmartfarmError::Internal(format!("flushing CSV: {e}")))?;
    String::from_utf8(bytes).map_err(|e| SmartfarmError::Internal(format!("CSV encoding: {e}")))
}

/// Every reading of a site at or after `since`, oldest first, as CSV text.
pub async fn export_csv(
    store: &dyn StorageAdapter,
    site_id: i64,
    since: DateTime<Utc>,
) -> Result<String, SmartfarmError> {
    let samples = store.readings_since(site_id, since).await?;
    debug!(
        site_id,
        rows = samples.len(),
        since = %format_timestamp(since),
        "exporting readings"
    );
    render_csv(&samples)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use smartfarm_test_utils::TestHarness;

    #[test]
    fn file_name_carries_site_and_window() {
        assert_eq!(export_file_name(3, 24), "readings_site_3_24h.csv");
    }

    #[test]
    fn empty_export_is_header_only() {
        assert_eq!(render_csv(&[]).unwrap(), "ts,metric,value\n");
    }

    #[tokio::test]
    async fn export_is_windowed_and_ascending() {
        let harness = TestHarness::new().await.unwrap();
        harness.record("2026-01-04T11:00:00.000Z", "temp_c", 23.5).await.unwrap();
        harness.record("2026-01-04T09:00:00.000Z", "temp_c", 20.0).await.unwrap();
        harness.record("2026-01-04T10:00:00.000Z", "hum_pct", 61.0).await.unwrap();

        let since = Utc.with_ymd_and_hms(2026, 1, 4, 10, 0, 0).unwrap();
        let csv = export_csv(harness.storage.as_ref(), harness.site_id, since)
            .await
            .unwrap();
        assert_eq!(
            csv,
            "ts,metric,value\n\
             2026-01-04T10:00:00.000Z,hum_pct,61.0\n\
             2026-01-04T11:00:00.000Z,temp_c,23.5\n"
        );
    }
}
