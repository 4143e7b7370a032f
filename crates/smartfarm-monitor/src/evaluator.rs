// SPDX-FileCopyrightText: 2026 SmartFarm Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Two-band threshold classification.
//!
//! Critical bounds are checked before warning bounds, whichever is tighter.
//! A metric without an enabled threshold yields no alert at all.

use std::collections::BTreeMap;

use smartfarm_core::types::{AlertRecord, AlertStatus, MetricSample, Threshold};

/// Classify the latest value of every metric that has an enabled threshold.
///
/// When `thresholds` holds several rows for one metric the last one wins.
/// Output is ordered by metric.
pub fn evaluate(latest: &[MetricSample], thresholds: &[Threshold]) -> Vec<AlertRecord> {
    let mut by_metric: BTreeMap<&str, &Threshold> = BTreeMap::new();
    for threshold in thresholds {
        by_metric.insert(threshold.metric.as_str(), threshold);
    }

    let mut alerts: Vec<AlertRecord> = latest
        .iter()
        .filter_map(|sample| {
            let threshold = by_metric.get(sample.metric.as_str())?;
            threshold
                .enabled
                .then(|| classify(&sample.metric, sample.value, threshold))
        })
        .collect();
    alerts.sort_by(|a, b| a.metric.cmp(&b.metric));
    alerts
}

/// Classify one value against one threshold, ignoring its enabled flag.
pub fn classify(metric: &str, value: f64, threshold: &Threshold) -> AlertRecord {
    let (status, message) = if outside(value, threshold.critical_min, threshold.critical_max) {
        (
            AlertStatus::Critical,
            format!(
                "outside critical range {}",
                band(threshold.critical_min, threshold.critical_max)
            ),
        )
    } else if outside(value, threshold.warn_min, threshold.warn_max) {
        (
            AlertStatus::Warning,
            format!("near limits {}", band(threshold.warn_min, threshold.warn_max)),
        )
    } else {
        (AlertStatus::Ok, "within range".to_string())
    };

    AlertRecord {
        metric: metric.to_string(),
        value,
        status,
        message,
    }
}

fn outside(value: f64, min: Option<f64>, max: Option<f64>) -> bool {
    min.is_some_and(|min| value < min) || max.is_some_and(|max| value > max)
}

fn band(min: Option<f64>, max: Option<f64>) -> String {
    let show = |bound: Option<f64>| bound.map_or_else(|| "none".to_string(), |b| b.to_string());
    format!("[{}, {}]", show(min), show(max))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(metric: &str, value: f64) -> MetricSample {
        MetricSample {
            metric: metric.to_string(),
            value,
            ts: "2026-01-04T12:00:00.000Z".to_string(),
        }
    }

    fn temp_threshold() -> Threshold {
        Threshold {
            id: 1,
            site_id: 1,
            metric: "temp_c".to_string(),
            critical_min: Some(18.0),
            critical_max: Some(28.0),
            warn_min: Some(19.0),
            warn_max: Some(27.0),
            enabled: true,
        }
    }

    #[test]
    fn two_band_scenario() {
        let t = [temp_threshold()];

        let warn = evaluate(&[sample("temp_c", 27.5)], &t);
        assert_eq!(warn[0].status, AlertStatus::Warning);
        assert!(warn[0].message.contains("[19, 27]"), "{}", warn[0].message);

        let crit = evaluate(&[sample("temp_c", 29.0)], &t);
        assert_eq!(crit[0].status, AlertStatus::Critical);
        assert!(crit[0].message.contains("[18, 28]"), "{}", crit[0].message);

        let ok = evaluate(&[sample("temp_c", 22.0)], &t);
        assert_eq!(ok[0].status, AlertStatus::Ok);
    }

    #[test]
    fn boundaries_are_inclusive() {
        let t = [temp_threshold()];
        assert_eq!(evaluate(&[sample("temp_c", 28.0)], &t)[0].status, AlertStatus::Warning);
        assert_eq!(evaluate(&[sample("temp_c", 27.0)], &t)[0].status, AlertStatus::Ok);
        assert_eq!(evaluate(&[sample("temp_c", 18.0)], &t)[0].status, AlertStatus::Warning);
    }

    #[test]
    fn critical_wins_even_when_looser_than_warning() {
        let mut t = temp_threshold();
        t.critical_max = Some(25.0);
        t.warn_max = Some(30.0);
        let alerts = evaluate(&[sample("temp_c", 26.0)], &[t]);
        assert_eq!(alerts[0].status, AlertStatus::Critical);
    }

    #[test]
    fn disabled_or_missing_threshold_yields_nothing() {
        let mut disabled = temp_threshold();
        disabled.enabled = false;
        assert!(evaluate(&[sample("temp_c", 40.0)], &[disabled]).is_empty());
        assert!(evaluate(&[sample("nh3_ppm", 40.0)], &[temp_threshold()]).is_empty());
    }

    #[test]
    fn duplicate_thresholds_keep_the_last() {
        let mut relaxed = temp_threshold();
        relaxed.id = 2;
        relaxed.critical_max = Some(50.0);
        relaxed.warn_max = Some(45.0);
        let alerts = evaluate(&[sample("temp_c", 29.0)], &[temp_threshold(), relaxed]);
        assert_eq!(alerts.len(), 1);
        assert_eq!(alerts[0].status, AlertStatus::Ok);
    }

    #[test]
    fn unset_bounds_print_none() {
        let t = Threshold {
            id: 1,
            site_id: 1,
            metric: "nh3_ppm".to_string(),
            critical_min: None,
            critical_max: Some(25.0),
            warn_min: None,
            warn_max: Some(10.0),
            enabled: true,
        };
        let alert = classify("nh3_ppm", 30.0, &t);
        assert_eq!(alert.message, "outside critical range [none, 25]");
        assert_eq!(classify("nh3_ppm", -5.0, &t).status, AlertStatus::Ok);
    }

    #[test]
    fn output_is_sorted_by_metric() {
        let mut hum = temp_threshold();
        hum.metric = "hum_pct".to_string();
        let alerts = evaluate(
            &[sample("temp_c", 22.0), sample("hum_pct", 22.0)],
            &[temp_threshold(), hum],
        );
        let metrics: Vec<_> = alerts.iter().map(|a| a.metric.as_str()).collect();
        assert_eq!(metrics, vec!["hum_pct", "temp_c"]);
    }

    mod props {
        use super::*;
        use proptest::prelude::*;

        fn bound() -> impl Strategy<Value = Option<f64>> {
            proptest::option::of(-100.0..100.0f64)
        }

        proptest! {
            #[test]
            fn critical_max_alone_decides_critical(
                value in -200.0..200.0f64,
                max in -100.0..100.0f64,
            ) {
                let t = Threshold {
                    id: 1,
                    site_id: 1,
                    metric: "m".to_string(),
                    critical_min: None,
                    critical_max: Some(max),
                    warn_min: None,
                    warn_max: None,
                    enabled: true,
                };
                let status = classify("m", value, &t).status;
                if value > max {
                    prop_assert_eq!(status, AlertStatus::Critical);
                } else {
                    prop_assert_ne!(status, AlertStatus::Critical);
                }
            }

            #[test]
            fn critical_violation_is_never_downgraded(
                value in -200.0..200.0f64,
                cmin in bound(),
                cmax in bound(),
                wmin in bound(),
                wmax in bound(),
            ) {
                let t = Threshold {
                    id: 1,
                    site_id: 1,
                    metric: "m".to_string(),
                    critical_min: cmin,
                    critical_max: cmax,
                    warn_min: wmin,
                    warn_max: wmax,
                    enabled: true,
                };
                let critical = cmin.is_some_and(|b| value < b) || cmax.is_some_and(|b| value > b);
                let status = classify("m", value, &t).status;
                prop_assert_eq!(status == AlertStatus::Critical, critical);
            }

            #[test]
            fn metrics_without_thresholds_never_appear(value in -200.0..200.0f64) {
                let alerts = evaluate(&[sample("other", value)], &[temp_threshold()]);
                prop_assert!(alerts.is_empty());
            }
        }
    }
}
