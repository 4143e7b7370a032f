// SPDX-FileCopyrightText: 2026 SmartFarm Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Read side of the SmartFarm monitoring platform.
//!
//! Queries pull the latest samples, history, and thresholds from the store;
//! the evaluator classifies them without side effects; the overview, KPI,
//! and export modules shape the results for the operator.

pub mod evaluator;
pub mod export;
pub mod maintenance;
pub mod overview;
pub mod query;

pub use evaluator::{classify, evaluate};
pub use export::{export_csv, export_file_name, render_csv};
pub use maintenance::MaintenanceKpis;
pub use overview::{MetricOverview, MetricState, SiteOverview, site_overview};
