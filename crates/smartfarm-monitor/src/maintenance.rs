// SPDX-FileCopyrightText: 2026 SmartFarm Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Maintenance ticket counters for the operator summary.

use serde::Serialize;
use smartfarm_core::types::{MaintenanceRecord, MaintenanceStatus};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct MaintenanceKpis {
    pub scheduled: usize,
    pub in_progress: usize,
    pub closed: usize,
}

impl MaintenanceKpis {
    pub fn from_records(records: &[MaintenanceRecord]) -> Self {
        records.iter().fold(Self::default(), |mut kpis, record| {
            match record.status {
                MaintenanceStatus::Scheduled => kpis.scheduled += 1,
                MaintenanceStatus::InProgress => kpis.in_progress += 1,
                MaintenanceStatus::Closed => kpis.closed += 1,
            }
            kpis
        })
    }

    /// Tickets not yet closed.
    pub fn open(&self) -> usize {
        self.scheduled + self.in_progress
    }
}
