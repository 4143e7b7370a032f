// SPDX-FileCopyrightText: 2026 SmartFarm Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Protocol adapters for the SmartFarm monitoring platform.
//!
//! Each adapter implements [`SourceAdapter`](smartfarm_core::SourceAdapter)
//! for one protocol and reports transport problems as failed
//! [`FetchResult`]s rather than errors.

pub mod csv_file;
pub mod dispatch;
pub mod http;
pub mod manual;
pub mod modbus;
pub mod mqtt;

use smartfarm_core::source_config::{Protocol, SourceConfig};
use smartfarm_core::types::FetchResult;

pub use dispatch::{OperatorInput, SourceDispatcher};
pub use manual::ManualEntry;
pub use modbus::RegisterRead;

/// Result for an adapter handed another protocol's configuration.
pub(crate) fn mismatched(expected: Protocol, config: &SourceConfig) -> FetchResult {
    FetchResult::failure(format!(
        "{expected} adapter cannot use a {} configuration",
        config.protocol()
    ))
}
