// SPDX-FileCopyrightText: 2026 SmartFarm Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Protocol adapter trait.

use async_trait::async_trait;

use crate::source_config::{Protocol, SourceConfig};
use crate::types::FetchResult;

/// Fetches candidate readings from one external protocol.
///
/// `fetch` never fails through `Err`: unreachable hosts, bad statuses,
/// timeouts, and unparseable payloads all come back as
/// [`FetchResult::failure`] with a human-readable message.
#[async_trait]
pub trait SourceAdapter: Send + Sync {
    /// The protocol this adapter implements.
    fn protocol(&self) -> Protocol;

    /// Run one synchronous fetch against the given configuration.
    async fn fetch(&self, config: &SourceConfig) -> FetchResult;
}
