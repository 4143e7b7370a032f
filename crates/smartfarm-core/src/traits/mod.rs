// SPDX-FileCopyrightText: 2026 SmartFarm Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Trait seams of the ingestion-and-alerting pipeline.
//!
//! All traits use `#[async_trait]` so implementations can be held as
//! trait objects and threaded explicitly through every call.

pub mod sink;
pub mod source;
pub mod storage;

pub use sink::ReadingSink;
pub use source::SourceAdapter;
pub use storage::StorageAdapter;
