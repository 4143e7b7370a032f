// SPDX-FileCopyrightText: 2026 SmartFarm Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Test utilities for SmartFarm integration tests.
//!
//! - [`TestHarness`] - temp SQLite store with a ready client and site
//! - [`MockSource`] - protocol adapter returning queued fetch results

pub mod harness;
pub mod mock_source;

pub use harness::TestHarness;
pub use mock_source::MockSource;
