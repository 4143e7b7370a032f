// SPDX-FileCopyrightText: 2026 SmartFarm Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! SQLite persistence layer for the SmartFarm monitoring platform.
//!
//! Foreign-key enforced storage with embedded migrations, a single
//! background connection via `tokio-rusqlite`, and typed query modules for
//! every table.

pub mod adapter;
pub mod database;
pub mod migrations;
pub mod queries;
pub mod seed;

pub use adapter::SqliteStorage;
pub use database::Database;
pub use seed::seed_demo;
