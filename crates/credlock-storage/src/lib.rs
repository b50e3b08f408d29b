// SPDX-FileCopyrightText: 2026 Credlock Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! SQLite persistence layer for the Credlock vault.
//!
//! Provides WAL-mode SQLite storage with embedded migrations and a
//! single-writer concurrency model via `tokio-rusqlite`. The only schema is
//! a key/value table holding the process-wide singletons: raw key material,
//! the vault id, and the pending-credential record.

pub mod adapter;
pub mod database;
pub mod kv;
pub mod memory;
pub mod migrations;

pub use adapter::SqliteStore;
pub use database::Database;
pub use memory::MemoryStore;
