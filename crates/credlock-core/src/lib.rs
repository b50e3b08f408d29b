// SPDX-FileCopyrightText: 2026 Credlock Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Core library for the Credlock local-first credential vault.
//!
//! This crate provides the error taxonomy, domain types, and persistence
//! trait shared by every other crate in the workspace.

pub mod error;
pub mod traits;
pub mod types;

// Re-export key items at crate root for ergonomic imports.
pub use error::CredlockError;
pub use traits::KeyValueStore;
pub use types::{Credential, EncryptedField, EntryId, PwnedStatus, VaultEntry, VaultId};
