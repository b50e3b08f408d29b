// SPDX-FileCopyrightText: 2026 Credlock Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Vault store synchronization: encrypted save, listing, per-field
//! decryption, and hostname-matched autofill lookup.

pub mod client;
pub mod matching;
pub mod sync;

pub use client::VaultStoreClient;
pub use matching::{find_match, normalized_host};
pub use sync::{DecryptedEntry, FieldValue, VaultSyncClient};
