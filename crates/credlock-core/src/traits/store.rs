// SPDX-FileCopyrightText: 2026 Credlock Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Durable key/value persistence trait.

use async_trait::async_trait;

use crate::error::CredlockError;

/// A process-wide durable key/value store.
///
/// The key material, vault id, and pending-credential record are singletons
/// keyed by fixed names (see [`crate::types::keys`]). Storage confidentiality
/// is delegated entirely to the host's storage isolation; values are stored
/// as raw bytes, not wrapped or derived forms.
///
/// Implementations must be safe to share across tasks. All operations are
/// async and may suspend the caller without blocking other work in the same
/// context.
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Read the value stored under `key`, or `None` if absent.
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>, CredlockError>;

    /// Durably write `value` under `key`, replacing any existing value.
    async fn put(&self, key: &str, value: &[u8]) -> Result<(), CredlockError>;

    /// Remove the value stored under `key`. Removing an absent key is a no-op.
    async fn delete(&self, key: &str) -> Result<(), CredlockError>;
}
