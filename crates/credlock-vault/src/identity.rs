// SPDX-FileCopyrightText: 2026 Credlock Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Stable vault identifier and per-save entry identifiers.

use std::sync::Arc;

use credlock_core::{CredlockError, EntryId, KeyValueStore, VaultId, types::keys};
use tokio::sync::Mutex;
use tracing::info;

/// Generates and persists the identifiers that name this installation's data.
///
/// Same lazy create-and-persist pattern as the key store, but for a
/// non-secret identifier.
pub struct VaultIdentity {
    store: Arc<dyn KeyValueStore>,
    init_gate: Mutex<()>,
}

impl VaultIdentity {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self {
            store,
            init_gate: Mutex::new(()),
        }
    }

    /// Return the persisted vault id, creating it lazily on first save.
    pub async fn get_or_create_vault_id(&self) -> Result<VaultId, CredlockError> {
        if let Some(raw) = self.store.get(keys::VAULT_ID).await? {
            return parse_vault_id(raw);
        }

        let _gate = self.init_gate.lock().await;
        if let Some(raw) = self.store.get(keys::VAULT_ID).await? {
            return parse_vault_id(raw);
        }

        let id = uuid::Uuid::new_v4().to_string();
        self.store.put(keys::VAULT_ID, id.as_bytes()).await?;
        info!(vault_id = %id, "created vault id");
        Ok(VaultId(id))
    }

    /// Generate a fresh entry id. Pure generation, no persistence; uniqueness
    /// is probabilistic via 128-bit randomness, not centrally coordinated.
    pub fn new_entry_id() -> EntryId {
        EntryId(uuid::Uuid::new_v4().to_string())
    }
}

impl std::fmt::Debug for VaultIdentity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VaultIdentity").finish_non_exhaustive()
    }
}

fn parse_vault_id(raw: Vec<u8>) -> Result<VaultId, CredlockError> {
    String::from_utf8(raw)
        .map(VaultId)
        .map_err(|e| CredlockError::Format(format!("stored vault id is not valid UTF-8: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use credlock_storage::MemoryStore;

    #[tokio::test]
    async fn vault_id_is_created_once_and_stable() {
        let store = Arc::new(MemoryStore::new());
        let identity = VaultIdentity::new(store.clone());

        let id1 = identity.get_or_create_vault_id().await.unwrap();
        let id2 = identity.get_or_create_vault_id().await.unwrap();
        assert_eq!(id1, id2);

        // A fresh VaultIdentity over the same store sees the same id.
        let identity2 = VaultIdentity::new(store);
        let id3 = identity2.get_or_create_vault_id().await.unwrap();
        assert_eq!(id1, id3);
    }

    #[tokio::test]
    async fn vault_id_is_a_uuid() {
        let store = Arc::new(MemoryStore::new());
        let identity = VaultIdentity::new(store);

        let id = identity.get_or_create_vault_id().await.unwrap();
        assert!(uuid::Uuid::parse_str(&id.0).is_ok());
    }

    #[tokio::test]
    async fn persistence_failure_propagates() {
        let store = Arc::new(MemoryStore::new());
        store.set_fail_writes(true);
        let identity = VaultIdentity::new(store);

        let result = identity.get_or_create_vault_id().await;
        assert!(matches!(result, Err(CredlockError::Storage { .. })));
    }

    #[test]
    fn entry_ids_are_fresh_per_call() {
        let a = VaultIdentity::new_entry_id();
        let b = VaultIdentity::new_entry_id();
        assert_ne!(a, b);
        assert!(uuid::Uuid::parse_str(&a.0).is_ok());
    }
}
