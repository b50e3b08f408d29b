// SPDX-FileCopyrightText: 2026 Credlock Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! In-memory [`KeyValueStore`] for tests and non-durable contexts.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use tokio::sync::Mutex;

use credlock_core::{CredlockError, KeyValueStore};

/// A transient key/value store backed by a map.
///
/// Substitutes for [`SqliteStore`](crate::SqliteStore) in tests. The
/// `fail_writes` switch simulates persistence-layer unavailability, which
/// callers must treat as fatal on the save path.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: Mutex<HashMap<String, Vec<u8>>>,
    fail_writes: AtomicBool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent `put` fail with a storage error.
    pub fn set_fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }
}

#[async_trait]
impl KeyValueStore for MemoryStore {
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>, CredlockError> {
        Ok(self.entries.lock().await.get(key).cloned())
    }

    async fn put(&self, key: &str, value: &[u8]) -> Result<(), CredlockError> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(CredlockError::Storage {
                source: "simulated storage unavailability".into(),
            });
        }
        self.entries
            .lock()
            .await
            .insert(key.to_string(), value.to_vec());
        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<(), CredlockError> {
        self.entries.lock().await.remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn memory_store_roundtrip() {
        let store = MemoryStore::new();
        store.put("vaultId", b"abc").await.unwrap();
        assert_eq!(store.get("vaultId").await.unwrap(), Some(b"abc".to_vec()));

        store.delete("vaultId").await.unwrap();
        assert_eq!(store.get("vaultId").await.unwrap(), None);
    }

    #[tokio::test]
    async fn fail_writes_switch_makes_put_fatal() {
        let store = MemoryStore::new();
        store.set_fail_writes(true);

        let result = store.put("encKeyRaw", &[0u8; 32]).await;
        assert!(matches!(result, Err(CredlockError::Storage { .. })));

        // Reads still work.
        assert_eq!(store.get("encKeyRaw").await.unwrap(), None);
    }
}
