// SPDX-FileCopyrightText: 2026 Credlock Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! SQLite implementation of the [`KeyValueStore`] trait.

use async_trait::async_trait;

use credlock_core::{CredlockError, KeyValueStore};

use crate::database::Database;
use crate::kv;

/// SQLite-backed durable key/value store.
///
/// Wraps a [`Database`] handle and delegates to the typed kv queries. Cloning
/// is cheap; all clones share the single writer connection.
#[derive(Debug, Clone)]
pub struct SqliteStore {
    db: Database,
}

impl SqliteStore {
    /// Open (or create) the store at `path`.
    pub async fn open(path: &str) -> Result<Self, CredlockError> {
        let db = Database::open(path).await?;
        Ok(Self { db })
    }

    /// Build a store over an already-open database handle.
    pub fn from_database(db: Database) -> Self {
        Self { db }
    }

    /// Returns the underlying database handle.
    pub fn database(&self) -> &Database {
        &self.db
    }
}

#[async_trait]
impl KeyValueStore for SqliteStore {
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>, CredlockError> {
        kv::get(&self.db, key).await
    }

    async fn put(&self, key: &str, value: &[u8]) -> Result<(), CredlockError> {
        kv::put(&self.db, key, value).await
    }

    async fn delete(&self, key: &str) -> Result<(), CredlockError> {
        kv::delete(&self.db, key).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[tokio::test]
    async fn trait_object_roundtrip() {
        let dir = tempdir().unwrap();
        let db_path = dir.path().join("adapter.db");
        let store = SqliteStore::open(db_path.to_str().unwrap()).await.unwrap();

        let store: &dyn KeyValueStore = &store;
        store.put("encKeyRaw", &[1u8; 32]).await.unwrap();
        assert_eq!(store.get("encKeyRaw").await.unwrap(), Some(vec![1u8; 32]));

        store.delete("encKeyRaw").await.unwrap();
        assert_eq!(store.get("encKeyRaw").await.unwrap(), None);
    }
}
