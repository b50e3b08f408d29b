// SPDX-FileCopyrightText: 2026 Credlock Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The single AES-256 symmetric key: creation, durable persistence, retrieval.
//!
//! The persisted representation is the raw secret under the fixed name
//! `encKeyRaw`, not a derived or wrapped form; storage confidentiality is
//! delegated to the host's storage isolation. A key that fails to persist is
//! never returned, since it would not survive a restart and would silently
//! orphan everything encrypted under it.

use std::sync::Arc;

use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64;
use credlock_core::{CredlockError, KeyValueStore, types::keys};
use tokio::sync::Mutex;
use tracing::info;
use zeroize::Zeroizing;

use crate::cipher::{self, FieldKey};

/// Owns the lifecycle of the installation's one symmetric key.
///
/// Constructed once at process start with an injected persistence dependency
/// and passed by reference to callers; never ambient global state.
pub struct KeyStore {
    store: Arc<dyn KeyValueStore>,
    // First-run creation is serialized behind this gate so concurrent first
    // calls observe one key, not a read-then-create race.
    init_gate: Mutex<()>,
}

impl KeyStore {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self {
            store,
            init_gate: Mutex::new(()),
        }
    }

    /// Return the persisted key, creating and persisting it on first use.
    ///
    /// Idempotent and safe to call concurrently: every call either imports
    /// the already-persisted raw bytes or, exactly once per installation,
    /// generates 256 random bits and persists them before returning.
    pub async fn get_or_create_key(&self) -> Result<FieldKey, CredlockError> {
        if let Some(raw) = self.store.get(keys::ENC_KEY_RAW).await? {
            return import_raw(raw);
        }

        let _gate = self.init_gate.lock().await;
        // Re-check under the gate: another caller may have won the race.
        if let Some(raw) = self.store.get(keys::ENC_KEY_RAW).await? {
            return import_raw(raw);
        }

        let raw = cipher::generate_random_key()?;
        self.store.put(keys::ENC_KEY_RAW, raw.as_ref()).await?;
        info!("generated and persisted new field encryption key");
        FieldKey::import(&raw)
    }

    /// Export the raw key, base64-encoded, for the cross-context handoff.
    ///
    /// This is the one sanctioned export path (bridge protocol step 3).
    /// Only the background context holds a KeyStore, so only it can export;
    /// everywhere else the key exists solely as a non-exportable handle.
    pub async fn export_key_base64(&self) -> Result<String, CredlockError> {
        // Ensure the key exists so a fresh install can serve the vault page.
        let _ = self.get_or_create_key().await?;
        let raw = Zeroizing::new(self.store.get(keys::ENC_KEY_RAW).await?.ok_or_else(|| {
            CredlockError::Internal("key disappeared from storage after creation".to_string())
        })?);
        Ok(BASE64.encode(raw.as_slice()))
    }
}

impl std::fmt::Debug for KeyStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KeyStore").finish_non_exhaustive()
    }
}

fn import_raw(raw: Vec<u8>) -> Result<FieldKey, CredlockError> {
    let raw = Zeroizing::new(raw);
    let bytes: &[u8; 32] = raw.as_slice().try_into().map_err(|_| {
        CredlockError::Format(format!(
            "stored key is {} bytes (expected 32); storage may be corrupt",
            raw.len()
        ))
    })?;
    FieldKey::import(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use credlock_storage::MemoryStore;

    use crate::cipher::{decrypt, encrypt};

    fn keystore_over(store: Arc<MemoryStore>) -> KeyStore {
        KeyStore::new(store)
    }

    #[tokio::test]
    async fn first_call_creates_and_persists_key() {
        let store = Arc::new(MemoryStore::new());
        let keystore = keystore_over(store.clone());

        let _key = keystore.get_or_create_key().await.unwrap();

        let raw = store.get(keys::ENC_KEY_RAW).await.unwrap();
        assert_eq!(raw.map(|r| r.len()), Some(32));
    }

    #[tokio::test]
    async fn sequential_calls_return_the_same_key() {
        let store = Arc::new(MemoryStore::new());
        let keystore = keystore_over(store);

        let key1 = keystore.get_or_create_key().await.unwrap();
        let fixture = encrypt("stability fixture", &key1).unwrap();

        // A second retrieval on the same persisted state must decrypt what
        // the first produced.
        let key2 = keystore.get_or_create_key().await.unwrap();
        assert_eq!(decrypt(&fixture, &key2).unwrap(), "stability fixture");
    }

    #[tokio::test]
    async fn key_survives_keystore_restart() {
        let store = Arc::new(MemoryStore::new());

        let fixture = {
            let keystore = keystore_over(store.clone());
            let key = keystore.get_or_create_key().await.unwrap();
            encrypt("cold start fixture", &key).unwrap()
        };

        // New KeyStore over the same persisted state simulates a restart.
        let keystore = keystore_over(store);
        let key = keystore.get_or_create_key().await.unwrap();
        assert_eq!(decrypt(&fixture, &key).unwrap(), "cold start fixture");
    }

    #[tokio::test]
    async fn concurrent_first_runs_converge_on_one_key() {
        let store = Arc::new(MemoryStore::new());
        let keystore = Arc::new(keystore_over(store.clone()));

        let mut handles = Vec::new();
        for _ in 0..16 {
            let ks = keystore.clone();
            handles.push(tokio::spawn(
                async move { ks.get_or_create_key().await },
            ));
        }

        let mut fields = Vec::new();
        for handle in handles {
            let key = handle.await.unwrap().unwrap();
            fields.push(encrypt("race fixture", &key).unwrap());
        }

        // Exactly one key was persisted; it decrypts every caller's output.
        let final_key = keystore.get_or_create_key().await.unwrap();
        for field in fields {
            assert_eq!(decrypt(&field, &final_key).unwrap(), "race fixture");
        }
    }

    #[tokio::test]
    async fn persistence_failure_is_fatal_and_no_key_is_returned() {
        let store = Arc::new(MemoryStore::new());
        store.set_fail_writes(true);
        let keystore = keystore_over(store.clone());

        let result = keystore.get_or_create_key().await;
        assert!(matches!(result, Err(CredlockError::Storage { .. })));

        // Nothing was persisted either.
        store.set_fail_writes(false);
        assert_eq!(store.get(keys::ENC_KEY_RAW).await.unwrap(), None);
    }

    #[tokio::test]
    async fn corrupt_stored_key_is_a_format_error() {
        let store = Arc::new(MemoryStore::new());
        store.put(keys::ENC_KEY_RAW, &[1u8; 17]).await.unwrap();

        let keystore = keystore_over(store);
        let result = keystore.get_or_create_key().await;
        assert!(matches!(result, Err(CredlockError::Format(_))));
    }

    #[tokio::test]
    async fn export_roundtrips_through_base64_import() {
        let store = Arc::new(MemoryStore::new());
        let keystore = keystore_over(store);

        let key = keystore.get_or_create_key().await.unwrap();
        let fixture = encrypt("export fixture", &key).unwrap();

        let exported = keystore.export_key_base64().await.unwrap();
        let imported = FieldKey::from_base64(&exported).unwrap();
        assert_eq!(decrypt(&fixture, &imported).unwrap(), "export fixture");
    }

    #[tokio::test]
    async fn export_on_fresh_install_creates_the_key() {
        let store = Arc::new(MemoryStore::new());
        let keystore = keystore_over(store.clone());

        let exported = keystore.export_key_base64().await.unwrap();
        assert!(!exported.is_empty());
        assert!(store.get(keys::ENC_KEY_RAW).await.unwrap().is_some());
    }
}
