// SPDX-FileCopyrightText: 2026 Credlock Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Save and retrieve orchestration: KeyStore → FieldCipher → VaultIdentity →
//! vault store.

use std::sync::Arc;

use credlock_core::{Credential, CredlockError, VaultEntry};
use credlock_vault::{KeyStore, VaultIdentity, decrypt, encrypt};
use tracing::{info, warn};

use crate::client::VaultStoreClient;
use crate::matching;

/// A decrypted field, or a placeholder where decryption failed.
///
/// Failures are isolated per field so one unreadable ciphertext never aborts
/// rendering of its siblings.
#[derive(Clone, PartialEq, Eq)]
pub enum FieldValue {
    Plain(String),
    Unreadable,
}

impl FieldValue {
    /// The plaintext, if this field decrypted.
    pub fn text(&self) -> Option<&str> {
        match self {
            FieldValue::Plain(text) => Some(text),
            FieldValue::Unreadable => None,
        }
    }
}

impl std::fmt::Debug for FieldValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FieldValue::Plain(_) => f.write_str("Plain([REDACTED])"),
            FieldValue::Unreadable => f.write_str("Unreadable"),
        }
    }
}

/// One entry prepared for display.
#[derive(Debug, Clone)]
pub struct DecryptedEntry {
    pub url: String,
    pub user: FieldValue,
    pub password: FieldValue,
}

/// Composes the cipher, identity, and store client into the save and
/// retrieve flows.
pub struct VaultSyncClient {
    keystore: Arc<KeyStore>,
    identity: Arc<VaultIdentity>,
    store: VaultStoreClient,
}

impl VaultSyncClient {
    pub fn new(
        keystore: Arc<KeyStore>,
        identity: Arc<VaultIdentity>,
        store: VaultStoreClient,
    ) -> Self {
        Self {
            keystore,
            identity,
            store,
        }
    }

    /// Encrypt a credential and submit it to the vault store.
    ///
    /// `user` and `password` are encrypted independently; `url` stays
    /// plaintext for server-side filtering. Store rejection surfaces as a
    /// [`CredlockError::Store`]; nothing is retried automatically.
    pub async fn save(&self, credential: &Credential) -> Result<VaultEntry, CredlockError> {
        let key = self.keystore.get_or_create_key().await?;
        let user = encrypt(&credential.user, &key)?;
        let password = encrypt(&credential.password, &key)?;

        let vault_id = self.identity.get_or_create_vault_id().await?;
        let entry = VaultEntry {
            vault_id,
            entry_id: VaultIdentity::new_entry_id(),
            url: credential.url.clone(),
            user,
            password,
        };

        self.store.create_entry(&entry).await?;
        info!(entry_id = %entry.entry_id, url = %entry.url, "entry saved to vault");
        Ok(entry)
    }

    /// Fetch every stored entry, ciphertext intact.
    pub async fn list(&self) -> Result<Vec<VaultEntry>, CredlockError> {
        self.store.list_entries().await
    }

    /// Decrypt an entry's fields for display.
    ///
    /// Each field failure is contained: the other field and other rows keep
    /// rendering. Failures are logged, never propagated.
    pub async fn decrypt_entry(&self, entry: &VaultEntry) -> DecryptedEntry {
        let key = match self.keystore.get_or_create_key().await {
            Ok(key) => key,
            Err(e) => {
                warn!(error = %e, entry_id = %entry.entry_id, "no key available for display");
                return DecryptedEntry {
                    url: entry.url.clone(),
                    user: FieldValue::Unreadable,
                    password: FieldValue::Unreadable,
                };
            }
        };

        let user = match decrypt(&entry.user, &key) {
            Ok(text) => FieldValue::Plain(text),
            Err(e) => {
                warn!(error = %e, entry_id = %entry.entry_id, "user field unreadable");
                FieldValue::Unreadable
            }
        };
        let password = match decrypt(&entry.password, &key) {
            Ok(text) => FieldValue::Plain(text),
            Err(e) => {
                warn!(error = %e, entry_id = %entry.entry_id, "password field unreadable");
                FieldValue::Unreadable
            }
        };

        DecryptedEntry {
            url: entry.url.clone(),
            user,
            password,
        }
    }

    /// Find and decrypt the stored credential for the active page, if any.
    ///
    /// Hostname-matched (scheme-insensitive, `www.`-stripped), first match
    /// only. No match, or a match whose fields are unreadable, is `None` --
    /// autofill is a no-op, never an error surface.
    pub async fn find_credentials_for(
        &self,
        active_url: &str,
    ) -> Result<Option<Credential>, CredlockError> {
        let entries = self.list().await?;
        let Some(entry) = matching::find_match(&entries, active_url) else {
            return Ok(None);
        };

        let decrypted = self.decrypt_entry(entry).await;
        match (decrypted.user, decrypted.password) {
            (FieldValue::Plain(user), FieldValue::Plain(password)) => Ok(Some(Credential {
                url: entry.url.clone(),
                user,
                password,
            })),
            _ => {
                warn!(entry_id = %entry.entry_id, "matched entry is unreadable; skipping autofill");
                Ok(None)
            }
        }
    }
}

impl std::fmt::Debug for VaultSyncClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VaultSyncClient").finish_non_exhaustive()
    }
}
