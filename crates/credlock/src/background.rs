// SPDX-FileCopyrightText: 2026 Credlock Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The background context: the one process component trusted with the key
//! store and the pending-credential record.
//!
//! Requests arrive over the runtime channel and each is handled on its own
//! task, so a slow vault-store save never blocks a dismiss sitting behind it
//! in the queue. Every request gets a response; failures are reported as the
//! `{success: false, error}` shape rather than a dropped reply.

use std::sync::Arc;

use credlock_breach::BreachClient;
use credlock_bridge::{BackgroundRequest, EncryptedPair, RuntimeRequest, RuntimeResponse};
use credlock_core::{Credential, CredlockError, KeyValueStore, types::keys};
use credlock_sync::VaultSyncClient;
use credlock_vault::{KeyStore, decrypt};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

pub struct BackgroundService {
    keystore: Arc<KeyStore>,
    sync: Arc<VaultSyncClient>,
    breach: Arc<BreachClient>,
    store: Arc<dyn KeyValueStore>,
}

impl BackgroundService {
    pub fn new(
        keystore: Arc<KeyStore>,
        sync: Arc<VaultSyncClient>,
        breach: Arc<BreachClient>,
        store: Arc<dyn KeyValueStore>,
    ) -> Self {
        Self {
            keystore,
            sync,
            breach,
            store,
        }
    }

    /// Run the dispatch loop until the last handle is dropped.
    pub fn spawn(self: Arc<Self>, mut rx: mpsc::Receiver<BackgroundRequest>) -> JoinHandle<()> {
        tokio::spawn(async move {
            while let Some(req) = rx.recv().await {
                let service = self.clone();
                tokio::spawn(async move {
                    let response = service.handle(req.request).await;
                    if req.respond_to.send(response).is_err() {
                        debug!("requester went away before the response arrived");
                    }
                });
            }
            info!("runtime channel closed; background dispatch stopping");
        })
    }

    async fn handle(&self, request: RuntimeRequest) -> RuntimeResponse {
        match request {
            RuntimeRequest::LoginDetected { payload } => self.login_detected(payload).await,
            RuntimeRequest::CheckAndSave { payload } => self.check_and_save(payload).await,
            RuntimeRequest::CheckPwnedOnly { payload } => {
                let status = self.breach.check(&payload.password).await;
                RuntimeResponse::Pwned {
                    pwned: status.pwned,
                    count: status.count,
                }
            }
            RuntimeRequest::Dismiss => self.dismiss().await,
            RuntimeRequest::GetPending => self.pending().await,
            RuntimeRequest::RequestAesKey => match self.keystore.export_key_base64().await {
                Ok(key_base64) => RuntimeResponse::AesKey {
                    success: true,
                    key_base64,
                },
                Err(e) => {
                    warn!(error = %e, "key export failed");
                    RuntimeResponse::error(e.to_string())
                }
            },
            RuntimeRequest::DecryptEntry { payload } => self.decrypt_pair(payload).await,
        }
    }

    /// Stash the detected credential so the popup can offer to save it.
    async fn login_detected(&self, payload: Credential) -> RuntimeResponse {
        let json = match serde_json::to_vec(&payload) {
            Ok(json) => json,
            Err(e) => return RuntimeResponse::error(e.to_string()),
        };
        match self.store.put(keys::PENDING_CREDS, &json).await {
            Ok(()) => {
                info!(url = %payload.url, "pending credential recorded");
                RuntimeResponse::Ack { ok: true }
            }
            Err(e) => {
                warn!(error = %e, "could not persist pending credential");
                RuntimeResponse::error(e.to_string())
            }
        }
    }

    /// Breach-check (best effort), then encrypt and submit to the vault
    /// store. The save is the fatal path; the breach verdict only annotates
    /// the response.
    async fn check_and_save(&self, payload: Credential) -> RuntimeResponse {
        let pwned = self.breach.check(&payload.password).await;

        match self.sync.save(&payload).await {
            Ok(_entry) => {
                // The pending record is consumed by a successful save. A
                // failed cleanup leaves stale state but the save stands.
                if let Err(e) = self.store.delete(keys::PENDING_CREDS).await {
                    warn!(error = %e, "saved, but could not clear the pending credential");
                }
                RuntimeResponse::Saved {
                    success: true,
                    pwned,
                }
            }
            Err(e) => {
                warn!(error = %e, "save failed");
                RuntimeResponse::error(e.to_string())
            }
        }
    }

    async fn dismiss(&self) -> RuntimeResponse {
        match self.store.delete(keys::PENDING_CREDS).await {
            Ok(()) => RuntimeResponse::Ack { ok: true },
            Err(e) => {
                warn!(error = %e, "could not clear the pending credential");
                RuntimeResponse::error(e.to_string())
            }
        }
    }

    async fn pending(&self) -> RuntimeResponse {
        let raw = match self.store.get(keys::PENDING_CREDS).await {
            Ok(raw) => raw,
            Err(e) => return RuntimeResponse::error(e.to_string()),
        };
        let pending = raw.and_then(|bytes| match serde_json::from_slice::<Credential>(&bytes) {
            Ok(credential) => Some(credential),
            Err(e) => {
                // A corrupt record is unrecoverable; report "nothing pending"
                // rather than wedging the popup.
                warn!(error = %e, "pending credential record is corrupt");
                None
            }
        });
        RuntimeResponse::Pending {
            success: true,
            pending,
        }
    }

    async fn decrypt_pair(&self, payload: EncryptedPair) -> RuntimeResponse {
        let result: Result<(String, String), CredlockError> = async {
            let key = self.keystore.get_or_create_key().await?;
            Ok((decrypt(&payload.user, &key)?, decrypt(&payload.password, &key)?))
        }
        .await;

        match result {
            Ok((user, password)) => RuntimeResponse::Decrypted {
                success: true,
                user,
                password,
            },
            Err(e) => {
                warn!(error = %e, "entry decryption failed");
                RuntimeResponse::error(e.to_string())
            }
        }
    }
}

impl std::fmt::Debug for BackgroundService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BackgroundService").finish_non_exhaustive()
    }
}
