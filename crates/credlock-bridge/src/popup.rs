// SPDX-FileCopyrightText: 2026 Credlock Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The popup's side of the runtime channel.
//!
//! The popup runs in the same trust domain as the background (same
//! installation), so it talks to it directly with no origin check. These are
//! thin typed wrappers over the raw request/response shapes.

use credlock_core::{Credential, CredlockError, PwnedStatus};
use credlock_vault::FieldKey;

use crate::background::BackgroundHandle;
use crate::messages::{EncryptedPair, PasswordPayload, RuntimeRequest, RuntimeResponse};

/// Typed popup-side client over the trusted runtime channel.
#[derive(Debug, Clone)]
pub struct PopupClient {
    background: BackgroundHandle,
}

impl PopupClient {
    pub fn new(background: BackgroundHandle) -> Self {
        Self { background }
    }

    /// Fetch the pending credential captured at detection time, if any.
    pub async fn pending(&self) -> Result<Option<Credential>, CredlockError> {
        match self.background.request(RuntimeRequest::GetPending).await? {
            RuntimeResponse::Pending { pending, .. } => Ok(pending),
            RuntimeResponse::Error { error, .. } => Err(CredlockError::Bridge(error)),
            other => Err(unexpected(other)),
        }
    }

    /// Breach-check a password without saving.
    pub async fn check_pwned(&self, password: &str) -> Result<PwnedStatus, CredlockError> {
        let request = RuntimeRequest::CheckPwnedOnly {
            payload: PasswordPayload {
                password: password.to_string(),
            },
        };
        match self.background.request(request).await? {
            RuntimeResponse::Pwned { pwned, count } => Ok(PwnedStatus { pwned, count }),
            other => Err(unexpected(other)),
        }
    }

    /// Confirm the save: breach-check (best effort), encrypt, submit.
    pub async fn check_and_save(
        &self,
        credential: Credential,
    ) -> Result<PwnedStatus, CredlockError> {
        let request = RuntimeRequest::CheckAndSave {
            payload: credential,
        };
        match self.background.request(request).await? {
            RuntimeResponse::Saved { pwned, .. } => Ok(pwned),
            RuntimeResponse::Error { error, .. } => Err(CredlockError::Bridge(error)),
            other => Err(unexpected(other)),
        }
    }

    /// Discard the pending credential.
    pub async fn dismiss(&self) -> Result<(), CredlockError> {
        match self.background.request(RuntimeRequest::Dismiss).await? {
            RuntimeResponse::Ack { ok: true } => Ok(()),
            other => Err(unexpected(other)),
        }
    }

    /// Ask the background to decrypt an entry's fields for display.
    pub async fn decrypt_entry(
        &self,
        pair: EncryptedPair,
    ) -> Result<(String, String), CredlockError> {
        let request = RuntimeRequest::DecryptEntry { payload: pair };
        match self.background.request(request).await? {
            RuntimeResponse::Decrypted {
                user, password, ..
            } => Ok((user, password)),
            RuntimeResponse::Error { error, .. } => Err(CredlockError::Bridge(error)),
            other => Err(unexpected(other)),
        }
    }

    /// Fetch the key over the trusted channel and import it locally.
    pub async fn fetch_key(&self) -> Result<FieldKey, CredlockError> {
        match self.background.request(RuntimeRequest::RequestAesKey).await? {
            RuntimeResponse::AesKey {
                success: true,
                key_base64,
            } => FieldKey::from_base64(&key_base64),
            RuntimeResponse::Error { error, .. } => Err(CredlockError::Bridge(error)),
            other => Err(unexpected(other)),
        }
    }
}

fn unexpected(response: RuntimeResponse) -> CredlockError {
    CredlockError::Bridge(format!("unexpected response shape: {response:?}"))
}
