// SPDX-FileCopyrightText: 2026 Credlock Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Wire contract for cross-context messages.
//!
//! Two channels carry these: the trusted in-process runtime channel between
//! the popup/relay and the background context ([`RuntimeRequest`] /
//! [`RuntimeResponse`]), and the same-window page channel between the vault
//! page and its relay ([`PageMessage`]).

use credlock_core::{Credential, EncryptedField, PwnedStatus};
use serde::{Deserialize, Serialize};

/// Messages posted within a page window (vault page ↔ relay).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum PageMessage {
    /// The vault page asking the relay for the field encryption key. Only a
    /// script running in the page's own context can legitimately originate
    /// this.
    #[serde(rename = "REQUEST_AES_KEY")]
    RequestAesKey,

    /// The relay handing the exported key back into the page, scoped to the
    /// configured vault origin.
    #[serde(rename = "VAULT_AES_KEY")]
    VaultAesKey {
        #[serde(rename = "keyBase64")]
        key_base64: String,
    },
}

/// A password-only payload for standalone breach checks.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PasswordPayload {
    pub password: String,
}

impl std::fmt::Debug for PasswordPayload {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PasswordPayload")
            .field("password", &"[REDACTED]")
            .finish()
    }
}

/// An encrypted user/password pair submitted for display decryption.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EncryptedPair {
    pub user: EncryptedField,
    pub password: EncryptedField,
}

/// Requests sent to the background context over the trusted runtime channel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum RuntimeRequest {
    /// A login form submission was detected; the payload becomes the pending
    /// credential awaiting user confirmation.
    #[serde(rename = "LOGIN_DETECTED")]
    LoginDetected { payload: Credential },

    /// Run the best-effort breach check, then encrypt and submit the
    /// credential to the vault store.
    #[serde(rename = "CHECK_AND_SAVE")]
    CheckAndSave { payload: Credential },

    /// Breach-check a password without saving anything.
    #[serde(rename = "CHECK_PWNED_ONLY")]
    CheckPwnedOnly { payload: PasswordPayload },

    /// Discard the pending credential.
    #[serde(rename = "DISMISS")]
    Dismiss,

    /// Fetch the pending credential for popup display.
    #[serde(rename = "GET_PENDING")]
    GetPending,

    /// Export the field encryption key for the vault page (bridge step 3).
    #[serde(rename = "REQUEST_AES_KEY_FROM_VAULT")]
    RequestAesKey,

    /// Decrypt an entry's fields for popup display.
    #[serde(rename = "DECRYPT_ENTRY")]
    DecryptEntry { payload: EncryptedPair },
}

/// Responses returned over the trusted runtime channel.
///
/// Untagged on the wire, so variant order is load-bearing for
/// deserialization: `Pending` accepts any object carrying `success` (its
/// `pending` field tolerates absence), so every variant whose required keys
/// could also appear alongside `success` must be declared before it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RuntimeResponse {
    /// Any failed request.
    Error { success: bool, error: String },

    /// `REQUEST_AES_KEY_FROM_VAULT` success.
    AesKey {
        success: bool,
        #[serde(rename = "keyBase64")]
        key_base64: String,
    },

    /// `DECRYPT_ENTRY` success.
    Decrypted {
        success: bool,
        user: String,
        password: String,
    },

    /// `CHECK_AND_SAVE` success; `pwned` is the best-effort breach verdict.
    Saved { success: bool, pwned: PwnedStatus },

    /// `CHECK_PWNED_ONLY` outcome.
    Pwned { pwned: bool, count: u64 },

    /// `GET_PENDING` outcome. Must stay after every other `success`-carrying
    /// variant; see the enum docs.
    Pending {
        success: bool,
        pending: Option<Credential>,
    },

    /// `DISMISS` (and `LOGIN_DETECTED`) acknowledgement.
    Ack { ok: bool },
}

impl RuntimeResponse {
    /// Build the failure shape `{success: false, error}`.
    pub fn error(message: impl Into<String>) -> Self {
        RuntimeResponse::Error {
            success: false,
            error: message.into(),
        }
    }
}
