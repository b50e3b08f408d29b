// SPDX-FileCopyrightText: 2026 Credlock Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Common domain types shared across the Credlock workspace.

use serde::{Deserialize, Serialize};

/// Opaque identifier for an installation's vault. Persisted once, created
/// lazily on first save.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VaultId(pub String);

impl std::fmt::Display for VaultId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Opaque identifier for a single stored entry. Generated fresh per save,
/// never reused.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntryId(pub String);

impl std::fmt::Display for EntryId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// A single encrypted field: `base64(nonce[12] ‖ ciphertext ‖ tag[16])`.
///
/// Self-describing -- the nonce travels inside the payload, so no external
/// nonce bookkeeping is needed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EncryptedField(pub String);

impl EncryptedField {
    /// Minimum decoded length: 12-byte nonce plus 16-byte tag.
    pub const MIN_DECODED_LEN: usize = 28;
}

/// Plaintext credentials captured at login detection time.
///
/// Transient and in-memory only: exists until encrypted or discarded, never
/// persisted in plaintext except as the short-lived pending record that is
/// cleared on save or dismiss.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credential {
    pub url: String,
    pub user: String,
    pub password: String,
}

impl std::fmt::Debug for Credential {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credential")
            .field("url", &self.url)
            .field("user", &self.user)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

/// The wire/stored form of a vault entry.
///
/// `url` is intentionally plaintext so the server can filter by site.
/// `user` and `password` are independently encrypted: compromise of one
/// field's ciphertext structure reveals nothing about the other.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VaultEntry {
    pub vault_id: VaultId,
    pub entry_id: EntryId,
    pub url: String,
    pub user: EncryptedField,
    pub password: EncryptedField,
}

/// Outcome of a k-anonymity breach check.
///
/// `pwned: false, count: 0` doubles as the degraded "unknown" outcome when
/// the breach service is unreachable; the check is best-effort.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PwnedStatus {
    pub pwned: bool,
    pub count: u64,
}

impl PwnedStatus {
    /// The degraded outcome: treated as not known-breached.
    pub const NOT_FOUND: PwnedStatus = PwnedStatus {
        pwned: false,
        count: 0,
    };
}

/// Well-known keys in the durable key/value store.
pub mod keys {
    /// Raw 32-byte AES-256 key material.
    pub const ENC_KEY_RAW: &str = "encKeyRaw";
    /// The installation's vault identifier (UTF-8 UUID string).
    pub const VAULT_ID: &str = "vaultId";
    /// JSON-encoded pending [`Credential`](super::Credential), cleared on
    /// save or dismiss.
    pub const PENDING_CREDS: &str = "pendingCreds";
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn credential_debug_redacts_password() {
        let cred = Credential {
            url: "https://example.com/login".into(),
            user: "alice@example.com".into(),
            password: "Tr0ub4dor&3".into(),
        };
        let rendered = format!("{cred:?}");
        assert!(rendered.contains("alice@example.com"));
        assert!(!rendered.contains("Tr0ub4dor&3"));
        assert!(rendered.contains("[REDACTED]"));
    }

    #[test]
    fn vault_entry_serializes_flat() {
        let entry = VaultEntry {
            vault_id: VaultId("v-1".into()),
            entry_id: EntryId("e-1".into()),
            url: "https://example.com".into(),
            user: EncryptedField("dXNlcg==".into()),
            password: EncryptedField("cHdk".into()),
        };
        let json = serde_json::to_value(&entry).unwrap();
        assert_eq!(json["vault_id"], "v-1");
        assert_eq!(json["entry_id"], "e-1");
        assert_eq!(json["url"], "https://example.com");
        assert_eq!(json["user"], "dXNlcg==");
        assert_eq!(json["password"], "cHdk");
    }

    #[test]
    fn encrypted_field_is_transparent_in_json() {
        let field: EncryptedField = serde_json::from_str("\"YWJj\"").unwrap();
        assert_eq!(field.0, "YWJj");
    }
}
