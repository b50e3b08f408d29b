// SPDX-FileCopyrightText: 2026 Credlock Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types for the Credlock vault.

use thiserror::Error;

/// The primary error type used across all Credlock crates.
#[derive(Debug, Error)]
pub enum CredlockError {
    /// Configuration errors (invalid TOML, missing required fields, type mismatches).
    #[error("configuration error: {0}")]
    Config(String),

    /// Durable storage errors. Fatal on the save path: a key or id that
    /// cannot be persisted must not be used.
    #[error("storage error: {source}")]
    Storage {
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// Authenticated decryption failed: tag mismatch from tampering, a wrong
    /// key, or corrupted storage. Never accompanied by partial plaintext.
    #[error("field authentication failed: ciphertext tag mismatch")]
    Authentication,

    /// Malformed encrypted payload (bad base64, below the 28-byte minimum,
    /// or plaintext that is not valid UTF-8).
    #[error("malformed encrypted field: {0}")]
    Format(String),

    /// Non-2xx response from the vault store API. Surfaced to the caller
    /// with status and detail; never retried automatically.
    #[error("vault store error (HTTP {status}): {detail}")]
    Store { status: u16, detail: String },

    /// The vault store or breach-check service was unreachable.
    #[error("network error: {message}")]
    Network {
        message: String,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Cross-context key distribution failed (unreachable background context,
    /// rejected origin, or a timed-out request).
    #[error("key bridge error: {0}")]
    Bridge(String),

    /// Internal or unexpected errors.
    #[error("internal error: {0}")]
    Internal(String),
}
