// SPDX-FileCopyrightText: 2026 Credlock Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Per-field AES-256-GCM encryption.
//!
//! Every call to [`encrypt`] generates a fresh random 96-bit nonce via the
//! system CSPRNG. Nonce reuse would be catastrophic for GCM security. The
//! produced layout is exactly `base64(nonce[12] ‖ ciphertext ‖ tag[16])` with
//! no separators and no version byte, so each field carries its own nonce and
//! needs no external bookkeeping.

use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64;
use credlock_core::{CredlockError, EncryptedField};
use ring::aead::{AES_256_GCM, Aad, LessSafeKey, Nonce, UnboundKey};
use ring::rand::{SecureRandom, SystemRandom};
use zeroize::Zeroizing;

/// An imported AES-256-GCM key, usable for encrypt/decrypt only.
///
/// The handle cannot yield its raw bytes back; export happens exclusively
/// through the [`KeyStore`](crate::KeyStore), which owns the persisted form.
pub struct FieldKey {
    key: LessSafeKey,
}

impl FieldKey {
    /// Import raw 32-byte key material.
    pub fn import(raw: &[u8; 32]) -> Result<Self, CredlockError> {
        let unbound = UnboundKey::new(&AES_256_GCM, raw)
            .map_err(|_| CredlockError::Internal("failed to create AES-256-GCM key".to_string()))?;
        Ok(Self {
            key: LessSafeKey::new(unbound),
        })
    }

    /// Import a base64-encoded key as received over the key bridge.
    ///
    /// This is how the popup and the vault page turn the serialized handoff
    /// back into a local, non-exportable key.
    pub fn from_base64(encoded: &str) -> Result<Self, CredlockError> {
        let raw = Zeroizing::new(
            BASE64
                .decode(encoded)
                .map_err(|e| CredlockError::Format(format!("invalid base64 key: {e}")))?,
        );
        let raw: &[u8; 32] = raw.as_slice().try_into().map_err(|_| {
            CredlockError::Format(format!("key must be 32 bytes, got {}", raw.len()))
        })?;
        Self::import(raw)
    }
}

impl std::fmt::Debug for FieldKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FieldKey")
            .field("key", &"[REDACTED]")
            .finish()
    }
}

/// Generate random 32-byte key material suitable for AES-256-GCM.
pub fn generate_random_key() -> Result<Zeroizing<[u8; 32]>, CredlockError> {
    let rng = SystemRandom::new();
    let mut key = Zeroizing::new([0u8; 32]);
    rng.fill(key.as_mut())
        .map_err(|_| CredlockError::Internal("failed to generate random key".to_string()))?;
    Ok(key)
}

/// Encrypt a plaintext field with a fresh random 96-bit nonce.
pub fn encrypt(plaintext: &str, key: &FieldKey) -> Result<EncryptedField, CredlockError> {
    let rng = SystemRandom::new();
    let mut nonce_bytes = [0u8; 12];
    rng.fill(&mut nonce_bytes)
        .map_err(|_| CredlockError::Internal("failed to generate random nonce".to_string()))?;
    let nonce = Nonce::assume_unique_for_key(nonce_bytes);

    // Seal in place: the plaintext buffer is extended with the 16-byte tag.
    let mut in_out = plaintext.as_bytes().to_vec();
    key.key
        .seal_in_place_append_tag(nonce, Aad::empty(), &mut in_out)
        .map_err(|_| CredlockError::Internal("AES-256-GCM encryption failed".to_string()))?;

    let mut combined = Vec::with_capacity(nonce_bytes.len() + in_out.len());
    combined.extend_from_slice(&nonce_bytes);
    combined.extend_from_slice(&in_out);
    Ok(EncryptedField(BASE64.encode(combined)))
}

/// Decrypt an encrypted field.
///
/// Fails with [`CredlockError::Format`] if the payload is not base64, shorter
/// than nonce plus tag, or decrypts to invalid UTF-8, and with
/// [`CredlockError::Authentication`] if the tag does not verify (tampering,
/// wrong key, or corrupted storage). Never returns partial plaintext.
pub fn decrypt(field: &EncryptedField, key: &FieldKey) -> Result<String, CredlockError> {
    let combined = BASE64
        .decode(&field.0)
        .map_err(|e| CredlockError::Format(format!("invalid base64: {e}")))?;
    if combined.len() < EncryptedField::MIN_DECODED_LEN {
        return Err(CredlockError::Format(format!(
            "payload is {} bytes, below the {}-byte minimum (nonce + tag)",
            combined.len(),
            EncryptedField::MIN_DECODED_LEN
        )));
    }

    let (nonce_bytes, ciphertext) = combined.split_at(12);
    let nonce = Nonce::try_assume_unique_for_key(nonce_bytes)
        .map_err(|_| CredlockError::Format("invalid nonce".to_string()))?;

    let mut in_out = ciphertext.to_vec();
    let plaintext = key
        .key
        .open_in_place(nonce, Aad::empty(), &mut in_out)
        .map_err(|_| CredlockError::Authentication)?;

    String::from_utf8(plaintext.to_vec())
        .map_err(|e| CredlockError::Format(format!("decrypted field is not valid UTF-8: {e}")))
}
