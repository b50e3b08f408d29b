// SPDX-FileCopyrightText: 2026 Credlock Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Field-level AES-256-GCM encryption and key lifecycle for the Credlock
//! vault.
//!
//! A single 256-bit key is generated once per installation, persisted as raw
//! bytes in durable storage, and imported as a non-exportable handle wherever
//! it is used. Each sensitive field is encrypted independently with a fresh
//! random nonce, so a UI can decrypt only the field it needs to render.

pub mod cipher;
pub mod identity;
pub mod keystore;

pub use cipher::{FieldKey, decrypt, encrypt};
pub use identity::VaultIdentity;
pub use keystore::KeyStore;
