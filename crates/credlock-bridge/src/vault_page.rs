// SPDX-FileCopyrightText: 2026 Credlock Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The vault page's side of the key bridge.
//!
//! The page owns only rendering; here lives the one piece of protocol it
//! participates in: requesting the key and importing it locally as a
//! non-exportable handle.

use std::time::Duration;

use credlock_core::CredlockError;
use credlock_vault::FieldKey;

use crate::messages::PageMessage;
use crate::page::PageWindow;

/// Request the field encryption key through the relay attached to `window`.
///
/// Posts `REQUEST_AES_KEY` to the page's own window and awaits the
/// `VAULT_AES_KEY` answer. Key acquisition may never resolve (no relay, no
/// background); `timeout` bounds the wait so the page can show a "no key"
/// state instead of blocking indefinitely.
pub async fn request_key(
    window: &PageWindow,
    timeout: Duration,
) -> Result<FieldKey, CredlockError> {
    // Subscribe before posting so the answer cannot slip past us.
    let mut listener = window.listen();
    window.post_message(PageMessage::RequestAesKey, window.origin());

    let wait = async {
        while let Some(msg) = listener.recv().await {
            if let PageMessage::VaultAesKey { key_base64 } = msg.data {
                return FieldKey::from_base64(&key_base64);
            }
        }
        Err(CredlockError::Bridge("page window closed".to_string()))
    };

    match tokio::time::timeout(timeout, wait).await {
        Ok(result) => result,
        Err(_) => Err(CredlockError::Bridge(format!(
            "no key received within {timeout:?}"
        ))),
    }
}
