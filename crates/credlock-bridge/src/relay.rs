// SPDX-FileCopyrightText: 2026 Credlock Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The relay: a script trusted by the installation, running inside an
//! otherwise untrusted page, forwarding key requests to the background.
//!
//! Protocol (single round trip):
//! 1. The page posts `REQUEST_AES_KEY` to itself.
//! 2. The relay accepts it only if the message's source is the page's own
//!    window, and forwards `REQUEST_AES_KEY_FROM_VAULT` over the trusted
//!    runtime channel.
//! 3. The background exports the key base64-encoded.
//! 4. The relay posts `VAULT_AES_KEY` back into the page, scoped to the
//!    configured vault origin -- never a wildcard.

use tokio::task::JoinHandle;
use tracing::{debug, warn};

use crate::background::BackgroundHandle;
use crate::messages::{PageMessage, RuntimeRequest, RuntimeResponse};
use crate::page::PageWindow;

/// Attach a relay to `window` and serve key requests until the window goes
/// away.
///
/// `vault_origin` is the one origin allowed to receive the key. A relay
/// provisioned into a page of any other origin will still forward requests,
/// but the response it posts is undeliverable there -- the origin scope, not
/// the relay's placement, is the confidentiality boundary.
pub fn spawn(
    window: PageWindow,
    background: BackgroundHandle,
    vault_origin: String,
) -> JoinHandle<()> {
    // Subscribe before returning so a request posted right after spawn is
    // not missed.
    let mut listener = window.listen();
    tokio::spawn(async move {
        while let Some(msg) = listener.recv().await {
            if msg.data != PageMessage::RequestAesKey {
                continue;
            }
            // Only accept messages originating from the page's own window.
            if msg.source != window.id() {
                warn!("rejecting key request from a foreign window source");
                continue;
            }

            match background.request(RuntimeRequest::RequestAesKey).await {
                Ok(RuntimeResponse::AesKey {
                    success: true,
                    key_base64,
                }) => {
                    debug!(%vault_origin, "relaying key to vault origin");
                    window.post_message(
                        PageMessage::VaultAesKey { key_base64 },
                        &vault_origin,
                    );
                }
                Ok(other) => {
                    warn!(?other, "unexpected response to key request");
                }
                Err(e) => {
                    warn!(error = %e, "failed to obtain AES key from background");
                }
            }
        }
        debug!("relay window closed");
    })
}
