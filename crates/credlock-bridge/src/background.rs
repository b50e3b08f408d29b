// SPDX-FileCopyrightText: 2026 Credlock Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The trusted in-process runtime channel to the background context.
//!
//! The popup and the relay both talk to the background through a
//! [`BackgroundHandle`]. Trust is by construction (same installation), so no
//! origin check applies here. Callers must treat every request as "may never
//! resolve": a response arrives, or the configured timeout surfaces a bridge
//! error -- never an indefinite block.

use std::time::Duration;

use credlock_core::CredlockError;
use tokio::sync::{mpsc, oneshot};

use crate::messages::{RuntimeRequest, RuntimeResponse};

/// One in-flight request plus its reply slot.
#[derive(Debug)]
pub struct BackgroundRequest {
    pub request: RuntimeRequest,
    pub respond_to: oneshot::Sender<RuntimeResponse>,
}

/// Create the runtime channel. The receiver end is owned by the background
/// context's dispatch loop; handles are cloned freely into popups and relays.
pub fn runtime_channel(
    capacity: usize,
    timeout: Duration,
) -> (BackgroundHandle, mpsc::Receiver<BackgroundRequest>) {
    let (tx, rx) = mpsc::channel(capacity);
    (BackgroundHandle { tx, timeout }, rx)
}

/// Cloneable sender half of the runtime channel.
#[derive(Debug, Clone)]
pub struct BackgroundHandle {
    tx: mpsc::Sender<BackgroundRequest>,
    timeout: Duration,
}

impl BackgroundHandle {
    /// Send a request and await its response.
    ///
    /// Fails with a bridge error if the background context is gone, drops
    /// the request without replying, or does not reply within the timeout.
    pub async fn request(&self, request: RuntimeRequest) -> Result<RuntimeResponse, CredlockError> {
        let (respond_to, response) = oneshot::channel();
        self.tx
            .send(BackgroundRequest {
                request,
                respond_to,
            })
            .await
            .map_err(|_| CredlockError::Bridge("background context unreachable".to_string()))?;

        match tokio::time::timeout(self.timeout, response).await {
            Ok(Ok(response)) => Ok(response),
            Ok(Err(_)) => Err(CredlockError::Bridge(
                "background dropped the request without responding".to_string(),
            )),
            Err(_) => Err(CredlockError::Bridge(format!(
                "no response from background within {:?}",
                self.timeout
            ))),
        }
    }
}
