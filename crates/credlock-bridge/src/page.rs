// SPDX-FileCopyrightText: 2026 Credlock Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Same-window page messaging with origin-scoped delivery.
//!
//! Models the externally hosted page's message channel: every posted message
//! carries the poster's window identity and an explicit target origin, and a
//! listener only observes messages whose target origin matches the window it
//! is registered on. This is the confidentiality boundary the relay relies
//! on -- a key posted to the vault origin is undeliverable to any other
//! origin's listener.

use tokio::sync::broadcast;
use tracing::trace;

use crate::messages::PageMessage;

/// Identity of a window within the page-messaging model. Listeners use it to
/// verify a message's source before trusting it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct WindowId(uuid::Uuid);

#[derive(Debug, Clone)]
struct PostedMessage {
    source: WindowId,
    target_origin: String,
    data: PageMessage,
}

/// A single page window: an origin plus its intra-window message channel.
#[derive(Debug, Clone)]
pub struct PageWindow {
    id: WindowId,
    origin: String,
    tx: broadcast::Sender<PostedMessage>,
}

impl PageWindow {
    pub fn new(origin: impl Into<String>) -> Self {
        let (tx, _) = broadcast::channel(32);
        Self {
            id: WindowId(uuid::Uuid::new_v4()),
            origin: origin.into(),
            tx,
        }
    }

    /// This window's identity, the expected `source` of its own messages.
    pub fn id(&self) -> WindowId {
        self.id
    }

    pub fn origin(&self) -> &str {
        &self.origin
    }

    /// Register a listener on this window. Subscribe before posting the
    /// message you expect to observe; delivery is not replayed.
    pub fn listen(&self) -> PageListener {
        PageListener {
            window_origin: self.origin.clone(),
            rx: self.tx.subscribe(),
        }
    }

    /// Post a message from this window itself.
    pub fn post_message(&self, data: PageMessage, target_origin: &str) {
        self.post_message_from(self.id, data, target_origin);
    }

    /// Post a message claiming an arbitrary source window.
    ///
    /// Models a foreign window injecting into this channel; listeners that
    /// care about provenance must check `source` themselves, exactly as the
    /// relay does.
    pub fn post_message_from(&self, source: WindowId, data: PageMessage, target_origin: &str) {
        // Send errors only mean no listener is currently registered.
        let _ = self.tx.send(PostedMessage {
            source,
            target_origin: target_origin.to_string(),
            data,
        });
    }
}

/// A message as observed by a listener: payload plus source identity.
#[derive(Debug, Clone)]
pub struct ReceivedPageMessage {
    pub source: WindowId,
    pub data: PageMessage,
}

/// Receiver half of a window's message channel.
///
/// Filters delivery by origin: a message targeted at a specific origin is
/// observable only on a window of that origin. `"*"` targets any origin, and
/// the relay never uses it for key material.
#[derive(Debug)]
pub struct PageListener {
    window_origin: String,
    rx: broadcast::Receiver<PostedMessage>,
}

impl PageListener {
    /// Receive the next message deliverable to this window, or `None` once
    /// the window is gone.
    pub async fn recv(&mut self) -> Option<ReceivedPageMessage> {
        loop {
            match self.rx.recv().await {
                Ok(msg) => {
                    if msg.target_origin == "*" || msg.target_origin == self.window_origin {
                        return Some(ReceivedPageMessage {
                            source: msg.source,
                            data: msg.data,
                        });
                    }
                    trace!(
                        target_origin = %msg.target_origin,
                        window_origin = %self.window_origin,
                        "dropping message scoped to a different origin"
                    );
                }
                Err(broadcast::error::RecvError::Lagged(skipped)) => {
                    trace!(skipped, "listener lagged; continuing");
                }
                Err(broadcast::error::RecvError::Closed) => return None,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn message_targeted_at_own_origin_is_delivered() {
        let window = PageWindow::new("http://localhost:3000");
        let mut listener = window.listen();

        window.post_message(PageMessage::RequestAesKey, "http://localhost:3000");

        let msg = listener.recv().await.unwrap();
        assert_eq!(msg.data, PageMessage::RequestAesKey);
        assert_eq!(msg.source, window.id());
    }

    #[tokio::test]
    async fn message_targeted_at_other_origin_is_not_delivered() {
        let window = PageWindow::new("https://evil.example");
        let mut listener = window.listen();

        window.post_message(
            PageMessage::VaultAesKey {
                key_base64: "c2VjcmV0".into(),
            },
            "http://localhost:3000",
        );
        // Follow with a deliverable marker so recv() returns something.
        window.post_message(PageMessage::RequestAesKey, "*");

        let msg = listener.recv().await.unwrap();
        assert_eq!(msg.data, PageMessage::RequestAesKey, "the key must not be observable");
    }

    #[tokio::test]
    async fn foreign_source_is_visible_to_listeners() {
        let window = PageWindow::new("http://localhost:3000");
        let other = PageWindow::new("http://localhost:3000");
        let mut listener = window.listen();

        window.post_message_from(other.id(), PageMessage::RequestAesKey, "*");

        let msg = listener.recv().await.unwrap();
        assert_ne!(msg.source, window.id());
    }
}
