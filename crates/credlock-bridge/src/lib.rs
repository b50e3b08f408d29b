// SPDX-FileCopyrightText: 2026 Credlock Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Cross-context key distribution for the Credlock vault.
//!
//! Three isolated contexts must agree on one symmetric key without shared
//! memory: the privileged background process (sole owner of the key store),
//! the popup UI (same trust domain, direct channel), and the externally
//! hosted vault page (untrusted, reachable only through an origin-scoped
//! relay). The raw key crosses exactly one boundary, serialized as base64
//! over a channel scoped by window identity and origin; it never touches the
//! network.

pub mod background;
pub mod messages;
pub mod page;
pub mod popup;
pub mod relay;
pub mod vault_page;

pub use background::{BackgroundHandle, BackgroundRequest, runtime_channel};
pub use messages::{EncryptedPair, PageMessage, PasswordPayload, RuntimeRequest, RuntimeResponse};
pub use page::{PageListener, PageWindow, ReceivedPageMessage, WindowId};
pub use popup::PopupClient;
