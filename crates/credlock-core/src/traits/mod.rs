// SPDX-FileCopyrightText: 2026 Credlock Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Trait definitions implemented by Credlock backend crates.

pub mod store;

pub use store::KeyValueStore;
