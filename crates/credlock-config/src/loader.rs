// SPDX-FileCopyrightText: 2026 Credlock Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration loader using Figment for layered config merging.
//!
//! Supports XDG hierarchy: `./credlock.toml` > `~/.config/credlock/credlock.toml`
//! > `/etc/credlock/credlock.toml` with environment variable overrides via
//! `CREDLOCK_` prefix.

#![allow(clippy::result_large_err)] // figment::Error is external and cannot be boxed without wrapper

use std::path::Path;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};

use crate::model::CredlockConfig;

/// Load configuration from the standard XDG hierarchy with env var overrides.
///
/// Merge order (later overrides earlier):
/// 1. Compiled defaults
/// 2. `/etc/credlock/credlock.toml` (system-wide)
/// 3. `~/.config/credlock/credlock.toml` (user XDG config)
/// 4. `./credlock.toml` (local directory)
/// 5. `CREDLOCK_*` environment variables
pub fn load_config() -> Result<CredlockConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(CredlockConfig::default()))
        .merge(Toml::file("/etc/credlock/credlock.toml"))
        .merge(Toml::file(
            dirs::config_dir()
                .map(|d| d.join("credlock/credlock.toml"))
                .unwrap_or_default(),
        ))
        .merge(Toml::file("credlock.toml"))
        .merge(env_provider())
        .extract()
}

/// Load configuration from a TOML string only (no XDG lookup).
///
/// Used for testing and explicit config specification.
pub fn load_config_from_str(toml_content: &str) -> Result<CredlockConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(CredlockConfig::default()))
        .merge(Toml::string(toml_content))
        .extract()
}

/// Load configuration from a specific file path with env var overrides.
pub fn load_config_from_path(path: &Path) -> Result<CredlockConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(CredlockConfig::default()))
        .merge(Toml::file(path))
        .merge(env_provider())
        .extract()
}

/// Create the environment variable provider using explicit `map()` for
/// section-to-dot mapping.
///
/// Uses `Env::map()` NOT `Env::split("_")` to avoid ambiguity with
/// underscore-containing key names: `CREDLOCK_STORAGE_DATABASE_PATH` must map
/// to `storage.database_path`, not `storage.database.path`.
fn env_provider() -> Env {
    Env::prefixed("CREDLOCK_").map(|key| {
        let key_str = key.as_str();
        let mapped = key_str
            .replacen("agent_", "agent.", 1)
            .replacen("storage_", "storage.", 1)
            .replacen("store_", "store.", 1)
            .replacen("bridge_", "bridge.", 1)
            .replacen("breach_", "breach.", 1);
        mapped.into()
    })
}
