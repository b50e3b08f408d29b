// SPDX-FileCopyrightText: 2026 Credlock Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration model structs for the Credlock vault.
//!
//! All structs use `#[serde(deny_unknown_fields)]` to reject unrecognized
//! config keys at startup, providing actionable error messages.

use serde::{Deserialize, Serialize};

/// Top-level Credlock configuration.
///
/// Loaded from TOML files following XDG hierarchy, with environment variable
/// overrides. All sections are optional and default to sensible values.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct CredlockConfig {
    /// Process identity and logging settings.
    #[serde(default)]
    pub agent: AgentConfig,

    /// Durable key/value storage settings.
    #[serde(default)]
    pub storage: StorageConfig,

    /// Vault store API settings.
    #[serde(default)]
    pub store: StoreConfig,

    /// Cross-context key bridge settings.
    #[serde(default)]
    pub bridge: BridgeConfig,

    /// Breach-check (k-anonymity) settings.
    #[serde(default)]
    pub breach: BreachConfig,
}

/// Process identity and logging configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct AgentConfig {
    /// Display name of the background process.
    #[serde(default = "default_agent_name")]
    pub name: String,

    /// Logging level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            name: default_agent_name(),
            log_level: default_log_level(),
        }
    }
}

/// Durable key/value storage configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct StorageConfig {
    /// Path to the SQLite database file holding the key material, vault id,
    /// and pending-credential record.
    #[serde(default = "default_database_path")]
    pub database_path: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            database_path: default_database_path(),
        }
    }
}

/// Vault store API configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct StoreConfig {
    /// Base URL of the locally-hosted vault store.
    #[serde(default = "default_store_base_url")]
    pub base_url: String,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            base_url: default_store_base_url(),
        }
    }
}

/// Cross-context key bridge configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct BridgeConfig {
    /// The one origin allowed to receive the exported key. The relay scopes
    /// its `VAULT_AES_KEY` post to exactly this origin, never a wildcard.
    #[serde(default = "default_vault_origin")]
    pub vault_origin: String,

    /// How long a cross-context request may stay pending before the caller
    /// sees a bridge error instead of blocking indefinitely.
    #[serde(default = "default_request_timeout_ms")]
    pub request_timeout_ms: u64,
}

impl Default for BridgeConfig {
    fn default() -> Self {
        Self {
            vault_origin: default_vault_origin(),
            request_timeout_ms: default_request_timeout_ms(),
        }
    }
}

/// Breach-check (k-anonymity) configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct BreachConfig {
    /// Whether passwords are checked against the breach corpus before save.
    /// The check is best-effort either way; disabling skips the network call.
    #[serde(default = "default_breach_enabled")]
    pub enabled: bool,

    /// Base URL of the range endpoint.
    #[serde(default = "default_breach_base_url")]
    pub base_url: String,
}

impl Default for BreachConfig {
    fn default() -> Self {
        Self {
            enabled: default_breach_enabled(),
            base_url: default_breach_base_url(),
        }
    }
}

fn default_agent_name() -> String {
    "credlock".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_database_path() -> String {
    dirs::data_dir()
        .map(|d| d.join("credlock/credlock.db").display().to_string())
        .unwrap_or_else(|| "credlock.db".to_string())
}

fn default_store_base_url() -> String {
    "http://127.0.0.1:8048".to_string()
}

fn default_vault_origin() -> String {
    "http://localhost:3000".to_string()
}

fn default_request_timeout_ms() -> u64 {
    5_000
}

fn default_breach_enabled() -> bool {
    true
}

fn default_breach_base_url() -> String {
    "https://api.pwnedpasswords.com".to_string()
}
