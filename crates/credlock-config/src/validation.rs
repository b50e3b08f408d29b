// SPDX-FileCopyrightText: 2026 Credlock Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Post-deserialization validation for configuration values.
//!
//! Validates semantic constraints that cannot be expressed via serde
//! attributes, such as well-formed URLs and non-empty paths.

use thiserror::Error;

use crate::model::CredlockConfig;

/// A single configuration error surfaced at startup.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Figment failed to parse or merge the configuration sources.
    #[error("{0}")]
    Parse(#[from] Box<figment::Error>),

    /// A semantic constraint on a parsed value was violated.
    #[error("{message}")]
    Validation { message: String },
}

/// Validate a deserialized configuration for semantic correctness.
///
/// Returns `Ok(())` if all validations pass, or `Err(Vec<ConfigError>)` with
/// all collected validation errors (does not fail fast).
pub fn validate_config(config: &CredlockConfig) -> Result<(), Vec<ConfigError>> {
    let mut errors = Vec::new();

    if config.storage.database_path.trim().is_empty() {
        errors.push(ConfigError::Validation {
            message: "storage.database_path must not be empty".to_string(),
        });
    }

    for (field, value) in [
        ("store.base_url", &config.store.base_url),
        ("breach.base_url", &config.breach.base_url),
    ] {
        if !value.starts_with("http://") && !value.starts_with("https://") {
            errors.push(ConfigError::Validation {
                message: format!("{field} `{value}` must be an http(s) URL"),
            });
        }
    }

    // A wildcard origin would defeat the key-confidentiality boundary.
    if config.bridge.vault_origin.trim() == "*" || config.bridge.vault_origin.trim().is_empty() {
        errors.push(ConfigError::Validation {
            message: "bridge.vault_origin must be a concrete origin, not empty or `*`".to_string(),
        });
    }

    if config.bridge.request_timeout_ms == 0 {
        errors.push(ConfigError::Validation {
            message: "bridge.request_timeout_ms must be greater than zero".to_string(),
        });
    }

    if errors.is_empty() { Ok(()) } else { Err(errors) }
}
