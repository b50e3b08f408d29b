// SPDX-FileCopyrightText: 2026 Credlock Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration system for the Credlock vault.
//!
//! Provides TOML configuration parsing with strict validation
//! (`deny_unknown_fields`), XDG file hierarchy lookup, and environment
//! variable overrides via the `CREDLOCK_` prefix.
//!
//! # Usage
//!
//! ```no_run
//! use credlock_config::load_and_validate;
//!
//! let config = load_and_validate().expect("config errors");
//! println!("store: {}", config.store.base_url);
//! ```

pub mod loader;
pub mod model;
pub mod validation;

pub use loader::{load_config, load_config_from_path, load_config_from_str};
pub use model::CredlockConfig;
pub use validation::{ConfigError, validate_config};

/// Print all collected configuration errors to stderr, one per line.
pub fn render_errors(errors: &[ConfigError]) {
    for err in errors {
        eprintln!("credlock: config error: {err}");
    }
}

/// Load configuration from the XDG hierarchy and validate it.
///
/// Returns either a valid [`CredlockConfig`] or the list of all collected
/// errors, parse and semantic alike.
pub fn load_and_validate() -> Result<CredlockConfig, Vec<ConfigError>> {
    match loader::load_config() {
        Ok(config) => {
            validation::validate_config(&config)?;
            Ok(config)
        }
        Err(err) => Err(vec![ConfigError::Parse(Box::new(err))]),
    }
}

/// Load configuration from a TOML string and validate it.
///
/// Useful for testing and explicit configuration.
pub fn load_and_validate_str(toml_content: &str) -> Result<CredlockConfig, Vec<ConfigError>> {
    match loader::load_config_from_str(toml_content) {
        Ok(config) => {
            validation::validate_config(&config)?;
            Ok(config)
        }
        Err(err) => Err(vec![ConfigError::Parse(Box::new(err))]),
    }
}
