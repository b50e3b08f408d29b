// SPDX-FileCopyrightText: 2026 Credlock Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Credlock - a local-first encrypted credential vault.
//!
//! This is the binary entry point for the Credlock background process.

mod background;
mod serve;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

/// Credlock - a local-first encrypted credential vault.
#[derive(Parser, Debug)]
#[command(name = "credlock", version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Run the background process: key store, vault sync, and key bridge.
    Serve,
    /// Print the effective configuration and exit.
    Config,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let config = match credlock_config::load_and_validate() {
        Ok(config) => config,
        Err(errors) => {
            credlock_config::render_errors(&errors);
            std::process::exit(1);
        }
    };

    // RUST_LOG wins over the configured level when set.
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.agent.log_level.clone()));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    match cli.command {
        Some(Commands::Serve) => {
            if let Err(e) = serve::run(config).await {
                eprintln!("credlock: {e}");
                std::process::exit(1);
            }
        }
        Some(Commands::Config) => {
            println!("agent.name = {}", config.agent.name);
            println!("agent.log_level = {}", config.agent.log_level);
            println!("storage.database_path = {}", config.storage.database_path);
            println!("store.base_url = {}", config.store.base_url);
            println!("bridge.vault_origin = {}", config.bridge.vault_origin);
            println!(
                "bridge.request_timeout_ms = {}",
                config.bridge.request_timeout_ms
            );
            println!("breach.enabled = {}", config.breach.enabled);
            println!("breach.base_url = {}", config.breach.base_url);
        }
        None => {
            println!("credlock: use --help for available commands");
        }
    }
}

#[cfg(test)]
mod tests {
    #[test]
    fn binary_loads_config_defaults() {
        let config =
            credlock_config::load_and_validate().expect("default config should be valid");
        assert_eq!(config.agent.name, "credlock");
    }
}
