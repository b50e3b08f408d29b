// SPDX-FileCopyrightText: 2026 Credlock Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Wires the whole vault together and runs it until shutdown.

use std::sync::Arc;
use std::time::Duration;

use credlock_breach::BreachClient;
use credlock_bridge::{PageWindow, relay, runtime_channel};
use credlock_config::CredlockConfig;
use credlock_core::{CredlockError, KeyValueStore};
use credlock_storage::SqliteStore;
use credlock_sync::{VaultStoreClient, VaultSyncClient};
use credlock_vault::{KeyStore, VaultIdentity};
use tracing::info;

use crate::background::BackgroundService;

const RUNTIME_CHANNEL_CAPACITY: usize = 32;

/// Open storage, start the background dispatch loop and the vault-page
/// relay, and block until interrupted.
pub async fn run(config: CredlockConfig) -> Result<(), CredlockError> {
    let sqlite = SqliteStore::open(&config.storage.database_path).await?;
    let store: Arc<dyn KeyValueStore> = Arc::new(sqlite);

    let keystore = Arc::new(KeyStore::new(store.clone()));
    let identity = Arc::new(VaultIdentity::new(store.clone()));
    let sync = Arc::new(VaultSyncClient::new(
        keystore.clone(),
        identity.clone(),
        VaultStoreClient::new(&config.store)?,
    ));
    let breach = Arc::new(BreachClient::new(&config.breach)?);

    let timeout = Duration::from_millis(config.bridge.request_timeout_ms);
    let (handle, rx) = runtime_channel(RUNTIME_CHANNEL_CAPACITY, timeout);
    let service = Arc::new(BackgroundService::new(keystore, sync, breach, store));
    let dispatch = service.spawn(rx);

    // The relay serves key requests from the vault page's window, scoped to
    // the one configured origin.
    let vault_window = PageWindow::new(config.bridge.vault_origin.clone());
    let relay_task = relay::spawn(
        vault_window,
        handle.clone(),
        config.bridge.vault_origin.clone(),
    );

    info!(
        database = %config.storage.database_path,
        store = %config.store.base_url,
        vault_origin = %config.bridge.vault_origin,
        "credlock background running"
    );

    tokio::signal::ctrl_c()
        .await
        .map_err(|e| CredlockError::Internal(format!("could not listen for shutdown: {e}")))?;
    info!("shutdown requested");

    // The relay holds a handle clone; stop it first so dropping ours closes
    // the runtime channel and ends the dispatch loop.
    relay_task.abort();
    drop(handle);
    dispatch
        .await
        .map_err(|e| CredlockError::Internal(format!("dispatch loop panicked: {e}")))?;
    Ok(())
}
