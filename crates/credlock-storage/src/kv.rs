// SPDX-FileCopyrightText: 2026 Credlock Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Typed key/value operations against the `kv_store` table.

use credlock_core::CredlockError;
use rusqlite::params;

use crate::database::Database;

/// Read the value stored under `key`.
pub async fn get(db: &Database, key: &str) -> Result<Option<Vec<u8>>, CredlockError> {
    let key = key.to_string();
    db.connection()
        .call(move |conn| {
            let result = conn.query_row(
                "SELECT value FROM kv_store WHERE key = ?1",
                params![key],
                |row| row.get::<_, Vec<u8>>(0),
            );
            match result {
                Ok(value) => Ok(Some(value)),
                Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
                Err(e) => Err(e),
            }
        })
        .await
        .map_err(crate::database::map_tr_err)
}

/// Write `value` under `key`, replacing any existing value.
pub async fn put(db: &Database, key: &str, value: &[u8]) -> Result<(), CredlockError> {
    let key = key.to_string();
    let value = value.to_vec();
    db.connection()
        .call(move |conn| {
            conn.execute(
                "INSERT INTO kv_store (key, value) VALUES (?1, ?2)
                 ON CONFLICT(key) DO UPDATE
                 SET value = excluded.value,
                     updated_at = strftime('%Y-%m-%dT%H:%M:%fZ', 'now')",
                params![key, value],
            )?;
            Ok(())
        })
        .await
        .map_err(crate::database::map_tr_err)
}

/// Remove the value stored under `key`. Absent keys are a no-op.
pub async fn delete(db: &Database, key: &str) -> Result<(), CredlockError> {
    let key = key.to_string();
    db.connection()
        .call(move |conn| {
            conn.execute("DELETE FROM kv_store WHERE key = ?1", params![key])?;
            Ok(())
        })
        .await
        .map_err(crate::database::map_tr_err)
}
