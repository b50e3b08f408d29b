// SPDX-FileCopyrightText: 2026 Credlock Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Embedded schema migrations for the key/value store.
//!
//! The SQL files under `migrations/` are compiled in via refinery's
//! `embed_migrations!` and applied on every database open.

use credlock_core::CredlockError;

mod embedded {
    use refinery::embed_migrations;
    embed_migrations!("migrations");
}

/// Apply any pending migrations to `conn`.
///
/// Applied migrations are tracked in refinery's `refinery_schema_history`
/// table, so reopening an up-to-date database is a no-op.
pub fn run_migrations(conn: &mut rusqlite::Connection) -> Result<(), CredlockError> {
    embedded::migrations::runner()
        .run(conn)
        .map_err(|e| CredlockError::Storage {
            source: Box::new(e),
        })?;
    Ok(())
}
