//! SQLite-backed key-value slot.
//!
//! # Responsibility
//! - Own a connection whose `kv_entries` table holds the durable slots.
//! - Bring a fresh or older file up to the current slot layout on open.
//!
//! # Invariants
//! - `kv_entries` exists on every handle returned by `open*`.
//! - `PRAGMA user_version` records the slot layout; a newer version is
//!   rejected before any slot is read.
//! - Tables other than `kv_entries` are left untouched.

use super::{KeyValueStore, KvError, KvResult};
use log::{error, info};
use rusqlite::{params, Connection, OptionalExtension};
use std::path::Path;
use std::time::{Duration, Instant};

/// Layout version written to `PRAGMA user_version`.
pub const SLOT_SCHEMA_VERSION: u32 = 1;

const CREATE_SLOT_TABLE_SQL: &str = "CREATE TABLE IF NOT EXISTS kv_entries (
    key TEXT PRIMARY KEY NOT NULL,
    value TEXT NOT NULL,
    updated_at INTEGER NOT NULL DEFAULT (strftime('%s', 'now') * 1000)
);";

/// Key-value store over one SQLite database.
pub struct SqliteKvStore {
    conn: Connection,
}

impl SqliteKvStore {
    /// Opens (or creates) the slot database at `path`.
    ///
    /// # Errors
    /// - `UnsupportedSchema` when the file carries a newer slot layout.
    /// - `Sqlite` when the file cannot be opened or prepared.
    pub fn open(path: impl AsRef<Path>) -> KvResult<Self> {
        Self::open_with("file", || Connection::open(path))
    }

    /// Opens a slot database that lives only as long as the handle.
    pub fn open_in_memory() -> KvResult<Self> {
        Self::open_with("memory", Connection::open_in_memory)
    }

    fn open_with(
        mode: &'static str,
        connect: impl FnOnce() -> rusqlite::Result<Connection>,
    ) -> KvResult<Self> {
        let started_at = Instant::now();
        let result = connect()
            .map_err(KvError::from)
            .and_then(|mut conn| prepare_slot_table(&mut conn).map(|()| Self { conn }));

        match &result {
            Ok(_) => info!(
                "event=kv_open module=kv status=ok mode={mode} duration_ms={}",
                started_at.elapsed().as_millis()
            ),
            Err(err) => error!(
                "event=kv_open module=kv status=error mode={mode} duration_ms={} error={}",
                started_at.elapsed().as_millis(),
                err
            ),
        }
        result
    }
}

fn prepare_slot_table(conn: &mut Connection) -> KvResult<()> {
    conn.busy_timeout(Duration::from_secs(5))?;

    let found: u32 = conn.query_row("PRAGMA user_version;", [], |row| row.get(0))?;
    if found > SLOT_SCHEMA_VERSION {
        return Err(KvError::UnsupportedSchema {
            found,
            supported: SLOT_SCHEMA_VERSION,
        });
    }

    let tx = conn.transaction()?;
    tx.execute_batch(CREATE_SLOT_TABLE_SQL)?;
    if found < SLOT_SCHEMA_VERSION {
        tx.pragma_update(None, "user_version", SLOT_SCHEMA_VERSION)?;
    }
    tx.commit()?;
    Ok(())
}

impl KeyValueStore for SqliteKvStore {
    fn get(&self, key: &str) -> KvResult<Option<String>> {
        let value = self
            .conn
            .query_row(
                "SELECT value FROM kv_entries WHERE key = ?1;",
                [key],
                |row| row.get::<_, String>(0),
            )
            .optional()?;
        Ok(value)
    }

    fn set(&self, key: &str, value: &str) -> KvResult<()> {
        self.conn.execute(
            "INSERT INTO kv_entries (key, value, updated_at)
             VALUES (?1, ?2, (strftime('%s', 'now') * 1000))
             ON CONFLICT(key) DO UPDATE SET
                value = excluded.value,
                updated_at = excluded.updated_at;",
            params![key, value],
        )?;
        Ok(())
    }
}
