//! Durable key-value slot abstraction.
//!
//! # Responsibility
//! - Define the minimal string key/value contract the todo repository needs.
//! - Provide in-memory and SQLite-backed implementations.
//!
//! # Invariants
//! - `set` replaces the whole value stored under a key.
//! - `get` on a missing key returns `Ok(None)`, never an error.

use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod memory;
pub mod sqlite;

pub use memory::MemoryKvStore;
pub use sqlite::{SqliteKvStore, SLOT_SCHEMA_VERSION};

pub type KvResult<T> = Result<T, KvError>;

/// Failure raised by a key-value backend.
#[derive(Debug)]
pub enum KvError {
    Sqlite(rusqlite::Error),
    /// The slot file was written by a newer build.
    UnsupportedSchema { found: u32, supported: u32 },
    QuotaExceeded {
        key: String,
        required_bytes: usize,
        quota_bytes: usize,
    },
}

impl Display for KvError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Sqlite(err) => write!(f, "sqlite slot error: {err}"),
            Self::UnsupportedSchema { found, supported } => write!(
                f,
                "slot schema version {found} is newer than supported {supported}"
            ),
            Self::QuotaExceeded {
                key,
                required_bytes,
                quota_bytes,
            } => write!(
                f,
                "storage quota exceeded writing `{key}`: {required_bytes} bytes needed, quota is {quota_bytes}"
            ),
        }
    }
}

impl Error for KvError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Sqlite(err) => Some(err),
            Self::UnsupportedSchema { .. } | Self::QuotaExceeded { .. } => None,
        }
    }
}

impl From<rusqlite::Error> for KvError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Sqlite(value)
    }
}

/// String key/value storage with synchronous access.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> KvResult<Option<String>>;
    fn set(&self, key: &str, value: &str) -> KvResult<()>;
}
