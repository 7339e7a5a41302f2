//! Core domain logic for the todo app.
//! This crate is the single source of truth for todo invariants.

pub mod auth;
pub mod config;
pub mod kv;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;

pub use auth::identity_gate::{IdentityGate, User, MIN_PASSWORD_LEN};
pub use config::{AppConfig, ConfigError};
pub use kv::{KeyValueStore, KvError, KvResult, MemoryKvStore, SqliteKvStore};
pub use logging::{default_log_level, init_logging, logging_status, LoggingError};
pub use model::todo::{normalize_title, TodoId, TodoItem, TodoValidationError};
pub use repo::todo_repo::{
    KvTodoRepository, RepoError, RepoResult, TodoRepository, TODOS_STORAGE_KEY,
};
pub use service::todo_store::{IgnoreReason, MutationOutcome, TodoStats, TodoStore};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
