//! Todo repository contract and key-value implementation.
//!
//! # Responsibility
//! - Serialize the ordered todo collection as a JSON array under one key.
//! - Parse and validate the stored array on load.
//!
//! # Invariants
//! - A missing or blank slot loads as an empty collection.
//! - A slot that fails to parse, or holds records violating `TodoItem`
//!   invariants or id uniqueness, is reported as `InvalidData`/`Validation`.

use crate::kv::{KeyValueStore, KvError};
use crate::model::todo::{TodoItem, TodoValidationError};
use std::collections::HashSet;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Storage key holding the serialized todo collection.
pub const TODOS_STORAGE_KEY: &str = "todos";

pub type RepoResult<T> = Result<T, RepoError>;

/// Repository error for todo persistence.
#[derive(Debug)]
pub enum RepoError {
    Kv(KvError),
    Serialize(serde_json::Error),
    Validation(TodoValidationError),
    InvalidData(String),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Kv(err) => write!(f, "{err}"),
            Self::Serialize(err) => write!(f, "failed to serialize todos: {err}"),
            Self::Validation(err) => write!(f, "invalid persisted todo: {err}"),
            Self::InvalidData(message) => write!(f, "invalid persisted todo data: {message}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Kv(err) => Some(err),
            Self::Serialize(err) => Some(err),
            Self::Validation(err) => Some(err),
            Self::InvalidData(_) => None,
        }
    }
}

impl From<KvError> for RepoError {
    fn from(value: KvError) -> Self {
        Self::Kv(value)
    }
}

impl From<TodoValidationError> for RepoError {
    fn from(value: TodoValidationError) -> Self {
        Self::Validation(value)
    }
}

/// Whole-collection persistence for todos.
pub trait TodoRepository {
    fn load_all(&self) -> RepoResult<Vec<TodoItem>>;
    fn save_all(&self, todos: &[TodoItem]) -> RepoResult<()>;
}

/// Todo repository writing JSON into a key-value slot.
pub struct KvTodoRepository<S: KeyValueStore> {
    store: S,
    key: String,
}

impl<S: KeyValueStore> KvTodoRepository<S> {
    /// Creates a repository bound to the default `todos` key.
    pub fn new(store: S) -> Self {
        Self::with_key(store, TODOS_STORAGE_KEY)
    }

    pub fn with_key(store: S, key: impl Into<String>) -> Self {
        Self {
            store,
            key: key.into(),
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }
}

impl<S: KeyValueStore> TodoRepository for KvTodoRepository<S> {
    fn load_all(&self) -> RepoResult<Vec<TodoItem>> {
        let Some(serialized) = self.store.get(&self.key)? else {
            return Ok(Vec::new());
        };
        if serialized.trim().is_empty() {
            return Ok(Vec::new());
        }

        let todos: Vec<TodoItem> = serde_json::from_str(&serialized)
            .map_err(|err| RepoError::InvalidData(format!("`{}`: {err}", self.key)))?;
        validate_collection(&todos)?;
        Ok(todos)
    }

    fn save_all(&self, todos: &[TodoItem]) -> RepoResult<()> {
        let serialized = serde_json::to_string(todos).map_err(RepoError::Serialize)?;
        self.store.set(&self.key, &serialized)?;
        Ok(())
    }
}

fn validate_collection(todos: &[TodoItem]) -> RepoResult<()> {
    let mut seen = HashSet::with_capacity(todos.len());
    for todo in todos {
        todo.validate()?;
        if !seen.insert(&todo.id) {
            return Err(RepoError::InvalidData(format!(
                "duplicate todo id `{}`",
                todo.id
            )));
        }
    }
    Ok(())
}
