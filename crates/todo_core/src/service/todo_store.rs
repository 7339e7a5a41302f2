//! Todo store: the authoritative in-session todo collection.
//!
//! # Responsibility
//! - Apply add/remove/toggle/update/clear mutations to the ordered collection.
//! - Mirror the full collection to the repository after each mutation.
//! - Derive pending/completed views and counts on read.
//!
//! # Invariants
//! - In-memory state is the source of truth; persistence failures are logged
//!   and never roll back or block a mutation.
//! - Invalid input (blank title, unknown id) never surfaces as an error.
//! - `pending_count() + completed_count() == total_count()` at all times.
//! - Ids are unique and titles are trimmed and non-empty for every item held.

use crate::model::todo::{normalize_title, TodoId, TodoItem};
use crate::repo::todo_repo::TodoRepository;
use log::{debug, error, info, warn};
use std::fmt::{Display, Formatter};

/// Why a mutation left the collection untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IgnoreReason {
    EmptyTitle,
    NotFound,
}

/// Informational result of a store mutation.
///
/// Callers are free to drop it; ignored mutations are not errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MutationOutcome {
    Applied,
    Ignored(IgnoreReason),
}

impl MutationOutcome {
    pub fn is_applied(self) -> bool {
        matches!(self, Self::Applied)
    }

    fn label(self) -> &'static str {
        match self {
            Self::Applied => "applied",
            Self::Ignored(IgnoreReason::EmptyTitle) => "ignored_empty_title",
            Self::Ignored(IgnoreReason::NotFound) => "ignored_not_found",
        }
    }
}

/// Count snapshot for summary rendering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TodoStats {
    pub total: usize,
    pub pending: usize,
    pub completed: usize,
}

impl TodoStats {
    /// Whether a "clear completed" action has anything to remove.
    pub fn has_completed(&self) -> bool {
        self.completed > 0
    }
}

impl Display for TodoStats {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} pending, {} completed", self.pending, self.completed)
    }
}

/// Explicitly owned todo state, persisted through `R`.
pub struct TodoStore<R: TodoRepository> {
    repo: R,
    todos: Vec<TodoItem>,
}

impl<R: TodoRepository> TodoStore<R> {
    /// Builds a store from the repository's current contents.
    ///
    /// Unreadable or invalid persisted data is logged and replaced by an
    /// empty collection; construction never fails.
    pub fn load(repo: R) -> Self {
        let todos = match repo.load_all() {
            Ok(todos) => {
                info!(
                    "event=todo_load module=store status=ok count={}",
                    todos.len()
                );
                todos
            }
            Err(err) => {
                warn!(
                    "event=todo_load module=store status=error fallback=empty error={}",
                    err
                );
                Vec::new()
            }
        };
        Self { repo, todos }
    }

    /// Appends a pending todo. Blank titles are ignored without a write.
    pub fn add(&mut self, title: &str) -> MutationOutcome {
        let Some(item) = TodoItem::new(title) else {
            return self.trace("add", MutationOutcome::Ignored(IgnoreReason::EmptyTitle));
        };

        self.todos.push(item);
        self.persist("add");
        self.trace("add", MutationOutcome::Applied)
    }

    /// Removes the todo with `id`. The collection is persisted even when
    /// nothing matched.
    pub fn remove(&mut self, id: &TodoId) -> MutationOutcome {
        let before = self.todos.len();
        self.todos.retain(|todo| &todo.id != id);
        let outcome = if self.todos.len() < before {
            MutationOutcome::Applied
        } else {
            MutationOutcome::Ignored(IgnoreReason::NotFound)
        };

        self.persist("remove");
        self.trace("remove", outcome)
    }

    /// Flips the completed flag of the todo with `id`. Persists
    /// unconditionally.
    pub fn toggle_complete(&mut self, id: &TodoId) -> MutationOutcome {
        let outcome = match self.find_mut(id) {
            Some(todo) => {
                todo.completed = !todo.completed;
                MutationOutcome::Applied
            }
            None => MutationOutcome::Ignored(IgnoreReason::NotFound),
        };

        self.persist("toggle_complete");
        self.trace("toggle_complete", outcome)
    }

    /// Replaces the title of the todo with `id`.
    ///
    /// A blank `new_title` is ignored without a write; an unknown `id` still
    /// persists the unchanged collection.
    pub fn update(&mut self, id: &TodoId, new_title: &str) -> MutationOutcome {
        let Some(title) = normalize_title(new_title) else {
            return self.trace("update", MutationOutcome::Ignored(IgnoreReason::EmptyTitle));
        };

        let outcome = match self.find_mut(id) {
            Some(todo) => {
                todo.title = title;
                MutationOutcome::Applied
            }
            None => MutationOutcome::Ignored(IgnoreReason::NotFound),
        };

        self.persist("update");
        self.trace("update", outcome)
    }

    /// Drops every completed todo, keeping pending ones in order.
    ///
    /// Returns how many todos were removed.
    pub fn clear_completed(&mut self) -> usize {
        let before = self.todos.len();
        self.todos.retain(TodoItem::is_pending);
        let removed = before - self.todos.len();

        self.persist("clear_completed");
        debug!(
            "event=todo_mutation module=store op=clear_completed status=applied removed={}",
            removed
        );
        removed
    }

    /// Full collection in insertion order.
    pub fn all(&self) -> &[TodoItem] {
        &self.todos
    }

    pub fn get(&self, id: &TodoId) -> Option<&TodoItem> {
        self.todos.iter().find(|todo| &todo.id == id)
    }

    pub fn pending(&self) -> Vec<&TodoItem> {
        self.todos.iter().filter(|todo| todo.is_pending()).collect()
    }

    pub fn completed(&self) -> Vec<&TodoItem> {
        self.todos.iter().filter(|todo| todo.completed).collect()
    }

    pub fn total_count(&self) -> usize {
        self.todos.len()
    }

    pub fn pending_count(&self) -> usize {
        self.todos.iter().filter(|todo| todo.is_pending()).count()
    }

    pub fn completed_count(&self) -> usize {
        self.todos.iter().filter(|todo| todo.completed).count()
    }

    pub fn stats(&self) -> TodoStats {
        let completed = self.completed_count();
        TodoStats {
            total: self.todos.len(),
            pending: self.todos.len() - completed,
            completed,
        }
    }

    pub fn repository(&self) -> &R {
        &self.repo
    }

    fn find_mut(&mut self, id: &TodoId) -> Option<&mut TodoItem> {
        self.todos.iter_mut().find(|todo| &todo.id == id)
    }

    fn persist(&self, op: &'static str) {
        if let Err(err) = self.repo.save_all(&self.todos) {
            error!(
                "event=todo_persist module=store status=error op={} count={} error={}",
                op,
                self.todos.len(),
                err
            );
        }
    }

    fn trace(&self, op: &'static str, outcome: MutationOutcome) -> MutationOutcome {
        debug!(
            "event=todo_mutation module=store op={} status={} total={}",
            op,
            outcome.label(),
            self.todos.len()
        );
        outcome
    }
}
