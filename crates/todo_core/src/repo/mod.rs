//! Repository layer for the durable todo collection.
//!
//! # Responsibility
//! - Define the whole-collection load/save contract used by the todo store.
//! - Isolate the stored record layout from store orchestration.
//!
//! # Invariants
//! - Writes replace the entire stored collection.
//! - Reads reject invalid persisted state instead of masking it; the caller
//!   decides how to recover.

pub mod todo_repo;
