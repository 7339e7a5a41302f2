//! Todo domain model.
//!
//! # Responsibility
//! - Define the canonical todo record shared by store, repository and UI.
//! - Own title normalization so every write path applies the same rule.
//!
//! # Invariants
//! - Every todo is identified by a stable `TodoId`.
//! - A todo title is never empty or whitespace-only.

pub mod todo;
