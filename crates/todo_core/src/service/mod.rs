//! Core use-case services.
//!
//! # Responsibility
//! - Own in-session state and orchestrate repository calls around it.
//! - Keep UI layers decoupled from storage details.

pub mod todo_store;
