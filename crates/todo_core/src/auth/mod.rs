//! Mock identity gate for the todo front-end.
//!
//! # Responsibility
//! - Decide whether a username/password pair is accepted.
//! - Track the current in-session user for route-guard style checks.
//!
//! # Invariants
//! - No credential, token or session is issued or persisted.
//! - This is not an authentication mechanism.

pub mod identity_gate;
