//! Note collection and persistence boundary.
//!
//! # Responsibility
//! - Hold the in-memory ordered note collection.
//! - Define the load/save contract with storage and its SQLite implementation.
//!
//! # Invariants
//! - The in-memory store is the source of truth; storage mirrors it.
//! - Persisted records must pass `Note::validate()` to be loaded.

pub mod blob_store;
pub mod note_store;
