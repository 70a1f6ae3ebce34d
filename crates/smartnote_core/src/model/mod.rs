//! Domain model for classified notes.
//!
//! # Responsibility
//! - Define canonical data structures used by core business logic.
//! - Keep the persisted note shape and the view-filter shape in one place.
//!
//! # Invariants
//! - Every committed note is identified by a stable `NoteId`.
//! - Deletion is a hard removal from the collection; there are no tombstones.

pub mod filter;
pub mod note;
