//! Query side of the note collection.
//!
//! # Responsibility
//! - Filter notes by color, tag and free text without reordering them.
//! - Derive the distinct tag list shown by filter pickers.
//! - Debounce bursty search input before it reaches the filter state.
//!
//! # Invariants
//! - Query functions are synchronous and never mutate the store.

pub mod debounce;
pub mod filter;
pub mod tag_index;
