//! Core domain logic for SmartNote.
//! This crate is the single source of truth for classification, filtering and
//! note lifecycle invariants.

pub mod classify;
pub mod config;
pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod search;
pub mod service;

pub use classify::{suggest_color, suggest_tags, Classifier, ColorBucket, KeywordTable};
pub use config::SmartNotesConfig;
pub use logging::{default_log_level, init_from_config, init_logging, logging_status, LoggingError};
pub use model::filter::{FilterChoice, FilterSpec};
pub use model::note::{Color, Note, NoteId, NoteValidationError, ParseColorError};
pub use repo::blob_store::{
    NotePersistence, PersistenceError, PersistenceResult, SqliteBlobStore, DEFAULT_BLOB_KEY,
};
pub use repo::note_store::NoteStore;
pub use search::debounce::Debouncer;
pub use search::filter::apply as apply_filter;
pub use search::tag_index::distinct_tags;
pub use service::draft::{DraftError, DraftState};
pub use service::notes_service::{NoteServiceError, NotesService};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
