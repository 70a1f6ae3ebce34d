//! Note persistence contract and SQLite blob implementation.
//!
//! # Responsibility
//! - Define the load/save contract the core needs from storage.
//! - Persist the whole ordered note sequence as one JSON blob under a fixed
//!   key.
//!
//! # Invariants
//! - A missing blob loads as an empty collection.
//! - Corrupt JSON or any record violating note invariants is an error for the
//!   whole blob; there is no partial recovery.
//! - `save` replaces the stored blob in one statement.

use crate::db::DbError;
use crate::model::note::{now_epoch_ms, Note, NoteValidationError};
use log::{error, info};
use rusqlite::{params, Connection, OptionalExtension};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::time::Instant;

/// Default key the note blob is stored under.
pub const DEFAULT_BLOB_KEY: &str = "smartNotes";

pub type PersistenceResult<T> = Result<T, PersistenceError>;

/// Storage-layer failure for note load/save.
#[derive(Debug)]
pub enum PersistenceError {
    Db(DbError),
    /// Notes could not be serialized.
    Encode(serde_json::Error),
    /// Stored blob is not valid JSON for a note sequence.
    Decode(serde_json::Error),
    /// Stored blob decoded but a record breaks note invariants.
    Invalid(NoteValidationError),
    /// Connection lacks the `blobs` table.
    MissingRequiredTable(&'static str),
}

impl Display for PersistenceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::Encode(err) => write!(f, "failed to encode notes: {err}"),
            Self::Decode(err) => write!(f, "stored notes are corrupt: {err}"),
            Self::Invalid(err) => write!(f, "stored note is invalid: {err}"),
            Self::MissingRequiredTable(table) => write!(f, "missing required table `{table}`"),
        }
    }
}

impl Error for PersistenceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::Encode(err) | Self::Decode(err) => Some(err),
            Self::Invalid(err) => Some(err),
            Self::MissingRequiredTable(_) => None,
        }
    }
}

impl From<DbError> for PersistenceError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for PersistenceError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

impl From<NoteValidationError> for PersistenceError {
    fn from(value: NoteValidationError) -> Self {
        Self::Invalid(value)
    }
}

/// Storage collaborator for the note collection.
pub trait NotePersistence {
    /// Loads the persisted sequence in stored order.
    fn load(&self) -> PersistenceResult<Vec<Note>>;
    /// Replaces the persisted sequence with `notes`.
    fn save(&self, notes: &[Note]) -> PersistenceResult<()>;
}

impl<T: NotePersistence + ?Sized> NotePersistence for &T {
    fn load(&self) -> PersistenceResult<Vec<Note>> {
        (**self).load()
    }

    fn save(&self, notes: &[Note]) -> PersistenceResult<()> {
        (**self).save(notes)
    }
}

/// SQLite-backed single-blob note storage.
pub struct SqliteBlobStore<'conn> {
    conn: &'conn Connection,
    key: String,
}

impl<'conn> SqliteBlobStore<'conn> {
    /// Constructs a store over a migrated connection using [`DEFAULT_BLOB_KEY`].
    pub fn try_new(conn: &'conn Connection) -> PersistenceResult<Self> {
        Self::with_key(conn, DEFAULT_BLOB_KEY)
    }

    /// Constructs a store that reads and writes the blob under `key`.
    pub fn with_key(conn: &'conn Connection, key: impl Into<String>) -> PersistenceResult<Self> {
        if !table_exists(conn, "blobs")? {
            return Err(PersistenceError::MissingRequiredTable("blobs"));
        }
        Ok(Self {
            conn,
            key: key.into(),
        })
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    fn read_blob(&self) -> PersistenceResult<Option<String>> {
        let value = self
            .conn
            .query_row(
                "SELECT value FROM blobs WHERE key = ?1;",
                [self.key.as_str()],
                |row| row.get::<_, String>(0),
            )
            .optional()?;
        Ok(value)
    }
}

impl NotePersistence for SqliteBlobStore<'_> {
    fn load(&self) -> PersistenceResult<Vec<Note>> {
        let started_at = Instant::now();
        let Some(raw) = self.read_blob()? else {
            info!("event=notes_load module=repo status=ok source=missing count=0");
            return Ok(Vec::new());
        };

        let notes = decode_notes(&raw).map_err(|err| {
            error!(
                "event=notes_load module=repo status=error bytes={} error={err}",
                raw.len()
            );
            err
        })?;
        info!(
            "event=notes_load module=repo status=ok count={} bytes={} duration_ms={}",
            notes.len(),
            raw.len(),
            started_at.elapsed().as_millis()
        );
        Ok(notes)
    }

    fn save(&self, notes: &[Note]) -> PersistenceResult<()> {
        let started_at = Instant::now();
        let raw = serde_json::to_string(notes).map_err(PersistenceError::Encode)?;
        self.conn.execute(
            "INSERT INTO blobs (key, value, updated_at)
             VALUES (?1, ?2, ?3)
             ON CONFLICT(key) DO UPDATE SET
                value = excluded.value,
                updated_at = excluded.updated_at;",
            params![self.key.as_str(), raw.as_str(), now_epoch_ms()],
        )?;
        info!(
            "event=notes_save module=repo status=ok count={} bytes={} duration_ms={}",
            notes.len(),
            raw.len(),
            started_at.elapsed().as_millis()
        );
        Ok(())
    }
}

/// Decodes and validates a persisted note sequence.
pub fn decode_notes(raw: &str) -> PersistenceResult<Vec<Note>> {
    let notes: Vec<Note> = serde_json::from_str(raw).map_err(PersistenceError::Decode)?;
    for note in &notes {
        note.validate()?;
    }
    Ok(notes)
}

fn table_exists(conn: &Connection, table: &str) -> PersistenceResult<bool> {
    let exists: i64 = conn.query_row(
        "SELECT EXISTS(
            SELECT 1
            FROM sqlite_master
            WHERE type = 'table' AND name = ?1
        );",
        [table],
        |row| row.get(0),
    )?;
    Ok(exists == 1)
}

#[cfg(test)]
mod tests {
    use super::{decode_notes, PersistenceError};
    use crate::model::note::NoteValidationError;

    #[test]
    fn decode_rejects_non_array_json() {
        let err = decode_notes("{\"not\":\"notes\"}").unwrap_err();
        assert!(matches!(err, PersistenceError::Decode(_)));
    }

    #[test]
    fn decode_rejects_note_without_tags() {
        let raw = r#"[{
            "id": "11111111-2222-4333-8444-555555555555",
            "title": "t",
            "content": "c",
            "color": "red",
            "tags": [],
            "createdAt": 1700000000000
        }]"#;
        let err = decode_notes(raw).unwrap_err();
        assert!(matches!(
            err,
            PersistenceError::Invalid(NoteValidationError::EmptyTags)
        ));
    }

    #[test]
    fn decode_accepts_empty_array() {
        assert!(decode_notes("[]").unwrap().is_empty());
    }
}
