//! In-memory ordered note collection.
//!
//! # Responsibility
//! - Hold committed notes in most-recent-first order.
//! - Provide the only mutation paths: insert-at-front, delete-by-id and
//!   bulk replacement for the load path.
//!
//! # Invariants
//! - Iteration order is most-recent-first for inserted notes.
//! - `replace_all` trusts and keeps the given order as-is.
//! - Deleting an absent id is a no-op.

use crate::model::note::{Note, NoteId};
use std::collections::vec_deque;
use std::collections::VecDeque;

/// Ordered in-memory store of committed notes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NoteStore {
    notes: VecDeque<Note>,
}

impl NoteStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a store that keeps `notes` in the given order.
    pub fn from_notes(notes: Vec<Note>) -> Self {
        Self {
            notes: VecDeque::from(notes),
        }
    }

    /// Places `note` first in iteration order.
    pub fn insert_front(&mut self, note: Note) {
        self.notes.push_front(note);
    }

    /// Removes the note with `id` and returns it, if present.
    pub fn delete_by_id(&mut self, id: NoteId) -> Option<Note> {
        let index = self.notes.iter().position(|note| note.id == id)?;
        self.notes.remove(index)
    }

    /// Discards current contents and takes `notes` in the given order.
    pub fn replace_all(&mut self, notes: Vec<Note>) {
        self.notes = VecDeque::from(notes);
    }

    /// Read-only view in store order.
    pub fn all(&self) -> vec_deque::Iter<'_, Note> {
        self.notes.iter()
    }

    /// Contiguous view in store order, used when handing notes to storage.
    pub fn as_slice(&mut self) -> &[Note] {
        self.notes.make_contiguous()
    }

    pub fn get(&self, id: NoteId) -> Option<&Note> {
        self.notes.iter().find(|note| note.id == id)
    }

    pub fn len(&self) -> usize {
        self.notes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.notes.is_empty()
    }
}

impl<'a> IntoIterator for &'a NoteStore {
    type Item = &'a Note;
    type IntoIter = vec_deque::Iter<'a, Note>;

    fn into_iter(self) -> Self::IntoIter {
        self.all()
    }
}
