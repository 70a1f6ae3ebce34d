//! Notes use-case service.
//!
//! # Responsibility
//! - Own the process-wide note state: store, draft, view filter and search
//!   debouncer.
//! - Orchestrate draft commit, deletion and persistence calls.
//! - Answer list-view queries through the filter engine and tag index.
//!
//! # Invariants
//! - In-memory state is the source of truth: a failed save never rolls back an
//!   insert or delete that already happened.
//! - Loading fails open: storage errors leave an empty collection.
//! - Persistence runs at most once per mutating call, without retries.

use crate::classify::{Classifier, KeywordTable};
use crate::config::SmartNotesConfig;
use crate::model::filter::{FilterChoice, FilterSpec};
use crate::model::note::{Color, Note, NoteId};
use crate::repo::blob_store::{NotePersistence, PersistenceError};
use crate::repo::note_store::NoteStore;
use crate::search::debounce::{Debouncer, SEARCH_DEBOUNCE};
use crate::search::filter;
use crate::search::tag_index::distinct_tags;
use crate::service::draft::{DraftError, DraftState};
use log::{debug, info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::time::{Duration, Instant};

/// Service error for note use-cases.
#[derive(Debug)]
pub enum NoteServiceError {
    /// Draft operation rejected; draft state is unchanged.
    Draft(DraftError),
    /// Storage call failed after the in-memory change was applied.
    Persistence(PersistenceError),
}

impl Display for NoteServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Draft(err) => write!(f, "{err}"),
            Self::Persistence(err) => write!(f, "failed to save notes: {err}"),
        }
    }
}

impl Error for NoteServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Draft(err) => Some(err),
            Self::Persistence(err) => Some(err),
        }
    }
}

impl From<DraftError> for NoteServiceError {
    fn from(value: DraftError) -> Self {
        Self::Draft(value)
    }
}

impl From<PersistenceError> for NoteServiceError {
    fn from(value: PersistenceError) -> Self {
        Self::Persistence(value)
    }
}

/// Application context exposed to the presentation layer.
pub struct NotesService<'table, P: NotePersistence> {
    persistence: P,
    classifier: Classifier<'table>,
    store: NoteStore,
    draft: DraftState,
    filter: FilterSpec,
    search_input: Debouncer<String>,
}

impl<P: NotePersistence> NotesService<'static, P> {
    /// Creates a service using the built-in keyword table and default
    /// search debounce window. The store starts empty; call [`Self::load`].
    pub fn new(persistence: P) -> Self {
        Self::with_classifier(persistence, Classifier::builtin(), SEARCH_DEBOUNCE)
    }

    /// Creates a service using the built-in keyword table and the configured
    /// search debounce window.
    pub fn from_config(persistence: P, config: &SmartNotesConfig) -> Self {
        Self::with_classifier(persistence, Classifier::builtin(), config.search_debounce)
    }
}

impl<'table, P: NotePersistence> NotesService<'table, P> {
    /// Creates a service with a custom classifier and debounce window.
    pub fn with_classifier(
        persistence: P,
        classifier: Classifier<'table>,
        search_debounce: Duration,
    ) -> Self {
        Self {
            persistence,
            classifier,
            store: NoteStore::new(),
            draft: DraftState::new(),
            filter: FilterSpec::default(),
            search_input: Debouncer::new(search_debounce),
        }
    }

    /// Creates a service classifying with `table`.
    pub fn with_table(persistence: P, table: &'table KeywordTable) -> Self {
        Self::with_classifier(persistence, Classifier::new(table), SEARCH_DEBOUNCE)
    }

    /// Replaces store contents with persisted notes.
    ///
    /// Any storage error is logged and treated as an empty collection.
    /// Returns the number of notes loaded.
    pub fn load(&mut self) -> usize {
        let notes = match self.persistence.load() {
            Ok(notes) => notes,
            Err(err) => {
                warn!(
                    "event=notes_load module=service status=fallback reason=storage_error error={err}"
                );
                Vec::new()
            }
        };
        let count = notes.len();
        self.store.replace_all(notes);
        info!("event=notes_load module=service status=ok count={count}");
        count
    }

    /// Read-only store view in most-recent-first order.
    pub fn notes(&self) -> &NoteStore {
        &self.store
    }

    pub fn draft(&self) -> &DraftState {
        &self.draft
    }

    pub fn filter(&self) -> &FilterSpec {
        &self.filter
    }

    pub fn classifier(&self) -> Classifier<'table> {
        self.classifier
    }

    /// Feeds edited draft text through the classifier.
    pub fn update_draft_text(&mut self, title: impl Into<String>, content: impl Into<String>) {
        self.draft.on_text_changed(&self.classifier, title, content);
    }

    pub fn set_manual_color(&mut self, color: Color) {
        self.draft.set_manual_color(color);
    }

    pub fn add_manual_tag(&mut self, text: &str) -> Result<(), NoteServiceError> {
        self.draft.add_manual_tag(text).map_err(Into::into)
    }

    pub fn remove_draft_tag(&mut self, index: usize) {
        self.draft.remove_tag(index);
    }

    pub fn clear_draft(&mut self) {
        self.draft.clear();
    }

    /// Commits the draft as the newest note and saves the collection.
    ///
    /// # Errors
    /// - [`NoteServiceError::Draft`] when the draft has no content or its
    ///   tags break note invariants; nothing else changes.
    /// - [`NoteServiceError::Persistence`] when saving fails. The note is
    ///   already first in [`Self::notes`] and the draft is already cleared.
    pub fn commit_draft(&mut self) -> Result<Note, NoteServiceError> {
        let note = self.draft.commit()?;
        info!(
            "event=note_commit module=service status=ok note_id={} color={} tag_count={}",
            note.id,
            note.color,
            note.tags.len()
        );
        self.store.insert_front(note.clone());
        self.persist("note_commit")?;
        Ok(note)
    }

    /// Deletes a note by id and saves the collection.
    ///
    /// Returns whether a note was removed. Absent ids are a no-op and do not
    /// touch storage.
    pub fn delete_note(&mut self, id: NoteId) -> Result<bool, NoteServiceError> {
        if self.store.delete_by_id(id).is_none() {
            debug!("event=note_delete module=service status=noop note_id={id}");
            return Ok(false);
        }
        info!("event=note_delete module=service status=ok note_id={id}");
        self.persist("note_delete")?;
        Ok(true)
    }

    pub fn set_color_filter(&mut self, color: FilterChoice<Color>) {
        self.filter.color = color;
    }

    pub fn set_tag_filter(&mut self, tag: FilterChoice<String>) {
        self.filter.tag = tag;
    }

    /// Applies search text immediately, dropping any debounced input.
    pub fn set_search_filter(&mut self, text: impl Into<String>) {
        self.search_input.cancel();
        self.filter.search = text.into();
    }

    /// Records typed search text; it is applied by [`Self::poll_search`] once
    /// the debounce window passes without further input.
    pub fn input_search_text(&mut self, text: impl Into<String>, now: Instant) {
        self.search_input.schedule(text.into(), now);
    }

    /// Applies pending search text if its window has elapsed.
    ///
    /// Returns `true` when the filter changed and views should re-render.
    pub fn poll_search(&mut self, now: Instant) -> bool {
        match self.search_input.poll(now) {
            Some(text) => {
                debug!(
                    "event=search_apply module=service status=ok query_len={}",
                    text.chars().count()
                );
                self.filter.search = text;
                true
            }
            None => false,
        }
    }

    /// Deadline of pending search input, if any.
    pub fn search_due_at(&self) -> Option<Instant> {
        self.search_input.due_at()
    }

    /// Notes matching the current filter, in store order.
    pub fn visible_notes(&self) -> Vec<&Note> {
        filter::apply(&self.filter, &self.store)
    }

    /// Sorted distinct tags across the whole store.
    pub fn tags_in_use(&self) -> Vec<String> {
        distinct_tags(&self.store)
    }

    fn persist(&mut self, event: &'static str) -> Result<(), NoteServiceError> {
        let notes = self.store.as_slice();
        self.persistence.save(notes).map_err(|err| {
            warn!("event={event} module=service status=error stage=save error={err}");
            NoteServiceError::Persistence(err)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::{NoteServiceError, NotesService};
    use crate::config::SmartNotesConfig;
    use crate::model::filter::FilterChoice;
    use crate::model::note::{Color, Note};
    use crate::repo::blob_store::{NotePersistence, PersistenceError, PersistenceResult};
    use crate::service::draft::DraftError;
    use std::cell::{Cell, RefCell};
    use std::time::{Duration, Instant};

    #[derive(Default)]
    struct MemoryPersistence {
        saved: RefCell<Vec<Note>>,
        saves: Cell<usize>,
        fail_save: bool,
        fail_load: bool,
    }

    impl NotePersistence for MemoryPersistence {
        fn load(&self) -> PersistenceResult<Vec<Note>> {
            if self.fail_load {
                return Err(PersistenceError::MissingRequiredTable("blobs"));
            }
            Ok(self.saved.borrow().clone())
        }

        fn save(&self, notes: &[Note]) -> PersistenceResult<()> {
            self.saves.set(self.saves.get() + 1);
            if self.fail_save {
                return Err(PersistenceError::MissingRequiredTable("blobs"));
            }
            *self.saved.borrow_mut() = notes.to_vec();
            Ok(())
        }
    }

    #[test]
    fn commit_inserts_front_and_saves() {
        let storage = MemoryPersistence::default();
        let mut service = NotesService::new(&storage);

        service.update_draft_text("", "Comprar leche");
        let first = service.commit_draft().unwrap();
        service.update_draft_text("Tesis", "Proyecto de universidad urgente");
        let second = service.commit_draft().unwrap();

        let ids = service.notes().all().map(|note| note.id).collect::<Vec<_>>();
        assert_eq!(ids, vec![second.id, first.id]);
        assert_eq!(storage.saves.get(), 2);
        assert_eq!(storage.saved.borrow()[0].id, second.id);
    }

    #[test]
    fn empty_commit_touches_nothing() {
        let storage = MemoryPersistence::default();
        let mut service = NotesService::new(&storage);
        service.update_draft_text("title only", "");

        let err = service.commit_draft().unwrap_err();
        assert!(matches!(err, NoteServiceError::Draft(DraftError::EmptyContent)));
        assert!(service.notes().is_empty());
        assert_eq!(service.draft().title(), "title only");
        assert_eq!(storage.saves.get(), 0);
    }

    #[test]
    fn failed_save_keeps_in_memory_note() {
        let storage = MemoryPersistence {
            fail_save: true,
            ..MemoryPersistence::default()
        };
        let mut service = NotesService::new(&storage);
        service.update_draft_text("", "idea suelta");

        let err = service.commit_draft().unwrap_err();
        assert!(matches!(err, NoteServiceError::Persistence(_)));
        assert_eq!(service.notes().len(), 1);
        assert_eq!(service.draft().content(), "");
    }

    #[test]
    fn load_fails_open() {
        let storage = MemoryPersistence {
            fail_load: true,
            ..MemoryPersistence::default()
        };
        let mut service = NotesService::new(&storage);
        assert_eq!(service.load(), 0);
        assert!(service.notes().is_empty());
    }

    #[test]
    fn deleting_absent_id_skips_save() {
        let storage = MemoryPersistence::default();
        let mut service = NotesService::new(&storage);
        service.update_draft_text("", "nota");
        let note = service.commit_draft().unwrap();

        assert!(!service.delete_note(uuid::Uuid::new_v4()).unwrap());
        assert_eq!(storage.saves.get(), 1);
        assert!(service.delete_note(note.id).unwrap());
        assert_eq!(storage.saves.get(), 2);
        assert!(storage.saved.borrow().is_empty());
    }

    #[test]
    fn debounced_search_applies_last_value_only() {
        let storage = MemoryPersistence::default();
        let mut service = NotesService::new(&storage);
        for content in ["comprar leche", "pagar luz"] {
            service.update_draft_text("", content);
            service.commit_draft().unwrap();
        }

        let start = Instant::now();
        service.input_search_text("lu", start);
        service.input_search_text("leche", start + Duration::from_millis(100));
        assert!(!service.poll_search(start + Duration::from_millis(350)));
        assert_eq!(service.visible_notes().len(), 2);

        assert!(service.poll_search(start + Duration::from_millis(400)));
        assert_eq!(service.filter().search, "leche");
        let visible = service.visible_notes();
        assert_eq!(visible.len(), 1);
        assert_eq!(visible[0].content, "comprar leche");
    }

    #[test]
    fn filters_and_tag_index_follow_store() {
        let storage = MemoryPersistence::default();
        let mut service = NotesService::new(&storage);
        service.update_draft_text("", "trabajo urgente");
        service.commit_draft().unwrap();
        service.update_draft_text("", "comprar regalo familia");
        service.commit_draft().unwrap();

        assert_eq!(service.tags_in_use(), vec!["Familia", "Trabajo"]);
        service.set_color_filter(FilterChoice::Only(Color::Red));
        assert_eq!(service.visible_notes().len(), 1);
        service.set_tag_filter(FilterChoice::Only("Familia".to_string()));
        assert!(service.visible_notes().is_empty());
    }

    #[test]
    fn failed_save_keeps_in_memory_delete() {
        let storage = MemoryPersistence {
            fail_save: true,
            ..MemoryPersistence::default()
        };
        let mut service = NotesService::new(&storage);
        service.update_draft_text("", "nota temporal");
        let err = service.commit_draft().unwrap_err();
        assert!(matches!(err, NoteServiceError::Persistence(_)));
        let id = service.notes().all().next().unwrap().id;

        let err = service.delete_note(id).unwrap_err();
        assert!(matches!(err, NoteServiceError::Persistence(_)));
        assert!(service.notes().is_empty());
        assert!(service.notes().get(id).is_none());
        assert_eq!(storage.saves.get(), 2);
    }

    #[test]
    fn commit_carries_manual_color_and_tags() {
        let storage = MemoryPersistence::default();
        let mut service = NotesService::new(&storage);
        service.update_draft_text("Vacaciones", "trabajo urgente");
        service.set_manual_color(Color::Blue);
        service.add_manual_tag("playa").unwrap();

        let note = service.commit_draft().unwrap();
        assert_eq!(note.color, Color::Blue);
        assert_eq!(note.tags, vec!["Trabajo".to_string(), "Playa".to_string()]);
        assert_eq!(storage.saved.borrow()[0], note);
        assert!(!service.draft().has_manual_color());
    }

    #[test]
    fn configured_debounce_window_is_used() {
        let storage = MemoryPersistence::default();
        let config = SmartNotesConfig {
            search_debounce: Duration::from_millis(50),
            ..SmartNotesConfig::default()
        };
        let mut service = NotesService::from_config(&storage, &config);

        let start = Instant::now();
        service.input_search_text("leche", start);
        assert_eq!(service.search_due_at(), Some(start + Duration::from_millis(50)));
        assert!(service.poll_search(start + Duration::from_millis(60)));
        assert_eq!(service.filter().search, "leche");
    }
}
