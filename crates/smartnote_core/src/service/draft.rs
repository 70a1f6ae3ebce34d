//! Draft state for the note currently being composed.
//!
//! # Responsibility
//! - Re-run classification on every text edit.
//! - Apply manual color/tag edits on top of the latest suggestion.
//! - Materialize a committed [`Note`] and reset itself afterwards.
//!
//! # Invariants
//! - `tags` is never empty; removing the last tag restores `["General"]`.
//! - A manual color stays in effect until [`DraftState::clear`] or commit.
//! - A text edit replaces the whole tag list with a fresh suggestion,
//!   discarding manual tag edits made since the previous edit.
//! - Failed operations leave the draft unchanged.

use crate::classify::Classifier;
use crate::model::note::{
    capitalize_tag, contains_tag_ignore_case, default_tags, validate_tags, Color, Note,
    NoteValidationError, DEFAULT_TAG, MAX_NOTE_TAGS, UNTITLED_PLACEHOLDER,
};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Recoverable errors raised by draft operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DraftError {
    /// Commit attempted while content is blank.
    EmptyContent,
    /// Manual tag already present (case-insensitive).
    DuplicateTag(String),
    /// Manual tag rejected because the draft already holds `limit` tags.
    TagLimitExceeded { limit: usize },
    /// Draft tags would break note tag invariants on commit.
    InvalidTags(NoteValidationError),
}

impl Display for DraftError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyContent => write!(f, "note content must not be empty"),
            Self::DuplicateTag(tag) => write!(f, "tag `{tag}` is already on this note"),
            Self::TagLimitExceeded { limit } => {
                write!(f, "a note can carry at most {limit} tags")
            }
            Self::InvalidTags(err) => write!(f, "draft tags are invalid: {err}"),
        }
    }
}

impl Error for DraftError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::InvalidTags(err) => Some(err),
            _ => None,
        }
    }
}

/// Mutable scratch record for the note being composed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DraftState {
    title: String,
    content: String,
    color: Color,
    tags: Vec<String>,
    manual_color: bool,
}

impl Default for DraftState {
    fn default() -> Self {
        Self::new()
    }
}

impl DraftState {
    /// Creates an empty draft: gray, tagged `General`.
    pub fn new() -> Self {
        Self {
            title: String::new(),
            content: String::new(),
            color: Color::Gray,
            tags: default_tags(),
            manual_color: false,
        }
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    /// Current color, suggested or manually chosen.
    pub fn color(&self) -> Color {
        self.color
    }

    /// Current tags in display order.
    pub fn tags(&self) -> &[String] {
        &self.tags
    }

    /// Returns whether a manual color choice suppresses color suggestion.
    pub fn has_manual_color(&self) -> bool {
        self.manual_color
    }

    /// Stores the edited text and re-derives color and tags from it.
    pub fn on_text_changed(
        &mut self,
        classifier: &Classifier<'_>,
        title: impl Into<String>,
        content: impl Into<String>,
    ) {
        self.title = title.into();
        self.content = content.into();

        let full_text = format!("{} {}", self.title, self.content);
        if full_text.trim().is_empty() {
            if !self.manual_color {
                self.color = Color::Gray;
            }
            self.tags = default_tags();
            return;
        }

        if !self.manual_color {
            self.color = classifier.suggest_color(&full_text);
        }
        self.tags = classifier.suggest_tags(&full_text);
    }

    /// Overrides the suggested color until the draft is cleared.
    pub fn set_manual_color(&mut self, color: Color) {
        self.color = color;
        self.manual_color = true;
    }

    /// Adds one user-entered tag in capitalized form.
    ///
    /// Blank input is ignored. A lone `General` placeholder is replaced rather
    /// than kept alongside the new tag.
    ///
    /// # Errors
    /// - [`DraftError::DuplicateTag`] when the tag is already present.
    /// - [`DraftError::TagLimitExceeded`] when the draft holds 5 tags.
    pub fn add_manual_tag(&mut self, text: &str) -> Result<(), DraftError> {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return Ok(());
        }

        let tag = capitalize_tag(trimmed);
        if contains_tag_ignore_case(&self.tags, &tag) {
            return Err(DraftError::DuplicateTag(tag));
        }
        if self.tags.len() >= MAX_NOTE_TAGS {
            return Err(DraftError::TagLimitExceeded {
                limit: MAX_NOTE_TAGS,
            });
        }

        if self.is_default_tagged() {
            self.tags.clear();
        }
        self.tags.push(tag);
        Ok(())
    }

    /// Removes the tag at `index`; out-of-range indexes are ignored.
    pub fn remove_tag(&mut self, index: usize) {
        if index < self.tags.len() {
            self.tags.remove(index);
        }
        if self.tags.is_empty() {
            self.tags = default_tags();
        }
    }

    /// Resets text, color, tags and the manual-color flag.
    pub fn clear(&mut self) {
        *self = Self::new();
    }

    /// Turns the draft into a note and resets the draft.
    ///
    /// Title and content are trimmed; a blank title becomes the untitled
    /// placeholder.
    ///
    /// # Errors
    /// - [`DraftError::EmptyContent`] when trimmed content is empty. The draft
    ///   is left as-is so the user can keep editing.
    pub fn commit(&mut self) -> Result<Note, DraftError> {
        let content = self.content.trim();
        if content.is_empty() {
            return Err(DraftError::EmptyContent);
        }

        validate_tags(&self.tags).map_err(DraftError::InvalidTags)?;

        let title = match self.title.trim() {
            "" => UNTITLED_PLACEHOLDER,
            value => value,
        };
        let note = Note::new(title, content, self.color, self.tags.clone());
        self.clear();
        Ok(note)
    }

    fn is_default_tagged(&self) -> bool {
        self.tags.len() == 1 && self.tags[0] == DEFAULT_TAG
    }
}
