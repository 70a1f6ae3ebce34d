//! Note domain model.
//!
//! # Responsibility
//! - Define the committed note record and its closed color category.
//! - Own tag normalization shared by classifier, draft and validation paths.
//!
//! # Invariants
//! - `tags` is never empty and holds at most [`MAX_NOTE_TAGS`] entries.
//! - `tags` has no case-insensitive duplicates.
//! - `content` is never blank for a committed note.
//! - `color` is always one of the four variants; `Gray` is the fallback.

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::str::FromStr;
use std::time::{SystemTime, UNIX_EPOCH};
use uuid::Uuid;

/// Tag applied when no other tag fits a note.
pub const DEFAULT_TAG: &str = "General";
/// Title stored when a note is committed without one.
pub const UNTITLED_PLACEHOLDER: &str = "Sin título";
/// Upper bound for tags carried by one note.
pub const MAX_NOTE_TAGS: usize = 5;

/// Stable identifier for a committed note.
pub type NoteId = Uuid;

/// Closed color category assigned to every note.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Color {
    /// Tasks and deadlines.
    Red,
    /// Ideas and reminders.
    Blue,
    /// Shopping and payments.
    Green,
    /// Anything else.
    #[default]
    Gray,
}

impl Color {
    /// All colors in picker order.
    pub const ALL: [Color; 4] = [Color::Red, Color::Blue, Color::Green, Color::Gray];

    /// Lowercase wire name, also accepted by [`FromStr`].
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Red => "red",
            Self::Blue => "blue",
            Self::Green => "green",
            Self::Gray => "gray",
        }
    }

    /// Human-facing category label for a suggested color.
    pub fn display_name(self) -> &'static str {
        match self {
            Self::Red => "Rojo (Tareas)",
            Self::Blue => "Azul (Ideas)",
            Self::Green => "Verde (Compras)",
            Self::Gray => "Gris (General)",
        }
    }
}

impl Display for Color {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unknown color name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseColorError(pub String);

impl Display for ParseColorError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "unknown color `{}`; expected red|blue|green|gray",
            self.0
        )
    }
}

impl Error for ParseColorError {}

impl FromStr for Color {
    type Err = ParseColorError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "red" => Ok(Self::Red),
            "blue" => Ok(Self::Blue),
            "green" => Ok(Self::Green),
            "gray" | "grey" => Ok(Self::Gray),
            _ => Err(ParseColorError(value.to_string())),
        }
    }
}

/// Validation errors for note invariants.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NoteValidationError {
    NilId,
    EmptyContent,
    EmptyTags,
    BlankTag,
    DuplicateTag(String),
    TooManyTags { count: usize, max: usize },
}

impl Display for NoteValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NilId => write!(f, "note id must not be nil"),
            Self::EmptyContent => write!(f, "note content must not be empty"),
            Self::EmptyTags => write!(f, "note must carry at least one tag"),
            Self::BlankTag => write!(f, "note tags must not be blank"),
            Self::DuplicateTag(tag) => write!(f, "duplicate note tag `{tag}`"),
            Self::TooManyTags { count, max } => {
                write!(f, "note carries {count} tags; at most {max} allowed")
            }
        }
    }
}

impl Error for NoteValidationError {}

/// Committed note record.
///
/// Notes are never edited in place; the only lifecycle events are creation via
/// draft commit and removal via delete-by-id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Note {
    pub id: NoteId,
    pub title: String,
    pub content: String,
    pub color: Color,
    pub tags: Vec<String>,
    /// Unix epoch milliseconds.
    #[serde(rename = "createdAt")]
    pub created_at: i64,
}

impl Note {
    /// Builds a note with a fresh id and the current timestamp.
    ///
    /// Title and content are stored as given; callers normalize them first.
    pub fn new(
        title: impl Into<String>,
        content: impl Into<String>,
        color: Color,
        tags: Vec<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            title: title.into(),
            content: content.into(),
            color,
            tags,
            created_at: now_epoch_ms(),
        }
    }

    /// Checks record-level invariants.
    pub fn validate(&self) -> Result<(), NoteValidationError> {
        if self.id.is_nil() {
            return Err(NoteValidationError::NilId);
        }
        if self.content.trim().is_empty() {
            return Err(NoteValidationError::EmptyContent);
        }
        validate_tags(&self.tags)
    }

    /// Returns whether `tag` is carried by this note, compared exactly.
    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|current| current == tag)
    }
}

/// Checks the tag-list invariants shared by notes and drafts.
pub fn validate_tags(tags: &[String]) -> Result<(), NoteValidationError> {
    if tags.is_empty() {
        return Err(NoteValidationError::EmptyTags);
    }
    if tags.len() > MAX_NOTE_TAGS {
        return Err(NoteValidationError::TooManyTags {
            count: tags.len(),
            max: MAX_NOTE_TAGS,
        });
    }
    for (index, tag) in tags.iter().enumerate() {
        if tag.trim().is_empty() {
            return Err(NoteValidationError::BlankTag);
        }
        if contains_tag_ignore_case(&tags[..index], tag) {
            return Err(NoteValidationError::DuplicateTag(tag.clone()));
        }
    }
    Ok(())
}

/// Upper-cases the first character and leaves the rest unchanged.
pub fn capitalize_tag(value: &str) -> String {
    let mut chars = value.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Case-insensitive membership check over a tag list.
pub fn contains_tag_ignore_case(tags: &[String], candidate: &str) -> bool {
    let candidate = candidate.to_lowercase();
    tags.iter().any(|tag| tag.to_lowercase() == candidate)
}

/// Returns the single-element fallback tag list.
pub fn default_tags() -> Vec<String> {
    vec![DEFAULT_TAG.to_string()]
}

pub(crate) fn now_epoch_ms() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| i64::try_from(elapsed.as_millis()).unwrap_or(i64::MAX))
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::{capitalize_tag, validate_tags, Color, NoteValidationError};

    #[test]
    fn capitalize_only_touches_first_char() {
        assert_eq!(capitalize_tag("trabajo"), "Trabajo");
        assert_eq!(capitalize_tag("sHOP list"), "SHOP list");
        assert_eq!(capitalize_tag("ñandú"), "Ñandú");
        assert_eq!(capitalize_tag(""), "");
    }

    #[test]
    fn color_parses_wire_names() {
        assert_eq!("RED".parse::<Color>().unwrap(), Color::Red);
        assert_eq!(" grey ".parse::<Color>().unwrap(), Color::Gray);
        assert!("purple".parse::<Color>().is_err());
    }

    #[test]
    fn validate_tags_rejects_case_insensitive_duplicates() {
        let err = validate_tags(&["Work".to_string(), "work".to_string()]).unwrap_err();
        assert_eq!(err, NoteValidationError::DuplicateTag("work".to_string()));
    }
}
