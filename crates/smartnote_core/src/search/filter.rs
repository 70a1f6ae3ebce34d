//! Filter engine over the note collection.
//!
//! # Responsibility
//! - Answer color/tag/search filter requests against store contents.
//!
//! # Invariants
//! - Criteria apply conjunctively in the order color, tag, search.
//! - Output is a subset of the input in input order; nothing is reordered.
//! - Tag matching is exact and case-sensitive against stored tags; search is
//!   case-insensitive substring over title, content and tags.
//! - An empty search string disables the search criterion.

use crate::model::filter::{FilterChoice, FilterSpec};
use crate::model::note::Note;

/// Returns the notes matching `spec`, preserving input order.
pub fn apply<'a, I>(spec: &FilterSpec, notes: I) -> Vec<&'a Note>
where
    I: IntoIterator<Item = &'a Note>,
{
    let search = (!spec.search.is_empty()).then(|| spec.search.to_lowercase());
    notes
        .into_iter()
        .filter(|note| matches_color(spec, note))
        .filter(|note| matches_tag(spec, note))
        .filter(|note| {
            search
                .as_deref()
                .map_or(true, |needle| matches_search(needle, note))
        })
        .collect()
}

/// Returns whether one note passes every criterion of `spec`.
pub fn matches(spec: &FilterSpec, note: &Note) -> bool {
    !apply(spec, std::iter::once(note)).is_empty()
}

fn matches_color(spec: &FilterSpec, note: &Note) -> bool {
    match &spec.color {
        FilterChoice::All => true,
        FilterChoice::Only(color) => note.color == *color,
    }
}

fn matches_tag(spec: &FilterSpec, note: &Note) -> bool {
    match &spec.tag {
        FilterChoice::All => true,
        FilterChoice::Only(tag) => note.has_tag(tag),
    }
}

fn matches_search(needle: &str, note: &Note) -> bool {
    note.title.to_lowercase().contains(needle)
        || note.content.to_lowercase().contains(needle)
        || note
            .tags
            .iter()
            .any(|tag| tag.to_lowercase().contains(needle))
}
