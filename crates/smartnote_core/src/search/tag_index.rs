//! Distinct tag listing for filter pickers.
//!
//! # Invariants
//! - Output is deduplicated and sorted lexicographically, independent of note
//!   order.

use crate::model::note::Note;
use std::collections::BTreeSet;

/// Returns every tag used by `notes`, once each, in sorted order.
pub fn distinct_tags<'a, I>(notes: I) -> Vec<String>
where
    I: IntoIterator<Item = &'a Note>,
{
    let unique = notes
        .into_iter()
        .flat_map(|note| note.tags.iter())
        .map(String::as_str)
        .collect::<BTreeSet<_>>();
    unique.into_iter().map(str::to_string).collect()
}
