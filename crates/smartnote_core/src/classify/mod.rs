//! Keyword-based color and tag suggestion.
//!
//! # Responsibility
//! - Map free text to one color and up to three tags.
//! - Keep classification pure so drafts can re-run it on every edit.
//!
//! # Invariants
//! - Matching is substring containment on lowercased text, not word-boundary
//!   matching ("pagoX" matches "pago").
//! - First match wins: buckets are scanned in declared order, words inside a
//!   bucket in declared order. `Gray` is returned when nothing matches.
//! - Tag suggestion never returns an empty list and never more than
//!   [`MAX_SUGGESTED_TAGS`] entries.

pub mod keywords;

pub use keywords::{ColorBucket, KeywordTable};

use crate::model::note::{capitalize_tag, default_tags, Color};

/// Maximum tags produced by one suggestion pass.
pub const MAX_SUGGESTED_TAGS: usize = 3;

/// Suggests a color using the built-in keyword table.
pub fn suggest_color(text: &str) -> Color {
    Classifier::builtin().suggest_color(text)
}

/// Suggests tags using the built-in keyword table.
pub fn suggest_tags(text: &str) -> Vec<String> {
    Classifier::builtin().suggest_tags(text)
}

/// Classifier bound to one keyword table.
#[derive(Debug, Clone, Copy)]
pub struct Classifier<'table> {
    table: &'table KeywordTable,
}

impl Classifier<'static> {
    /// Classifier over [`KeywordTable::builtin`].
    pub fn builtin() -> Self {
        Self::new(KeywordTable::builtin())
    }
}

impl Default for Classifier<'static> {
    fn default() -> Self {
        Self::builtin()
    }
}

impl<'table> Classifier<'table> {
    pub fn new(table: &'table KeywordTable) -> Self {
        Self { table }
    }

    /// Returns the color of the first declared trigger word found in `text`.
    pub fn suggest_color(&self, text: &str) -> Color {
        let normalized = text.to_lowercase();
        self.table
            .buckets()
            .iter()
            .find(|bucket| {
                bucket
                    .words
                    .iter()
                    .any(|word| normalized.contains(word.as_str()))
            })
            .map_or(Color::Gray, |bucket| bucket.color)
    }

    /// Returns capitalized tag triggers found in `text`, in declared order.
    ///
    /// Scanning stops once [`MAX_SUGGESTED_TAGS`] tags are collected. Falls
    /// back to `["General"]` when no trigger matches.
    pub fn suggest_tags(&self, text: &str) -> Vec<String> {
        let normalized = text.to_lowercase();
        let mut found = Vec::with_capacity(MAX_SUGGESTED_TAGS);
        for word in self.table.tag_words() {
            if normalized.contains(word.as_str()) {
                found.push(capitalize_tag(word));
                if found.len() >= MAX_SUGGESTED_TAGS {
                    break;
                }
            }
        }

        if found.is_empty() {
            default_tags()
        } else {
            found
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{suggest_color, suggest_tags, Classifier, ColorBucket, KeywordTable};
    use crate::model::note::Color;

    #[test]
    fn color_falls_back_to_gray() {
        assert_eq!(suggest_color(""), Color::Gray);
        assert_eq!(suggest_color("hola mundo"), Color::Gray);
    }

    #[test]
    fn earlier_bucket_wins_regardless_of_position() {
        // "comprar" (green) appears before "urgente" (red) in the text.
        assert_eq!(suggest_color("comprar pan urgente"), Color::Red);
        assert_eq!(suggest_color("una idea para pagar"), Color::Blue);
    }

    #[test]
    fn matching_is_case_insensitive_substring() {
        assert_eq!(suggest_color("PAGOX"), Color::Green);
        assert_eq!(suggest_color("Nueva INSPIRACIÓN"), Color::Blue);
    }

    #[test]
    fn tags_stop_after_three_matches() {
        let tags = suggest_tags("viaje de trabajo, salud, familia y universidad");
        assert_eq!(
            tags,
            vec![
                "Universidad".to_string(),
                "Trabajo".to_string(),
                "Salud".to_string()
            ]
        );
    }

    #[test]
    fn tags_fall_back_to_general() {
        assert_eq!(suggest_tags("Comprar leche"), vec!["General".to_string()]);
        assert_eq!(suggest_tags(""), vec!["General".to_string()]);
    }

    #[test]
    fn custom_table_respects_its_own_order() {
        let table = KeywordTable::new(
            vec![
                ColorBucket::new(Color::Green, ["milk"]),
                ColorBucket::new(Color::Red, ["due"]),
            ],
            ["home"],
        );
        let classifier = Classifier::new(&table);
        assert_eq!(classifier.suggest_color("milk due today"), Color::Green);
        assert_eq!(classifier.suggest_tags("at HOME"), vec!["Home".to_string()]);
    }
}
