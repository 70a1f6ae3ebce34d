//! Current list-view filter state.
//!
//! # Responsibility
//! - Hold the color/tag/search selection consumed by the filter engine.
//!
//! # Invariants
//! - `All` means the criterion is skipped, never "match nothing".
//! - Tag selections are stored verbatim; matching against notes is exact.

use crate::model::note::{Color, ParseColorError};
use std::str::FromStr;

/// One filter criterion: either everything or a single value.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum FilterChoice<T> {
    #[default]
    All,
    Only(T),
}

impl<T> FilterChoice<T> {
    /// Returns the selected value, or `None` for `All`.
    pub fn selected(&self) -> Option<&T> {
        match self {
            Self::All => None,
            Self::Only(value) => Some(value),
        }
    }
}

impl FromStr for FilterChoice<Color> {
    type Err = ParseColorError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        if value.trim().eq_ignore_ascii_case("all") {
            return Ok(Self::All);
        }
        value.parse::<Color>().map(Self::Only)
    }
}

impl FilterChoice<String> {
    /// Builds a tag selection. Any non-blank text, including a tag literally
    /// named "All", selects that tag; blank text selects every tag.
    pub fn tag(value: &str) -> Self {
        if value.trim().is_empty() {
            Self::All
        } else {
            Self::Only(value.to_string())
        }
    }
}

/// Process-wide view filter.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FilterSpec {
    pub color: FilterChoice<Color>,
    pub tag: FilterChoice<String>,
    /// Raw search text; empty disables the search criterion.
    pub search: String,
}

impl FilterSpec {
    /// Returns whether every criterion is disabled.
    pub fn is_unfiltered(&self) -> bool {
        self.color == FilterChoice::All && self.tag == FilterChoice::All && self.search.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::{FilterChoice, FilterSpec};
    use crate::model::note::Color;

    #[test]
    fn color_choice_accepts_all_sentinel() {
        assert_eq!("ALL".parse::<FilterChoice<Color>>().unwrap(), FilterChoice::All);
        assert_eq!(
            "green".parse::<FilterChoice<Color>>().unwrap(),
            FilterChoice::Only(Color::Green)
        );
    }

    #[test]
    fn default_spec_is_unfiltered() {
        assert!(FilterSpec::default().is_unfiltered());
        assert_eq!(
            FilterChoice::tag("Trabajo").selected().map(String::as_str),
            Some("Trabajo")
        );
    }

    #[test]
    fn tag_named_all_is_selectable() {
        assert_eq!(FilterChoice::tag("All"), FilterChoice::Only("All".to_string()));
        assert_eq!(FilterChoice::tag("   "), FilterChoice::All);
    }
}
