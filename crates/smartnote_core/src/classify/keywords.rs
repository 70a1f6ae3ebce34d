//! Static trigger-word tables for color and tag suggestion.
//!
//! # Invariants
//! - Bucket order and word order inside a bucket are part of the contract:
//!   ambiguous text resolves to the earliest declared match.
//! - Trigger words are stored lowercase so matching can run on lowercased text.
//! - A word appears at most once per list; the first occurrence keeps its
//!   position.

use crate::model::note::Color;
use once_cell::sync::Lazy;

const RED_WORDS: &[&str] = &[
    "entregar",
    "pendiente",
    "tarea",
    "urgente",
    "hacer",
    "deadline",
    "importante",
];

const BLUE_WORDS: &[&str] = &[
    "idea",
    "recordar",
    "pensar",
    "inspiración",
    "notas",
    "brainstorm",
    "concepto",
];

const GREEN_WORDS: &[&str] = &[
    "comprar", "pagar", "pago", "recibo", "mercado", "tienda", "dinero", "factura",
];

const TAG_WORDS: &[&str] = &[
    "universidad",
    "trabajo",
    "compras",
    "salud",
    "personal",
    "familia",
    "proyecto",
    "estudio",
    "ejercicio",
    "viaje",
];

static BUILTIN_TABLE: Lazy<KeywordTable> = Lazy::new(|| {
    KeywordTable::new(
        vec![
            ColorBucket::new(Color::Red, RED_WORDS.iter().copied()),
            ColorBucket::new(Color::Blue, BLUE_WORDS.iter().copied()),
            ColorBucket::new(Color::Green, GREEN_WORDS.iter().copied()),
        ],
        TAG_WORDS.iter().copied(),
    )
});

/// One color together with the ordered words that trigger it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColorBucket {
    pub color: Color,
    pub words: Vec<String>,
}

impl ColorBucket {
    /// Builds a bucket; words are lowercased, blank and repeated entries dropped.
    pub fn new<I, S>(color: Color, words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            color,
            words: normalize_words(words),
        }
    }
}

/// Ordered color buckets plus one flat list of tag trigger words.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeywordTable {
    buckets: Vec<ColorBucket>,
    tag_words: Vec<String>,
}

impl KeywordTable {
    /// Builds a table preserving the given declaration order.
    pub fn new<I, S>(buckets: Vec<ColorBucket>, tag_words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            buckets,
            tag_words: normalize_words(tag_words),
        }
    }

    /// Built-in Spanish vocabulary, initialized once per process.
    pub fn builtin() -> &'static KeywordTable {
        &BUILTIN_TABLE
    }

    /// Color buckets in declared scan order.
    pub fn buckets(&self) -> &[ColorBucket] {
        &self.buckets
    }

    /// Tag trigger words in declared scan order.
    pub fn tag_words(&self) -> &[String] {
        &self.tag_words
    }
}

impl Default for KeywordTable {
    fn default() -> Self {
        Self::builtin().clone()
    }
}

fn normalize_words<I, S>(words: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut normalized: Vec<String> = Vec::new();
    for word in words {
        let word = word.as_ref().trim().to_lowercase();
        if !word.is_empty() && !normalized.contains(&word) {
            normalized.push(word);
        }
    }
    normalized
}
