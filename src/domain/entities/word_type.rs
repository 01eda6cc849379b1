//! Grammatical category of a card's term.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// Word category stored with every card.
///
/// Serialized and persisted as the upper-case variant name (`"NOUN"`, `"VERB"`, ...).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum WordType {
    #[default]
    None,
    Noun,
    Verb,
    Adjective,
    Adverb,
    Pronoun,
    Preposition,
}

/// Returned when a string is not one of the known word type names.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown word type '{0}'")]
pub struct ParseWordTypeError(pub String);

impl WordType {
    pub const VARIANTS: [WordType; 7] = [
        WordType::None,
        WordType::Noun,
        WordType::Verb,
        WordType::Adjective,
        WordType::Adverb,
        WordType::Pronoun,
        WordType::Preposition,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            WordType::None => "NONE",
            WordType::Noun => "NOUN",
            WordType::Verb => "VERB",
            WordType::Adjective => "ADJECTIVE",
            WordType::Adverb => "ADVERB",
            WordType::Pronoun => "PRONOUN",
            WordType::Preposition => "PREPOSITION",
        }
    }

    /// All word type names, sorted alphabetically.
    pub fn all() -> Vec<&'static str> {
        let mut names: Vec<&'static str> = Self::VARIANTS.iter().map(WordType::as_str).collect();
        names.sort_unstable();
        names
    }
}

impl fmt::Display for WordType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for WordType {
    type Err = ParseWordTypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::VARIANTS
            .iter()
            .copied()
            .find(|variant| variant.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ParseWordTypeError(s.to_string()))
    }
}
