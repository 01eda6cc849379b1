//! Flashcard entity: a German/Italian word pair with practice statistics.

use std::collections::BTreeSet;
use std::hash::{Hash, Hasher};

use chrono::{DateTime, Utc};

use super::{Relevance, Tag, WordType};

const GERMAN_ARTICLES: [&str; 3] = ["der ", "die ", "das "];

/// Practice counters kept with each card.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CardStatistics {
    pub times_played: i64,
    pub correct_answers: i64,
    pub last_answer_correct: bool,
    pub last_played: Option<DateTime<Utc>>,
}

impl CardStatistics {
    pub fn wrong_answers(&self) -> i64 {
        self.times_played - self.correct_answers
    }

    fn record(&mut self, correct: bool, at: DateTime<Utc>) {
        self.times_played += 1;
        if correct {
            self.correct_answers += 1;
        }
        self.last_answer_correct = correct;
        self.last_played = Some(at);
    }
}

/// A vocabulary card.
///
/// Identity is content-based: two cards are equal when their `german` and
/// `italian` terms match, regardless of id, tags, relevance or statistics.
/// The store enforces the same pair as a uniqueness constraint.
#[derive(Debug, Clone)]
pub struct Card {
    pub id: Option<i64>,
    pub word_type: WordType,
    pub relevance: Relevance,
    pub german: String,
    pub italian: String,
    pub tags: BTreeSet<Tag>,
    pub statistics: CardStatistics,
}

impl Card {
    /// Creates an unsaved card with fresh statistics and no tags.
    pub fn new(
        word_type: WordType,
        relevance: Relevance,
        german: impl Into<String>,
        italian: impl Into<String>,
    ) -> Self {
        Self {
            id: None,
            word_type,
            relevance,
            german: german.into(),
            italian: italian.into(),
            tags: BTreeSet::new(),
            statistics: CardStatistics::default(),
        }
    }

    /// Checks a guess against the hidden side and records the attempt.
    ///
    /// With `solve_italian` the guess is compared to the Italian term,
    /// otherwise to the German one. Only an exact match counts.
    pub fn solve(&mut self, solve_italian: bool, guess: &str) -> bool {
        let expected = if solve_italian {
            &self.italian
        } else {
            &self.german
        };
        let correct = expected == guess;
        self.update_statistics(correct);
        correct
    }

    pub fn update_statistics(&mut self, correct: bool) {
        self.statistics.record(correct, Utc::now());
    }

    pub fn wrong_answers(&self) -> i64 {
        self.statistics.wrong_answers()
    }

    /// Adds a tag by value. Blank values are ignored and values are trimmed.
    pub fn add_tag(&mut self, value: impl AsRef<str>) {
        let value = value.as_ref().trim();
        if !value.is_empty() {
            self.tags.insert(Tag::new(value));
        }
    }

    pub fn remove_tag(&mut self, value: &str) -> bool {
        self.tags.remove(value.trim())
    }

    pub fn has_tag(&self, value: &str) -> bool {
        self.tags.contains(value.trim())
    }

    /// Replaces all tags with the given values.
    pub fn set_tags<I, S>(&mut self, values: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.tags.clear();
        for value in values {
            self.add_tag(value);
        }
    }

    pub fn tag_values(&self) -> Vec<String> {
        self.tags.iter().map(|tag| tag.value.clone()).collect()
    }

    /// Key used for "German" ordering; see [`german_sort_key`](fn@german_sort_key).
    pub fn german_sort_key(&self) -> String {
        german_sort_key(&self.german)
    }
}

impl PartialEq for Card {
    fn eq(&self, other: &Self) -> bool {
        self.german == other.german && self.italian == other.italian
    }
}

impl Eq for Card {}

impl Hash for Card {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.german.hash(state);
        self.italian.hash(state);
    }
}

/// Lower-cased German term with a leading definite article removed.
///
/// `"der Hund"` sorts as `"hund"`, so nouns are ordered by the noun itself.
pub fn german_sort_key(german: &str) -> String {
    let lowered = german.trim().to_lowercase();
    GERMAN_ARTICLES
        .iter()
        .find_map(|article| lowered.strip_prefix(article))
        .map(|rest| rest.trim_start().to_string())
        .unwrap_or(lowered)
}
