//! DTOs for card endpoints.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_with::{DisplayFromStr, serde_as};
use validator::{Validate, ValidationError};

use crate::api::dto::relevance::RelevanceItem;
use crate::application::services::{CardInput, RelevanceSelector};
use crate::domain::entities::{Card, CardStatistics, WordType};

const MAX_TAGS: usize = 50;
const MAX_TAG_LENGTH: usize = 100;

/// Request body for creating or replacing a card.
///
/// `word_type` accepts any case (`"noun"`, `"NOUN"`) and defaults to `NONE`.
/// When `relevance_id` is given the level is looked up by id, otherwise by
/// `relevance_description`. A missing level is created on the fly.
#[serde_as]
#[derive(Debug, Deserialize, Validate)]
pub struct CardRequest {
    #[serde_as(as = "DisplayFromStr")]
    #[serde(default)]
    pub word_type: WordType,

    #[validate(length(min = 1, max = 255))]
    pub relevance_description: String,

    pub relevance_id: Option<i64>,

    #[validate(length(min = 1, max = 255))]
    pub german: String,

    #[validate(length(min = 1, max = 255))]
    pub italian: String,

    /// `null` or absent keeps the existing tags on update.
    #[validate(custom(function = "validate_tags"))]
    pub tags: Option<Vec<String>>,
}

fn validate_tags(tags: &[String]) -> Result<(), ValidationError> {
    if tags.len() > MAX_TAGS {
        return Err(ValidationError::new("too_many_tags"));
    }
    if tags.iter().any(|tag| tag.trim().chars().count() > MAX_TAG_LENGTH) {
        return Err(ValidationError::new("tag_too_long"));
    }
    Ok(())
}

impl CardRequest {
    pub fn into_input(self) -> CardInput {
        let relevance = match self.relevance_id {
            Some(id) => RelevanceSelector::ById {
                id,
                description: self.relevance_description,
            },
            None => RelevanceSelector::ByDescription(self.relevance_description),
        };

        CardInput {
            word_type: self.word_type,
            relevance,
            german: self.german,
            italian: self.italian,
            tags: self.tags,
        }
    }
}

/// Practice counters of a card.
#[derive(Debug, Serialize)]
pub struct StatisticsItem {
    pub times_played: i64,
    pub correct_answers: i64,
    pub wrong_answers: i64,
    pub last_answer_correct: bool,
    pub last_played: Option<DateTime<Utc>>,
}

impl From<CardStatistics> for StatisticsItem {
    fn from(s: CardStatistics) -> Self {
        Self {
            wrong_answers: s.wrong_answers(),
            times_played: s.times_played,
            correct_answers: s.correct_answers,
            last_answer_correct: s.last_answer_correct,
            last_played: s.last_played,
        }
    }
}

/// Card as returned by the API.
#[derive(Debug, Serialize)]
pub struct CardResponse {
    pub id: Option<i64>,
    pub word_type: String,
    pub relevance: RelevanceItem,
    pub german: String,
    pub italian: String,
    pub tags: Vec<String>,
    pub statistics: StatisticsItem,
}

impl From<Card> for CardResponse {
    fn from(card: Card) -> Self {
        let tags = card.tag_values();
        Self {
            id: card.id,
            word_type: card.word_type.to_string(),
            relevance: card.relevance.into(),
            german: card.german,
            italian: card.italian,
            tags,
            statistics: card.statistics.into(),
        }
    }
}

fn default_solve_italian() -> bool {
    true
}

/// Request body for a practice attempt.
#[derive(Debug, Deserialize, Validate)]
pub struct SolveRequest {
    /// Guess the Italian term (default) or the German one.
    #[serde(default = "default_solve_italian")]
    pub solve_italian: bool,

    #[validate(length(min = 1, max = 255))]
    pub guess: String,
}

/// Result of a practice attempt.
#[derive(Debug, Serialize)]
pub struct SolveResponse {
    pub correct: bool,
    pub card: CardResponse,
}
