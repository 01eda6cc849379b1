//! Row types and their mapping onto domain entities.
//!
//! The schema lives in `migrations/`; entities never see column names.

use std::collections::{BTreeSet, HashMap};

use chrono::{DateTime, Utc};
use serde_json::json;
use sqlx::{FromRow, QueryBuilder, Sqlite, SqliteConnection};

use crate::domain::entities::{Card, CardStatistics, Relevance, Tag, WordType};
use crate::error::AppError;

/// Card columns joined with their relevance level.
pub(super) const CARD_SELECT: &str = r#"
    SELECT c.id, c.word_type, c.german, c.italian,
           c.times_played, c.correct_answers, c.last_answer_correct, c.last_played,
           r.id AS relevance_id, r.description AS relevance_description
    FROM card c
    JOIN relevance r ON r.id = c.id_relevance
"#;

#[derive(Debug, FromRow)]
pub(super) struct CardRow {
    pub id: i64,
    pub word_type: String,
    pub german: String,
    pub italian: String,
    pub times_played: i64,
    pub correct_answers: i64,
    pub last_answer_correct: bool,
    pub last_played: Option<DateTime<Utc>>,
    pub relevance_id: i64,
    pub relevance_description: String,
}

impl CardRow {
    pub fn into_card(self, tags: BTreeSet<Tag>) -> Result<Card, AppError> {
        let word_type: WordType = self.word_type.parse().map_err(|e| {
            AppError::internal(
                "Stored card has an invalid word type",
                json!({ "card_id": self.id, "reason": format!("{e}") }),
            )
        })?;

        Ok(Card {
            id: Some(self.id),
            word_type,
            relevance: Relevance::with_id(self.relevance_id, self.relevance_description),
            german: self.german,
            italian: self.italian,
            tags,
            statistics: CardStatistics {
                times_played: self.times_played,
                correct_answers: self.correct_answers,
                last_answer_correct: self.last_answer_correct,
                last_played: self.last_played,
            },
        })
    }
}

#[derive(Debug, FromRow)]
pub(super) struct RelevanceRow {
    pub id: i64,
    pub description: String,
}

impl From<RelevanceRow> for Relevance {
    fn from(row: RelevanceRow) -> Self {
        Relevance::with_id(row.id, row.description)
    }
}

#[derive(Debug, FromRow)]
pub(super) struct TagRow {
    pub id: i64,
    pub value: String,
}

impl From<TagRow> for Tag {
    fn from(row: TagRow) -> Self {
        Tag::with_id(row.id, row.value)
    }
}

#[derive(Debug, FromRow)]
struct CardTagRow {
    id_card: i64,
    id: i64,
    value: String,
}

/// Loads tag sets for the given cards in one query.
async fn load_tags(
    conn: &mut SqliteConnection,
    card_ids: &[i64],
) -> Result<HashMap<i64, BTreeSet<Tag>>, AppError> {
    let mut tags: HashMap<i64, BTreeSet<Tag>> = HashMap::new();
    if card_ids.is_empty() {
        return Ok(tags);
    }

    let mut qb: QueryBuilder<Sqlite> = QueryBuilder::new(
        "SELECT cht.id_card, t.id, t.value FROM card_has_tag cht \
         JOIN tag t ON t.id = cht.id_tag WHERE cht.id_card IN (",
    );
    let mut ids = qb.separated(", ");
    for id in card_ids {
        ids.push_bind(*id);
    }
    ids.push_unseparated(")");

    let rows: Vec<CardTagRow> = qb.build_query_as().fetch_all(&mut *conn).await?;
    for row in rows {
        tags.entry(row.id_card)
            .or_default()
            .insert(Tag::with_id(row.id, row.value));
    }
    Ok(tags)
}

/// Turns card rows into fully loaded cards, preserving row order.
pub(super) async fn hydrate_cards(
    conn: &mut SqliteConnection,
    rows: Vec<CardRow>,
) -> Result<Vec<Card>, AppError> {
    let ids: Vec<i64> = rows.iter().map(|row| row.id).collect();
    let mut tags = load_tags(conn, &ids).await?;

    rows.into_iter()
        .map(|row| {
            let card_tags = tags.remove(&row.id).unwrap_or_default();
            row.into_card(card_tags)
        })
        .collect()
}
