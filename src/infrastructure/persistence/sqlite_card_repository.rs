//! SQLite implementation of the card repository.

use std::sync::Arc;

use async_trait::async_trait;
use sqlx::SqliteConnection;

use super::rows::{CARD_SELECT, CardRow, hydrate_cards};
use super::session::SqliteSession;
use super::sqlite_relevance_repository::ensure_relevance;
use super::sqlite_tag_repository::link_tags;
use crate::domain::entities::Card;
use crate::domain::repositories::{CardOrder, CardRepository};
use crate::error::AppError;

/// SQLite repository for cards.
///
/// Relevance levels and tags are cascaded on `add`/`update`; reads always
/// return cards with relevance and tags loaded.
pub struct SqliteCardRepository {
    session: Arc<SqliteSession>,
}

impl SqliteCardRepository {
    pub fn new(session: Arc<SqliteSession>) -> Self {
        Self { session }
    }
}

fn order_clause(order: CardOrder) -> &'static str {
    match order {
        CardOrder::Id => "c.id",
        CardOrder::German => "c.sort_key, c.id",
    }
}

async fn fetch_card(conn: &mut SqliteConnection, id: i64) -> Result<Option<Card>, AppError> {
    let row: Option<CardRow> = sqlx::query_as(&format!("{CARD_SELECT} WHERE c.id = ?"))
        .bind(id)
        .fetch_optional(&mut *conn)
        .await?;

    match row {
        Some(row) => Ok(hydrate_cards(conn, vec![row]).await?.pop()),
        None => Ok(None),
    }
}

#[async_trait]
impl CardRepository for SqliteCardRepository {
    async fn add(&self, card: &mut Card) -> Result<(), AppError> {
        let mut tx = self.session.transaction().await?;
        let conn: &mut SqliteConnection = &mut tx;

        let relevance_id = ensure_relevance(conn, &mut card.relevance).await?;
        let id: i64 = sqlx::query_scalar(
            r#"
            INSERT INTO card (word_type, id_relevance, german, italian, sort_key,
                              times_played, correct_answers, last_answer_correct, last_played)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)
            RETURNING id
            "#,
        )
        .bind(card.word_type.as_str())
        .bind(relevance_id)
        .bind(&card.german)
        .bind(&card.italian)
        .bind(card.german_sort_key())
        .bind(card.statistics.times_played)
        .bind(card.statistics.correct_answers)
        .bind(card.statistics.last_answer_correct)
        .bind(card.statistics.last_played)
        .fetch_one(&mut *conn)
        .await?;
        card.id = Some(id);

        let tags = std::mem::take(&mut card.tags);
        card.tags = link_tags(conn, id, tags).await?;

        tracing::debug!(card_id = id, "card staged");
        Ok(())
    }

    async fn all(&self) -> Result<Vec<Card>, AppError> {
        let mut tx = self.session.transaction().await?;
        let conn: &mut SqliteConnection = &mut tx;

        let rows: Vec<CardRow> = sqlx::query_as(&format!("{CARD_SELECT} ORDER BY c.id"))
            .fetch_all(&mut *conn)
            .await?;
        hydrate_cards(conn, rows).await
    }

    async fn get(&self, id: i64) -> Result<Option<Card>, AppError> {
        let mut tx = self.session.transaction().await?;
        fetch_card(&mut tx, id).await
    }

    async fn get_list(
        &self,
        skip: i64,
        limit: i64,
        order: CardOrder,
    ) -> Result<(i64, Vec<Card>), AppError> {
        let mut tx = self.session.transaction().await?;
        let conn: &mut SqliteConnection = &mut tx;

        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM card")
            .fetch_one(&mut *conn)
            .await?;

        let sql = format!(
            "{CARD_SELECT} ORDER BY {} LIMIT ? OFFSET ?",
            order_clause(order)
        );
        let rows: Vec<CardRow> = sqlx::query_as(&sql)
            .bind(limit)
            .bind(skip)
            .fetch_all(&mut *conn)
            .await?;

        Ok((count, hydrate_cards(conn, rows).await?))
    }

    async fn update(&self, card: &mut Card) -> Result<(), AppError> {
        let Some(id) = card.id else {
            return Ok(());
        };
        let mut tx = self.session.transaction().await?;
        let conn: &mut SqliteConnection = &mut tx;

        let relevance_id = ensure_relevance(conn, &mut card.relevance).await?;
        let result = sqlx::query(
            r#"
            UPDATE card
            SET word_type = ?, id_relevance = ?, german = ?, italian = ?, sort_key = ?,
                times_played = ?, correct_answers = ?, last_answer_correct = ?, last_played = ?
            WHERE id = ?
            "#,
        )
        .bind(card.word_type.as_str())
        .bind(relevance_id)
        .bind(&card.german)
        .bind(&card.italian)
        .bind(card.german_sort_key())
        .bind(card.statistics.times_played)
        .bind(card.statistics.correct_answers)
        .bind(card.statistics.last_answer_correct)
        .bind(card.statistics.last_played)
        .bind(id)
        .execute(&mut *conn)
        .await?;

        if result.rows_affected() == 0 {
            tracing::debug!(card_id = id, "update of unknown card ignored");
            return Ok(());
        }

        sqlx::query("DELETE FROM card_has_tag WHERE id_card = ?")
            .bind(id)
            .execute(&mut *conn)
            .await?;
        let tags = std::mem::take(&mut card.tags);
        card.tags = link_tags(conn, id, tags).await?;

        tracing::debug!(card_id = id, "card update staged");
        Ok(())
    }

    async fn delete(&self, card: &Card) -> Result<(), AppError> {
        let Some(id) = card.id else {
            return Ok(());
        };
        let mut tx = self.session.transaction().await?;
        // Tag links go through ON DELETE CASCADE.
        sqlx::query("DELETE FROM card WHERE id = ?")
            .bind(id)
            .execute(&mut **tx)
            .await?;
        tracing::debug!(card_id = id, "card removal staged");
        Ok(())
    }
}
