//! SQLite implementation of the relevance repository.

use std::sync::Arc;

use async_trait::async_trait;
use sqlx::SqliteConnection;

use super::rows::RelevanceRow;
use super::session::SqliteSession;
use crate::domain::entities::Relevance;
use crate::domain::repositories::RelevanceRepository;
use crate::error::AppError;

pub struct SqliteRelevanceRepository {
    session: Arc<SqliteSession>,
}

impl SqliteRelevanceRepository {
    pub fn new(session: Arc<SqliteSession>) -> Self {
        Self { session }
    }
}

/// Inserts `relevance`, keeping a preset id or writing back the new one.
pub(super) async fn insert_relevance(
    conn: &mut SqliteConnection,
    relevance: &mut Relevance,
) -> Result<(), AppError> {
    let id: i64 = match relevance.id {
        Some(id) => {
            sqlx::query_scalar("INSERT INTO relevance (id, description) VALUES (?, ?) RETURNING id")
                .bind(id)
                .bind(&relevance.description)
                .fetch_one(&mut *conn)
                .await?
        }
        None => {
            sqlx::query_scalar("INSERT INTO relevance (description) VALUES (?) RETURNING id")
                .bind(&relevance.description)
                .fetch_one(&mut *conn)
                .await?
        }
    };
    relevance.id = Some(id);
    Ok(())
}

/// Returns the id of a card's relevance level, inserting it when unsaved.
pub(super) async fn ensure_relevance(
    conn: &mut SqliteConnection,
    relevance: &mut Relevance,
) -> Result<i64, AppError> {
    if let Some(id) = relevance.id {
        return Ok(id);
    }
    insert_relevance(conn, relevance).await?;
    relevance
        .id
        .ok_or_else(|| AppError::internal("Relevance id was not assigned", serde_json::json!({})))
}

#[async_trait]
impl RelevanceRepository for SqliteRelevanceRepository {
    async fn add(&self, relevance: &mut Relevance) -> Result<(), AppError> {
        let mut tx = self.session.transaction().await?;
        insert_relevance(&mut **tx, relevance).await
    }

    async fn all(&self) -> Result<Vec<Relevance>, AppError> {
        let mut tx = self.session.transaction().await?;
        let rows: Vec<RelevanceRow> =
            sqlx::query_as("SELECT id, description FROM relevance ORDER BY id")
                .fetch_all(&mut **tx)
                .await?;
        Ok(rows.into_iter().map(Relevance::from).collect())
    }

    async fn get(&self, id: i64) -> Result<Option<Relevance>, AppError> {
        let mut tx = self.session.transaction().await?;
        let row: Option<RelevanceRow> =
            sqlx::query_as("SELECT id, description FROM relevance WHERE id = ?")
                .bind(id)
                .fetch_optional(&mut **tx)
                .await?;
        Ok(row.map(Relevance::from))
    }

    async fn get_by_description(&self, description: &str) -> Result<Option<Relevance>, AppError> {
        let mut tx = self.session.transaction().await?;
        let row: Option<RelevanceRow> =
            sqlx::query_as("SELECT id, description FROM relevance WHERE description = ?")
                .bind(description)
                .fetch_optional(&mut **tx)
                .await?;
        Ok(row.map(Relevance::from))
    }

    async fn delete(&self, relevance: &Relevance) -> Result<(), AppError> {
        let Some(id) = relevance.id else {
            return Ok(());
        };
        let mut tx = self.session.transaction().await?;
        sqlx::query("DELETE FROM relevance WHERE id = ?")
            .bind(id)
            .execute(&mut **tx)
            .await?;
        Ok(())
    }
}
