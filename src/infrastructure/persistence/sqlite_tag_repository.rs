//! SQLite implementation of the tag repository.

use std::collections::BTreeSet;
use std::sync::Arc;

use async_trait::async_trait;
use sqlx::SqliteConnection;

use super::rows::TagRow;
use super::session::SqliteSession;
use crate::domain::entities::Tag;
use crate::domain::repositories::TagRepository;
use crate::error::AppError;

pub struct SqliteTagRepository {
    session: Arc<SqliteSession>,
}

impl SqliteTagRepository {
    pub fn new(session: Arc<SqliteSession>) -> Self {
        Self { session }
    }
}

async fn insert_tag(conn: &mut SqliteConnection, tag: &mut Tag) -> Result<(), AppError> {
    let id: i64 = sqlx::query_scalar("INSERT INTO tag (value) VALUES (?) RETURNING id")
        .bind(&tag.value)
        .fetch_one(&mut *conn)
        .await?;
    tag.id = Some(id);
    Ok(())
}

/// Links `card_id` to every tag in `tags`, creating unknown tags by value.
///
/// Returns the set with store ids filled in.
pub(super) async fn link_tags(
    conn: &mut SqliteConnection,
    card_id: i64,
    tags: BTreeSet<Tag>,
) -> Result<BTreeSet<Tag>, AppError> {
    let mut linked = BTreeSet::new();
    for mut tag in tags {
        let existing: Option<i64> = sqlx::query_scalar("SELECT id FROM tag WHERE value = ?")
            .bind(&tag.value)
            .fetch_optional(&mut *conn)
            .await?;
        match existing {
            Some(id) => tag.id = Some(id),
            None => insert_tag(conn, &mut tag).await?,
        }

        sqlx::query("INSERT OR IGNORE INTO card_has_tag (id_card, id_tag) VALUES (?, ?)")
            .bind(card_id)
            .bind(tag.id)
            .execute(&mut *conn)
            .await?;
        linked.insert(tag);
    }
    Ok(linked)
}

#[async_trait]
impl TagRepository for SqliteTagRepository {
    async fn add(&self, tag: &mut Tag) -> Result<(), AppError> {
        let mut tx = self.session.transaction().await?;
        insert_tag(&mut **tx, tag).await
    }

    async fn all(&self) -> Result<Vec<Tag>, AppError> {
        let mut tx = self.session.transaction().await?;
        let rows: Vec<TagRow> = sqlx::query_as("SELECT id, value FROM tag ORDER BY value")
            .fetch_all(&mut **tx)
            .await?;
        Ok(rows.into_iter().map(Tag::from).collect())
    }

    async fn get_by_value(&self, value: &str) -> Result<Option<Tag>, AppError> {
        let mut tx = self.session.transaction().await?;
        let row: Option<TagRow> = sqlx::query_as("SELECT id, value FROM tag WHERE value = ?")
            .bind(value)
            .fetch_optional(&mut **tx)
            .await?;
        Ok(row.map(Tag::from))
    }

    async fn delete(&self, tag: &Tag) -> Result<(), AppError> {
        let mut tx = self.session.transaction().await?;
        // Associations go through ON DELETE CASCADE.
        sqlx::query("DELETE FROM tag WHERE value = ?")
            .bind(&tag.value)
            .execute(&mut **tx)
            .await?;
        Ok(())
    }
}
