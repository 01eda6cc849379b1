//! SQLite-backed unit of work.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::json;
use sqlx::SqlitePool;

use super::session::SqliteSession;
use super::{SqliteCardRepository, SqliteRelevanceRepository, SqliteTagRepository};
use crate::domain::entities::Card;
use crate::domain::repositories::{CardRepository, RelevanceRepository, TagRepository};
use crate::domain::unit_of_work::{UnitOfWork, UnitOfWorkScope, UnitOfWorkState};
use crate::error::AppError;

/// Opens SQLite sessions on a shared pool.
#[derive(Clone)]
pub struct SqliteUnitOfWork {
    pool: SqlitePool,
}

impl SqliteUnitOfWork {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UnitOfWork for SqliteUnitOfWork {
    type Scope = SqliteUnitOfWorkScope;

    async fn begin(&self) -> Result<Self::Scope, AppError> {
        let session = Arc::new(SqliteSession::new(self.pool.clone()));
        tracing::debug!("unit of work opened");
        Ok(SqliteUnitOfWorkScope {
            cards: SqliteCardRepository::new(Arc::clone(&session)),
            relevance_levels: SqliteRelevanceRepository::new(Arc::clone(&session)),
            tags: SqliteTagRepository::new(Arc::clone(&session)),
            session,
        })
    }
}

pub struct SqliteUnitOfWorkScope {
    session: Arc<SqliteSession>,
    cards: SqliteCardRepository,
    relevance_levels: SqliteRelevanceRepository,
    tags: SqliteTagRepository,
}

#[async_trait]
impl UnitOfWorkScope for SqliteUnitOfWorkScope {
    fn cards(&self) -> &dyn CardRepository {
        &self.cards
    }

    fn relevance_levels(&self) -> &dyn RelevanceRepository {
        &self.relevance_levels
    }

    fn tags(&self) -> &dyn TagRepository {
        &self.tags
    }

    fn state(&self) -> UnitOfWorkState {
        // Only a running statement holds the lock, so it is Active then.
        self.session.try_state().unwrap_or(UnitOfWorkState::Active)
    }

    async fn commit(&mut self) -> Result<(), AppError> {
        self.session.commit().await
    }

    async fn rollback(&mut self) -> Result<(), AppError> {
        self.session.rollback().await
    }

    async fn refresh(&self, card: &mut Card) -> Result<(), AppError> {
        let id = card.id.ok_or_else(|| {
            AppError::internal("Cannot refresh a card that was never stored", json!({}))
        })?;
        *card = self
            .cards
            .get(id)
            .await?
            .ok_or_else(|| AppError::resource_not_found("Card", id))?;
        Ok(())
    }

    async fn close(self) {
        self.session.close().await;
    }
}

impl Drop for SqliteUnitOfWorkScope {
    fn drop(&mut self) {
        if let Some(state) = self.session.try_state() {
            if state != UnitOfWorkState::Closed {
                tracing::debug!(?state, "unit of work dropped without close");
            }
        }
    }
}
