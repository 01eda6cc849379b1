//! In-memory relevance repository.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::json;

use super::store::MemorySession;
use crate::domain::entities::Relevance;
use crate::domain::repositories::RelevanceRepository;
use crate::error::AppError;

pub struct FakeRelevanceRepository {
    session: Arc<MemorySession>,
}

impl FakeRelevanceRepository {
    pub(crate) fn new(session: Arc<MemorySession>) -> Self {
        Self { session }
    }
}

#[async_trait]
impl RelevanceRepository for FakeRelevanceRepository {
    async fn add(&self, relevance: &mut Relevance) -> Result<(), AppError> {
        self.session
            .with_state(|state| state.insert_relevance(relevance))
    }

    async fn all(&self) -> Result<Vec<Relevance>, AppError> {
        self.session.with_state(|state| {
            let mut levels = state.relevance_levels.clone();
            levels.sort_by_key(|r| r.id);
            Ok(levels)
        })
    }

    async fn get(&self, id: i64) -> Result<Option<Relevance>, AppError> {
        self.session.with_state(|state| {
            Ok(state
                .relevance_levels
                .iter()
                .find(|r| r.id == Some(id))
                .cloned())
        })
    }

    async fn get_by_description(&self, description: &str) -> Result<Option<Relevance>, AppError> {
        self.session.with_state(|state| {
            Ok(state
                .relevance_levels
                .iter()
                .find(|r| r.description == description)
                .cloned())
        })
    }

    async fn delete(&self, relevance: &Relevance) -> Result<(), AppError> {
        self.session.with_state(|state| {
            if state.cards.iter().any(|c| c.relevance == *relevance) {
                return Err(AppError::internal(
                    "Foreign key constraint violation",
                    json!({ "reason": "relevance level is referenced by cards" }),
                ));
            }
            state.relevance_levels.retain(|r| r != relevance);
            Ok(())
        })
    }
}
