//! In-memory tag repository.

use std::sync::Arc;

use async_trait::async_trait;

use super::store::MemorySession;
use crate::domain::entities::Tag;
use crate::domain::repositories::TagRepository;
use crate::error::AppError;

pub struct FakeTagRepository {
    session: Arc<MemorySession>,
}

impl FakeTagRepository {
    pub(crate) fn new(session: Arc<MemorySession>) -> Self {
        Self { session }
    }
}

#[async_trait]
impl TagRepository for FakeTagRepository {
    async fn add(&self, tag: &mut Tag) -> Result<(), AppError> {
        self.session.with_state(|state| {
            if state.tags.contains(tag) {
                return Err(AppError::duplicate_resource("Tag"));
            }
            tag.id = Some(state.next_tag_id());
            state.tags.push(tag.clone());
            Ok(())
        })
    }

    async fn all(&self) -> Result<Vec<Tag>, AppError> {
        self.session.with_state(|state| {
            let mut tags = state.tags.clone();
            tags.sort();
            Ok(tags)
        })
    }

    async fn get_by_value(&self, value: &str) -> Result<Option<Tag>, AppError> {
        self.session
            .with_state(|state| Ok(state.tags.iter().find(|t| t.value == value).cloned()))
    }

    async fn delete(&self, tag: &Tag) -> Result<(), AppError> {
        self.session.with_state(|state| {
            state.tags.retain(|t| t != tag);
            for card in &mut state.cards {
                card.tags.remove(tag.value.as_str());
            }
            Ok(())
        })
    }
}
