//! In-memory card repository.

use std::sync::Arc;

use async_trait::async_trait;

use super::store::MemorySession;
use crate::domain::entities::Card;
use crate::domain::repositories::{CardOrder, CardRepository};
use crate::error::AppError;

/// Card repository over a [`MemorySession`].
///
/// Duplicates are rejected on `add`/`update` with
/// [`AppError::DuplicateResource`] rather than at commit.
pub struct FakeCardRepository {
    session: Arc<MemorySession>,
}

impl FakeCardRepository {
    pub(crate) fn new(session: Arc<MemorySession>) -> Self {
        Self { session }
    }
}

#[async_trait]
impl CardRepository for FakeCardRepository {
    async fn add(&self, card: &mut Card) -> Result<(), AppError> {
        self.session.with_state(|state| {
            if state.cards.contains(card) {
                return Err(AppError::duplicate_resource("Card"));
            }
            state.ensure_relevance(&mut card.relevance)?;
            state.resolve_tags(&mut card.tags);
            card.id = Some(state.next_card_id());
            state.cards.push(card.clone());
            Ok(())
        })
    }

    async fn all(&self) -> Result<Vec<Card>, AppError> {
        self.session.with_state(|state| Ok(state.cards.clone()))
    }

    async fn get(&self, id: i64) -> Result<Option<Card>, AppError> {
        self.session
            .with_state(|state| Ok(state.cards.iter().find(|c| c.id == Some(id)).cloned()))
    }

    async fn get_list(
        &self,
        skip: i64,
        limit: i64,
        order: CardOrder,
    ) -> Result<(i64, Vec<Card>), AppError> {
        self.session.with_state(|state| {
            let mut cards = state.cards.clone();
            if order == CardOrder::German {
                cards.sort_by_cached_key(|card| (card.german_sort_key(), card.id));
            }
            let count = cards.len() as i64;
            let window = cards
                .into_iter()
                .skip(usize::try_from(skip).unwrap_or(0))
                .take(usize::try_from(limit).unwrap_or(0))
                .collect();
            Ok((count, window))
        })
    }

    async fn update(&self, card: &mut Card) -> Result<(), AppError> {
        let Some(id) = card.id else {
            return Ok(());
        };
        self.session.with_state(|state| {
            let Some(position) = state.cards.iter().position(|c| c.id == Some(id)) else {
                return Ok(());
            };
            if state.cards.iter().any(|c| c.id != Some(id) && *c == *card) {
                return Err(AppError::duplicate_resource("Card"));
            }
            state.ensure_relevance(&mut card.relevance)?;
            state.resolve_tags(&mut card.tags);
            state.cards[position] = card.clone();
            Ok(())
        })
    }

    async fn delete(&self, card: &Card) -> Result<(), AppError> {
        self.session.with_state(|state| {
            state.cards.retain(|c| c.id.is_none() || c.id != card.id);
            Ok(())
        })
    }
}
