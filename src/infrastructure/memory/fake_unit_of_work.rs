//! In-memory unit of work used by tests.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::json;

use super::store::{MemorySession, MemoryStore};
use super::{FakeCardRepository, FakeRelevanceRepository, FakeTagRepository};
use crate::domain::entities::Card;
use crate::domain::repositories::{CardRepository, RelevanceRepository, TagRepository};
use crate::domain::unit_of_work::{UnitOfWork, UnitOfWorkScope, UnitOfWorkState};
use crate::error::AppError;

/// Unit of work over a [`MemoryStore`].
///
/// Scopes see the committed contents as of their first repository call and
/// publish their working copy on commit.
#[derive(Debug, Clone, Default)]
pub struct FakeUnitOfWork {
    store: MemoryStore,
}

impl FakeUnitOfWork {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn store(&self) -> &MemoryStore {
        &self.store
    }
}

#[async_trait]
impl UnitOfWork for FakeUnitOfWork {
    type Scope = FakeUnitOfWorkScope;

    async fn begin(&self) -> Result<Self::Scope, AppError> {
        let session = Arc::new(MemorySession::new(self.store.clone()));
        Ok(FakeUnitOfWorkScope {
            cards: FakeCardRepository::new(Arc::clone(&session)),
            relevance_levels: FakeRelevanceRepository::new(Arc::clone(&session)),
            tags: FakeTagRepository::new(Arc::clone(&session)),
            session,
        })
    }
}

pub struct FakeUnitOfWorkScope {
    session: Arc<MemorySession>,
    cards: FakeCardRepository,
    relevance_levels: FakeRelevanceRepository,
    tags: FakeTagRepository,
}

#[async_trait]
impl UnitOfWorkScope for FakeUnitOfWorkScope {
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
        self.session.state()
    }

    async fn commit(&mut self) -> Result<(), AppError> {
        self.session.commit()
    }

    async fn rollback(&mut self) -> Result<(), AppError> {
        self.session.rollback()
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
        self.session.close();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::{Relevance, WordType};
    use crate::domain::repositories::CardOrder;

    fn card(german: &str, italian: &str) -> Card {
        Card::new(WordType::Noun, Relevance::new("Beginner"), german, italian)
    }

    #[tokio::test]
    async fn test_commit_publishes_working_copy() {
        let uow = FakeUnitOfWork::new();

        let mut scope = uow.begin().await.unwrap();
        assert_eq!(scope.state(), UnitOfWorkState::NotStarted);
        scope.cards().add(&mut card("der Hund", "il cane")).await.unwrap();
        assert_eq!(scope.state(), UnitOfWorkState::Active);
        assert_eq!(uow.store().card_count(), 0);

        scope.commit().await.unwrap();
        assert_eq!(scope.state(), UnitOfWorkState::Committed);
        scope.close().await;

        assert_eq!(uow.store().card_count(), 1);
    }

    #[tokio::test]
    async fn test_close_discards_uncommitted() {
        let uow = FakeUnitOfWork::new();

        let scope = uow.begin().await.unwrap();
        scope.cards().add(&mut card("der Hund", "il cane")).await.unwrap();
        scope.close().await;

        assert_eq!(uow.store().card_count(), 0);
    }

    #[tokio::test]
    async fn test_add_duplicate_card_is_rejected() {
        let uow = FakeUnitOfWork::new();
        let scope = uow.begin().await.unwrap();

        scope.cards().add(&mut card("der Hund", "il cane")).await.unwrap();
        let err = scope
            .cards()
            .add(&mut card("der Hund", "il cane"))
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::DuplicateResource { .. }));
        scope.close().await;
    }

    #[tokio::test]
    async fn test_add_assigns_ids_and_resolves_tags() {
        let uow = FakeUnitOfWork::new();
        let scope = uow.begin().await.unwrap();

        let mut first = card("der Hund", "il cane");
        first.add_tag("animals");
        scope.cards().add(&mut first).await.unwrap();

        let mut second = card("die Katze", "il gatto");
        second.relevance = first.relevance.clone();
        second.add_tag("animals");
        scope.cards().add(&mut second).await.unwrap();

        assert_eq!(first.id, Some(1));
        assert_eq!(second.id, Some(2));
        assert_eq!(first.relevance.id, second.relevance.id);
        assert_eq!(scope.relevance_levels().all().await.unwrap().len(), 1);
        assert_eq!(scope.tags().all().await.unwrap().len(), 1);
        scope.close().await;
    }

    #[tokio::test]
    async fn test_get_list_orders_by_german_without_article() {
        let uow = FakeUnitOfWork::new();
        let mut scope = uow.begin().await.unwrap();
        let mut beginner = Relevance::new("Beginner");
        scope.relevance_levels().add(&mut beginner).await.unwrap();

        for (german, italian) in [
            ("laufen", "correre"),
            ("der Apfel", "la mela"),
            ("die Zeit", "il tempo"),
        ] {
            let mut card = card(german, italian);
            card.relevance = beginner.clone();
            scope.cards().add(&mut card).await.unwrap();
        }
        scope.commit().await.unwrap();

        let (count, cards) = scope.cards().get_list(0, 2, CardOrder::German).await.unwrap();
        assert_eq!(count, 3);
        let german: Vec<_> = cards.iter().map(|c| c.german.as_str()).collect();
        assert_eq!(german, vec!["der Apfel", "laufen"]);

        let (count, cards) = scope.cards().get_list(4, 2, CardOrder::Id).await.unwrap();
        assert_eq!(count, 3);
        assert!(cards.is_empty());
        scope.close().await;
    }

    #[tokio::test]
    async fn test_closed_scope_refuses_calls() {
        let uow = FakeUnitOfWork::new();
        let scope = uow.begin().await.unwrap();
        let session = Arc::clone(&scope.session);
        scope.close().await;

        assert_eq!(session.state(), UnitOfWorkState::Closed);
        assert!(session.with_state(|_| Ok(())).is_err());
    }
}
