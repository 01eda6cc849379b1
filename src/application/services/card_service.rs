//! Card use cases.

use std::sync::Arc;

use serde_json::json;

use crate::application::pagination::PaginationResult;
use crate::domain::entities::{Card, Relevance, Tag, WordType};
use crate::domain::repositories::CardOrder;
use crate::domain::unit_of_work::{UnitOfWork, UnitOfWorkScope};
use crate::error::AppError;

/// How the caller identifies the relevance level of a card.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RelevanceSelector {
    /// Look up by description; create it if missing.
    ByDescription(String),
    /// Look up by id; if missing, create it with this id and description.
    ById { id: i64, description: String },
}

/// Fields a caller supplies to create or update a card.
#[derive(Debug, Clone)]
pub struct CardInput {
    pub word_type: WordType,
    pub relevance: RelevanceSelector,
    pub german: String,
    pub italian: String,
    /// `None` leaves the tags of an updated card untouched.
    pub tags: Option<Vec<String>>,
}

/// Result of a practice attempt.
#[derive(Debug, Clone)]
pub struct SolveOutcome {
    pub correct: bool,
    pub card: Card,
}

/// Service for managing vocabulary cards.
///
/// Every call opens its own unit of work and closes it before returning, on
/// success and on error alike. Returned cards are detached copies.
pub struct CardService<U: UnitOfWork> {
    uow: Arc<U>,
}

impl<U: UnitOfWork> CardService<U> {
    /// Creates a new card service.
    pub fn new(uow: Arc<U>) -> Self {
        Self { uow }
    }

    /// Creates a card and returns it as stored.
    ///
    /// The relevance level is looked up by the selector and created if it
    /// does not exist yet. Tags are created on demand.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::DuplicateResource`] if a card with the same German
    /// and Italian terms exists.
    /// Returns [`AppError::Internal`] on storage errors.
    pub async fn create_card(&self, input: CardInput) -> Result<Card, AppError> {
        let mut scope = self.uow.begin().await?;
        let outcome = create_in_scope(&mut scope, input).await;
        scope.close().await;

        let card = outcome?;
        tracing::info!(card_id = ?card.id, german = %card.german, "card created");
        Ok(card)
    }

    /// Reads one card.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no card has this id.
    pub async fn read_card(&self, id: i64) -> Result<Card, AppError> {
        let scope = self.uow.begin().await?;
        let outcome = load_card(&scope, id).await;
        scope.close().await;
        outcome
    }

    /// Reads one page of cards.
    ///
    /// # Arguments
    ///
    /// - `page` - Page number (1-indexed)
    /// - `page_size` - Number of cards per page
    /// - `order` - Sort order of the whole listing
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if `page` or `page_size` is below 1.
    pub async fn read_cards(
        &self,
        page: i64,
        page_size: i64,
        order: CardOrder,
    ) -> Result<PaginationResult<Card>, AppError> {
        if page < 1 || page_size < 1 {
            return Err(AppError::bad_request(
                "page and page_size must be at least 1",
                json!({ "page": page, "page_size": page_size }),
            ));
        }

        let skip = (page - 1).saturating_mul(page_size);
        let scope = self.uow.begin().await?;
        let outcome = scope.cards().get_list(skip, page_size, order).await;
        scope.close().await;

        let (count, records) = outcome?;
        Ok(PaginationResult::build(records, count, page_size, page))
    }

    /// Overwrites a card's word type, terms, relevance and, when given, tags.
    ///
    /// Statistics are kept.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no card has this id.
    /// Returns [`AppError::DuplicateResource`] if the new terms collide with
    /// another card.
    pub async fn update_card(&self, id: i64, input: CardInput) -> Result<Card, AppError> {
        let mut scope = self.uow.begin().await?;
        let outcome = update_in_scope(&mut scope, id, input).await;
        scope.close().await;

        let card = outcome?;
        tracing::info!(card_id = id, "card updated");
        Ok(card)
    }

    /// Deletes a card. Its tags and relevance level are kept.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no card has this id.
    pub async fn delete_card(&self, id: i64) -> Result<(), AppError> {
        let mut scope = self.uow.begin().await?;
        let outcome = delete_in_scope(&mut scope, id).await;
        scope.close().await;

        outcome?;
        tracing::info!(card_id = id, "card deleted");
        Ok(())
    }

    /// Checks a guess for a card and stores the updated statistics.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no card has this id.
    pub async fn solve_card(
        &self,
        id: i64,
        solve_italian: bool,
        guess: &str,
    ) -> Result<SolveOutcome, AppError> {
        let mut scope = self.uow.begin().await?;
        let outcome = solve_in_scope(&mut scope, id, solve_italian, guess).await;
        scope.close().await;

        let outcome = outcome?;
        tracing::info!(card_id = id, correct = outcome.correct, "card solved");
        Ok(outcome)
    }

    /// Lists every relevance level, ordered by id.
    pub async fn list_relevance_levels(&self) -> Result<Vec<Relevance>, AppError> {
        let scope = self.uow.begin().await?;
        let outcome = scope.relevance_levels().all().await;
        scope.close().await;
        outcome
    }

    /// Lists every tag, ordered by value.
    pub async fn list_tags(&self) -> Result<Vec<Tag>, AppError> {
        let scope = self.uow.begin().await?;
        let outcome = scope.tags().all().await;
        scope.close().await;
        outcome
    }
}

/// Maps a constraint violation onto a duplicate of `resource`.
fn duplicate_of(resource: &'static str) -> impl Fn(AppError) -> AppError {
    move |err| match err {
        AppError::Integrity { message, .. } => {
            tracing::warn!(resource, reason = %message, "duplicate rejected by store");
            AppError::duplicate_resource(resource)
        }
        AppError::DuplicateResource { .. } => {
            tracing::warn!(resource, "duplicate rejected");
            err
        }
        other => other,
    }
}

async fn load_card<S: UnitOfWorkScope>(scope: &S, id: i64) -> Result<Card, AppError> {
    scope
        .cards()
        .get(id)
        .await?
        .ok_or_else(|| AppError::resource_not_found("Card", id))
}

async fn resolve_relevance<S: UnitOfWorkScope>(
    scope: &S,
    selector: RelevanceSelector,
) -> Result<Relevance, AppError> {
    let existing = match &selector {
        RelevanceSelector::ByDescription(description) => {
            scope.relevance_levels().get_by_description(description).await?
        }
        RelevanceSelector::ById { id, .. } => scope.relevance_levels().get(*id).await?,
    };
    if let Some(relevance) = existing {
        return Ok(relevance);
    }

    let mut relevance = match selector {
        RelevanceSelector::ByDescription(description) => Relevance::new(description),
        RelevanceSelector::ById { id, description } => Relevance::with_id(id, description),
    };
    scope
        .relevance_levels()
        .add(&mut relevance)
        .await
        .map_err(duplicate_of("Relevance"))?;
    tracing::debug!(relevance_id = ?relevance.id, description = %relevance.description, "relevance created");
    Ok(relevance)
}

async fn create_in_scope<S: UnitOfWorkScope>(
    scope: &mut S,
    input: CardInput,
) -> Result<Card, AppError> {
    let relevance = resolve_relevance(scope, input.relevance).await?;
    let mut card = Card::new(input.word_type, relevance, input.german, input.italian);
    if let Some(tags) = input.tags {
        card.set_tags(tags);
    }

    scope
        .cards()
        .add(&mut card)
        .await
        .map_err(duplicate_of("Card"))?;
    scope.commit().await.map_err(duplicate_of("Card"))?;
    scope.refresh(&mut card).await?;
    Ok(card)
}

async fn update_in_scope<S: UnitOfWorkScope>(
    scope: &mut S,
    id: i64,
    input: CardInput,
) -> Result<Card, AppError> {
    let mut card = load_card(scope, id).await?;

    card.relevance = resolve_relevance(scope, input.relevance).await?;
    card.word_type = input.word_type;
    card.german = input.german;
    card.italian = input.italian;
    if let Some(tags) = input.tags {
        card.set_tags(tags);
    }

    scope
        .cards()
        .update(&mut card)
        .await
        .map_err(duplicate_of("Card"))?;
    scope.commit().await.map_err(duplicate_of("Card"))?;
    scope.refresh(&mut card).await?;
    Ok(card)
}

async fn delete_in_scope<S: UnitOfWorkScope>(scope: &mut S, id: i64) -> Result<(), AppError> {
    let card = load_card(scope, id).await?;
    scope.cards().delete(&card).await?;
    scope.commit().await
}

async fn solve_in_scope<S: UnitOfWorkScope>(
    scope: &mut S,
    id: i64,
    solve_italian: bool,
    guess: &str,
) -> Result<SolveOutcome, AppError> {
    let mut card = load_card(scope, id).await?;
    let correct = card.solve(solve_italian, guess);

    scope.cards().update(&mut card).await?;
    scope.commit().await?;
    scope.refresh(&mut card).await?;
    Ok(SolveOutcome { correct, card })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::repositories::{
        CardRepository, MockCardRepository, MockRelevanceRepository, MockTagRepository,
        RelevanceRepository, TagRepository,
    };
    use crate::domain::unit_of_work::UnitOfWorkState;
    use crate::infrastructure::memory::FakeUnitOfWork;
    use async_trait::async_trait;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn input(german: &str, italian: &str) -> CardInput {
        CardInput {
            word_type: WordType::Verb,
            relevance: RelevanceSelector::ByDescription("Beginner".to_string()),
            german: german.to_string(),
            italian: italian.to_string(),
            tags: None,
        }
    }

    fn fake_service() -> (CardService<FakeUnitOfWork>, FakeUnitOfWork) {
        let uow = FakeUnitOfWork::new();
        (CardService::new(Arc::new(uow.clone())), uow)
    }

    /// Scope over mocked repositories that counts `close` calls.
    struct MockScope {
        cards: MockCardRepository,
        relevance_levels: MockRelevanceRepository,
        tags: MockTagRepository,
        commit_result: Option<AppError>,
        closed: Arc<AtomicUsize>,
    }

    #[async_trait]
    impl UnitOfWorkScope for MockScope {
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
            UnitOfWorkState::Active
        }
        async fn commit(&mut self) -> Result<(), AppError> {
            match self.commit_result.take() {
                Some(err) => Err(err),
                None => Ok(()),
            }
        }
        async fn rollback(&mut self) -> Result<(), AppError> {
            Ok(())
        }
        async fn refresh(&self, _card: &mut Card) -> Result<(), AppError> {
            Ok(())
        }
        async fn close(self) {
            self.closed.fetch_add(1, Ordering::SeqCst);
        }
    }

    struct MockUnitOfWork {
        scope: Mutex<Option<MockScope>>,
    }

    #[async_trait]
    impl UnitOfWork for MockUnitOfWork {
        type Scope = MockScope;

        async fn begin(&self) -> Result<MockScope, AppError> {
            self.scope
                .lock()
                .unwrap()
                .take()
                .ok_or_else(|| AppError::internal("scope already used", json!({})))
        }
    }

    fn mock_service(scope: MockScope) -> CardService<MockUnitOfWork> {
        CardService::new(Arc::new(MockUnitOfWork {
            scope: Mutex::new(Some(scope)),
        }))
    }

    fn mock_scope(closed: &Arc<AtomicUsize>) -> MockScope {
        MockScope {
            cards: MockCardRepository::new(),
            relevance_levels: MockRelevanceRepository::new(),
            tags: MockTagRepository::new(),
            commit_result: None,
            closed: Arc::clone(closed),
        }
    }

    #[tokio::test]
    async fn test_create_translates_integrity_to_duplicate() {
        let closed = Arc::new(AtomicUsize::new(0));
        let mut scope = mock_scope(&closed);

        scope
            .relevance_levels
            .expect_get_by_description()
            .withf(|d| d == "Beginner")
            .times(1)
            .returning(|_| Ok(Some(Relevance::with_id(1, "Beginner"))));
        scope
            .cards
            .expect_add()
            .times(1)
            .returning(|_| Err(AppError::integrity("Unique constraint violation", json!({}))));

        let service = mock_service(scope);
        let err = service
            .create_card(input("haben", "avere"))
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::DuplicateResource { .. }));
        assert_eq!(err.to_string(), "Identical Card already exists.");
        assert_eq!(closed.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_create_translates_commit_time_integrity() {
        let closed = Arc::new(AtomicUsize::new(0));
        let mut scope = mock_scope(&closed);
        scope.commit_result = Some(AppError::integrity("Unique constraint violation", json!({})));

        scope
            .relevance_levels
            .expect_get_by_description()
            .returning(|_| Ok(Some(Relevance::with_id(1, "Beginner"))));
        scope.cards.expect_add().times(1).returning(|card| {
            card.id = Some(1);
            Ok(())
        });

        let service = mock_service(scope);
        let err = service
            .create_card(input("haben", "avere"))
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::DuplicateResource { .. }));
        assert_eq!(closed.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_create_with_unknown_relevance_id_creates_it() {
        let closed = Arc::new(AtomicUsize::new(0));
        let mut scope = mock_scope(&closed);

        scope
            .relevance_levels
            .expect_get()
            .withf(|id| *id == 9)
            .times(1)
            .returning(|_| Ok(None));
        scope
            .relevance_levels
            .expect_add()
            .withf(|r| r.id == Some(9) && r.description == "Expert")
            .times(1)
            .returning(|_| Ok(()));
        scope
            .cards
            .expect_add()
            .withf(|card| card.relevance.id == Some(9))
            .times(1)
            .returning(|card| {
                card.id = Some(1);
                Ok(())
            });

        let service = mock_service(scope);
        let mut request = input("haben", "avere");
        request.relevance = RelevanceSelector::ById {
            id: 9,
            description: "Expert".to_string(),
        };
        let card = service.create_card(request).await.unwrap();

        assert_eq!(card.relevance, Relevance::with_id(9, "Expert"));
        assert_eq!(closed.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_read_missing_card_closes_scope() {
        let closed = Arc::new(AtomicUsize::new(0));
        let mut scope = mock_scope(&closed);
        scope.cards.expect_get().times(1).returning(|_| Ok(None));

        let service = mock_service(scope);
        let err = service.read_card(7).await.unwrap_err();

        assert!(matches!(err, AppError::NotFound { .. }));
        assert_eq!(err.to_string(), "Card with ID 7 not found.");
        assert_eq!(closed.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_read_cards_rejects_page_zero() {
        let (service, _) = fake_service();

        let err = service.read_cards(0, 10, CardOrder::Id).await.unwrap_err();
        assert!(matches!(err, AppError::Validation { .. }));

        let err = service.read_cards(1, 0, CardOrder::Id).await.unwrap_err();
        assert!(matches!(err, AppError::Validation { .. }));
    }

    #[tokio::test]
    async fn test_read_cards_passes_offset() {
        let closed = Arc::new(AtomicUsize::new(0));
        let mut scope = mock_scope(&closed);
        scope
            .cards
            .expect_get_list()
            .withf(|skip, limit, order| *skip == 20 && *limit == 10 && *order == CardOrder::German)
            .times(1)
            .returning(|_, _, _| Ok((25, vec![])));

        let service = mock_service(scope);
        let page = service.read_cards(3, 10, CardOrder::German).await.unwrap();

        assert_eq!(page.count_records, 25);
        assert_eq!(page.count_pages, 3);
        assert!(!page.has_next_page);
        assert!(page.has_previous_page);
    }

    #[tokio::test]
    async fn test_create_and_read_round_trip() {
        let (service, _) = fake_service();

        let mut request = input("der Hund", "il cane");
        request.word_type = WordType::Noun;
        request.tags = Some(vec!["animals".to_string(), "pets".to_string()]);
        let created = service.create_card(request).await.unwrap();

        let read = service.read_card(created.id.unwrap()).await.unwrap();
        assert_eq!(read.german, "der Hund");
        assert_eq!(read.italian, "il cane");
        assert_eq!(read.word_type, WordType::Noun);
        assert_eq!(read.relevance.description, "Beginner");
        assert_eq!(read.tag_values(), vec!["animals", "pets"]);
    }

    #[tokio::test]
    async fn test_duplicate_create_keeps_one_card() {
        let (service, uow) = fake_service();

        service.create_card(input("haben", "avere")).await.unwrap();
        let err = service
            .create_card(input("haben", "avere"))
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::DuplicateResource { .. }));
        assert_eq!(uow.store().card_count(), 1);
    }

    #[tokio::test]
    async fn test_relevance_is_shared() {
        let (service, _) = fake_service();

        let first = service.create_card(input("haben", "avere")).await.unwrap();
        let second = service.create_card(input("alt", "vecchio")).await.unwrap();

        assert_eq!(first.relevance.id, second.relevance.id);
        assert_eq!(service.list_relevance_levels().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_update_missing_card() {
        let (service, uow) = fake_service();
        service.create_card(input("haben", "avere")).await.unwrap();

        let err = service
            .update_card(99, input("alt", "vecchio"))
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::NotFound { .. }));
        assert_eq!(uow.store().card_count(), 1);
    }

    #[tokio::test]
    async fn test_update_keeps_statistics_and_tags_when_omitted() {
        let (service, _) = fake_service();
        let mut request = input("haben", "avere");
        request.tags = Some(vec!["verbs".to_string()]);
        let card = service.create_card(request).await.unwrap();
        let id = card.id.unwrap();
        service.solve_card(id, true, "avere").await.unwrap();

        let mut change = input("haben", "avere (aux)");
        change.relevance = RelevanceSelector::ByDescription("Advanced".to_string());
        let updated = service.update_card(id, change).await.unwrap();

        assert_eq!(updated.italian, "avere (aux)");
        assert_eq!(updated.relevance.description, "Advanced");
        assert_eq!(updated.tag_values(), vec!["verbs"]);
        assert_eq!(updated.statistics.times_played, 1);
    }

    #[tokio::test]
    async fn test_update_onto_existing_pair_is_duplicate() {
        let (service, _) = fake_service();
        service.create_card(input("haben", "avere")).await.unwrap();
        let other = service.create_card(input("alt", "vecchio")).await.unwrap();

        let err = service
            .update_card(other.id.unwrap(), input("haben", "avere"))
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::DuplicateResource { .. }));
    }

    #[tokio::test]
    async fn test_delete_card() {
        let (service, uow) = fake_service();
        let card = service.create_card(input("haben", "avere")).await.unwrap();
        service.create_card(input("alt", "vecchio")).await.unwrap();

        service.delete_card(card.id.unwrap()).await.unwrap();
        assert_eq!(uow.store().card_count(), 1);

        let err = service.delete_card(card.id.unwrap()).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound { .. }));
        assert_eq!(uow.store().card_count(), 1);
    }

    #[tokio::test]
    async fn test_solve_card_persists_statistics() {
        let (service, _) = fake_service();
        let card = service.create_card(input("haben", "avere")).await.unwrap();
        let id = card.id.unwrap();

        let outcome = service.solve_card(id, true, "avere").await.unwrap();
        assert!(outcome.correct);
        let outcome = service.solve_card(id, false, "sein").await.unwrap();
        assert!(!outcome.correct);

        let stored = service.read_card(id).await.unwrap();
        assert_eq!(stored.statistics.times_played, 2);
        assert_eq!(stored.statistics.correct_answers, 1);
        assert!(!stored.statistics.last_answer_correct);
    }

    #[tokio::test]
    async fn test_pagination_example() {
        let (service, _) = fake_service();
        service.create_card(input("haben", "avere")).await.unwrap();
        service.create_card(input("alt", "vecchio")).await.unwrap();

        let page = service.read_cards(1, 2, CardOrder::Id).await.unwrap();
        assert_eq!(page.records.len(), 2);
        assert!(!page.has_next_page);

        let page = service.read_cards(1, 1, CardOrder::Id).await.unwrap();
        assert_eq!(page.records[0].german, "haben");
        assert!(page.has_next_page);

        let page = service.read_cards(2, 1, CardOrder::Id).await.unwrap();
        assert_eq!(page.records[0].german, "alt");
        assert!(!page.has_next_page);
        assert!(page.has_previous_page);

        let page = service.read_cards(1, 2, CardOrder::German).await.unwrap();
        let german: Vec<_> = page.records.iter().map(|c| c.german.as_str()).collect();
        assert_eq!(german, vec!["alt", "haben"]);
    }
}
