mod common;

use vocab_cards::domain::entities::{Card, Relevance, WordType};
use vocab_cards::domain::repositories::CardOrder;
use vocab_cards::domain::unit_of_work::{UnitOfWork, UnitOfWorkScope};
use vocab_cards::error::AppError;
use vocab_cards::infrastructure::persistence::SqliteUnitOfWork;

fn card(german: &str, italian: &str) -> Card {
    Card::new(WordType::Noun, Relevance::new("Beginner"), german, italian)
}

#[tokio::test]
async fn test_add_and_get_card() {
    let pool = common::test_pool().await;
    let uow = SqliteUnitOfWork::new(pool.clone());

    let mut scope = uow.begin().await.unwrap();
    let mut new_card = card("der Hund", "il cane");
    new_card.set_tags(["animals", "pets"]);
    scope.cards().add(&mut new_card).await.unwrap();
    scope.commit().await.unwrap();
    scope.close().await;

    let id = new_card.id.unwrap();
    assert!(new_card.relevance.id.is_some());
    assert!(new_card.tags.iter().all(|tag| tag.id.is_some()));

    let scope = uow.begin().await.unwrap();
    let stored = scope.cards().get(id).await.unwrap().unwrap();
    scope.close().await;

    assert_eq!(stored, new_card);
    assert_eq!(stored.word_type, WordType::Noun);
    assert_eq!(stored.relevance.description, "Beginner");
    assert_eq!(stored.tag_values(), vec!["animals", "pets"]);
    assert_eq!(stored.statistics.times_played, 0);
}

#[tokio::test]
async fn test_get_missing_card_is_none() {
    let pool = common::test_pool().await;
    let uow = SqliteUnitOfWork::new(pool);

    let scope = uow.begin().await.unwrap();
    let result = scope.cards().get(404).await.unwrap();
    scope.close().await;

    assert!(result.is_none());
}

#[tokio::test]
async fn test_duplicate_pair_is_integrity_error() {
    let pool = common::test_pool().await;
    let uow = SqliteUnitOfWork::new(pool.clone());

    let mut scope = uow.begin().await.unwrap();
    let mut first = card("haben", "avere");
    scope.cards().add(&mut first).await.unwrap();

    let mut second = card("haben", "avere");
    second.relevance = first.relevance.clone();
    let result = scope.cards().add(&mut second).await;
    scope.close().await;

    assert!(matches!(result, Err(AppError::Integrity { .. })));
}

#[tokio::test]
async fn test_relevance_is_shared_between_cards() {
    let pool = common::test_pool().await;
    let uow = SqliteUnitOfWork::new(pool.clone());

    let mut scope = uow.begin().await.unwrap();
    let relevance = {
        let mut r = Relevance::new("Beginner");
        scope.relevance_levels().add(&mut r).await.unwrap();
        r
    };
    for (german, italian) in [("haben", "avere"), ("sein", "essere")] {
        let mut c = Card::new(WordType::Verb, relevance.clone(), german, italian);
        scope.cards().add(&mut c).await.unwrap();
    }
    scope.commit().await.unwrap();
    scope.close().await;

    assert_eq!(common::count(&pool, "relevance").await, 1);
    assert_eq!(common::count(&pool, "card").await, 2);
}

#[tokio::test]
async fn test_delete_card_removes_links_not_tags() {
    let pool = common::test_pool().await;
    let uow = SqliteUnitOfWork::new(pool.clone());

    let mut scope = uow.begin().await.unwrap();
    let mut tagged = card("der Hund", "il cane");
    tagged.set_tags(["animals", "pets"]);
    scope.cards().add(&mut tagged).await.unwrap();
    let mut other = card("die Katze", "il gatto");
    other.relevance = tagged.relevance.clone();
    other.set_tags(["animals"]);
    scope.cards().add(&mut other).await.unwrap();
    scope.commit().await.unwrap();
    scope.close().await;

    assert_eq!(common::count(&pool, "card_has_tag").await, 3);

    let mut scope = uow.begin().await.unwrap();
    scope.cards().delete(&tagged).await.unwrap();
    scope.commit().await.unwrap();
    scope.close().await;

    assert_eq!(common::count(&pool, "card").await, 1);
    assert_eq!(common::count(&pool, "card_has_tag").await, 1);
    assert_eq!(common::count(&pool, "tag").await, 2);
}

#[tokio::test]
async fn test_update_replaces_tags_and_statistics() {
    let pool = common::test_pool().await;
    let uow = SqliteUnitOfWork::new(pool.clone());

    let mut scope = uow.begin().await.unwrap();
    let mut c = card("der Hund", "il cane");
    c.set_tags(["animals"]);
    scope.cards().add(&mut c).await.unwrap();
    scope.commit().await.unwrap();
    scope.close().await;

    let mut scope = uow.begin().await.unwrap();
    c.set_tags(["pets"]);
    c.solve(true, "il cane");
    scope.cards().update(&mut c).await.unwrap();
    scope.commit().await.unwrap();
    let stored = scope.cards().get(c.id.unwrap()).await.unwrap().unwrap();
    scope.close().await;

    assert_eq!(stored.tag_values(), vec!["pets"]);
    assert_eq!(stored.statistics.times_played, 1);
    assert_eq!(stored.statistics.correct_answers, 1);
    assert!(stored.statistics.last_answer_correct);
    assert!(stored.statistics.last_played.is_some());
}

#[tokio::test]
async fn test_get_list_orders_and_counts() {
    let pool = common::test_pool().await;
    let uow = SqliteUnitOfWork::new(pool.clone());

    let mut scope = uow.begin().await.unwrap();
    let mut relevance = Relevance::new("Beginner");
    scope.relevance_levels().add(&mut relevance).await.unwrap();
    for (german, italian) in [
        ("die Zeit", "il tempo"),
        ("der Apfel", "la mela"),
        ("das Haus", "la casa"),
    ] {
        let mut c = Card::new(WordType::Noun, relevance.clone(), german, italian);
        scope.cards().add(&mut c).await.unwrap();
    }
    scope.commit().await.unwrap();

    let (count, by_id) = scope.cards().get_list(0, 2, CardOrder::Id).await.unwrap();
    let (_, by_german) = scope
        .cards()
        .get_list(0, 10, CardOrder::German)
        .await
        .unwrap();
    let (_, past_end) = scope.cards().get_list(10, 2, CardOrder::Id).await.unwrap();
    scope.close().await;

    assert_eq!(count, 3);
    assert_eq!(
        by_id.iter().map(|c| c.german.as_str()).collect::<Vec<_>>(),
        vec!["die Zeit", "der Apfel"]
    );
    assert_eq!(
        by_german.iter().map(|c| c.german.as_str()).collect::<Vec<_>>(),
        vec!["der Apfel", "das Haus", "die Zeit"]
    );
    assert!(past_end.is_empty());
}
