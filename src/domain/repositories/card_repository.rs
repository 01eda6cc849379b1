//! Repository trait for card data access.

use std::fmt;
use std::str::FromStr;

use crate::domain::entities::Card;
use crate::error::AppError;
use async_trait::async_trait;
use thiserror::Error;

/// Ordering applied by [`CardRepository::get_list`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CardOrder {
    /// Ascending store id (insertion order).
    #[default]
    Id,
    /// German term with a leading article ignored, then id.
    German,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown card order '{0}', expected 'id' or 'german'")]
pub struct ParseCardOrderError(pub String);

impl fmt::Display for CardOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CardOrder::Id => f.write_str("id"),
            CardOrder::German => f.write_str("german"),
        }
    }
}

impl FromStr for CardOrder {
    type Err = ParseCardOrderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "id" => Ok(CardOrder::Id),
            "german" => Ok(CardOrder::German),
            _ => Err(ParseCardOrderError(s.to_string())),
        }
    }
}

/// Repository interface for cards.
///
/// Every method runs inside the unit of work that handed out the repository;
/// nothing is visible to other units of work before that unit commits.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::SqliteCardRepository`] - SQLite implementation
/// - [`crate::infrastructure::memory::FakeCardRepository`] - in-memory fake
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CardRepository: Send + Sync {
    /// Stages a new card.
    ///
    /// Writes the assigned id back into `card`. An unsaved relevance level
    /// is added with it and tags are resolved by value, creating missing
    /// ones; their ids are written back as well.
    ///
    /// # Errors
    ///
    /// The SQLite store reports an identical German/Italian pair as
    /// [`AppError::Integrity`], either here or at commit. The in-memory fake
    /// reports it immediately as [`AppError::DuplicateResource`].
    async fn add(&self, card: &mut Card) -> Result<(), AppError>;

    /// Returns every card, ordered by id.
    async fn all(&self) -> Result<Vec<Card>, AppError>;

    /// Finds a card by id.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(Card))` if found
    /// - `Ok(None)` if not found
    async fn get(&self, id: i64) -> Result<Option<Card>, AppError>;

    /// Returns the total card count and the window `[skip, skip + limit)`
    /// in the requested order.
    ///
    /// A window past the end yields an empty list with the full count.
    async fn get_list(
        &self,
        skip: i64,
        limit: i64,
        order: CardOrder,
    ) -> Result<(i64, Vec<Card>), AppError>;

    /// Writes the card's fields, statistics and tag set back to the store.
    ///
    /// Cascades to the relevance level and tags like [`CardRepository::add`].
    /// A card without id, or with an id the store does not know, is ignored.
    ///
    /// # Errors
    ///
    /// Same duplicate reporting as [`CardRepository::add`].
    async fn update(&self, card: &mut Card) -> Result<(), AppError>;

    /// Stages removal of a card and its tag associations.
    ///
    /// Tags and the relevance level themselves survive. Removing an unknown
    /// card is a no-op.
    async fn delete(&self, card: &Card) -> Result<(), AppError>;
}
