//! Repository trait for relevance levels.

use crate::domain::entities::Relevance;
use crate::error::AppError;
use async_trait::async_trait;

/// Repository interface for relevance levels.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::SqliteRelevanceRepository`] - SQLite implementation
/// - [`crate::infrastructure::memory::FakeRelevanceRepository`] - in-memory fake
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RelevanceRepository: Send + Sync {
    /// Stages a new relevance level.
    ///
    /// A preset id is kept; otherwise the assigned id is written back.
    ///
    /// # Errors
    ///
    /// A description or id that already exists is reported as
    /// [`AppError::Integrity`] by the SQLite store and as
    /// [`AppError::DuplicateResource`] by the fake.
    async fn add(&self, relevance: &mut Relevance) -> Result<(), AppError>;

    /// Returns every relevance level, ordered by id.
    async fn all(&self) -> Result<Vec<Relevance>, AppError>;

    async fn get(&self, id: i64) -> Result<Option<Relevance>, AppError>;

    /// Finds a relevance level by its exact description.
    async fn get_by_description(&self, description: &str) -> Result<Option<Relevance>, AppError>;

    /// Stages removal of a relevance level. Unknown levels are ignored.
    ///
    /// # Errors
    ///
    /// Fails while any card still references the level.
    async fn delete(&self, relevance: &Relevance) -> Result<(), AppError>;
}
