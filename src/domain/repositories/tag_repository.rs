//! Repository trait for tags.

use crate::domain::entities::Tag;
use crate::error::AppError;
use async_trait::async_trait;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TagRepository: Send + Sync {
    /// Stages a new tag and writes the assigned id back.
    ///
    /// # Errors
    ///
    /// An existing value is reported as [`AppError::Integrity`] by the SQLite
    /// store and as [`AppError::DuplicateResource`] by the fake.
    async fn add(&self, tag: &mut Tag) -> Result<(), AppError>;

    /// Returns every tag, ordered by value.
    async fn all(&self) -> Result<Vec<Tag>, AppError>;

    async fn get_by_value(&self, value: &str) -> Result<Option<Tag>, AppError>;

    /// Stages removal of a tag; its card associations go with it.
    async fn delete(&self, tag: &Tag) -> Result<(), AppError>;
}
