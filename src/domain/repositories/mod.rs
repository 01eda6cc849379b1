//! Repository trait definitions for the domain layer.
//!
//! These traits abstract data access following the Repository pattern.
//! Instances are never constructed directly by callers: a
//! [`crate::domain::unit_of_work::UnitOfWorkScope`] hands out one of each,
//! all bound to the same transactional session.
//!
//! # Available Repositories
//!
//! - [`CardRepository`] - Card CRUD and paginated listing
//! - [`RelevanceRepository`] - Relevance level lookups
//! - [`TagRepository`] - Tag lookups
//!
//! # Testing
//!
//! Mock implementations are auto-generated via `mockall` under `cfg(test)`.
//! See integration tests in `tests/repository_*.rs` for the SQLite store.

pub mod card_repository;
pub mod relevance_repository;
pub mod tag_repository;

pub use card_repository::{CardOrder, CardRepository, ParseCardOrderError};
pub use relevance_repository::RelevanceRepository;
pub use tag_repository::TagRepository;

#[cfg(test)]
pub use card_repository::MockCardRepository;
#[cfg(test)]
pub use relevance_repository::MockRelevanceRepository;
#[cfg(test)]
pub use tag_repository::MockTagRepository;
