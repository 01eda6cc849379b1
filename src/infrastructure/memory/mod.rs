//! In-memory unit of work and repositories.
//!
//! Behaves like the SQLite store for everything the services rely on
//! (id assignment, cascades, ordering, isolation until commit) but reports
//! duplicates eagerly as [`crate::error::AppError::DuplicateResource`].
//! Intended for tests.

pub mod fake_card_repository;
pub mod fake_relevance_repository;
pub mod fake_tag_repository;
pub mod fake_unit_of_work;

mod store;

pub use fake_card_repository::FakeCardRepository;
pub use fake_relevance_repository::FakeRelevanceRepository;
pub use fake_tag_repository::FakeTagRepository;
pub use fake_unit_of_work::{FakeUnitOfWork, FakeUnitOfWorkScope};
pub use store::MemoryStore;
