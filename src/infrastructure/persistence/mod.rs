//! SQLite persistence.
//!
//! Concrete implementations of the domain repository and unit of work traits
//! using SQLx runtime queries.
//!
//! # Components
//!
//! - [`database`] - Pool construction and migrations
//! - [`SqliteUnitOfWork`] - Opens one transactional session per scope
//! - [`SqliteCardRepository`] - Cards with relevance and tags
//! - [`SqliteRelevanceRepository`] - Relevance levels
//! - [`SqliteTagRepository`] - Tags
//!
//! Repositories are only created by [`SqliteUnitOfWork::begin`] and share that
//! scope's [`session::SqliteSession`].

pub mod database;
pub mod session;
pub mod sqlite_card_repository;
pub mod sqlite_relevance_repository;
pub mod sqlite_tag_repository;
pub mod sqlite_unit_of_work;

mod rows;

pub use database::PoolSettings;
pub use session::SqliteSession;
pub use sqlite_card_repository::SqliteCardRepository;
pub use sqlite_relevance_repository::SqliteRelevanceRepository;
pub use sqlite_tag_repository::SqliteTagRepository;
pub use sqlite_unit_of_work::{SqliteUnitOfWork, SqliteUnitOfWorkScope};
