//! # Vocab Cards
//!
//! A vocabulary flashcard service for German/Italian word pairs, built with
//! Axum and SQLite.
//!
//! ## Architecture
//!
//! The crate keeps the usual layer separation:
//!
//! - **Domain Layer** ([`domain`]) - Entities, repository traits and the unit of work contract
//! - **Application Layer** ([`application`]) - Card use cases and pagination
//! - **Infrastructure Layer** ([`infrastructure`]) - SQLite persistence and in-memory fakes
//! - **API Layer** ([`api`]) - REST API handlers, DTOs, and middleware
//! - **Web Layer** ([`web`]) - Server-rendered card listing
//!
//! ## Features
//!
//! - Cards with word type, relevance level, free-form tags and practice statistics
//! - Relevance levels and tags created on demand
//! - Paginated listings ordered by id or by German term
//! - One transaction per use case, rolled back unless committed
//!
//! ## Quick Start
//!
//! ```bash
//! # Pick a database target (production, stage, local_test, in_memory_test)
//! export USE_DB=stage
//!
//! # Start the service; migrations run on startup
//! cargo run
//! ```
//!
//! ## Configuration
//!
//! Service configuration is loaded from environment variables via [`config::Config`].
//! See [`config`] module for available options.

pub mod api;
pub mod application;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod state;

pub mod config;
pub mod server;

pub mod routes;
pub mod web;

pub use error::AppError;
pub use state::AppState;

/// Commonly used types for external consumers.
///
/// Re-exports frequently used types to simplify imports for library users
/// and integration tests.
pub mod prelude {
    pub use crate::application::pagination::PaginationResult;
    pub use crate::application::services::{CardInput, CardService, RelevanceSelector};
    pub use crate::domain::entities::{Card, Relevance, Tag, WordType};
    pub use crate::domain::repositories::CardOrder;
    pub use crate::domain::unit_of_work::{UnitOfWork, UnitOfWorkScope, UnitOfWorkState};
    pub use crate::error::AppError;
    pub use crate::state::AppState;
}
