//! Unit of work: one transactional session shared by all repositories.
//!
//! A [`UnitOfWork`] is a factory. Each call to [`UnitOfWork::begin`] opens a
//! fresh [`UnitOfWorkScope`]; the repositories it exposes share its session,
//! so their staged changes become visible to other scopes together on
//! [`UnitOfWorkScope::commit`] or not at all.
//!
//! # Lifecycle
//!
//! ```text
//! begin() -> NotStarted --first repository call--> Active
//! Active --commit()--> Committed --next repository call--> Active
//! Active --rollback()--> RolledBack
//! any --close()--> Closed
//! ```
//!
//! Callers must finish every scope with [`UnitOfWorkScope::close`], on the
//! error path too. `close` rolls back whatever was not committed. A scope
//! dropped without `close` still discards uncommitted work.

use async_trait::async_trait;

use crate::domain::entities::Card;
use crate::domain::repositories::{CardRepository, RelevanceRepository, TagRepository};
use crate::error::AppError;

/// Observable lifecycle state of a scope.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnitOfWorkState {
    /// Opened; no transaction has been started yet.
    NotStarted,
    /// A transaction is open and may hold staged changes.
    Active,
    Committed,
    RolledBack,
    /// Finished; repositories refuse further calls.
    Closed,
}

/// Factory for transactional scopes.
#[async_trait]
pub trait UnitOfWork: Send + Sync {
    type Scope: UnitOfWorkScope;

    /// Opens a new scope with its own session.
    async fn begin(&self) -> Result<Self::Scope, AppError>;
}

/// An open transactional session and the repositories bound to it.
#[async_trait]
pub trait UnitOfWorkScope: Send + Sync {
    fn cards(&self) -> &dyn CardRepository;

    fn relevance_levels(&self) -> &dyn RelevanceRepository;

    fn tags(&self) -> &dyn TagRepository;

    fn state(&self) -> UnitOfWorkState;

    /// Makes every staged change durable and visible to other scopes.
    ///
    /// # Errors
    ///
    /// A uniqueness conflict detected at commit time is reported as
    /// [`AppError::Integrity`]; nothing is persisted in that case.
    async fn commit(&mut self) -> Result<(), AppError>;

    /// Discards staged changes.
    async fn rollback(&mut self) -> Result<(), AppError>;

    /// Reloads `card` from the session, replacing every field.
    ///
    /// # Errors
    ///
    /// [`AppError::NotFound`] if the card is not (or no longer) stored,
    /// [`AppError::Internal`] if it has no id.
    async fn refresh(&self, card: &mut Card) -> Result<(), AppError>;

    /// Rolls back anything uncommitted and ends the session.
    ///
    /// Never fails: a rollback error is logged and the scope is closed anyway.
    async fn close(self)
    where
        Self: Sized;
}
