//! Transactional session shared by the SQLite repositories of one scope.

use std::ops::{Deref, DerefMut};

use serde_json::json;
use sqlx::{Sqlite, SqlitePool, Transaction};
use tokio::sync::{Mutex, MutexGuard};

use crate::domain::unit_of_work::UnitOfWorkState;
use crate::error::AppError;

struct SessionInner {
    tx: Option<Transaction<'static, Sqlite>>,
    state: UnitOfWorkState,
}

/// Exclusive access to the open transaction of a session.
///
/// Only handed out once `tx` is set, and the lock keeps it that way.
pub struct TxGuard<'a>(MutexGuard<'a, SessionInner>);

impl Deref for TxGuard<'_> {
    type Target = Transaction<'static, Sqlite>;

    fn deref(&self) -> &Self::Target {
        match self.0.tx.as_ref() {
            Some(tx) => tx,
            None => unreachable!("TxGuard created without a transaction"),
        }
    }
}

impl DerefMut for TxGuard<'_> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        match self.0.tx.as_mut() {
            Some(tx) => tx,
            None => unreachable!("TxGuard created without a transaction"),
        }
    }
}

/// Lazily started SQLite transaction.
///
/// The first repository call begins a transaction on a pooled connection.
/// Dropping the session with a transaction still open rolls it back.
pub struct SqliteSession {
    pool: SqlitePool,
    inner: Mutex<SessionInner>,
}

impl SqliteSession {
    pub fn new(pool: SqlitePool) -> Self {
        Self {
            pool,
            inner: Mutex::new(SessionInner {
                tx: None,
                state: UnitOfWorkState::NotStarted,
            }),
        }
    }

    /// Returns the open transaction, beginning one if needed.
    ///
    /// Transactions start with `BEGIN IMMEDIATE` so a scope holds the write
    /// lock from its first statement. Concurrent scopes then queue on the
    /// busy timeout instead of failing a read-to-write lock upgrade.
    ///
    /// The guard keeps other repositories of the same scope out until the
    /// caller's statements are done.
    pub async fn transaction(&self) -> Result<TxGuard<'_>, AppError> {
        let mut inner = self.inner.lock().await;
        if inner.state == UnitOfWorkState::Closed {
            return Err(AppError::internal(
                "Unit of work is closed",
                json!({ "state": "closed" }),
            ));
        }
        if inner.tx.is_none() {
            inner.tx = Some(self.pool.begin_with("BEGIN IMMEDIATE").await?);
            inner.state = UnitOfWorkState::Active;
            tracing::debug!("transaction started");
        }

        Ok(TxGuard(inner))
    }

    pub async fn state(&self) -> UnitOfWorkState {
        self.inner.lock().await.state
    }

    /// Non-blocking state read; `None` while a statement holds the session.
    pub fn try_state(&self) -> Option<UnitOfWorkState> {
        self.inner.try_lock().ok().map(|inner| inner.state)
    }

    pub async fn commit(&self) -> Result<(), AppError> {
        let mut inner = self.inner.lock().await;
        if inner.state == UnitOfWorkState::Closed {
            return Err(AppError::internal(
                "Unit of work is closed",
                json!({ "state": "closed" }),
            ));
        }
        if let Some(tx) = inner.tx.take() {
            if let Err(e) = tx.commit().await {
                inner.state = UnitOfWorkState::RolledBack;
                tracing::debug!(error = %e, "commit failed, transaction discarded");
                return Err(e.into());
            }
            tracing::debug!("transaction committed");
        }
        inner.state = UnitOfWorkState::Committed;
        Ok(())
    }

    pub async fn rollback(&self) -> Result<(), AppError> {
        let mut inner = self.inner.lock().await;
        if let Some(tx) = inner.tx.take() {
            tx.rollback().await?;
            tracing::debug!("transaction rolled back");
        }
        if inner.state != UnitOfWorkState::Closed {
            inner.state = UnitOfWorkState::RolledBack;
        }
        Ok(())
    }

    pub async fn close(&self) {
        if let Err(e) = self.rollback().await {
            tracing::warn!(error = %e, "rollback on close failed");
        }
        self.inner.lock().await.state = UnitOfWorkState::Closed;
        tracing::debug!("unit of work closed");
    }
}
