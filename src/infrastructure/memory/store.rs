//! Shared committed state and per-scope working copies for the fake store.

use std::collections::BTreeSet;
use std::sync::{Arc, Mutex, MutexGuard};

use serde_json::json;

use crate::domain::entities::{Card, Relevance, Tag};
use crate::domain::unit_of_work::UnitOfWorkState;
use crate::error::AppError;

/// Complete contents of the fake store.
#[derive(Debug, Clone, Default)]
pub(crate) struct MemoryState {
    pub cards: Vec<Card>,
    pub relevance_levels: Vec<Relevance>,
    pub tags: Vec<Tag>,
    last_card_id: i64,
    last_relevance_id: i64,
    last_tag_id: i64,
}

impl MemoryState {
    pub fn next_card_id(&mut self) -> i64 {
        self.last_card_id += 1;
        self.last_card_id
    }

    pub fn next_tag_id(&mut self) -> i64 {
        self.last_tag_id += 1;
        self.last_tag_id
    }

    /// Adds a relevance level, honouring a preset id.
    pub fn insert_relevance(&mut self, relevance: &mut Relevance) -> Result<(), AppError> {
        let id_taken = relevance
            .id
            .is_some_and(|id| self.relevance_levels.iter().any(|r| r.id == Some(id)));
        if id_taken || self.relevance_levels.contains(relevance) {
            return Err(AppError::duplicate_resource("Relevance"));
        }

        let id = match relevance.id {
            Some(id) => id,
            None => self.last_relevance_id + 1,
        };
        self.last_relevance_id = self.last_relevance_id.max(id);
        relevance.id = Some(id);
        self.relevance_levels.push(relevance.clone());
        Ok(())
    }

    /// Stores a card's relevance level if it has no id yet.
    pub fn ensure_relevance(&mut self, relevance: &mut Relevance) -> Result<(), AppError> {
        if relevance.id.is_none() {
            self.insert_relevance(relevance)?;
        }
        Ok(())
    }

    /// Resolves every tag by value, creating unknown ones, and fills in ids.
    pub fn resolve_tags(&mut self, tags: &mut BTreeSet<Tag>) {
        let resolved = std::mem::take(tags)
            .into_iter()
            .map(|mut tag| {
                let known_id = self
                    .tags
                    .iter()
                    .find(|known| known.value == tag.value)
                    .and_then(|known| known.id);
                match known_id {
                    Some(id) => tag.id = Some(id),
                    None => {
                        tag.id = Some(self.next_tag_id());
                        self.tags.push(tag.clone());
                    }
                }
                tag
            })
            .collect();
        *tags = resolved;
    }
}

/// Committed contents shared by every scope of one fake unit of work.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    committed: Arc<Mutex<MemoryState>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<MutexGuard<'_, MemoryState>, AppError> {
        self.committed
            .lock()
            .map_err(|_| AppError::internal("Failed to acquire store lock", json!({})))
    }

    /// Number of committed cards.
    pub fn card_count(&self) -> usize {
        self.lock().map(|state| state.cards.len()).unwrap_or_default()
    }
}

struct SessionInner {
    working: Option<MemoryState>,
    state: UnitOfWorkState,
}

/// One scope's view of the store.
///
/// The first repository call copies the committed state; changes go to that
/// copy until `commit` publishes it. Concurrent scopes are last-writer-wins,
/// which is enough for tests.
pub(crate) struct MemorySession {
    store: MemoryStore,
    inner: Mutex<SessionInner>,
}

impl MemorySession {
    pub fn new(store: MemoryStore) -> Self {
        Self {
            store,
            inner: Mutex::new(SessionInner {
                working: None,
                state: UnitOfWorkState::NotStarted,
            }),
        }
    }

    fn lock(&self) -> Result<MutexGuard<'_, SessionInner>, AppError> {
        self.inner
            .lock()
            .map_err(|_| AppError::internal("Failed to acquire session lock", json!({})))
    }

    /// Runs `f` against the working copy, starting one if needed.
    pub fn with_state<R>(
        &self,
        f: impl FnOnce(&mut MemoryState) -> Result<R, AppError>,
    ) -> Result<R, AppError> {
        let mut inner = self.lock()?;
        if inner.state == UnitOfWorkState::Closed {
            return Err(AppError::internal(
                "Unit of work is closed",
                json!({ "state": "closed" }),
            ));
        }
        if inner.working.is_none() {
            inner.working = Some(self.store.lock()?.clone());
            inner.state = UnitOfWorkState::Active;
        }
        match inner.working.as_mut() {
            Some(working) => f(working),
            None => Err(AppError::internal("Working copy unavailable", json!({}))),
        }
    }

    pub fn state(&self) -> UnitOfWorkState {
        self.lock()
            .map(|inner| inner.state)
            .unwrap_or(UnitOfWorkState::Closed)
    }

    pub fn commit(&self) -> Result<(), AppError> {
        let mut inner = self.lock()?;
        if inner.state == UnitOfWorkState::Closed {
            return Err(AppError::internal(
                "Unit of work is closed",
                json!({ "state": "closed" }),
            ));
        }
        if let Some(working) = inner.working.take() {
            *self.store.lock()? = working;
        }
        inner.state = UnitOfWorkState::Committed;
        Ok(())
    }

    pub fn rollback(&self) -> Result<(), AppError> {
        let mut inner = self.lock()?;
        inner.working = None;
        if inner.state != UnitOfWorkState::Closed {
            inner.state = UnitOfWorkState::RolledBack;
        }
        Ok(())
    }

    pub fn close(&self) {
        if let Err(e) = self.rollback() {
            tracing::warn!(error = %e, "rollback on close failed");
        }
        if let Ok(mut inner) = self.lock() {
            inner.state = UnitOfWorkState::Closed;
        }
    }
}
