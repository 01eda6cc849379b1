//! Shared application state injected into every handler.

use std::sync::Arc;

use sqlx::SqlitePool;

use crate::application::services::CardService;
use crate::infrastructure::persistence::SqliteUnitOfWork;

#[derive(Clone)]
pub struct AppState {
    pub pool: SqlitePool,
    pub card_service: Arc<CardService<SqliteUnitOfWork>>,
    pub default_page_size: u32,
}

impl AppState {
    /// Wires the card service to a unit of work over `pool`.
    pub fn new(pool: SqlitePool, default_page_size: u32) -> Self {
        let uow = Arc::new(SqliteUnitOfWork::new(pool.clone()));
        Self {
            pool,
            card_service: Arc::new(CardService::new(uow)),
            default_page_size,
        }
    }
}
