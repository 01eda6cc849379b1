#![allow(dead_code)]

use sqlx::SqlitePool;
use std::time::Duration;
use vocab_cards::infrastructure::persistence::{PoolSettings, database};
use vocab_cards::state::AppState;

/// Fresh in-memory database with the schema applied.
pub async fn test_pool() -> SqlitePool {
    let pool = database::connect(&PoolSettings::in_memory())
        .await
        .unwrap();
    database::migrate(&pool).await.unwrap();
    pool
}

/// Migrated database in a temporary file, shared by several connections.
///
/// Keep the returned directory alive for as long as the pool is used.
pub async fn file_pool(max_connections: u32) -> (SqlitePool, tempfile::TempDir) {
    let dir = tempfile::tempdir().unwrap();
    let settings = PoolSettings {
        url: format!("sqlite://{}", dir.path().join("cards.db").display()),
        max_connections,
        acquire_timeout: Duration::from_secs(10),
    };
    let pool = database::connect(&settings).await.unwrap();
    database::migrate(&pool).await.unwrap();
    (pool, dir)
}

pub fn create_test_state(pool: SqlitePool) -> AppState {
    AppState::new(pool, 100)
}

pub async fn create_test_relevance(pool: &SqlitePool, description: &str) -> i64 {
    sqlx::query_scalar("INSERT INTO relevance (description) VALUES (?) RETURNING id")
        .bind(description)
        .fetch_one(pool)
        .await
        .unwrap()
}

pub async fn count(pool: &SqlitePool, table: &str) -> i64 {
    sqlx::query_scalar(&format!("SELECT COUNT(*) FROM {table}"))
        .fetch_one(pool)
        .await
        .unwrap()
}

pub fn card_body(german: &str, italian: &str) -> serde_json::Value {
    serde_json::json!({
        "word_type": "NOUN",
        "relevance_description": "Beginner",
        "german": german,
        "italian": italian,
    })
}
