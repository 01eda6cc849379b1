//! Top-level router configuration combining API and view routes.
//!
//! # Route Structure
//!
//! - `GET  /health`                 - Health check (database)
//! - `/cards`, `/relevance-levels`,
//!   `/tags`                        - JSON API
//! - `/view/*`                      - Server-rendered HTML
//!
//! # Middleware
//!
//! - **Tracing** - Structured request/response logging
//! - **Path normalization** - Trailing slash handling

use crate::api;
use crate::api::handlers::health_handler;
use crate::api::middleware::tracing;
use crate::state::AppState;
use crate::web;
use axum::Router;
use axum::routing::get;
use tower::Layer;
use tower_http::normalize_path::{NormalizePath, NormalizePathLayer};

/// Constructs the application router with all routes and middleware.
pub fn app_router(state: AppState) -> NormalizePath<Router> {
    let router = Router::new()
        .route("/health", get(health_handler))
        .merge(api::routes::api_routes())
        .nest("/view", web::routes::view_routes())
        .with_state(state)
        .layer(tracing::layer());

    NormalizePathLayer::trim_trailing_slash().layer(router)
}
