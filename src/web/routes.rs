//! HTML view route configuration.

use crate::state::AppState;
use crate::web::handlers::cards_page_handler;
use axum::{Router, routing::get};

/// Server-rendered pages, nested under `/view`.
///
/// # Endpoints
///
/// - `GET /cards` - Paginated card listing
pub fn view_routes() -> Router<AppState> {
    Router::new().route("/cards", get(cards_page_handler))
}
