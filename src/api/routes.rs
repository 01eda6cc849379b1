//! API route configuration.

use crate::api::handlers::{
    card_list_handler, create_card_handler, delete_card_handler, get_card_handler,
    relevance_list_handler, solve_card_handler, tag_list_handler, update_card_handler,
};
use crate::state::AppState;
use axum::{
    Router,
    routing::{get, post},
};

/// All JSON API routes.
///
/// # Endpoints
///
/// - `GET    /cards`              - List cards (paginated)
/// - `POST   /cards`              - Create a card
/// - `GET    /cards/{id}`         - Read a card
/// - `PUT    /cards/{id}`         - Replace a card's content
/// - `DELETE /cards/{id}`         - Delete a card
/// - `POST   /cards/{id}/solve`   - Practise a card
/// - `GET    /relevance-levels`   - List relevance levels
/// - `GET    /tags`               - List tags
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/cards", get(card_list_handler).post(create_card_handler))
        .route(
            "/cards/{id}",
            get(get_card_handler)
                .put(update_card_handler)
                .delete(delete_card_handler),
        )
        .route("/cards/{id}/solve", post(solve_card_handler))
        .route("/relevance-levels", get(relevance_list_handler))
        .route("/tags", get(tag_list_handler))
}
