//! Handler for relevance level listing.

use axum::{Json, extract::State};

use crate::api::dto::relevance::RelevanceListResponse;
use crate::error::AppError;
use crate::state::AppState;

/// Lists all relevance levels.
///
/// # Endpoint
///
/// `GET /relevance-levels`
pub async fn relevance_list_handler(
    State(state): State<AppState>,
) -> Result<Json<RelevanceListResponse>, AppError> {
    let levels = state.card_service.list_relevance_levels().await?;

    Ok(Json(RelevanceListResponse {
        items: levels.into_iter().map(Into::into).collect(),
    }))
}
