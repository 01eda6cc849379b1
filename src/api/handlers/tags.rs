//! Handler for tag listing.

use axum::{Json, extract::State};

use crate::api::dto::tag::TagListResponse;
use crate::error::AppError;
use crate::state::AppState;

/// Lists all tags in alphabetical order.
///
/// # Endpoint
///
/// `GET /tags`
pub async fn tag_list_handler(
    State(state): State<AppState>,
) -> Result<Json<TagListResponse>, AppError> {
    let tags = state.card_service.list_tags().await?;

    Ok(Json(TagListResponse {
        items: tags.into_iter().map(Into::into).collect(),
    }))
}
