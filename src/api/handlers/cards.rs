//! Handlers for card endpoints.

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use serde_json::json;
use validator::Validate;

use crate::api::dto::card::{CardRequest, CardResponse, SolveRequest, SolveResponse};
use crate::api::dto::pagination::{CardListParams, CardPageResponse};
use crate::error::AppError;
use crate::state::AppState;

/// Creates a new card.
///
/// # Endpoint
///
/// `POST /cards`
///
/// # Request Body
///
/// ```json
/// {
///   "word_type": "VERB",
///   "relevance_description": "A1",
///   "german": "haben",
///   "italian": "avere",
///   "tags": ["basics"]
/// }
/// ```
///
/// # Errors
///
/// Returns 400 if validation fails or an identical card already exists.
pub async fn create_card_handler(
    State(state): State<AppState>,
    Json(payload): Json<CardRequest>,
) -> Result<(StatusCode, Json<CardResponse>), AppError> {
    payload.validate()?;

    let card = state.card_service.create_card(payload.into_input()).await?;

    Ok((StatusCode::CREATED, Json(card.into())))
}

/// Lists cards one page at a time.
///
/// # Endpoint
///
/// `GET /cards`
///
/// # Query Parameters
///
/// - `page` (optional): Page number (default: 1)
/// - `page_size` (optional): Cards per page (default from configuration, max: 1000)
/// - `order` (optional): `id` (default) or `german`
///
/// # Errors
///
/// Returns 400 Bad Request if pagination parameters are invalid.
pub async fn card_list_handler(
    State(state): State<AppState>,
    Query(params): Query<CardListParams>,
) -> Result<Json<CardPageResponse>, AppError> {
    let request = params
        .validate(state.default_page_size)
        .map_err(|e| AppError::bad_request(e, json!({})))?;

    let page = state
        .card_service
        .read_cards(request.page, request.page_size, request.order)
        .await?;

    Ok(Json(page.into()))
}

/// Returns a single card.
///
/// # Endpoint
///
/// `GET /cards/{id}`
///
/// # Errors
///
/// Returns 404 if the card does not exist.
pub async fn get_card_handler(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<CardResponse>, AppError> {
    let card = state.card_service.read_card(id).await?;
    Ok(Json(card.into()))
}

/// Replaces the content of a card. Statistics are kept.
///
/// # Endpoint
///
/// `PUT /cards/{id}`
///
/// Omitting `tags` keeps the current tags; `"tags": []` removes them all.
///
/// # Errors
///
/// Returns 400 if validation fails or the new terms collide with another card.
/// Returns 404 if the card does not exist.
pub async fn update_card_handler(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(payload): Json<CardRequest>,
) -> Result<Json<CardResponse>, AppError> {
    payload.validate()?;

    let card = state
        .card_service
        .update_card(id, payload.into_input())
        .await?;

    Ok(Json(card.into()))
}

/// Deletes a card and its tag links.
///
/// # Endpoint
///
/// `DELETE /cards/{id}`
///
/// # Errors
///
/// Returns 404 if the card does not exist.
pub async fn delete_card_handler(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<StatusCode, AppError> {
    state.card_service.delete_card(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Checks a guess and records the attempt in the card statistics.
///
/// # Endpoint
///
/// `POST /cards/{id}/solve`
///
/// # Request Body
///
/// ```json
/// { "solve_italian": true, "guess": "avere" }
/// ```
///
/// # Errors
///
/// Returns 400 if the guess is empty.
/// Returns 404 if the card does not exist.
pub async fn solve_card_handler(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(payload): Json<SolveRequest>,
) -> Result<Json<SolveResponse>, AppError> {
    payload.validate()?;

    let outcome = state
        .card_service
        .solve_card(id, payload.solve_italian, &payload.guess)
        .await?;

    Ok(Json(SolveResponse {
        correct: outcome.correct,
        card: outcome.card.into(),
    }))
}
