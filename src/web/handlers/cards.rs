//! Card listing page handler.

use askama::Template;
use askama_web::WebTemplate;
use axum::extract::{Query, State};
use serde_json::json;

use crate::api::dto::pagination::CardListParams;
use crate::domain::entities::{Card, WordType};
use crate::error::AppError;
use crate::state::AppState;

/// One table row of the card listing.
pub struct CardView {
    pub id: i64,
    pub word_type: String,
    pub relevance: String,
    pub german: String,
    pub italian: String,
    pub tags: String,
    pub times_played: i64,
    pub correct_answers: i64,
    pub wrong_answers: i64,
}

impl From<Card> for CardView {
    fn from(card: Card) -> Self {
        Self {
            id: card.id.unwrap_or_default(),
            word_type: card.word_type.to_string(),
            tags: card.tag_values().join(", "),
            times_played: card.statistics.times_played,
            correct_answers: card.statistics.correct_answers,
            wrong_answers: card.statistics.wrong_answers(),
            relevance: card.relevance.description,
            german: card.german,
            italian: card.italian,
        }
    }
}

/// Template for the card listing page.
///
/// Renders `templates/cards.html` with the current page of cards, the
/// navigation links and the word types accepted by the API.
#[derive(Template, WebTemplate)]
#[template(path = "cards.html")]
pub struct CardsTemplate {
    pub cards: Vec<CardView>,
    pub word_types: Vec<&'static str>,
    pub order: String,
    pub page_size: i64,
    pub current_page: i64,
    pub count_pages: i64,
    pub count_records: i64,
    pub has_next_page: bool,
    pub has_previous_page: bool,
}

/// Renders one page of cards.
///
/// # Endpoint
///
/// `GET /view/cards`
///
/// Accepts the same `page`, `page_size` and `order` query parameters as
/// `GET /cards`.
///
/// # Errors
///
/// Returns 400 if pagination parameters are invalid.
pub async fn cards_page_handler(
    State(state): State<AppState>,
    Query(params): Query<CardListParams>,
) -> Result<CardsTemplate, AppError> {
    let request = params
        .validate(state.default_page_size)
        .map_err(|e| AppError::bad_request(e, json!({})))?;

    let page = state
        .card_service
        .read_cards(request.page, request.page_size, request.order)
        .await?
        .map(CardView::from);

    Ok(CardsTemplate {
        cards: page.records,
        word_types: WordType::all(),
        order: request.order.to_string(),
        page_size: page.page_size,
        current_page: page.current_page,
        count_pages: page.count_pages,
        count_records: page.count_records,
        has_next_page: page.has_next_page,
        has_previous_page: page.has_previous_page,
    })
}
