//! Pagination query parameters and paged responses.

use serde::{Deserialize, Serialize};
use serde_with::{DisplayFromStr, serde_as};

use crate::api::dto::card::CardResponse;
use crate::application::pagination::PaginationResult;
use crate::config::MAX_PAGE_SIZE;
use crate::domain::entities::Card;
use crate::domain::repositories::CardOrder;

/// Query parameters of card listings.
///
/// Uses `serde_with` to parse numbers and the order from query strings.
#[serde_as]
#[derive(Debug, Default, Deserialize)]
pub struct CardListParams {
    #[serde_as(as = "Option<DisplayFromStr>")]
    #[serde(default)]
    pub page: Option<u32>,

    #[serde_as(as = "Option<DisplayFromStr>")]
    #[serde(default)]
    pub page_size: Option<u32>,

    #[serde_as(as = "Option<DisplayFromStr>")]
    #[serde(default)]
    pub order: Option<CardOrder>,
}

/// Validated listing request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub page: i64,
    pub page_size: i64,
    pub order: CardOrder,
}

impl CardListParams {
    /// Applies defaults and checks bounds.
    ///
    /// # Defaults
    ///
    /// - `page`: 1
    /// - `page_size`: `default_page_size` (from configuration)
    /// - `order`: by id
    ///
    /// # Validation
    ///
    /// - Page must be > 0
    /// - Page size must be between 1 and [`MAX_PAGE_SIZE`]
    pub fn validate(&self, default_page_size: u32) -> Result<PageRequest, String> {
        let page = self.page.unwrap_or(1);
        let page_size = self.page_size.unwrap_or(default_page_size);

        if page == 0 {
            return Err("Page must be greater than 0".to_string());
        }

        if !(1..=MAX_PAGE_SIZE).contains(&page_size) {
            return Err(format!("Page size must be between 1 and {MAX_PAGE_SIZE}"));
        }

        Ok(PageRequest {
            page: i64::from(page),
            page_size: i64::from(page_size),
            order: self.order.unwrap_or_default(),
        })
    }
}

/// One page of cards.
#[derive(Debug, Serialize)]
pub struct CardPageResponse {
    pub records: Vec<CardResponse>,
    pub count_records: i64,
    pub page_size: i64,
    pub count_pages: i64,
    pub current_page: i64,
    pub has_next_page: bool,
    pub has_previous_page: bool,
}

impl From<PaginationResult<Card>> for CardPageResponse {
    fn from(page: PaginationResult<Card>) -> Self {
        let page = page.map(CardResponse::from);
        Self {
            records: page.records,
            count_records: page.count_records,
            page_size: page.page_size,
            count_pages: page.count_pages,
            current_page: page.current_page,
            has_next_page: page.has_next_page,
            has_previous_page: page.has_previous_page,
        }
    }
}
