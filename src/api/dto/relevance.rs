//! DTOs for relevance levels.

use serde::Serialize;

use crate::domain::entities::Relevance;

#[derive(Debug, Serialize)]
pub struct RelevanceItem {
    pub id: Option<i64>,
    pub description: String,
}

impl From<Relevance> for RelevanceItem {
    fn from(r: Relevance) -> Self {
        Self {
            id: r.id,
            description: r.description,
        }
    }
}

/// Response containing all relevance levels.
#[derive(Debug, Serialize)]
pub struct RelevanceListResponse {
    pub items: Vec<RelevanceItem>,
}
