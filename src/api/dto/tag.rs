//! DTOs for tags.

use serde::Serialize;

use crate::domain::entities::Tag;

#[derive(Debug, Serialize)]
pub struct TagItem {
    pub id: Option<i64>,
    pub value: String,
}

impl From<Tag> for TagItem {
    fn from(t: Tag) -> Self {
        Self {
            id: t.id,
            value: t.value,
        }
    }
}

/// Response containing all tags, sorted by value.
#[derive(Debug, Serialize)]
pub struct TagListResponse {
    pub items: Vec<TagItem>,
}
