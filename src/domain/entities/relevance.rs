//! Relevance level shared by many cards.

use std::hash::{Hash, Hasher};

/// A difficulty/priority class such as "Beginner".
///
/// Two relevance levels are equal when their descriptions match; the id is a
/// store-assigned surrogate and takes no part in equality.
#[derive(Debug, Clone, Default)]
pub struct Relevance {
    pub id: Option<i64>,
    pub description: String,
}

impl Relevance {
    /// Creates a relevance level that has not been persisted yet.
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            id: None,
            description: description.into(),
        }
    }

    /// Creates a relevance level with a known id.
    pub fn with_id(id: i64, description: impl Into<String>) -> Self {
        Self {
            id: Some(id),
            description: description.into(),
        }
    }
}

impl PartialEq for Relevance {
    fn eq(&self, other: &Self) -> bool {
        self.description == other.description
    }
}

impl Eq for Relevance {}

impl Hash for Relevance {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.description.hash(state);
    }
}
