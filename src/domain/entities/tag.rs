//! Free-form label attached to cards.

use std::borrow::Borrow;
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};

/// A tag; its value is the natural key.
///
/// Equality, hashing and ordering all use `value` only, which also makes
/// `Borrow<str>` lookups in tag sets consistent.
#[derive(Debug, Clone, Default)]
pub struct Tag {
    pub id: Option<i64>,
    pub value: String,
}

impl Tag {
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            id: None,
            value: value.into(),
        }
    }

    pub fn with_id(id: i64, value: impl Into<String>) -> Self {
        Self {
            id: Some(id),
            value: value.into(),
        }
    }
}

impl PartialEq for Tag {
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value
    }
}

impl Eq for Tag {}

impl Hash for Tag {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.value.hash(state);
    }
}

impl PartialOrd for Tag {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Tag {
    fn cmp(&self, other: &Self) -> Ordering {
        self.value.cmp(&other.value)
    }
}

impl Borrow<str> for Tag {
    fn borrow(&self) -> &str {
        &self.value
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;

    #[test]
    fn test_equality_by_value() {
        assert_eq!(Tag::with_id(3, "food"), Tag::new("food"));
        assert_ne!(Tag::new("food"), Tag::new("travel"));
    }

    #[test]
    fn test_set_lookup_by_str() {
        let tags: BTreeSet<Tag> = [Tag::new("travel"), Tag::with_id(1, "food")]
            .into_iter()
            .collect();

        assert!(tags.contains("food"));
        assert!(!tags.contains("work"));
        assert_eq!(
            tags.iter().map(|t| t.value.as_str()).collect::<Vec<_>>(),
            vec!["food", "travel"]
        );
    }
}
