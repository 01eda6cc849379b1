//! Data Transfer Objects for API requests and responses.
//!
//! All DTOs use Serde for JSON serialization/deserialization and validator
//! for input validation.

pub mod card;
pub mod health;
pub mod pagination;
pub mod relevance;
pub mod tag;
