//! Core domain entities representing the vocabulary data model.
//!
//! # Entity Types
//!
//! - [`Card`] - A German/Italian word pair with practice statistics
//! - [`Relevance`] - Difficulty class shared by many cards
//! - [`Tag`] - Free-form label; cards hold a set of them
//! - [`WordType`] - Grammatical category of a card
//!
//! Entities are owned values. Once a unit of work is closed the values it
//! returned stay fully readable without any store access.

pub mod card;
pub mod relevance;
pub mod tag;
pub mod word_type;

pub use card::{Card, CardStatistics, german_sort_key};
pub use relevance::Relevance;
pub use tag::Tag;
pub use word_type::{ParseWordTypeError, WordType};
