//! HTTP request handlers for API endpoints.
//!
//! Each handler module corresponds to a logical grouping of endpoints.

pub mod cards;
pub mod health;
pub mod relevance;
pub mod tags;

pub use cards::{
    card_list_handler, create_card_handler, delete_card_handler, get_card_handler,
    solve_card_handler, update_card_handler,
};
pub use health::health_handler;
pub use relevance::relevance_list_handler;
pub use tags::tag_list_handler;
