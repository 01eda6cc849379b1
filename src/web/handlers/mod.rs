//! HTML template rendering handlers.

mod cards;

pub use cards::cards_page_handler;
