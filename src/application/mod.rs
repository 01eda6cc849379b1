//! Application layer services implementing the use cases.
//!
//! Services open one unit of work per call, coordinate repository calls inside
//! it, and return detached domain values to the HTTP and CLI layers.
//!
//! # Available Services
//!
//! - [`services::card_service::CardService`] - Card CRUD, solving, lookups
//! - [`pagination::PaginationResult`] - Page metadata for listings

pub mod pagination;
pub mod services;
