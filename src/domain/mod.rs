//! Domain layer containing business entities and persistence contracts.
//!
//! # Architecture
//!
//! - [`entities`] - Cards, relevance levels, tags and word types
//! - [`repositories`] - Data access trait definitions
//! - [`unit_of_work`] - Transaction boundary shared by the repositories
//!
//! # Design Principles
//!
//! - Domain layer has no dependencies on infrastructure or presentation layers
//! - Repository and unit of work traits are implemented by the infrastructure layer
//! - Use cases live in [`crate::application::services`]

pub mod entities;
pub mod repositories;
pub mod unit_of_work;
