//! Infrastructure layer.
//!
//! Implements the repository and unit of work interfaces defined by the
//! domain layer.
//!
//! # Modules
//!
//! - [`persistence`] - SQLite store (production)
//! - [`memory`] - In-memory store (tests)

pub mod memory;
pub mod persistence;
