//! Server-rendered HTML views.
//!
//! Uses Askama templates from `templates/`.
//!
//! # Modules
//!
//! - [`handlers`] - Template rendering handlers
//! - [`routes`] - View route configuration

pub mod handlers;
pub mod routes;
