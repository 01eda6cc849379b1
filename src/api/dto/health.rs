//! Health check payload.

use serde::Serialize;

/// Body of `GET /health`.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub checks: HealthChecks,
}

#[derive(Debug, Serialize)]
pub struct HealthChecks {
    pub database: DatabaseCheck,
}

/// Result of probing the card store.
#[derive(Debug, Serialize)]
pub struct DatabaseCheck {
    pub status: String,

    /// `sqlite_version()` of the connected library, when reachable.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sqlite_version: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}
