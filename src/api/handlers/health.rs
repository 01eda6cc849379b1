//! Handler for health check endpoint.

use axum::{Json, extract::State, http::StatusCode};

use crate::api::dto::health::{DatabaseCheck, HealthChecks, HealthResponse};
use crate::state::AppState;

/// Returns service health status with component checks.
///
/// # Endpoint
///
/// `GET /health`
///
/// # Response Codes
///
/// - **200 OK**: Database reachable
/// - **503 Service Unavailable**: Database check failed
///
/// # Response
///
/// ```json
/// {
///   "status": "healthy",
///   "version": "0.1.0",
///   "checks": {
///     "database": { "status": "ok", "sqlite_version": "3.46.0" }
///   }
/// }
/// ```
pub async fn health_handler(
    State(state): State<AppState>,
) -> Result<Json<HealthResponse>, (StatusCode, Json<HealthResponse>)> {
    let db_check = check_database(&state).await;
    let healthy = db_check.status == "ok";

    let response = HealthResponse {
        status: if healthy { "healthy" } else { "degraded" }.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        checks: HealthChecks { database: db_check },
    };

    if healthy {
        Ok(Json(response))
    } else {
        Err((StatusCode::SERVICE_UNAVAILABLE, Json(response)))
    }
}

/// Reads the SQLite library version, which doubles as a connectivity check.
async fn check_database(state: &AppState) -> DatabaseCheck {
    match sqlx::query_scalar::<_, String>("SELECT sqlite_version()")
        .fetch_one(&state.pool)
        .await
    {
        Ok(version) => DatabaseCheck {
            status: "ok".to_string(),
            sqlite_version: Some(version),
            message: None,
        },
        Err(e) => {
            tracing::error!(error = %e, "database health check failed");
            DatabaseCheck {
                status: "error".to_string(),
                sqlite_version: None,
                message: Some(format!("Database error: {}", e)),
            }
        }
    }
}
