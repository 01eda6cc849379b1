use std::fmt::Display;

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use serde_json::{Value, json};
use thiserror::Error;

#[derive(Serialize)]
struct ErrorBody {
    error: ErrorInfo,
}

#[derive(Serialize)]
struct ErrorInfo {
    code: &'static str,
    message: String,
    details: Value,
}

/// Application-wide error type.
///
/// `Integrity` is raised by the storage layer when a uniqueness constraint
/// rejects a write. Services translate it into `DuplicateResource` for the
/// entity they were writing, so it only reaches a client if a code path
/// forgets to do so.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("{message}")]
    Validation { message: String, details: Value },
    #[error("{message}")]
    NotFound { message: String, details: Value },
    #[error("{message}")]
    DuplicateResource { message: String, details: Value },
    #[error("{message}")]
    Integrity { message: String, details: Value },
    #[error("{message}")]
    Internal { message: String, details: Value },
}

impl AppError {
    pub fn bad_request(message: impl Into<String>, details: Value) -> Self {
        Self::Validation {
            message: message.into(),
            details,
        }
    }
    pub fn not_found(message: impl Into<String>, details: Value) -> Self {
        Self::NotFound {
            message: message.into(),
            details,
        }
    }
    pub fn duplicate(message: impl Into<String>, details: Value) -> Self {
        Self::DuplicateResource {
            message: message.into(),
            details,
        }
    }
    pub fn integrity(message: impl Into<String>, details: Value) -> Self {
        Self::Integrity {
            message: message.into(),
            details,
        }
    }
    pub fn internal(message: impl Into<String>, details: Value) -> Self {
        Self::Internal {
            message: message.into(),
            details,
        }
    }

    /// `"{resource} with ID {id} not found."`
    pub fn resource_not_found(resource: &str, id: impl Display) -> Self {
        Self::not_found(
            format!("{resource} with ID {id} not found."),
            json!({ "resource": resource, "id": id.to_string() }),
        )
    }

    /// `"Identical {resource} already exists."`
    pub fn duplicate_resource(resource: &str) -> Self {
        Self::duplicate(
            format!("Identical {resource} already exists."),
            json!({ "resource": resource }),
        )
    }

    pub fn code(&self) -> &'static str {
        match self {
            AppError::Validation { .. } => "validation_error",
            AppError::NotFound { .. } => "not_found",
            AppError::DuplicateResource { .. } => "duplicate_resource",
            AppError::Integrity { .. } => "integrity_error",
            AppError::Internal { .. } => "internal_error",
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Validation { .. } | AppError::DuplicateResource { .. } => {
                StatusCode::BAD_REQUEST
            }
            AppError::NotFound { .. } => StatusCode::NOT_FOUND,
            AppError::Integrity { .. } | AppError::Internal { .. } => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let code = self.code();
        let (message, details) = match self {
            AppError::Validation { message, details }
            | AppError::NotFound { message, details }
            | AppError::DuplicateResource { message, details }
            | AppError::Integrity { message, details }
            | AppError::Internal { message, details } => (message, details),
        };

        if status.is_server_error() {
            tracing::error!(code, %message, %details, "request failed");
        }

        let body = ErrorBody {
            error: ErrorInfo {
                code,
                message,
                details,
            },
        };

        (status, Json(body)).into_response()
    }
}

impl From<sqlx::Error> for AppError {
    fn from(e: sqlx::Error) -> Self {
        map_sqlx_error(e)
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(errors: validator::ValidationErrors) -> Self {
        AppError::bad_request(
            "Validation failed",
            serde_json::to_value(&errors).unwrap_or_else(|_| json!({})),
        )
    }
}

pub fn map_sqlx_error(e: sqlx::Error) -> AppError {
    if let Some(db) = e.as_database_error() {
        if db.is_unique_violation() {
            return AppError::integrity(
                "Unique constraint violation",
                json!({ "constraint": db.constraint(), "reason": db.message() }),
            );
        }
        if db.is_foreign_key_violation() {
            return AppError::internal(
                "Foreign key constraint violation",
                json!({ "reason": db.message() }),
            );
        }
    }

    tracing::error!(error = %e, "database error");
    AppError::internal("Database error", json!({}))
}
