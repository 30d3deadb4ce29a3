//! Error types for the HTTP API.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use database::{DatabaseError, ValidationError};
use thiserror::Error;
use tracker_core::UnknownDimension;

/// Errors returned by journal operations and handlers.
#[derive(Debug, Error)]
pub enum ApiError {
    /// No identity on a protected write.
    #[error("Not authenticated")]
    Unauthenticated,

    /// The caller does not own the record.
    #[error("{0}")]
    Unauthorized(String),

    /// Referenced entry or user record is absent.
    #[error("{0}")]
    NotFound(String),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    UnknownDimension(#[from] UnknownDimension),

    #[error("{0}")]
    BadRequest(String),

    #[error("Database error: {0}")]
    Database(DatabaseError),

    /// Server-side misconfiguration.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<DatabaseError> for ApiError {
    fn from(err: DatabaseError) -> Self {
        match err {
            err @ DatabaseError::NotFound { .. } => ApiError::NotFound(err.to_string()),
            err @ DatabaseError::Unauthorized { .. } => ApiError::Unauthorized(err.to_string()),
            err => ApiError::Database(err),
        }
    }
}

impl ApiError {
    fn status(&self) -> StatusCode {
        match self {
            ApiError::Unauthenticated => StatusCode::UNAUTHORIZED,
            ApiError::Unauthorized(_) => StatusCode::FORBIDDEN,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Validation(_) | ApiError::UnknownDimension(_) => {
                StatusCode::UNPROCESSABLE_ENTITY
            }
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Database(_) | ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        match &self {
            ApiError::Database(err) => tracing::error!("Database error: {}", err),
            ApiError::Internal(msg) => tracing::error!("Internal error: {}", msg),
            other => tracing::warn!(status = status.as_u16(), "{}", other),
        }

        let body = serde_json::json!({
            "error": self.to_string()
        });

        (status, Json(body)).into_response()
    }
}

/// Result type for API operations.
pub type Result<T> = std::result::Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_database_errors_map_to_statuses() {
        let not_found: ApiError = DatabaseError::NotFound {
            entity: "Entry",
            id: "7".to_string(),
        }
        .into();
        assert_eq!(not_found.status(), StatusCode::NOT_FOUND);

        let foreign: ApiError = DatabaseError::Unauthorized {
            entity: "Entry",
            id: "7".to_string(),
        }
        .into();
        assert_eq!(foreign.status(), StatusCode::FORBIDDEN);

        let internal = ApiError::Internal("Webhook secret not configured".to_string());
        assert_eq!(internal.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_input_errors_are_unprocessable() {
        let err: ApiError = UnknownDimension("wealth".to_string()).into();
        assert_eq!(err.status(), StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(err.to_string(), "unknown dimension: wealth");

        let err: ApiError = ValidationError::Empty("content".to_string()).into();
        assert_eq!(err.status(), StatusCode::UNPROCESSABLE_ENTITY);

        assert_eq!(ApiError::Unauthenticated.status(), StatusCode::UNAUTHORIZED);
    }
}
