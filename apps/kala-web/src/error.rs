//! Error types for the web app.
//!
//! ```text
//! ValidationError ─┐
//! CoreError ───────┼──► AppError ──► status + plain-text body
//! DbError ─────────┘
//! ```
//!
//! Login and permission failures are not errors here: they become flash
//! messages and redirects (see `auth`).

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use kala_core::{CoreError, ValidationError};
use kala_db::DbError;

/// Web app errors.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Invalid request: {0}")]
    Validation(#[from] ValidationError),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Conflict(_) => StatusCode::CONFLICT,
            AppError::Database(_) | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();

        let message = if status.is_server_error() {
            tracing::error!(error = %self, "Request failed");
            "Error interno del servidor".to_string()
        } else {
            tracing::warn!(error = %self, "Request rejected");
            self.to_string()
        };

        (status, message).into_response()
    }
}

impl From<CoreError> for AppError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::Validation(e) => AppError::Validation(e),
            CoreError::ServiceNotFound(_) | CoreError::ProductNotFound(_) => {
                AppError::NotFound(err.to_string())
            }
            // Form amounts are capped, so only stored data can get here.
            CoreError::AmountOverflow => AppError::Internal(err.to_string()),
        }
    }
}

impl From<DbError> for AppError {
    fn from(err: DbError) -> Self {
        match err {
            DbError::Validation(e) => AppError::Validation(e),
            DbError::Domain(e) => e.into(),
            DbError::NotFound { .. } => AppError::NotFound(err.to_string()),
            DbError::UniqueViolation { .. } => AppError::Conflict(err.to_string()),
            DbError::PasswordHash(msg) => AppError::Internal(msg),
            other => AppError::Database(other.to_string()),
        }
    }
}

impl From<jsonwebtoken::errors::Error> for AppError {
    fn from(err: jsonwebtoken::errors::Error) -> Self {
        AppError::Internal(format!("Failed to sign token: {}", err))
    }
}

/// Result type for route handlers.
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        let err: AppError = ValidationError::required("name").into();
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);

        let err: AppError = DbError::duplicate("email", "ana@kala").into();
        assert_eq!(err.status(), StatusCode::CONFLICT);

        let err: AppError = DbError::Domain(CoreError::ProductNotFound("p-1".into())).into();
        assert_eq!(err.status(), StatusCode::NOT_FOUND);

        let err: AppError = DbError::Domain(CoreError::AmountOverflow).into();
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let err: AppError = DbError::PoolExhausted.into();
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_server_errors_hide_detail() {
        let response = AppError::Database("disk I/O error".into()).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
