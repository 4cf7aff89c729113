use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use thiserror::Error;
use tracing::error;

use sahayata_db::StoreError;
use sahayata_types::error::FieldError;

/// HTTP-facing error wrapper. Store errors keep their typed taxonomy; the
/// extra variants cover the auth surface and runtime faults.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("validation failed")]
    Validation(Vec<FieldError>),

    #[error("invalid credentials")]
    Unauthorized,

    #[error("{0} already exists")]
    Conflict(&'static str),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("internal error: {0}")]
    Internal(String),
}

impl ApiError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::Validation(_) => StatusCode::BAD_REQUEST,
            Self::Unauthorized => StatusCode::UNAUTHORIZED,
            Self::Conflict(_) => StatusCode::CONFLICT,
            Self::Store(StoreError::NotFound(_)) => StatusCode::NOT_FOUND,
            Self::Store(StoreError::Forbidden(_)) => StatusCode::FORBIDDEN,
            Self::Store(StoreError::LastAdminProtected) => StatusCode::CONFLICT,
            Self::Store(StoreError::Poisoned | StoreError::Sqlite(_)) | Self::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        // Internal faults are logged here; clients only see a generic body.
        let body = match &self {
            Self::Validation(fields) => json!({ "error": "validation failed", "fields": fields }),
            Self::Store(StoreError::Poisoned | StoreError::Sqlite(_)) | Self::Internal(_) => {
                error!("{}", self);
                json!({ "error": "internal server error" })
            }
            other => json!({ "error": other.to_string() }),
        };

        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_status_codes() {
        assert_eq!(
            ApiError::Validation(vec![]).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(ApiError::Unauthorized.status_code(), StatusCode::UNAUTHORIZED);
        assert_eq!(
            ApiError::Conflict("account").status_code(),
            StatusCode::CONFLICT
        );
        assert_eq!(
            ApiError::Store(StoreError::NotFound("relief request")).status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            ApiError::Store(StoreError::Forbidden("admin role required")).status_code(),
            StatusCode::FORBIDDEN
        );
        assert_eq!(
            ApiError::Store(StoreError::LastAdminProtected).status_code(),
            StatusCode::CONFLICT
        );
        assert_eq!(
            ApiError::Internal("join error".into()).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn internal_errors_do_not_leak_details() {
        let response =
            ApiError::Internal("secret database path /var/lib/x".into()).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
