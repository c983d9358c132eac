//! Error types for the RFQ API.
//!
//! ## Status Mapping
//! ```text
//! ValidationError / malformed body / bad path id ─► 400
//! missing principal                               ─► 401
//! RFQ not found                                   ─► 404
//! deadline exceeded                               ─► 504
//! store / render / join failures                  ─► 500 (details logged only)
//! ```
//!
//! Every error leaves as `{ "code": "...", "message": "..." }`.

use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use rfq_core::{CoreError, ValidationError};
use rfq_db::DbError;
use rfq_pdf::RenderError;
use serde::Serialize;
use tracing::error;

/// API errors.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("{0}")]
    Validation(#[from] ValidationError),

    #[error("Invalid request: {0}")]
    BadRequest(String),

    #[error("Missing authenticated principal")]
    Unauthenticated,

    #[error("RFQ not found: {0}")]
    NotFound(i64),

    #[error("Request deadline exceeded during {0}")]
    Timeout(&'static str),

    #[error(transparent)]
    Store(DbError),

    #[error(transparent)]
    Render(#[from] RenderError),

    #[error("Internal error: {0}")]
    Internal(String),
}

/// JSON error body.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorBody {
    pub code: &'static str,
    pub message: String,
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) | ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Unauthenticated => StatusCode::UNAUTHORIZED,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Timeout(_) => StatusCode::GATEWAY_TIMEOUT,
            ApiError::Store(DbError::NotFound { .. }) => StatusCode::NOT_FOUND,
            ApiError::Store(DbError::IdMismatch { .. } | DbError::CustomerMismatch { .. }) => {
                StatusCode::BAD_REQUEST
            }
            ApiError::Store(_) | ApiError::Render(_) | ApiError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            ApiError::Validation(ValidationError::IdMismatch { .. })
            | ApiError::Store(DbError::IdMismatch { .. }) => "ID_MISMATCH",
            ApiError::Validation(_) => "VALIDATION_FAILED",
            ApiError::BadRequest(_) => "BAD_REQUEST",
            ApiError::Unauthenticated => "UNAUTHENTICATED",
            ApiError::NotFound(_) | ApiError::Store(DbError::NotFound { .. }) => "NOT_FOUND",
            ApiError::Store(DbError::CustomerMismatch { .. }) => "CUSTOMER_MISMATCH",
            ApiError::Timeout(_) => "TIMEOUT",
            ApiError::Store(_) => "STORE_ERROR",
            ApiError::Render(_) => "RENDER_ERROR",
            ApiError::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// Message safe to show callers; server-side detail stays in the logs.
    fn public_message(&self) -> String {
        if self.status().is_server_error() && !matches!(self, ApiError::Timeout(_)) {
            "Internal server error".to_string()
        } else {
            self.to_string()
        }
    }
}

impl From<DbError> for ApiError {
    fn from(err: DbError) -> Self {
        match err {
            DbError::IdMismatch { path_id, body_id } => {
                ApiError::Validation(ValidationError::IdMismatch { path_id, body_id })
            }
            other => ApiError::Store(other),
        }
    }
}

impl From<CoreError> for ApiError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::RfqNotFound(id) => ApiError::NotFound(id),
            CoreError::Validation(e) => ApiError::Validation(e),
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            error!(code = self.code(), error = %self, "Request failed");
        }

        let body = ErrorBody {
            code: self.code(),
            message: self.public_message(),
        };
        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        let mismatch = ApiError::from(DbError::IdMismatch { path_id: 1, body_id: 2 });
        assert_eq!(mismatch.status(), StatusCode::BAD_REQUEST);
        assert_eq!(mismatch.code(), "ID_MISMATCH");

        let missing = ApiError::from(DbError::not_found("RFQ", 9));
        assert_eq!(missing.status(), StatusCode::NOT_FOUND);

        let foreign = ApiError::from(DbError::CustomerMismatch { rfq_id: 1, body_customer_id: 5 });
        assert_eq!(foreign.code(), "CUSTOMER_MISMATCH");

        assert_eq!(ApiError::Timeout("fetch").status(), StatusCode::GATEWAY_TIMEOUT);
        assert_eq!(ApiError::Unauthenticated.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(ApiError::from(CoreError::RfqNotFound(3)).code(), "NOT_FOUND");
    }

    #[test]
    fn test_server_errors_hide_details() {
        let err = ApiError::from(DbError::QueryFailed("no such table: rfq".to_string()));

        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.public_message(), "Internal server error");
    }
}
