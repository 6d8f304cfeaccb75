//! Domain error to HTTP response mapping

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use tracing::error;

use super::ApiResponse;
use crate::domain::DomainError;

/// Error returned by handlers; renders as an `ApiResponse` envelope.
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub code: String,
    pub message: String,
}

impl ApiError {
    pub fn new(status: StatusCode, code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            status,
            code: code.into(),
            message: message.into(),
        }
    }

    pub fn unprocessable(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(StatusCode::UNPROCESSABLE_ENTITY, code, message)
    }
}

impl From<DomainError> for ApiError {
    fn from(e: DomainError) -> Self {
        let status = match &e {
            DomainError::NotFound { .. } => StatusCode::NOT_FOUND,
            DomainError::Forbidden(_) => StatusCode::FORBIDDEN,
            DomainError::BadRequest { .. } => StatusCode::UNPROCESSABLE_ENTITY,
            DomainError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let message = match &e {
            DomainError::NotFound { entity, .. } => format!("{} not found", entity),
            DomainError::Forbidden(_) => "You do not have access to this resource".to_string(),
            DomainError::BadRequest { message, .. } => message.clone(),
            DomainError::Storage(detail) => {
                error!(error = %detail, "Storage failure while handling request");
                "Internal server error".to_string()
            }
        };

        Self::new(status, e.code(), message)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = ApiResponse::<()>::error_with_code(self.code, self.message);
        (self.status, Json(body)).into_response()
    }
}
