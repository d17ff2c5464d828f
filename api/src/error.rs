//! API errors

use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};

use crate::models::ErrorResponse;

/// Errors returned by request handlers
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("Invalid request body: {0}")]
    InvalidBody(#[from] JsonRejection),

    #[error("Prediction failed: {0}")]
    Prediction(#[from] feedrank_core::Error),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            // 400 for malformed JSON, 422 for missing or non-numeric fields
            ApiError::InvalidBody(rejection) => rejection.status(),
            ApiError::Prediction(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!("{}", self);
        } else {
            tracing::debug!("Rejected request: {}", self);
        }

        let body = ErrorResponse {
            error: match &self {
                ApiError::InvalidBody(rejection) => rejection.body_text(),
                ApiError::Prediction(e) => e.to_string(),
            },
        };
        (status, Json(body)).into_response()
    }
}
