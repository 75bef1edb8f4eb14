use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use tracing::warn;

use crate::schedule::{StoreError, WeekOutOfRange};
use crate::validation::ValidationError;

#[derive(Debug)]
pub enum ApiError {
    Unauthorized(String),
    BadRequest(String),
    NotFound(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, msg).into_response(),
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg).into_response(),
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, msg).into_response(),
        }
    }
}

impl From<ValidationError> for ApiError {
    fn from(value: ValidationError) -> Self {
        warn!(error = %value, "rejected input");
        ApiError::BadRequest(value.to_string())
    }
}

impl From<StoreError> for ApiError {
    fn from(value: StoreError) -> Self {
        ApiError::NotFound(value.to_string())
    }
}

impl From<WeekOutOfRange> for ApiError {
    fn from(value: WeekOutOfRange) -> Self {
        warn!(error = %value, "rejected week");
        ApiError::BadRequest(value.to_string())
    }
}
