//! API error handling
//!
//! Every failure is answered with an [`ErrorBody`]: a short machine tag plus a
//! human message. Internal faults never expose their details.

use std::any::Any;

use axum::{
    Json,
    extract::rejection::QueryRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;
use tracing::error;
use weather_core::ErrorBody;

const INTERNAL_MESSAGE: &str = "Something went wrong on the server";

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Missing parameter: {0}")]
    MissingParameter(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::MissingParameter(_) | Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn body(&self) -> ErrorBody {
        let (tag, message) = match self {
            Self::MissingParameter(msg) => ("missing_parameter", msg.clone()),
            Self::BadRequest(msg) => ("bad_request", msg.clone()),
            Self::NotFound(msg) => ("not_found", msg.clone()),
            Self::Internal(_) => ("internal_error", INTERNAL_MESSAGE.to_string()),
        };
        ErrorBody {
            error: tag.to_string(),
            message,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if let Self::Internal(detail) = &self {
            error!(%detail, "request failed");
        }
        (self.status(), Json(self.body())).into_response()
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        Self::BadRequest(rejection.body_text())
    }
}

/// Turns a handler panic into the generic 500 response.
pub fn panic_response(panic: Box<dyn Any + Send + 'static>) -> Response {
    let detail = panic
        .downcast_ref::<String>()
        .cloned()
        .or_else(|| panic.downcast_ref::<&str>().map(|s| (*s).to_string()))
        .unwrap_or_else(|| "unknown panic".to_string());

    ApiError::Internal(detail).into_response()
}
