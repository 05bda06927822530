//! Error taxonomy of the recommendation endpoints.
//!
//! Every failure is rendered as the shared `{"error": ...}` envelope. Callers can
//! opt into a typed `code` field through `INCLUDE_ERROR_CODES`.

use crate::services::{InferenceError, ProviderError};
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use service_core::error::ErrorBody;
use thiserror::Error;

/// Failure while producing a diet recommendation.
#[derive(Error, Debug)]
pub enum GenerationError {
    #[error("{0}")]
    InvalidQuery(String),

    #[error(transparent)]
    Provider(#[from] ProviderError),
}

#[derive(Error, Debug)]
pub enum ApiError {
    /// Empty or absent request body.
    #[error("No data provided")]
    NoData,

    /// Request body is not valid JSON.
    #[error("{0}")]
    MalformedBody(#[source] serde_json::Error),

    #[error(transparent)]
    Inference(#[from] InferenceError),

    #[error(transparent)]
    Generation(#[from] GenerationError),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::NoData => StatusCode::BAD_REQUEST,
            ApiError::MalformedBody(_) | ApiError::Inference(_) | ApiError::Generation(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Stable machine-readable error kind.
    pub fn code(&self) -> &'static str {
        match self {
            ApiError::NoData => "VALIDATION_ERROR",
            ApiError::MalformedBody(_) => "MALFORMED_BODY",
            ApiError::Inference(_) => "INFERENCE_ERROR",
            ApiError::Generation(_) => "GENERATION_ERROR",
        }
    }

    /// Message returned to the caller. Server-side failures echo the underlying
    /// error text.
    pub fn message(&self) -> String {
        match self {
            ApiError::NoData => self.to_string(),
            _ => format!("An error occurred: {}", self),
        }
    }

    pub fn render(self, include_code: bool) -> Response {
        let status = self.status();

        if status.is_server_error() {
            tracing::error!(code = self.code(), error = %self, "Request failed");
        } else {
            tracing::warn!(code = self.code(), error = %self, "Request rejected");
        }

        let mut body = ErrorBody::new(self.message());
        if include_code {
            body = body.with_code(self.code());
        }

        (status, Json(body)).into_response()
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        self.render(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_data_is_a_bad_request() {
        assert_eq!(ApiError::NoData.status(), StatusCode::BAD_REQUEST);
        assert_eq!(ApiError::NoData.message(), "No data provided");
    }

    #[test]
    fn inference_failures_echo_the_cause() {
        let err = ApiError::from(InferenceError::UnseenLabel(9));

        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.code(), "INFERENCE_ERROR");
        assert_eq!(
            err.message(),
            "An error occurred: y contains previously unseen labels: [9]"
        );
    }

    #[test]
    fn generation_failures_echo_the_cause() {
        let err = ApiError::from(GenerationError::from(ProviderError::RateLimited));

        assert_eq!(err.code(), "GENERATION_ERROR");
        assert_eq!(err.message(), "An error occurred: Rate limited");
    }

    #[test]
    fn malformed_body_has_its_own_code() {
        let source = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err = ApiError::MalformedBody(source);

        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.code(), "MALFORMED_BODY");
        assert!(err.message().starts_with("An error occurred: EOF"));
    }
}
