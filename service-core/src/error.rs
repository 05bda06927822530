use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;

/// JSON envelope shared by every error response.
///
/// `code` is only present when a service opts into typed error codes.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorBody {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
}

impl ErrorBody {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            code: None,
        }
    }

    pub fn with_code(mut self, code: impl Into<String>) -> Self {
        self.code = Some(code.into());
        self
    }
}

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Not found: {0}")]
    NotFound(anyhow::Error),

    #[error("Internal server error: {0}")]
    InternalError(#[from] anyhow::Error),

    #[error("Configuration error: {0}")]
    ConfigError(anyhow::Error),
}

impl From<config::ConfigError> for AppError {
    fn from(err: config::ConfigError) -> Self {
        AppError::ConfigError(anyhow::Error::new(err))
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        AppError::InternalError(anyhow::Error::new(err))
    }
}

impl AppError {
    /// Stable machine-readable error kind.
    pub fn code(&self) -> &'static str {
        match self {
            AppError::NotFound(_) => "NOT_FOUND",
            AppError::InternalError(_) => "INTERNAL_ERROR",
            AppError::ConfigError(_) => "CONFIG_ERROR",
        }
    }

    /// Render the error envelope, optionally tagged with [`AppError::code`].
    pub fn render(self, include_code: bool) -> Response {
        let code = self.code();
        let (status, error_message) = match self {
            AppError::NotFound(err) => (StatusCode::NOT_FOUND, err.to_string()),
            AppError::InternalError(err) | AppError::ConfigError(err) => {
                tracing::error!(error = %format!("{:#}", err), "Internal server error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                )
            }
        };

        let mut body = ErrorBody::new(error_message);
        if include_code {
            body = body.with_code(code);
        }

        (status, Json(body)).into_response()
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        self.render(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_body_omits_missing_code() {
        let body = serde_json::to_value(ErrorBody::new("Resource not found")).unwrap();
        assert_eq!(body, serde_json::json!({ "error": "Resource not found" }));
    }

    #[test]
    fn error_body_includes_code_when_set() {
        let body = serde_json::to_value(ErrorBody::new("boom").with_code("INFERENCE_ERROR")).unwrap();
        assert_eq!(body["code"], "INFERENCE_ERROR");
    }

    #[test]
    fn internal_error_hides_details() {
        let response = AppError::InternalError(anyhow::anyhow!("secret detail")).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn codes_cover_every_variant() {
        assert_eq!(AppError::NotFound(anyhow::anyhow!("x")).code(), "NOT_FOUND");
        assert_eq!(AppError::InternalError(anyhow::anyhow!("x")).code(), "INTERNAL_ERROR");
        assert_eq!(AppError::ConfigError(anyhow::anyhow!("x")).code(), "CONFIG_ERROR");
    }

    #[test]
    fn not_found_keeps_message_status() {
        let response = AppError::NotFound(anyhow::anyhow!("Resource not found")).into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
