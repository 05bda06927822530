use crate::startup::AppState;
use axum::{extract::State, response::Response};
use service_core::error::AppError;
use std::any::Any;

/// Unmatched routes.
pub async fn not_found(State(state): State<AppState>) -> Response {
    AppError::NotFound(anyhow::anyhow!("Resource not found")).render(state.include_error_codes)
}

/// Response for a panic caught while handling a request.
pub fn panic_response(err: Box<dyn Any + Send + 'static>, include_code: bool) -> Response {
    let detail = if let Some(s) = err.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        s.to_string()
    } else {
        "unknown panic payload".to_string()
    };

    AppError::InternalError(anyhow::anyhow!("request handler panicked: {}", detail))
        .render(include_code)
}
