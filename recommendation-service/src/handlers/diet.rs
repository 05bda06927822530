use crate::error::{ApiError, GenerationError};
use crate::handlers::validation::{parse_query, require_payload};
use crate::models::{DietQuery, DietRecommendation};
use crate::services::providers::FinishReason;
use crate::services::{build_diet_prompt, parse_diet_response};
use crate::startup::AppState;
use axum::{
    body::Bytes,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

#[tracing::instrument(skip(state, body))]
pub async fn recommend_diet(State(state): State<AppState>, body: Bytes) -> Response {
    match diet_recommendation(&state, &body).await {
        Ok(recommendation) => (StatusCode::OK, Json(recommendation)).into_response(),
        Err(e) => e.render(state.include_error_codes),
    }
}

/// Validate the body, prompt the text provider and parse its answer.
pub async fn diet_recommendation(
    state: &AppState,
    body: &[u8],
) -> Result<DietRecommendation, ApiError> {
    let payload = require_payload(body)?;
    let query: DietQuery = parse_query(payload).map_err(GenerationError::InvalidQuery)?;

    let prompt = build_diet_prompt(&query);
    let response = state
        .text_provider
        .generate(&prompt, &state.generation)
        .await
        .map_err(GenerationError::from)?;

    if response.finish_reason == FinishReason::Length {
        tracing::warn!(
            output_tokens = response.output_tokens,
            "Diet response was cut at the output token limit"
        );
    }

    let recommendation = parse_diet_response(&response.text);

    tracing::info!(
        meals = recommendation.meals.len(),
        supplements = recommendation.supplements.len(),
        input_tokens = response.input_tokens,
        output_tokens = response.output_tokens,
        "Diet recommendation produced"
    );

    Ok(recommendation)
}
