use crate::error::ApiError;
use crate::handlers::validation::{parse_query, require_payload};
use crate::models::{ExerciseQuery, ExerciseRecommendation, FeatureRecord};
use crate::services::InferenceError;
use crate::startup::AppState;
use axum::{
    body::Bytes,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

#[tracing::instrument(skip(state, body))]
pub async fn recommend_exercise(State(state): State<AppState>, body: Bytes) -> Response {
    match exercise_recommendation(&state, &body) {
        Ok(recommendation) => (StatusCode::OK, Json(recommendation)).into_response(),
        Err(e) => e.render(state.include_error_codes),
    }
}

/// Validate the body, run the model and decode the predicted category.
pub fn exercise_recommendation(
    state: &AppState,
    body: &[u8],
) -> Result<ExerciseRecommendation, ApiError> {
    let payload = require_payload(body)?;
    let query: ExerciseQuery = parse_query(payload).map_err(InferenceError::InvalidQuery)?;

    let features = FeatureRecord::from(&query);
    let prediction = state.predictor.predict(&features)?;
    let exercise = state.decoder.decode(prediction.category_index()?)?;

    tracing::info!(exercise = %exercise, "Exercise recommendation produced");

    Ok(ExerciseRecommendation {
        predicted_exercise: exercise,
        intensity: prediction.intensity,
        duration: prediction.duration,
    })
}
