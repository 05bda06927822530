#![allow(dead_code)]

use axum::{
    body::Body,
    http::{Method, Request, StatusCode},
    Router,
};
use recommendation_service::services::predictor::mock::{MockDecoder, MockPredictor};
use recommendation_service::services::predictor::Prediction;
use recommendation_service::services::providers::mock::MockTextProvider;
use recommendation_service::services::providers::GenerationParams;
use recommendation_service::startup::AppState;
use serde_json::{json, Value};
use std::path::PathBuf;
use std::sync::Arc;
use tower::util::ServiceExt;

pub const DIET_REPLY: &str =
    "meals:\n- Apple Salad\n- Grilled Chicken\n- Quinoa Bowl\nsupplements:\n- Vitamin D\n- Omega 3";

pub fn sample_prediction() -> Prediction {
    Prediction {
        exercise_code: json!(2.0),
        intensity: json!("Medium"),
        duration: json!(40),
    }
}

pub fn exercise_body() -> Value {
    json!({
        "Gender": "Male",
        "Age": 28,
        "Actual Weight": 75,
        "Dream Weight": 70,
        "BMI": 23.1
    })
}

/// Path of an artifact shipped in the workspace `models/` directory.
pub fn artifact(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("..")
        .join("models")
        .join(name)
}

pub struct TestState {
    pub predictor: Arc<MockPredictor>,
    pub provider: Arc<MockTextProvider>,
    pub state: AppState,
}

impl TestState {
    pub fn new(predictor: MockPredictor, provider: MockTextProvider) -> Self {
        let predictor = Arc::new(predictor);
        let provider = Arc::new(provider);
        let state = AppState {
            predictor: predictor.clone(),
            decoder: Arc::new(MockDecoder::new("Strength Training")),
            text_provider: provider.clone(),
            generation: GenerationParams::default(),
            include_error_codes: false,
        };

        Self {
            predictor,
            provider,
            state,
        }
    }

    pub fn healthy() -> Self {
        Self::new(
            MockPredictor::returning(sample_prediction()),
            MockTextProvider::new(DIET_REPLY),
        )
    }

    pub fn with_generation(mut self, generation: GenerationParams) -> Self {
        self.state.generation = generation;
        self
    }

    pub fn with_error_codes(mut self) -> Self {
        self.state.include_error_codes = true;
        self
    }

    pub fn router(&self) -> Router {
        recommendation_service::startup::build_router(self.state.clone())
    }
}

/// Send one request through the router and decode the JSON response.
pub async fn send(router: Router, method: Method, uri: &str, body: Option<&str>) -> (StatusCode, Value) {
    let mut request = Request::builder().method(method).uri(uri);
    if body.is_some() {
        request = request.header("content-type", "application/json");
    }
    let request = request
        .body(body.map(|b| Body::from(b.to_string())).unwrap_or_else(Body::empty))
        .unwrap();

    let response = router.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };

    (status, value)
}

pub async fn post_json(router: Router, uri: &str, body: &Value) -> (StatusCode, Value) {
    send(router, Method::POST, uri, Some(&body.to_string())).await
}
