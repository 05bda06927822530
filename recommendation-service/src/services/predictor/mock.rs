//! Mock predictor implementations for testing.

use super::{CategoryDecoder, ExercisePredictor, InferenceError, Prediction};
use crate::models::FeatureRecord;
use std::sync::Mutex;

enum Behavior {
    Predict(Prediction),
    Fail(String),
    Panic,
}

/// Mock exercise predictor that records every feature record it receives.
pub struct MockPredictor {
    behavior: Behavior,
    seen: Mutex<Vec<FeatureRecord>>,
}

impl MockPredictor {
    pub fn returning(prediction: Prediction) -> Self {
        Self::with_behavior(Behavior::Predict(prediction))
    }

    pub fn failing(message: impl Into<String>) -> Self {
        Self::with_behavior(Behavior::Fail(message.into()))
    }

    /// Panics on every call, to exercise the panic boundary.
    pub fn panicking() -> Self {
        Self::with_behavior(Behavior::Panic)
    }

    fn with_behavior(behavior: Behavior) -> Self {
        Self {
            behavior,
            seen: Mutex::new(Vec::new()),
        }
    }

    /// Feature records passed to `predict`, oldest first.
    pub fn seen(&self) -> Vec<FeatureRecord> {
        self.seen
            .lock()
            .map(|seen| seen.clone())
            .unwrap_or_default()
    }
}

impl ExercisePredictor for MockPredictor {
    fn predict(&self, features: &FeatureRecord) -> Result<Prediction, InferenceError> {
        if let Ok(mut seen) = self.seen.lock() {
            seen.push(features.clone());
        }

        match &self.behavior {
            Behavior::Predict(prediction) => Ok(prediction.clone()),
            Behavior::Fail(message) => Err(InferenceError::InvalidOutput(message.clone())),
            Behavior::Panic => panic!("mock predictor panicked"),
        }
    }
}

/// Mock decoder returning a fixed label for any index.
pub struct MockDecoder {
    label: String,
}

impl MockDecoder {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
        }
    }
}

impl CategoryDecoder for MockDecoder {
    fn decode(&self, _code: i64) -> Result<String, InferenceError> {
        Ok(self.label.clone())
    }
}
