//! Exercise model abstractions and implementations.
//!
//! The handlers only see [`ExercisePredictor`] and [`CategoryDecoder`]; the
//! concrete adapters load their artifacts from disk once at startup.

pub mod label_encoder;
pub mod mock;
pub mod tree_ensemble;

pub use label_encoder::LabelEncoder;
pub use tree_ensemble::TreeEnsembleModel;

use crate::models::FeatureRecord;
use serde_json::Value;
use std::path::PathBuf;
use thiserror::Error;

/// Error raised while turning a query into a recommendation.
#[derive(Error, Debug)]
pub enum InferenceError {
    #[error("{0}")]
    InvalidQuery(String),

    #[error("Found unknown category '{value}' for feature '{feature}'")]
    UnknownCategory { feature: String, value: String },

    #[error("Feature '{feature}' is not numeric: '{value}'")]
    NonNumericFeature { feature: String, value: String },

    #[error("Model produced an unusable output: {0}")]
    InvalidOutput(String),

    #[error("y contains previously unseen labels: [{0}]")]
    UnseenLabel(i64),
}

/// Error raised while loading a model artifact.
#[derive(Error, Debug)]
pub enum ArtifactError {
    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Invalid artifact: {0}")]
    Invalid(String),
}

/// Raw model output for one observation.
#[derive(Debug, Clone, PartialEq)]
pub struct Prediction {
    /// Encoded exercise category, decoded through a [`CategoryDecoder`].
    pub exercise_code: Value,
    pub intensity: Value,
    pub duration: Value,
}

impl Prediction {
    /// Integer class index of the predicted exercise.
    ///
    /// Numbers truncate toward zero; numeric strings are parsed first.
    pub fn category_index(&self) -> Result<i64, InferenceError> {
        let numeric = match &self.exercise_code {
            Value::Number(n) => n.as_f64(),
            Value::String(s) => s.trim().parse::<f64>().ok(),
            Value::Bool(b) => Some(if *b { 1.0 } else { 0.0 }),
            _ => None,
        };

        match numeric {
            Some(n) if n.is_finite() => Ok(n.trunc() as i64),
            _ => Err(InferenceError::InvalidOutput(format!(
                "exercise code {} is not an integer",
                self.exercise_code
            ))),
        }
    }
}

/// Pre-trained model mapping a feature record to exercise/intensity/duration.
pub trait ExercisePredictor: Send + Sync {
    fn predict(&self, features: &FeatureRecord) -> Result<Prediction, InferenceError>;
}

/// Maps an integer class index back to its label.
pub trait CategoryDecoder: Send + Sync {
    fn decode(&self, code: i64) -> Result<String, InferenceError>;
}

pub(crate) fn read_artifact<T: serde::de::DeserializeOwned>(
    path: &std::path::Path,
) -> Result<T, ArtifactError> {
    let bytes = std::fs::read(path).map_err(|source| ArtifactError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    serde_json::from_slice(&bytes).map_err(|source| ArtifactError::Parse {
        path: path.to_path_buf(),
        source,
    })
}
