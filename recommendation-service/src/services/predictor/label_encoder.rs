//! Class-index to label decoder.

use super::{read_artifact, ArtifactError, CategoryDecoder, InferenceError};
use serde::Deserialize;
use std::path::Path;

/// Decoder backed by the ordered list of classes seen at training time.
#[derive(Debug, Clone, Deserialize)]
pub struct LabelEncoder {
    classes: Vec<String>,
}

impl LabelEncoder {
    pub fn new(classes: Vec<String>) -> Self {
        Self { classes }
    }

    /// Load `{"classes": [...]}` from disk.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ArtifactError> {
        let encoder: LabelEncoder = read_artifact(path.as_ref())?;
        if encoder.classes.is_empty() {
            return Err(ArtifactError::Invalid(
                "label encoder has no classes".to_string(),
            ));
        }
        Ok(encoder)
    }

    pub fn classes(&self) -> &[String] {
        &self.classes
    }
}

impl CategoryDecoder for LabelEncoder {
    fn decode(&self, code: i64) -> Result<String, InferenceError> {
        usize::try_from(code)
            .ok()
            .and_then(|idx| self.classes.get(idx))
            .cloned()
            .ok_or(InferenceError::UnseenLabel(code))
    }
}
