//! Decision-tree ensemble loaded from a JSON artifact.
//!
//! Artifact layout:
//!
//! ```json
//! {
//!   "feature_names": ["Gender", "Age", "Actual Weight", "Dream Weight", "BMI"],
//!   "categories": { "Gender": { "Female": 0, "Male": 1 } },
//!   "output_names": ["Exercise", "Intensity", "Duration"],
//!   "trees": [
//!     { "feature": 4, "threshold": 25.0,
//!       "left": { "value": [0, 4, 30] },
//!       "right": { "value": [1, 7, 45] } }
//!   ]
//! }
//! ```
//!
//! A split sends `x[feature] <= threshold` left. Each output is the majority
//! vote of the trees' leaves; ties go to the value seen first.

use super::{read_artifact, ArtifactError, ExercisePredictor, InferenceError, Prediction};
use crate::models::{FeatureRecord, FeatureValue, FEATURE_COLUMNS};
use serde::Deserialize;
use serde_json::Value;
use std::collections::HashMap;
use std::path::Path;

const OUTPUT_COUNT: usize = 3;

#[derive(Debug, Deserialize)]
struct Artifact {
    feature_names: Vec<String>,
    #[serde(default)]
    categories: HashMap<String, HashMap<String, f64>>,
    output_names: Vec<String>,
    trees: Vec<Node>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum Node {
    Split {
        feature: usize,
        threshold: f64,
        left: Box<Node>,
        right: Box<Node>,
    },
    Leaf {
        value: Vec<Value>,
    },
}

impl Node {
    fn validate(&self, feature_count: usize) -> Result<(), ArtifactError> {
        match self {
            Node::Leaf { value } if value.len() != OUTPUT_COUNT => Err(ArtifactError::Invalid(
                format!("leaf has {} outputs, expected {}", value.len(), OUTPUT_COUNT),
            )),
            Node::Leaf { .. } => Ok(()),
            Node::Split { feature, .. } if *feature >= feature_count => Err(
                ArtifactError::Invalid(format!("split references unknown feature {}", feature)),
            ),
            Node::Split { left, right, .. } => {
                left.validate(feature_count)?;
                right.validate(feature_count)
            }
        }
    }

    fn evaluate(&self, x: &[f64]) -> &[Value] {
        let mut node = self;
        loop {
            match node {
                Node::Leaf { value } => return value,
                Node::Split {
                    feature,
                    threshold,
                    left,
                    right,
                } => {
                    node = if x[*feature] <= *threshold {
                        &**left
                    } else {
                        &**right
                    };
                }
            }
        }
    }
}

/// Ensemble classifier predicting exercise code, intensity and duration.
#[derive(Debug)]
pub struct TreeEnsembleModel {
    encoders: Vec<Option<HashMap<String, f64>>>,
    output_names: Vec<String>,
    trees: Vec<Node>,
}

impl TreeEnsembleModel {
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ArtifactError> {
        let artifact: Artifact = read_artifact(path.as_ref())?;
        Self::from_artifact(artifact)
    }

    pub fn from_value(value: Value) -> Result<Self, ArtifactError> {
        let artifact: Artifact =
            serde_json::from_value(value).map_err(|e| ArtifactError::Invalid(e.to_string()))?;
        Self::from_artifact(artifact)
    }

    fn from_artifact(mut artifact: Artifact) -> Result<Self, ArtifactError> {
        if artifact.feature_names != FEATURE_COLUMNS {
            return Err(ArtifactError::Invalid(format!(
                "feature order {:?} does not match {:?}",
                artifact.feature_names, FEATURE_COLUMNS
            )));
        }

        if artifact.output_names.len() != OUTPUT_COUNT {
            return Err(ArtifactError::Invalid(format!(
                "expected {} outputs, found {}",
                OUTPUT_COUNT,
                artifact.output_names.len()
            )));
        }

        if artifact.trees.is_empty() {
            return Err(ArtifactError::Invalid("model has no trees".to_string()));
        }

        for tree in &artifact.trees {
            tree.validate(FEATURE_COLUMNS.len())?;
        }

        if let Some(unknown) = artifact
            .categories
            .keys()
            .find(|name| !FEATURE_COLUMNS.contains(&name.as_str()))
        {
            return Err(ArtifactError::Invalid(format!(
                "categories given for unknown feature '{}'",
                unknown
            )));
        }

        let encoders = FEATURE_COLUMNS
            .iter()
            .map(|column| artifact.categories.remove(*column))
            .collect();

        Ok(Self {
            encoders,
            output_names: artifact.output_names,
            trees: artifact.trees,
        })
    }

    pub fn tree_count(&self) -> usize {
        self.trees.len()
    }

    pub fn output_names(&self) -> &[String] {
        &self.output_names
    }

    fn encode(&self, features: &FeatureRecord) -> Result<Vec<f64>, InferenceError> {
        features
            .iter()
            .zip(&self.encoders)
            .map(|((column, value), encoder)| match (encoder, value) {
                (Some(categories), FeatureValue::Text(text)) => {
                    categories.get(text).copied().ok_or_else(|| {
                        InferenceError::UnknownCategory {
                            feature: column.to_string(),
                            value: text.clone(),
                        }
                    })
                }
                (_, FeatureValue::Number(n)) => Ok(*n),
                (None, FeatureValue::Text(text)) => {
                    text.trim()
                        .parse::<f64>()
                        .map_err(|_| InferenceError::NonNumericFeature {
                            feature: column.to_string(),
                            value: text.clone(),
                        })
                }
            })
            .collect()
    }
}

impl ExercisePredictor for TreeEnsembleModel {
    fn predict(&self, features: &FeatureRecord) -> Result<Prediction, InferenceError> {
        let x = self.encode(features)?;
        let leaves: Vec<&[Value]> = self.trees.iter().map(|tree| tree.evaluate(&x)).collect();

        let mut outputs = Vec::with_capacity(OUTPUT_COUNT);
        for i in 0..OUTPUT_COUNT {
            let value = majority(leaves.iter().map(|leaf| &leaf[i]))
                .ok_or_else(|| InferenceError::InvalidOutput("empty ensemble".to_string()))?;
            outputs.push(value);
        }

        let [exercise_code, intensity, duration]: [Value; OUTPUT_COUNT] = outputs
            .try_into()
            .map_err(|_| InferenceError::InvalidOutput("wrong output count".to_string()))?;

        Ok(Prediction {
            exercise_code,
            intensity,
            duration,
        })
    }
}

fn majority<'a>(votes: impl Iterator<Item = &'a Value>) -> Option<Value> {
    let mut tally: Vec<(&Value, usize)> = Vec::new();
    for vote in votes {
        match tally.iter_mut().find(|(candidate, _)| *candidate == vote) {
            Some(entry) => entry.1 += 1,
            None => tally.push((vote, 1)),
        }
    }

    let mut best: Option<(&Value, usize)> = None;
    for (value, count) in tally {
        if best.map_or(true, |(_, best_count)| count > best_count) {
            best = Some((value, count));
        }
    }
    best.map(|(value, _)| value.clone())
}
