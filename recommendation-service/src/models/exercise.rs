use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Column order the exercise model was trained on.
pub const FEATURE_COLUMNS: [&str; 5] = ["Gender", "Age", "Actual Weight", "Dream Weight", "BMI"];

/// Body of `POST /recommend_exercise`.
#[derive(Debug, Clone, Deserialize)]
pub struct ExerciseQuery {
    #[serde(rename = "Gender")]
    pub gender: String,
    #[serde(rename = "Age")]
    pub age: f64,
    #[serde(rename = "Actual Weight")]
    pub actual_weight: f64,
    #[serde(rename = "Dream Weight")]
    pub dream_weight: f64,
    #[serde(rename = "BMI")]
    pub bmi: f64,
}

/// A single cell of a feature record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FeatureValue {
    Number(f64),
    Text(String),
}

/// One observation laid out in [`FEATURE_COLUMNS`] order.
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureRecord {
    values: [FeatureValue; 5],
}

impl FeatureRecord {
    pub fn columns(&self) -> &'static [&'static str] {
        &FEATURE_COLUMNS
    }

    pub fn values(&self) -> &[FeatureValue] {
        &self.values
    }

    /// `(column, value)` pairs in column order.
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &FeatureValue)> {
        FEATURE_COLUMNS.iter().copied().zip(self.values.iter())
    }
}

impl From<&ExerciseQuery> for FeatureRecord {
    fn from(query: &ExerciseQuery) -> Self {
        Self {
            values: [
                FeatureValue::Text(query.gender.clone()),
                FeatureValue::Number(query.age),
                FeatureValue::Number(query.actual_weight),
                FeatureValue::Number(query.dream_weight),
                FeatureValue::Number(query.bmi),
            ],
        }
    }
}

/// Body returned by `POST /recommend_exercise`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExerciseRecommendation {
    #[serde(rename = "Predicted Exercise")]
    pub predicted_exercise: String,
    #[serde(rename = "Intensity")]
    pub intensity: Value,
    #[serde(rename = "Duration")]
    pub duration: Value,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn query_uses_display_column_names() {
        let query: ExerciseQuery = serde_json::from_value(json!({
            "Gender": "Female",
            "Age": 31,
            "Actual Weight": 72.5,
            "Dream Weight": 64,
            "BMI": 26.1
        }))
        .unwrap();

        assert_eq!(query.gender, "Female");
        assert_eq!(query.actual_weight, 72.5);
        assert_eq!(query.dream_weight, 64.0);
    }

    #[test]
    fn missing_field_is_reported_by_name() {
        let err = serde_json::from_value::<ExerciseQuery>(json!({
            "Gender": "Male",
            "Age": 40,
            "Actual Weight": 90,
            "Dream Weight": 80
        }))
        .unwrap_err();

        assert!(err.to_string().contains("`BMI`"));
    }

    #[test]
    fn feature_record_preserves_column_order() {
        let query = ExerciseQuery {
            gender: "Male".to_string(),
            age: 25.0,
            actual_weight: 80.0,
            dream_weight: 75.0,
            bmi: 24.2,
        };
        let record = FeatureRecord::from(&query);

        let columns: Vec<&str> = record.iter().map(|(c, _)| c).collect();
        assert_eq!(columns, FEATURE_COLUMNS);
        assert_eq!(
            record.values(),
            &[
                FeatureValue::Text("Male".to_string()),
                FeatureValue::Number(25.0),
                FeatureValue::Number(80.0),
                FeatureValue::Number(75.0),
                FeatureValue::Number(24.2),
            ]
        );
    }

    #[test]
    fn recommendation_serializes_with_display_keys() {
        let body = serde_json::to_value(ExerciseRecommendation {
            predicted_exercise: "Cycling".to_string(),
            intensity: json!(7),
            duration: json!(45.0),
        })
        .unwrap();

        assert_eq!(
            body,
            json!({ "Predicted Exercise": "Cycling", "Intensity": 7, "Duration": 45.0 })
        );
    }
}
