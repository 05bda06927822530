//! Request and response types for the recommendation endpoints.

pub mod diet;
pub mod exercise;

pub use diet::{DietQuery, DietRecommendation};
pub use exercise::{
    ExerciseQuery, ExerciseRecommendation, FeatureRecord, FeatureValue, FEATURE_COLUMNS,
};
