use serde::{Deserialize, Serialize};

/// Body of `POST /recommend_diet`. Absent lists are treated as empty.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DietQuery {
    #[serde(default)]
    pub diet_preferences: Vec<String>,
    #[serde(default)]
    pub health_conditions: Vec<String>,
    #[serde(default)]
    pub nutritional_goals: Vec<String>,
    #[serde(default)]
    pub favorite_foods: Vec<String>,
}

/// Parsed diet suggestion. Each list holds at most three entries.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DietRecommendation {
    pub meals: Vec<String>,
    pub supplements: Vec<String>,
}
