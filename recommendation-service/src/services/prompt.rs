//! Prompt rendering for diet recommendations.

use crate::models::DietQuery;

/// Render the diet prompt for the text-generation provider.
///
/// User text is interpolated verbatim; nothing is escaped.
pub fn build_diet_prompt(query: &DietQuery) -> String {
    format!(
        "Based on these preferences and goals:\n\
         Diet Preferences: {}\n\
         Health Conditions: {}\n\
         Nutritional Goals: {}\n\
         Favorite Foods: {}\n\
         \n\
         Provide exactly:\n\
         1. Three meal names without any special characters or formatting.\n\
         2. Two to three supplement names without any special characters or formatting.\n\
         \n\
         Format as:\n\
         meals:\n\
         - meal1\n\
         - meal2\n\
         - meal3\n\
         \n\
         supplements:\n\
         - supplement1\n\
         - supplement2\n",
        query.diet_preferences.join(", "),
        query.health_conditions.join(", "),
        query.nutritional_goals.join(", "),
        query.favorite_foods.join(", "),
    )
}
