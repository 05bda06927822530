//! Parsing of free-text diet suggestions into bounded lists.
//!
//! The input is untrusted model output. Parsing never fails: text that does not
//! follow the requested layout yields fewer (possibly zero) entries.

use crate::models::DietRecommendation;

const SUPPLEMENTS_MARKER: &str = "supplements:";
const MEALS_LABEL: &str = "meals:";

/// Upper bound on entries kept per list.
pub const MAX_ITEMS: usize = 3;

/// Split model output into meals and supplements.
///
/// The text is lower-cased and split on the first `supplements:`, wherever it
/// occurs, even mid-sentence. Everything before it is the meals section, with a
/// leading `meals:` label removed. Without the marker, supplements is empty.
pub fn parse_diet_response(text: &str) -> DietRecommendation {
    let normalized = text.trim().to_lowercase();
    let mut sections = normalized.splitn(2, SUPPLEMENTS_MARKER);

    let meals_section = sections.next().unwrap_or_default().trim();
    let meals_section = meals_section
        .strip_prefix(MEALS_LABEL)
        .unwrap_or(meals_section);
    let supplements_section = sections.next().unwrap_or_default();

    DietRecommendation {
        meals: list_items(meals_section),
        supplements: list_items(supplements_section),
    }
}

fn list_items(section: &str) -> Vec<String> {
    section
        .lines()
        .map(strip_bullet)
        .filter(|item| !item.is_empty())
        .take(MAX_ITEMS)
        .map(str::to_string)
        .collect()
}

/// Strip bullet dashes and whitespace from both ends of a line.
pub fn strip_bullet(line: &str) -> &str {
    line.trim_matches(|c: char| c == '-' || c.is_whitespace())
}
