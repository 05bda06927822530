//! HTTP handlers for the recommendation service.

pub mod diet;
pub mod exercise;
pub mod fallback;
pub mod health;
pub mod validation;

pub use diet::recommend_diet;
pub use exercise::recommend_exercise;
pub use fallback::{not_found, panic_response};
pub use health::health_check;
