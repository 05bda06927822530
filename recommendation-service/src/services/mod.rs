pub mod parser;
pub mod predictor;
pub mod prompt;
pub mod providers;

pub use parser::parse_diet_response;
pub use predictor::{CategoryDecoder, ExercisePredictor, InferenceError, Prediction};
pub use prompt::build_diet_prompt;
pub use providers::{ProviderError, TextProvider};
