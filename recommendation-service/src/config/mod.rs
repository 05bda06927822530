use crate::services::providers::GenerationParams;
use secrecy::Secret;
use service_core::config::{self as core_config, get_env};
use service_core::error::AppError;
use std::env;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

const DEFAULT_MODEL_PATH: &str = "models/exercise_model.json";
const DEFAULT_LABEL_ENCODER_PATH: &str = "models/label_encoder.json";
const DEFAULT_GEMINI_MODEL: &str = "gemini-2.0-flash";
const DEFAULT_GEMINI_TIMEOUT_SECS: u64 = 120;

#[derive(Debug, Clone)]
pub struct RecommendationConfig {
    pub common: core_config::Config,
    pub artifacts: ArtifactConfig,
    pub gemini: GeminiSettings,
    /// Add the typed `code` field to error responses.
    pub include_error_codes: bool,
}

/// Locations of the exercise model artifacts, read once at startup.
#[derive(Debug, Clone)]
pub struct ArtifactConfig {
    pub model_path: PathBuf,
    pub label_encoder_path: PathBuf,
}

#[derive(Debug, Clone)]
pub struct GeminiSettings {
    pub api_key: Secret<String>,
    pub model: String,
    pub timeout_secs: u64,
    /// Sampling overrides sent with every diet prompt. Unset values leave the
    /// model defaults in place.
    pub generation: GenerationParams,
}

impl GeminiSettings {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl RecommendationConfig {
    pub fn load() -> Result<Self, AppError> {
        let common = core_config::Config::load()?;
        let is_prod = core_config::is_production();

        Ok(RecommendationConfig {
            common,
            artifacts: ArtifactConfig {
                model_path: get_env("EXERCISE_MODEL_PATH", Some(DEFAULT_MODEL_PATH), is_prod)?
                    .into(),
                label_encoder_path: get_env(
                    "LABEL_ENCODER_PATH",
                    Some(DEFAULT_LABEL_ENCODER_PATH),
                    is_prod,
                )?
                .into(),
            },
            gemini: GeminiSettings {
                api_key: Secret::new(get_env("GEMINI_API_KEY", None, is_prod)?),
                model: get_env("GEMINI_MODEL", Some(DEFAULT_GEMINI_MODEL), is_prod)?,
                timeout_secs: get_env(
                    "GEMINI_TIMEOUT_SECS",
                    Some(&DEFAULT_GEMINI_TIMEOUT_SECS.to_string()),
                    is_prod,
                )?
                .parse()
                .unwrap_or(DEFAULT_GEMINI_TIMEOUT_SECS),
                generation: GenerationParams {
                    temperature: optional_env("GEMINI_TEMPERATURE")?,
                    top_p: optional_env("GEMINI_TOP_P")?,
                    max_tokens: optional_env("GEMINI_MAX_OUTPUT_TOKENS")?,
                },
            },
            include_error_codes: parse_flag(&get_env(
                "INCLUDE_ERROR_CODES",
                Some("false"),
                is_prod,
            )?),
        })
    }
}

/// Read an optional typed variable. Unset or blank means `None`; a value that
/// does not parse is a configuration error.
fn optional_env<T: FromStr>(key: &str) -> Result<Option<T>, AppError>
where
    T::Err: std::fmt::Display,
{
    match env::var(key) {
        Ok(raw) => parse_optional(key, &raw),
        Err(_) => Ok(None),
    }
}

fn parse_optional<T: FromStr>(key: &str, raw: &str) -> Result<Option<T>, AppError>
where
    T::Err: std::fmt::Display,
{
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(None);
    }

    raw.parse().map(Some).map_err(|e| {
        AppError::ConfigError(anyhow::anyhow!("{} has an invalid value '{}': {}", key, raw, e))
    })
}

fn parse_flag(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}
