//! Application startup and lifecycle management.

use crate::config::RecommendationConfig;
use crate::handlers;
use crate::services::predictor::{LabelEncoder, TreeEnsembleModel};
use crate::services::providers::gemini::{GeminiConfig, GeminiTextProvider};
use crate::services::providers::GenerationParams;
use crate::services::{CategoryDecoder, ExercisePredictor, TextProvider};
use axum::{
    middleware::from_fn,
    routing::{get, post},
    Router,
};
use service_core::error::AppError;
use service_core::middleware::{request_id_middleware, REQUEST_ID_HEADER};
use std::any::Any;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::signal;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::trace::TraceLayer;

/// Shared, read-only request context built once at startup.
#[derive(Clone)]
pub struct AppState {
    pub predictor: Arc<dyn ExercisePredictor>,
    pub decoder: Arc<dyn CategoryDecoder>,
    pub text_provider: Arc<dyn TextProvider>,
    /// Sampling parameters sent with every diet prompt.
    pub generation: GenerationParams,
    pub include_error_codes: bool,
}

impl AppState {
    /// Load the model artifacts and build the Gemini client.
    pub fn from_config(config: &RecommendationConfig) -> Result<Self, AppError> {
        let model_path = &config.artifacts.model_path;
        let predictor = TreeEnsembleModel::load(model_path).map_err(|e| {
            tracing::error!(path = %model_path.display(), "Failed to load exercise model: {}", e);
            AppError::ConfigError(anyhow::Error::new(e))
        })?;

        tracing::info!(
            path = %model_path.display(),
            trees = predictor.tree_count(),
            outputs = ?predictor.output_names(),
            "Loaded exercise model"
        );

        let encoder_path = &config.artifacts.label_encoder_path;
        let decoder = LabelEncoder::load(encoder_path).map_err(|e| {
            tracing::error!(path = %encoder_path.display(), "Failed to load label encoder: {}", e);
            AppError::ConfigError(anyhow::Error::new(e))
        })?;

        tracing::info!(
            path = %encoder_path.display(),
            classes = decoder.classes().len(),
            "Loaded label encoder"
        );

        let text_provider = GeminiTextProvider::new(GeminiConfig {
            api_key: config.gemini.api_key.clone(),
            model: config.gemini.model.clone(),
            timeout: config.gemini.timeout(),
        })
        .map_err(|e| {
            tracing::error!("Failed to initialize Gemini text provider: {}", e);
            AppError::ConfigError(anyhow::Error::new(e))
        })?;

        tracing::info!(
            model = %config.gemini.model,
            "Initialized Gemini text provider"
        );

        Ok(Self {
            predictor: Arc::new(predictor),
            decoder: Arc::new(decoder),
            text_provider: Arc::new(text_provider),
            generation: config.gemini.generation.clone(),
            include_error_codes: config.include_error_codes,
        })
    }
}

pub fn build_router(state: AppState) -> Router {
    let include_error_codes = state.include_error_codes;

    Router::new()
        .route("/recommend_exercise", post(handlers::recommend_exercise))
        .route("/recommend_diet", post(handlers::recommend_diet))
        .route("/health", get(handlers::health_check))
        .fallback(handlers::not_found)
        .layer(CatchPanicLayer::custom(move |err: Box<dyn Any + Send + 'static>| {
            handlers::panic_response(err, include_error_codes)
        }))
        .layer(
            TraceLayer::new_for_http().make_span_with(|request: &axum::http::Request<_>| {
                let request_id = request
                    .headers()
                    .get(REQUEST_ID_HEADER)
                    .and_then(|value| value.to_str().ok())
                    .unwrap_or("-");

                tracing::info_span!(
                    "http_request",
                    request_id = %request_id,
                    method = %request.method(),
                    uri = %request.uri(),
                )
            }),
        )
        .layer(from_fn(request_id_middleware))
        .with_state(state)
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}

/// Application container for managing server lifecycle.
pub struct Application {
    port: u16,
    listener: TcpListener,
    router: Router,
}

impl Application {
    /// Build the application with the given configuration.
    pub async fn build(config: RecommendationConfig) -> Result<Self, AppError> {
        let state = AppState::from_config(&config)?;
        Self::with_state(config.common.port, state).await
    }

    /// Bind a listener for an already-assembled state (port 0 = random port).
    pub async fn with_state(port: u16, state: AppState) -> Result<Self, AppError> {
        let addr = SocketAddr::from(([0, 0, 0, 0], port));
        let listener = TcpListener::bind(addr).await.map_err(|e| {
            tracing::error!("Failed to bind TCP listener to {}: {}", addr, e);
            AppError::from(e)
        })?;
        let port = listener.local_addr()?.port();

        tracing::info!("Recommendation service listening on port {}", port);

        Ok(Self {
            port,
            listener,
            router: build_router(state),
        })
    }

    /// Get the port the server is listening on.
    pub fn port(&self) -> u16 {
        self.port
    }

    /// Serve requests until a shutdown signal arrives.
    pub async fn run_until_stopped(self) -> std::io::Result<()> {
        axum::serve(self.listener, self.router)
            .with_graceful_shutdown(shutdown_signal())
            .await
    }
}
