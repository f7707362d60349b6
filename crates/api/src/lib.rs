//! Player Market Value API Server
//!
//! Serves the player form, encodes submissions and renders the predicted
//! market value.

use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    routing::{get, post},
    Router,
};
use inference_engine::{InferenceError, Predictor};
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use std::any::Any;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Instant;
use thiserror::Error;
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_governor::GovernorLayer;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::trace::TraceLayer;
use tracing::{error, info, warn, Level};
use tracing_subscriber::FmtSubscriber;

mod error;
mod pages;
mod rate_limit;
mod routes;
mod settings;

pub use error::ApiError;
pub use rate_limit::{create_governor_config, RateLimitConfig};
pub use settings::{ServerConfig, DEFAULT_CONFIG_FILE};

/// Application state shared across handlers
///
/// Built once at startup and never mutated, so handlers share it without
/// locking.
pub struct AppState {
    /// Loaded artifacts, or the reason loading failed
    pub predictor: Result<Predictor, InferenceError>,
    /// Version string
    pub version: String,
    /// Start time
    pub start_time: Instant,
    /// Prometheus handle when metrics are enabled
    pub metrics: Option<PrometheusHandle>,
}

impl AppState {
    /// Create new application state
    pub fn new(predictor: Result<Predictor, InferenceError>) -> Self {
        Self {
            predictor,
            version: env!("CARGO_PKG_VERSION").to_string(),
            start_time: Instant::now(),
            metrics: None,
        }
    }

    /// Load artifacts and install the metrics recorder as configured
    ///
    /// Artifact failures are kept rather than returned: the server still
    /// starts, reports `degraded` and answers predictions with a 503.
    pub fn from_config(config: &ServerConfig) -> Self {
        let predictor = Predictor::from_paths(&config.scaler_path, &config.model_path);
        if let Err(e) = &predictor {
            error!("Model artifacts unavailable, predictions will fail: {}", e);
        }

        let mut state = Self::new(predictor);
        if config.metrics_enabled {
            match PrometheusBuilder::new().install_recorder() {
                Ok(handle) => state.metrics = Some(handle),
                Err(e) => warn!("Failed to install metrics recorder: {}", e),
            }
        }
        state
    }
}

/// Errors that stop the server from starting
#[derive(Debug, Error)]
pub enum StartupError {
    #[error("Configuration error: {0}")]
    Config(#[from] ::config::ConfigError),
    #[error("Logging setup failed: {0}")]
    Logging(String),
    #[error("Server I/O error: {0}")]
    Io(#[from] std::io::Error),
}

fn handle_panic(payload: Box<dyn Any + Send + 'static>) -> Response {
    let detail = payload
        .downcast_ref::<&str>()
        .map(|s| s.to_string())
        .or_else(|| payload.downcast_ref::<String>().cloned())
        .unwrap_or_else(|| "unknown panic".to_string());
    error!("Handler panicked: {}", detail);

    let status = StatusCode::INTERNAL_SERVER_ERROR;
    (status, Html(pages::error_page(status, "Internal server error"))).into_response()
}

/// Create the application router
pub fn create_router(state: Arc<AppState>, rate_limit: &RateLimitConfig) -> Router {
    let mut predict_routes = Router::new().route("/predict", post(routes::predict::predict));

    if rate_limit.enabled {
        match create_governor_config(rate_limit) {
            Some(config) => {
                info!(
                    "Rate limiting /predict: burst {}, one request per {}s",
                    rate_limit.burst_size, rate_limit.per_second
                );
                predict_routes = predict_routes.layer(GovernorLayer { config });
            }
            None => warn!("Ignoring rate limit with zero period or burst: {:?}", rate_limit),
        }
    }

    Router::new()
        .route("/", get(routes::index))
        .route("/crash", get(routes::crash))
        .route("/api/v1/health", get(routes::health::health))
        .route("/metrics", get(routes::health::metrics))
        .merge(predict_routes)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CatchPanicLayer::custom(handle_panic)),
        )
        .with_state(state)
}

/// Initialize logging
pub fn init_logging(config: &ServerConfig) -> Result<(), StartupError> {
    let level: Level = config.log_level.parse().map_err(|_| {
        StartupError::Logging(format!("unknown log level {:?}", config.log_level))
    })?;

    let builder = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(true);

    let result = if config.log_json {
        tracing::subscriber::set_global_default(builder.json().finish())
    } else {
        tracing::subscriber::set_global_default(builder.finish())
    };
    result.map_err(|e| StartupError::Logging(e.to_string()))
}

/// Serve the router on an already bound listener
pub async fn serve(listener: TcpListener, app: Router) -> std::io::Result<()> {
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await
}

/// Run the server
pub async fn run_server(config: ServerConfig) -> Result<(), StartupError> {
    let state = Arc::new(AppState::from_config(&config));
    let app = create_router(state, &config.rate_limit);

    let listener = TcpListener::bind(&config.bind_addr).await?;
    info!("Starting API server on {}", listener.local_addr()?);

    serve(listener, app).await?;
    Ok(())
}
