//! Health and Metrics Routes

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use feature_engine::FEATURE_DIMENSION;
use serde::Serialize;
use std::sync::Arc;

use crate::AppState;

/// Health response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub uptime_seconds: u64,
    pub model: ModelHealth,
}

/// Artifact status
#[derive(Debug, Serialize)]
pub struct ModelHealth {
    pub loaded: bool,
    /// Width the artifacts expect
    pub n_features: Option<usize>,
    /// Width the encoder produces
    pub feature_dimension: usize,
    pub error: Option<String>,
}

/// Health check handler
pub async fn health(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    let model = match &state.predictor {
        Ok(predictor) => ModelHealth {
            loaded: true,
            n_features: Some(predictor.n_features()),
            feature_dimension: FEATURE_DIMENSION,
            error: None,
        },
        Err(e) => ModelHealth {
            loaded: false,
            n_features: None,
            feature_dimension: FEATURE_DIMENSION,
            error: Some(e.to_string()),
        },
    };

    let healthy = model.loaded && model.n_features == Some(FEATURE_DIMENSION);

    Json(HealthResponse {
        status: if healthy { "healthy" } else { "degraded" }.to_string(),
        version: state.version.clone(),
        uptime_seconds: state.start_time.elapsed().as_secs(),
        model,
    })
}

/// Prometheus exposition, 404 when metrics are disabled
pub async fn metrics(State(state): State<Arc<AppState>>) -> Response {
    match &state.metrics {
        Some(handle) => handle.render().into_response(),
        None => (StatusCode::NOT_FOUND, "metrics disabled").into_response(),
    }
}
