//! API Error Responses

use crate::pages::error_page;
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use feature_engine::EncodeError;
use inference_engine::InferenceError;
use thiserror::Error;
use tracing::{error, warn};

/// Failures surfaced to HTTP clients
#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Encode(#[from] EncodeError),
    #[error(transparent)]
    Inference(#[from] InferenceError),
    /// Artifacts failed to load at startup
    #[error("Model unavailable: {0}")]
    ModelUnavailable(String),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Encode(EncodeError::Domain { .. }) => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::Encode(_) => StatusCode::BAD_REQUEST,
            ApiError::Inference(
                InferenceError::ArtifactLoad { .. }
                | InferenceError::InvalidArtifact { .. }
                | InferenceError::FeatureOrder { .. },
            )
            | ApiError::ModelUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            ApiError::Inference(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Label for the `predictions_total` counter
    pub fn outcome(&self) -> &'static str {
        if self.status().is_client_error() {
            "rejected"
        } else {
            "failed"
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            error!("Request failed: {}", self);
        } else {
            warn!("Request rejected: {}", self);
        }
        (status, Html(error_page(status, &self.to_string()))).into_response()
    }
}
