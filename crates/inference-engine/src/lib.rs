//! Market Value Inference Engine
//!
//! Applies an offline-fitted standard scaler and regression model to encoded
//! player features. Artifacts are loaded once and are read-only afterwards.

mod artifact;
mod engine;
mod model;
mod scaler;

pub use artifact::{load_model, load_scaler, ArtifactFormat};
pub use engine::{InferenceResult, Predictor};
pub use model::{LinearModel, OnnxModel, Regressor};
pub use scaler::StandardScaler;

use thiserror::Error;

/// Errors during inference
#[derive(Debug, Error)]
pub enum InferenceError {
    #[error("Failed to load artifact {path}: {reason}")]
    ArtifactLoad { path: String, reason: String },
    #[error("Invalid {artifact} artifact: {reason}")]
    InvalidArtifact {
        artifact: &'static str,
        reason: String,
    },
    #[error("Invalid input shape: expected {expected} features, got {actual}")]
    ShapeMismatch { expected: usize, actual: usize },
    #[error("Feature order mismatch at column {index}: artifact expects {expected:?}, encoder produces {actual:?}")]
    FeatureOrder {
        index: usize,
        expected: String,
        actual: String,
    },
    #[error("Inference failed: {0}")]
    InferenceFailed(String),
}
