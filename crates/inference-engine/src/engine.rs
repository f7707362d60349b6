//! Market Value Predictor

use crate::artifact::{load_model, load_scaler};
use crate::model::Regressor;
use crate::scaler::StandardScaler;
use crate::InferenceError;
use feature_engine::{column_names, FeatureVector};
use std::path::Path;
use tracing::{debug, info};

/// Result of inference operation
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InferenceResult {
    /// Predicted market value
    pub prediction: f64,
    /// Scaling + model latency in microseconds
    pub latency_us: u64,
}

/// Scaler and regression model applied in sequence
pub struct Predictor {
    scaler: StandardScaler,
    model: Box<dyn Regressor>,
}

impl std::fmt::Debug for Predictor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Predictor")
            .field("n_features", &self.n_features())
            .field("model", &self.model.kind())
            .finish()
    }
}

/// Artifact column names must match the encoder's layout exactly
fn check_feature_names(names: Option<&[String]>) -> Result<(), InferenceError> {
    let Some(names) = names else {
        return Ok(());
    };
    let columns = column_names();

    if names.len() != columns.len() {
        return Err(InferenceError::ShapeMismatch {
            expected: names.len(),
            actual: columns.len(),
        });
    }
    match names.iter().zip(columns).position(|(a, b)| a != b) {
        Some(index) => Err(InferenceError::FeatureOrder {
            index,
            expected: names[index].clone(),
            actual: columns[index].clone(),
        }),
        None => Ok(()),
    }
}

impl Predictor {
    /// Pair a scaler with a model fitted on the same columns
    pub fn new(scaler: StandardScaler, model: Box<dyn Regressor>) -> Result<Self, InferenceError> {
        if scaler.n_features() != model.n_features() {
            return Err(InferenceError::ShapeMismatch {
                expected: scaler.n_features(),
                actual: model.n_features(),
            });
        }
        check_feature_names(scaler.feature_names.as_deref())?;
        check_feature_names(model.feature_names())?;

        Ok(Self { scaler, model })
    }

    /// Load both artifacts from disk
    pub fn from_paths(
        scaler_path: impl AsRef<Path>,
        model_path: impl AsRef<Path>,
    ) -> Result<Self, InferenceError> {
        let scaler = load_scaler(scaler_path)?;
        let model = load_model(model_path, scaler.n_features())?;
        let predictor = Self::new(scaler, model)?;
        info!("Predictor ready: {:?}", predictor);
        Ok(predictor)
    }

    /// Input width expected by the artifacts
    pub fn n_features(&self) -> usize {
        self.scaler.n_features()
    }

    /// Standardize a raw row and run the model
    pub fn predict_values(&self, values: &[f64]) -> Result<f64, InferenceError> {
        let scaled = self.scaler.transform(values)?;
        let prediction = self.model.predict(&scaled)?;

        if !prediction.is_finite() {
            return Err(InferenceError::InferenceFailed(format!(
                "model returned non-finite value {}",
                prediction
            )));
        }
        Ok(prediction)
    }

    /// Predict the market value of an encoded player
    pub fn predict(&self, features: &FeatureVector) -> Result<InferenceResult, InferenceError> {
        let start = std::time::Instant::now();

        let prediction = self.predict_values(features.values())?;

        let latency_us = start.elapsed().as_micros() as u64;
        debug!("Inference completed in {}us: {:.3}", latency_us, prediction);

        Ok(InferenceResult {
            prediction,
            latency_us,
        })
    }
}
