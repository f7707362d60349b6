//! Regression Models

use crate::InferenceError;
use serde::{Deserialize, Serialize};
use tract_onnx::prelude::*;

/// A fitted single-output regression model
pub trait Regressor: Send + Sync + std::fmt::Debug {
    /// Input width the model was fitted on
    fn n_features(&self) -> usize;

    /// Predict from one standardized row
    fn predict(&self, x: &[f64]) -> Result<f64, InferenceError>;

    /// Short model family name for logs
    fn kind(&self) -> &'static str;

    /// Training column names, when the artifact records them
    fn feature_names(&self) -> Option<&[String]> {
        None
    }
}

/// Linear regression exported as coefficients and intercept
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinearModel {
    pub coefficients: Vec<f64>,
    pub intercept: f64,
    #[serde(default)]
    pub feature_names: Option<Vec<String>>,
}

impl LinearModel {
    pub fn new(coefficients: Vec<f64>, intercept: f64) -> Result<Self, InferenceError> {
        let model = Self {
            coefficients,
            intercept,
            feature_names: None,
        };
        model.validate()?;
        Ok(model)
    }

    pub fn validate(&self) -> Result<(), InferenceError> {
        let invalid = |reason: String| InferenceError::InvalidArtifact {
            artifact: "model",
            reason,
        };

        if self.coefficients.is_empty() {
            return Err(invalid("no coefficients".to_string()));
        }
        if !self.intercept.is_finite() || self.coefficients.iter().any(|c| !c.is_finite()) {
            return Err(invalid("non-finite parameter".to_string()));
        }
        if let Some(names) = &self.feature_names {
            if names.len() != self.coefficients.len() {
                return Err(invalid(format!(
                    "{} feature names for {} coefficients",
                    names.len(),
                    self.coefficients.len()
                )));
            }
        }
        Ok(())
    }
}

impl Regressor for LinearModel {
    fn n_features(&self) -> usize {
        self.coefficients.len()
    }

    fn predict(&self, x: &[f64]) -> Result<f64, InferenceError> {
        if x.len() != self.coefficients.len() {
            return Err(InferenceError::ShapeMismatch {
                expected: self.coefficients.len(),
                actual: x.len(),
            });
        }
        let dot: f64 = x.iter().zip(&self.coefficients).map(|(v, c)| v * c).sum();
        Ok(dot + self.intercept)
    }

    fn kind(&self) -> &'static str {
        "linear"
    }

    fn feature_names(&self) -> Option<&[String]> {
        self.feature_names.as_deref()
    }
}

fn failed(e: impl std::fmt::Display) -> InferenceError {
    InferenceError::InferenceFailed(e.to_string())
}

type OnnxPlan = SimplePlan<TypedFact, Box<dyn TypedOp>, Graph<TypedFact, Box<dyn TypedOp>>>;

/// Regression model exported to ONNX, run with tract
///
/// The graph takes a `[1, n_features]` f32 tensor; the first element of the
/// first output is the prediction.
pub struct OnnxModel {
    plan: OnnxPlan,
    n_features: usize,
}

impl OnnxModel {
    /// Load and optimize an ONNX graph for a fixed input width
    pub fn from_bytes(bytes: &[u8], n_features: usize) -> Result<Self, InferenceError> {
        let mut reader = bytes;
        let plan = tract_onnx::onnx()
            .model_for_read(&mut reader)
            .and_then(|model| model.with_input_fact(0, f32::fact([1, n_features]).into()))
            .and_then(|model| model.into_optimized())
            .and_then(|model| model.into_runnable())
            .map_err(|e| InferenceError::InvalidArtifact {
                artifact: "model",
                reason: e.to_string(),
            })?;

        Ok(Self { plan, n_features })
    }
}

impl std::fmt::Debug for OnnxModel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OnnxModel")
            .field("n_features", &self.n_features)
            .finish_non_exhaustive()
    }
}

impl Regressor for OnnxModel {
    fn n_features(&self) -> usize {
        self.n_features
    }

    fn predict(&self, x: &[f64]) -> Result<f64, InferenceError> {
        if x.len() != self.n_features {
            return Err(InferenceError::ShapeMismatch {
                expected: self.n_features,
                actual: x.len(),
            });
        }

        let row: Vec<f32> = x.iter().map(|v| *v as f32).collect();

        let input = Tensor::from_shape(&[1, self.n_features], &row).map_err(failed)?;
        let outputs = self.plan.run(tvec!(input.into())).map_err(failed)?;
        let output = outputs
            .first()
            .ok_or_else(|| failed("model produced no outputs"))?;
        let value = output
            .as_slice::<f32>()
            .map_err(failed)?
            .first()
            .copied()
            .ok_or_else(|| failed("empty model output"))?;

        Ok(value as f64)
    }

    fn kind(&self) -> &'static str {
        "onnx"
    }
}
