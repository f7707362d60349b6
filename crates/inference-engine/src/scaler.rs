//! Standard Scaler

use crate::InferenceError;
use serde::{Deserialize, Serialize};

/// Fitted per-feature standardization: `(x - mean) / scale`
///
/// Mirrors the `mean_` / `scale_` / `feature_names_in_` attributes of a
/// fitted standard scaler. Zero-variance features are exported with a scale
/// of 1, so a zero scale marks a corrupt artifact.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StandardScaler {
    pub mean: Vec<f64>,
    pub scale: Vec<f64>,
    #[serde(default)]
    pub feature_names: Option<Vec<String>>,
}

impl StandardScaler {
    /// Create a validated scaler
    pub fn new(mean: Vec<f64>, scale: Vec<f64>) -> Result<Self, InferenceError> {
        let scaler = Self {
            mean,
            scale,
            feature_names: None,
        };
        scaler.validate()?;
        Ok(scaler)
    }

    /// Check internal consistency of the fitted parameters
    pub fn validate(&self) -> Result<(), InferenceError> {
        let invalid = |reason: String| InferenceError::InvalidArtifact {
            artifact: "scaler",
            reason,
        };

        if self.mean.is_empty() {
            return Err(invalid("no features".to_string()));
        }
        if self.mean.len() != self.scale.len() {
            return Err(invalid(format!(
                "{} means but {} scales",
                self.mean.len(),
                self.scale.len()
            )));
        }
        if let Some(i) = self.mean.iter().position(|m| !m.is_finite()) {
            return Err(invalid(format!("non-finite mean at column {}", i)));
        }
        if let Some(i) = self.scale.iter().position(|s| !s.is_finite() || *s == 0.0) {
            return Err(invalid(format!("zero or non-finite scale at column {}", i)));
        }
        if let Some(names) = &self.feature_names {
            if names.len() != self.mean.len() {
                return Err(invalid(format!(
                    "{} feature names for {} features",
                    names.len(),
                    self.mean.len()
                )));
            }
        }
        Ok(())
    }

    /// Number of features the scaler was fitted on
    pub fn n_features(&self) -> usize {
        self.mean.len()
    }

    /// Standardize one row
    pub fn transform(&self, x: &[f64]) -> Result<Vec<f64>, InferenceError> {
        if x.len() != self.n_features() {
            return Err(InferenceError::ShapeMismatch {
                expected: self.n_features(),
                actual: x.len(),
            });
        }

        Ok(x.iter()
            .zip(self.mean.iter().zip(&self.scale))
            .map(|(v, (m, s))| (v - m) / s)
            .collect())
    }
}
