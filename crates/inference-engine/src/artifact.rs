//! Artifact Loading
//!
//! Scaler and model files are produced by the offline training job. The
//! encoding is picked from the file extension.

use crate::model::{LinearModel, OnnxModel, Regressor};
use crate::scaler::StandardScaler;
use crate::InferenceError;
use serde::de::DeserializeOwned;
use std::path::Path;
use tracing::{debug, info};

/// On-disk encoding of an artifact
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArtifactFormat {
    /// `.json`
    Json,
    /// `.bin` / `.postcard`
    Postcard,
    /// `.onnx`, models only
    Onnx,
}

impl ArtifactFormat {
    /// Infer the format from a path's extension
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        match ext.as_str() {
            "json" => Some(ArtifactFormat::Json),
            "bin" | "postcard" => Some(ArtifactFormat::Postcard),
            "onnx" => Some(ArtifactFormat::Onnx),
            _ => None,
        }
    }
}

fn load_error(path: &Path, reason: impl ToString) -> InferenceError {
    InferenceError::ArtifactLoad {
        path: path.display().to_string(),
        reason: reason.to_string(),
    }
}

fn read_artifact(path: &Path) -> Result<(ArtifactFormat, Vec<u8>), InferenceError> {
    let format = ArtifactFormat::from_path(path)
        .ok_or_else(|| load_error(path, "unrecognized file extension"))?;
    let bytes = std::fs::read(path).map_err(|e| load_error(path, e))?;
    debug!(
        "Read {} bytes from {} ({:?})",
        bytes.len(),
        path.display(),
        format
    );
    Ok((format, bytes))
}

/// Decode serde-encoded parameters
pub(crate) fn decode<T: DeserializeOwned>(
    format: ArtifactFormat,
    bytes: &[u8],
) -> Result<T, String> {
    match format {
        ArtifactFormat::Json => serde_json::from_slice(bytes).map_err(|e| e.to_string()),
        ArtifactFormat::Postcard => postcard::from_bytes(bytes).map_err(|e| e.to_string()),
        ArtifactFormat::Onnx => Err("ONNX files can only hold models".to_string()),
    }
}

/// Load and validate a fitted scaler
pub fn load_scaler(path: impl AsRef<Path>) -> Result<StandardScaler, InferenceError> {
    let path = path.as_ref();
    let (format, bytes) = read_artifact(path)?;

    let scaler: StandardScaler = decode(format, &bytes).map_err(|e| load_error(path, e))?;
    scaler.validate().map_err(|e| load_error(path, e))?;

    info!(
        "Loaded scaler from {} ({} features)",
        path.display(),
        scaler.n_features()
    );
    Ok(scaler)
}

/// Load and validate a fitted regression model
///
/// `n_features` fixes the input width of ONNX graphs; serde-encoded models
/// carry their own width.
pub fn load_model(
    path: impl AsRef<Path>,
    n_features: usize,
) -> Result<Box<dyn Regressor>, InferenceError> {
    let path = path.as_ref();
    let (format, bytes) = read_artifact(path)?;

    let model: Box<dyn Regressor> = match format {
        ArtifactFormat::Onnx => {
            Box::new(OnnxModel::from_bytes(&bytes, n_features).map_err(|e| load_error(path, e))?)
        }
        _ => {
            let linear: LinearModel = decode(format, &bytes).map_err(|e| load_error(path, e))?;
            linear.validate().map_err(|e| load_error(path, e))?;
            Box::new(linear)
        }
    };

    info!(
        "Loaded {} model from {} ({} features)",
        model.kind(),
        path.display(),
        model.n_features()
    );
    Ok(model)
}
