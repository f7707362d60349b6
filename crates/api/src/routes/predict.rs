//! Prediction Route

use axum::{extract::State, response::Html, Form};
use feature_engine::{encode, RawInput};
use inference_engine::InferenceResult;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::info;

use crate::error::ApiError;
use crate::pages::{format_prediction, result_page};
use crate::AppState;

fn run_prediction(
    state: &AppState,
    fields: &HashMap<String, String>,
) -> Result<InferenceResult, ApiError> {
    let raw = RawInput::from_fields(fields)?;
    let features = encode(&raw)?;
    let predictor = state
        .predictor
        .as_ref()
        .map_err(|e| ApiError::ModelUnavailable(e.to_string()))?;

    Ok(predictor.predict(&features)?)
}

/// Encode the submitted form and render the predicted value
pub async fn predict(
    State(state): State<Arc<AppState>>,
    Form(fields): Form<HashMap<String, String>>,
) -> Result<Html<String>, ApiError> {
    match run_prediction(&state, &fields) {
        Ok(result) => {
            metrics::counter!("predictions_total", "outcome" => "ok").increment(1);
            metrics::histogram!("prediction_latency_seconds")
                .record(result.latency_us as f64 / 1_000_000.0);
            info!(
                "Predicted {} ({}us)",
                format_prediction(result.prediction),
                result.latency_us
            );
            Ok(Html(result_page(result.prediction)))
        }
        Err(e) => {
            metrics::counter!("predictions_total", "outcome" => e.outcome()).increment(1);
            Err(e)
        }
    }
}
