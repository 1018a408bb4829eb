//! API route handlers

use crate::models::AnomalyDetector;
use crate::types::prediction::PredictionRequest;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use std::sync::Arc;
use tracing::error;

/// Error payload for inference failures
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// Liveness check - reports the process as running regardless of model state
pub async fn status() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "API is running"
    }))
}

/// Receives a single data point and returns an anomaly prediction.
///
/// The degraded no-model outcome is still a 200 with an in-band error
/// payload; only a runtime inference failure maps to a server error.
pub async fn predict(
    State(detector): State<Arc<AnomalyDetector>>,
    Json(req): Json<PredictionRequest>,
) -> Response {
    match detector.predict(req.value) {
        Ok(outcome) => (StatusCode::OK, Json(outcome)).into_response(),
        Err(e) => {
            error!(error = %e, value = req.value, "Inference failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: "Inference failed.".to_string(),
                }),
            )
                .into_response()
        }
    }
}
