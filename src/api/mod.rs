//! HTTP endpoint layer

pub mod routes;

use crate::models::AnomalyDetector;
use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

/// Build the application router with the detector injected as shared state
pub fn router(detector: Arc<AnomalyDetector>) -> Router {
    Router::new()
        .route("/", get(routes::status))
        .route("/predict", post(routes::predict))
        .layer(TraceLayer::new_for_http())
        .with_state(detector)
}
