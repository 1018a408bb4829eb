//! Anomaly Detection API - Main Entry Point
//!
//! Loads the trained model artifact once at startup and serves anomaly
//! predictions over HTTP. A missing artifact degrades the prediction route
//! instead of preventing startup.

use anomaly_detection_api::{api, AnomalyDetector, AppConfig};
use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration
    let config = AppConfig::load()?;

    // Initialize logging
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!(
            "anomaly_detection_api={},tower_http=info",
            config.logging.level
        ))
    });
    if config.logging.format == "json" {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .json()
            .init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }

    info!("Starting Anomaly Detection API");
    info!("Configuration loaded successfully");

    // Attempt the model load exactly once
    let detector = Arc::new(AnomalyDetector::new(&config.model));
    if detector.is_loaded() {
        info!("Model loaded successfully");
    } else {
        warn!(
            path = %config.model.path,
            "Serving without a model, predictions will report it as not loaded"
        );
    }

    let app = api::router(detector);

    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port).parse()?;
    info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
