//! Type definitions for the anomaly detection API

pub mod prediction;

pub use prediction::{PredictionOutcome, PredictionRequest};
