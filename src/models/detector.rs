//! Anomaly prediction service backed by the loaded model

use crate::config::ModelConfig;
use crate::models::loader::{LoadedModel, ModelLoader};
use crate::types::prediction::{PredictionOutcome, ANOMALY_LABEL};
use anyhow::{Context, Result};
use std::sync::RwLock;
use tracing::{debug, warn};

/// Prediction service wrapping the model loaded at startup.
///
/// The detector owns the session for the process lifetime. A load failure at
/// construction degrades the service instead of aborting it: the process
/// still starts, and every prediction answers with the unavailable outcome.
pub struct AnomalyDetector {
    /// Loaded model (wrapped in RwLock for interior mutability), or None
    /// when the artifact could not be loaded at startup
    model: Option<RwLock<LoadedModel>>,
}

impl AnomalyDetector {
    /// Create a detector from configuration, attempting the model load
    /// exactly once.
    pub fn new(config: &ModelConfig) -> Self {
        let loaded = ModelLoader::with_threads(config.intra_threads)
            .and_then(|loader| loader.load(&config.path));

        match loaded {
            Ok(model) => Self {
                model: Some(RwLock::new(model)),
            },
            Err(e) => {
                warn!(
                    path = %config.path,
                    error = %e,
                    "Model not loaded, predictions will be unavailable"
                );
                Self { model: None }
            }
        }
    }

    /// Create a detector with no model loaded
    pub fn disabled() -> Self {
        Self { model: None }
    }

    /// Whether a model was successfully loaded at startup
    pub fn is_loaded(&self) -> bool {
        self.model.is_some()
    }

    /// Run an anomaly prediction for a single observation.
    ///
    /// Returns the unavailable outcome when no model is loaded; an `Err`
    /// only signals a runtime inference failure.
    pub fn predict(&self, value: f64) -> Result<PredictionOutcome> {
        let Some(model_lock) = &self.model else {
            return Ok(PredictionOutcome::unavailable());
        };

        let mut model = model_lock
            .write()
            .map_err(|e| anyhow::anyhow!("Lock error: {}", e))?;

        let label = Self::run_model(&mut model, value)?;

        if label != 1 && label != ANOMALY_LABEL {
            warn!(
                label = label,
                "Model emitted a label outside {{1, -1}}, treating as normal"
            );
        }

        debug!(value = value, label = label, "Inference complete");

        Ok(PredictionOutcome::from_label(label))
    }

    /// Run the model on a single-row input holding the `value` column
    fn run_model(model: &mut LoadedModel, value: f64) -> Result<i64> {
        use ort::value::Tensor;

        // Single observation, single column - shape [1, 1]
        let shape = vec![1_i64, 1];
        let input_tensor = Tensor::from_array((shape, vec![value as f32]))
            .context("Failed to create input tensor")?;

        let outputs = model
            .session
            .run(ort::inputs![&model.input_name => input_tensor])?;

        Self::extract_label(&outputs, &model.label_output)
    }

    /// Extract the first predicted label from model output
    fn extract_label(outputs: &ort::session::SessionOutputs, label_output: &str) -> Result<i64> {
        // Try the discovered label output by name first
        if let Some(output) = outputs.get(label_output) {
            if let Ok((_, data)) = output.try_extract_tensor::<i64>() {
                if let Some(&label) = data.first() {
                    return Ok(label);
                }
            }
        }

        // Fallback: iterate all outputs and take the first integer tensor
        for (name, output) in outputs.iter() {
            if let Ok((_, data)) = output.try_extract_tensor::<i64>() {
                if let Some(&label) = data.first() {
                    debug!(output = %name, "Extracted label from fallback output");
                    return Ok(label);
                }
            }
        }

        anyhow::bail!("No label found in model output")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_disabled_detector_is_unavailable() {
        let detector = AnomalyDetector::disabled();

        assert!(!detector.is_loaded());

        let outcome = detector.predict(0.13).unwrap();
        assert_eq!(outcome, PredictionOutcome::unavailable());
    }

    #[test]
    fn test_missing_artifact_degrades() {
        let config = ModelConfig {
            path: "models/does_not_exist.onnx".to_string(),
            intra_threads: 1,
        };

        let detector = AnomalyDetector::new(&config);
        assert!(!detector.is_loaded());

        let outcome = detector.predict(2.0).unwrap();
        assert_eq!(outcome, PredictionOutcome::unavailable());
    }
}
