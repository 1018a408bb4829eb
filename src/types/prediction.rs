//! Request and response types for anomaly prediction

use serde::{Deserialize, Serialize};

/// Label emitted by the model for an anomalous observation
pub const ANOMALY_LABEL: i64 = -1;

/// A single observation submitted for anomaly detection
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PredictionRequest {
    /// The scalar value to classify
    pub value: f64,
}

/// Outcome of a prediction request.
///
/// `Unavailable` is a data-shaped error: when no model was loaded at startup
/// the service answers with an error payload rather than failing the request,
/// and callers must match on the variant to detect degradation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PredictionOutcome {
    /// A successful prediction from the loaded model
    Scored {
        /// Whether the model classified the observation as an anomaly
        is_anomaly: bool,
        /// Raw label from the model (1 = normal, -1 = anomaly)
        predicted_value: i64,
    },
    /// No model is available for the process lifetime
    Unavailable { error: String },
}

impl PredictionOutcome {
    /// Build an outcome from a raw model label.
    ///
    /// Only the -1 sentinel marks an anomaly; every other label is treated
    /// as normal.
    pub fn from_label(label: i64) -> Self {
        Self::Scored {
            is_anomaly: label == ANOMALY_LABEL,
            predicted_value: label,
        }
    }

    /// The fixed degraded-service outcome
    pub fn unavailable() -> Self {
        Self::Unavailable {
            error: "Model not loaded.".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_anomaly_label_mapping() {
        assert_eq!(
            PredictionOutcome::from_label(-1),
            PredictionOutcome::Scored {
                is_anomaly: true,
                predicted_value: -1,
            }
        );
        assert_eq!(
            PredictionOutcome::from_label(1),
            PredictionOutcome::Scored {
                is_anomaly: false,
                predicted_value: 1,
            }
        );
        // Labels outside the conventional encoding are treated as normal
        assert_eq!(
            PredictionOutcome::from_label(0),
            PredictionOutcome::Scored {
                is_anomaly: false,
                predicted_value: 0,
            }
        );
    }

    #[test]
    fn test_scored_serialization() {
        let outcome = PredictionOutcome::from_label(-1);
        let json = serde_json::to_value(&outcome).unwrap();

        assert_eq!(
            json,
            serde_json::json!({"is_anomaly": true, "predicted_value": -1})
        );
    }

    #[test]
    fn test_unavailable_serialization() {
        let outcome = PredictionOutcome::unavailable();
        let json = serde_json::to_value(&outcome).unwrap();

        assert_eq!(json, serde_json::json!({"error": "Model not loaded."}));
    }

    #[test]
    fn test_request_deserialization() {
        let req: PredictionRequest = serde_json::from_str(r#"{"value": 0.13}"#).unwrap();
        assert_eq!(req.value, 0.13);

        // Missing the required field must fail
        let missing: Result<PredictionRequest, _> =
            serde_json::from_str(r#"{"wrong_key": 10.0}"#);
        assert!(missing.is_err());
    }
}
