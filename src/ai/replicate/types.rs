//! Replicate prediction payloads.

use crate::models::GenerationInput;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Request body for creating a prediction.
///
/// `version` is only set when the model is pinned to a version hash; the
/// model-scoped endpoint takes the input alone.
#[derive(Debug, Serialize)]
pub struct PredictionRequest<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<&'a str>,
    pub input: &'a GenerationInput,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PredictionStatus {
    Starting,
    Processing,
    Succeeded,
    Failed,
    Canceled,
    #[serde(other)]
    Unknown,
}

impl PredictionStatus {
    pub fn is_terminal(self) -> bool {
        !matches!(self, PredictionStatus::Starting | PredictionStatus::Processing)
    }
}

/// Prediction object returned by create and get calls.
#[derive(Debug, Deserialize)]
pub struct Prediction {
    pub id: String,
    pub status: PredictionStatus,
    #[serde(default)]
    pub output: Option<Value>,
    #[serde(default)]
    pub error: Option<Value>,
    #[serde(default)]
    pub urls: Option<PredictionUrls>,
}

impl Prediction {
    /// Provider-reported failure text, if any.
    pub fn error_message(&self) -> String {
        match &self.error {
            Some(Value::String(msg)) => msg.clone(),
            Some(Value::Null) | None => "no error detail".to_string(),
            Some(other) => other.to_string(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct PredictionUrls {
    pub get: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_prediction_deserializes_unknown_status() {
        let prediction: Prediction = serde_json::from_value(json!({
            "id": "p1",
            "status": "aborted"
        }))
        .unwrap();
        assert_eq!(prediction.status, PredictionStatus::Unknown);
        assert!(prediction.status.is_terminal());
        assert!(prediction.urls.is_none());
    }

    #[test]
    fn test_request_omits_version_for_model_endpoint() {
        let input = GenerationInput::new("a fox");
        let body = serde_json::to_value(PredictionRequest {
            version: None,
            input: &input,
        })
        .unwrap();
        assert!(body.get("version").is_none());
        assert_eq!(body["input"]["prompt"], "a fox");
    }

    #[test]
    fn test_error_message_variants() {
        let prediction: Prediction = serde_json::from_value(json!({
            "id": "p2",
            "status": "failed",
            "error": "NSFW content detected"
        }))
        .unwrap();
        assert_eq!(prediction.error_message(), "NSFW content detected");
    }
}
