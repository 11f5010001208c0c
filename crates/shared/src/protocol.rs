use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::ProtocolError;

pub const PREDICT_PATH: &str = "/predict";
pub const SUCCESS_STATUS: &str = "success";

/// Response body of `POST /predict` exactly as the service sends it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionEnvelope {
    pub status: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prediction: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl PredictionEnvelope {
    pub fn success(prediction: f64) -> Self {
        Self {
            status: SUCCESS_STATUS.to_string(),
            prediction: Some(Value::from(prediction)),
            message: None,
        }
    }

    pub fn failure(status: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            status: status.into(),
            prediction: None,
            message: Some(message.into()),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum PredictionOutcome {
    Success { prediction: f64 },
    Failure { message: String },
}

impl TryFrom<PredictionEnvelope> for PredictionOutcome {
    type Error = ProtocolError;

    fn try_from(envelope: PredictionEnvelope) -> Result<Self, Self::Error> {
        if envelope.status == SUCCESS_STATUS {
            let raw = envelope
                .prediction
                .ok_or(ProtocolError::MissingPrediction)?;
            let prediction = parse_prediction(&raw)?;
            Ok(Self::Success { prediction })
        } else {
            match envelope.message {
                Some(message) => Ok(Self::Failure { message }),
                None => Err(ProtocolError::MissingMessage {
                    status: envelope.status,
                }),
            }
        }
    }
}

/// Accepts a JSON number or a numeric string.
fn parse_prediction(raw: &Value) -> Result<f64, ProtocolError> {
    match raw {
        Value::Number(number) => number
            .as_f64()
            .ok_or_else(|| ProtocolError::InvalidPrediction(number.to_string())),
        Value::String(text) => text
            .trim()
            .parse::<f64>()
            .map_err(|_| ProtocolError::InvalidPrediction(text.clone())),
        Value::Null => Err(ProtocolError::MissingPrediction),
        other => Err(ProtocolError::InvalidPrediction(other.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn outcome(body: Value) -> Result<PredictionOutcome, ProtocolError> {
        let envelope: PredictionEnvelope = serde_json::from_value(body).expect("envelope");
        PredictionOutcome::try_from(envelope)
    }

    #[test]
    fn success_with_numeric_prediction() {
        assert_eq!(
            outcome(json!({ "status": "success", "prediction": 7.1 })),
            Ok(PredictionOutcome::Success { prediction: 7.1 })
        );
    }

    #[test]
    fn success_with_numeric_string_prediction() {
        assert_eq!(
            outcome(json!({ "status": "success", "prediction": " 42.5 " })),
            Ok(PredictionOutcome::Success { prediction: 42.5 })
        );
    }

    #[test]
    fn success_without_prediction_is_malformed() {
        assert_eq!(
            outcome(json!({ "status": "success" })),
            Err(ProtocolError::MissingPrediction)
        );
        assert_eq!(
            outcome(json!({ "status": "success", "prediction": null })),
            Err(ProtocolError::MissingPrediction)
        );
    }

    #[test]
    fn success_with_non_numeric_prediction_is_malformed() {
        assert_eq!(
            outcome(json!({ "status": "success", "prediction": "lots" })),
            Err(ProtocolError::InvalidPrediction("lots".to_string()))
        );
        assert!(matches!(
            outcome(json!({ "status": "success", "prediction": [1] })),
            Err(ProtocolError::InvalidPrediction(_))
        ));
    }

    #[test]
    fn any_other_status_is_failure() {
        assert_eq!(
            outcome(json!({ "status": "fail", "message": "bad input" })),
            Ok(PredictionOutcome::Failure {
                message: "bad input".to_string()
            })
        );
        assert_eq!(
            outcome(json!({ "status": "error", "message": "could not convert string to float: 'abc'" })),
            Ok(PredictionOutcome::Failure {
                message: "could not convert string to float: 'abc'".to_string()
            })
        );
    }

    #[test]
    fn failure_without_message_is_malformed() {
        assert_eq!(
            outcome(json!({ "status": "error" })),
            Err(ProtocolError::MissingMessage {
                status: "error".to_string()
            })
        );
    }

    #[test]
    fn envelope_builders_produce_wire_shape() {
        let success = serde_json::to_value(PredictionEnvelope::success(7.1)).expect("serialize");
        assert_eq!(success, json!({ "status": "success", "prediction": 7.1 }));

        let failure =
            serde_json::to_value(PredictionEnvelope::failure("fail", "bad input")).expect("serialize");
        assert_eq!(failure, json!({ "status": "fail", "message": "bad input" }));
        assert_eq!(
            outcome(failure),
            Ok(PredictionOutcome::Failure {
                message: "bad input".to_string()
            })
        );
    }

    #[test]
    fn missing_status_does_not_decode() {
        assert!(serde_json::from_value::<PredictionEnvelope>(json!({ "prediction": 1.0 })).is_err());
    }
}
