use thiserror::Error;

/// Raised when a `/predict` envelope does not match the shape its status promises.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProtocolError {
    #[error("success response is missing a prediction")]
    MissingPrediction,
    #[error("prediction is not numeric: {0}")]
    InvalidPrediction(String),
    #[error("failure response with status {status:?} is missing a message")]
    MissingMessage { status: String },
}
