use shared::error::ProtocolError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("prediction request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("prediction response is not valid JSON: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("malformed prediction response: {0}")]
    Protocol(#[from] ProtocolError),
    #[error("invalid prediction server url {url:?}: {source}")]
    InvalidUrl {
        url: String,
        source: url::ParseError,
    },
}
