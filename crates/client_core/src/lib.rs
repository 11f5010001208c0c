use async_trait::async_trait;
use reqwest::Client;
use shared::{
    domain::FormInputSet,
    protocol::{PredictionEnvelope, PredictionOutcome},
};
use tracing::{debug, warn};
use url::Url;

pub mod config;
pub mod controller;
pub mod error;
pub mod ui;

pub use config::{load_settings, ClientSettings};
pub use controller::{FormSubmissionController, SubmissionOutcome, UiBindings};
pub use error::ClientError;

/// Remote side of the form: turns a field snapshot into a validated outcome.
#[async_trait]
pub trait PredictionService: Send + Sync {
    async fn predict(&self, fields: &FormInputSet) -> Result<PredictionOutcome, ClientError>;
}

pub struct PredictionClient {
    http: Client,
    endpoint: Url,
}

impl PredictionClient {
    pub fn new(endpoint: Url) -> Self {
        Self {
            http: Client::new(),
            endpoint,
        }
    }

    pub fn from_settings(settings: &ClientSettings) -> Result<Self, ClientError> {
        let mut builder = Client::builder();
        if let Some(timeout) = settings.request_timeout() {
            builder = builder.timeout(timeout);
        }
        Ok(Self {
            http: builder.build()?,
            endpoint: settings.endpoint_url()?,
        })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}

#[async_trait]
impl PredictionService for PredictionClient {
    async fn predict(&self, fields: &FormInputSet) -> Result<PredictionOutcome, ClientError> {
        let res = self
            .http
            .post(self.endpoint.clone())
            .json(fields)
            .send()
            .await?;
        let status = res.status();
        let body = res.bytes().await?;
        debug!(%status, bytes = body.len(), "prediction response received");

        // The body is authoritative; an error envelope may arrive with any status code.
        let envelope: PredictionEnvelope = serde_json::from_slice(&body)?;
        if !status.is_success() {
            warn!(%status, envelope_status = %envelope.status, "prediction service returned HTTP error");
        }
        Ok(PredictionOutcome::try_from(envelope)?)
    }
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
