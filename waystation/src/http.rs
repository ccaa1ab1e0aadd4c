//! HTTP submitter posting the payload as JSON.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, warn};
use waystation_types::SurveyPayload;

use crate::{REJECTED_FALLBACK_MESSAGE, SubmitError, Submitter};

/// Production collection endpoint.
pub const DEFAULT_ENDPOINT: &str = "https://backend-questionario.vercel.app/api/survey/submit";

#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: Option<String>,
}

/// Posts the payload to a remote endpoint.
#[derive(Debug, Clone)]
pub struct HttpSubmitter {
    http: Client,
    endpoint: String,
}

impl HttpSubmitter {
    /// Create a submitter with a default client.
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self::with_client(endpoint, Client::new())
    }

    /// Create a submitter whose requests give up after `timeout`.
    pub fn with_timeout(endpoint: impl Into<String>, timeout: Duration) -> Result<Self, SubmitError> {
        let http = Client::builder().timeout(timeout).build()?;
        Ok(Self::with_client(endpoint, http))
    }

    /// Create a submitter around an existing client.
    pub fn with_client(endpoint: impl Into<String>, http: Client) -> Self {
        Self {
            http,
            endpoint: endpoint.into(),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl Submitter for HttpSubmitter {
    async fn submit(&self, payload: &SurveyPayload) -> Result<(), SubmitError> {
        let response = self.http.post(&self.endpoint).json(payload).send().await?;
        let status = response.status();
        let body = response.bytes().await?;

        if status.is_success() {
            let ack: serde_json::Value = serde_json::from_slice(&body)
                .map_err(|err| SubmitError::MalformedResponse(err.to_string()))?;
            debug!(%status, %ack, "submission accepted");
            return Ok(());
        }

        let message = serde_json::from_slice::<ErrorBody>(&body)
            .ok()
            .and_then(|body| body.error)
            .filter(|message| !message.is_empty())
            .unwrap_or_else(|| REJECTED_FALLBACK_MESSAGE.to_string());
        warn!(%status, %message, "submission rejected");
        Err(SubmitError::rejected(status.as_u16(), message))
    }
}
