//! Remote verification service client

use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum VerifyError {
    #[error("verification request failed: {0}")]
    Transport(String),

    #[error("verification backend returned status {0}")]
    Status(u16),

    #[error("invalid verification response: {0}")]
    Decode(String),

    #[error("verification task failed: {0}")]
    Join(String),
}

impl From<ureq::Error> for VerifyError {
    fn from(e: ureq::Error) -> Self {
        match e {
            ureq::Error::Status(code, _) => VerifyError::Status(code),
            ureq::Error::Transport(t) => VerifyError::Transport(t.to_string()),
        }
    }
}

/// Answer of `/voice/verify`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VerifyResponse {
    pub ok: bool,
    #[serde(default)]
    pub score: f64,
}

#[async_trait]
pub trait VerificationBackend: Send + Sync {
    async fn verify(&self, sample: &str) -> Result<VerifyResponse, VerifyError>;

    async fn enroll(&self, sample: &str) -> Result<(), VerifyError>;
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SampleRequest {
    data_url: String,
}

/// Backend reached over HTTP (`POST /voice/verify`, `POST /voice/enroll`)
#[derive(Clone)]
pub struct HttpVerificationBackend {
    base_url: String,
    client: ureq::Agent,
}

impl HttpVerificationBackend {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Self {
        let client = ureq::AgentBuilder::new()
            .timeout_connect(timeout)
            .timeout_read(timeout)
            .build();

        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            client,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// ureq is blocking, so each call runs on the blocking pool
    async fn post(&self, path: &str, sample: &str) -> Result<ureq::Response, VerifyError> {
        let client = self.client.clone();
        let url = format!("{}{}", self.base_url, path);
        let body = SampleRequest {
            data_url: sample.to_string(),
        };

        tokio::task::spawn_blocking(move || client.post(&url).send_json(body))
            .await
            .map_err(|e| VerifyError::Join(e.to_string()))?
            .map_err(VerifyError::from)
    }
}

#[async_trait]
impl VerificationBackend for HttpVerificationBackend {
    async fn verify(&self, sample: &str) -> Result<VerifyResponse, VerifyError> {
        let response = self.post("/voice/verify", sample).await?;
        tokio::task::spawn_blocking(move || response.into_json::<VerifyResponse>())
            .await
            .map_err(|e| VerifyError::Join(e.to_string()))?
            .map_err(|e| VerifyError::Decode(e.to_string()))
    }

    async fn enroll(&self, sample: &str) -> Result<(), VerifyError> {
        self.post("/voice/enroll", sample).await?;
        Ok(())
    }
}
