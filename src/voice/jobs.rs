//! Job creation through the invoicing REST API

use std::time::Duration;

use anyhow::{Context, Result, bail};
use async_trait::async_trait;
use serde::Serialize;

use super::dispatch::JobApi;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct NewJob<'a> {
    title: &'a str,
    status: &'a str,
}

/// `POST /api/jobs` against the app backend
#[derive(Clone)]
pub struct HttpJobApi {
    base_url: String,
    client: ureq::Agent,
}

impl HttpJobApi {
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
}

#[async_trait]
impl JobApi for HttpJobApi {
    async fn create_job(&self, title: &str) -> Result<()> {
        let client = self.client.clone();
        let url = format!("{}/api/jobs", self.base_url);
        let body = serde_json::to_value(NewJob {
            title,
            status: "Upcoming",
        })?;

        let response = tokio::task::spawn_blocking(move || client.post(&url).send_json(body))
            .await
            .context("Job request task failed")?;

        match response {
            Ok(_) => {
                tracing::debug!("Created job '{}'", title);
                Ok(())
            }
            Err(ureq::Error::Status(code, resp)) => {
                let body = resp.into_string().unwrap_or_default();
                bail!("HTTP {code}: {body}")
            }
            Err(e) => Err(anyhow::anyhow!(e)).context("Failed to reach the jobs API"),
        }
    }
}

/// Job API used when no backend is configured
#[derive(Debug, Default, Clone, Copy)]
pub struct NoJobApi;

#[async_trait]
impl JobApi for NoJobApi {
    async fn create_job(&self, _title: &str) -> Result<()> {
        bail!("no API base URL configured")
    }
}
