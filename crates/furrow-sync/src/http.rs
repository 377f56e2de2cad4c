use async_trait::async_trait;
use furrow_core::error::{FurrowError, Result};
use furrow_core::models::CoverageSessionSummary;
use serde::Serialize;

use crate::payload::BoundaryRegistration;
use crate::ports::SyncClient;

/// HTTP sync adapter
pub struct HttpSyncClient {
    /// Base URL for the sync endpoint (e.g., "http://localhost:8080")
    base_url: String,

    /// HTTP client
    client: reqwest::Client,
}

impl HttpSyncClient {
    /// Create a new HTTP sync client
    pub fn new(base_url: impl Into<String>) -> Self {
        Self { base_url: base_url.into(), client: reqwest::Client::new() }
    }

    /// Create with default localhost URL
    pub fn localhost() -> Self {
        Self::new("http://localhost:8080")
    }

    async fn post_json<T: Serialize + Sync>(&self, path: &str, body: &T) -> Result<()> {
        let response = self
            .client
            .post(format!("{}/{}", self.base_url, path))
            .json(body)
            .send()
            .await
            .map_err(|e| FurrowError::SyncFailure {
                reason: format!("Failed to reach sync endpoint at {}: {}", self.base_url, e),
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            return Err(FurrowError::SyncFailure {
                reason: format!("Sync endpoint error ({}): {}", status, error_text),
            });
        }

        Ok(())
    }
}

#[async_trait]
impl SyncClient for HttpSyncClient {
    async fn submit_boundary(&self, registration: &BoundaryRegistration) -> Result<()> {
        self.post_json("boundaries", registration).await?;
        tracing::info!(plot = %registration.identity.plot_name, "Boundary registered");
        Ok(())
    }

    async fn submit_session(&self, summary: &CoverageSessionSummary) -> Result<()> {
        self.post_json("sessions", summary).await?;
        tracing::info!(session_id = %summary.session_id, "Session submitted");
        Ok(())
    }
}
