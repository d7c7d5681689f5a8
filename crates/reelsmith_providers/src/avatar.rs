//! Avatar rendering adapters.

use crate::credentials::AvatarCredentials;
use crate::retry::{RetryPolicy, retry_with_policy, transport_error};
use crate::settings::ProviderEndpoint;
use crate::throttle::CallThrottle;
use async_trait::async_trait;
use reelsmith_core::{RenderJob, RenderStatus, ScriptArtifact};
use reelsmith_error::{ProviderError, ProviderErrorKind, ReelsmithResult};
use serde::Deserialize;
use sha2::{Digest, Sha256};
use std::time::Duration;

/// Submits scripts for avatar rendering and polls job status.
#[async_trait]
pub trait AvatarRenderer: std::fmt::Debug + Send + Sync {
    /// Submit a script for rendering; returns the accepted job.
    async fn render_avatar(
        &self,
        script: &ScriptArtifact,
        avatar_id: &str,
    ) -> ReelsmithResult<RenderJob>;

    /// Fetch the provider's current view of a job.
    async fn poll_status(&self, job: &RenderJob) -> ReelsmithResult<RenderJob>;

    /// Adapter name for logs.
    fn provider_name(&self) -> &'static str;
}

/// Deterministic offline renderer.
///
/// Produces synthetic job identifiers derived from the inputs so repeated
/// runs are byte-identical, and completes jobs on the first poll. A stall
/// marker can be configured: scripts containing the marker produce jobs
/// that never leave `processing`, which lets tests exercise the polling
/// timeout path.
#[derive(Debug, Clone, Default)]
pub struct SimulatedAvatarRenderer {
    stall_marker: Option<String>,
}

impl SimulatedAvatarRenderer {
    /// Renderer that completes every job on the first poll.
    pub fn new() -> Self {
        Self::default()
    }

    /// Renderer whose jobs stall forever when the script contains `marker`.
    pub fn with_stall_marker(marker: impl Into<String>) -> Self {
        Self {
            stall_marker: Some(marker.into()),
        }
    }
}

const STALLED_PREFIX: &str = "sim-stalled-";

#[async_trait]
impl AvatarRenderer for SimulatedAvatarRenderer {
    async fn render_avatar(
        &self,
        script: &ScriptArtifact,
        avatar_id: &str,
    ) -> ReelsmithResult<RenderJob> {
        let stalled = self
            .stall_marker
            .as_deref()
            .is_some_and(|marker| script.text().contains(marker));

        let seed = synthetic_seed(&[script.text().as_str(), avatar_id]);
        let id = if stalled {
            format!("{STALLED_PREFIX}{seed}")
        } else {
            format!("sim-render-{seed}")
        };

        tracing::debug!(job_id = %id, avatar_id, "simulated render accepted");
        Ok(RenderJob::pending(id))
    }

    async fn poll_status(&self, job: &RenderJob) -> ReelsmithResult<RenderJob> {
        if job.provider_request_id.starts_with(STALLED_PREFIX) {
            return Ok(job.clone().with_status(RenderStatus::Processing));
        }

        Ok(RenderJob {
            provider_request_id: job.provider_request_id.clone(),
            status: RenderStatus::Complete,
            result_uri: Some(format!("sim://avatar/{}.mp4", job.provider_request_id)),
        })
    }

    fn provider_name(&self) -> &'static str {
        "simulated-avatar"
    }
}

/// Live avatar rendering adapter.
///
/// Fails fast at construction when credentials are absent, throttles
/// outbound calls, and retries transient failures with exponential
/// backoff.
#[derive(Debug)]
pub struct LiveAvatarRenderer {
    client: reqwest::Client,
    base_url: String,
    credentials: AvatarCredentials,
    throttle: CallThrottle,
    retry: RetryPolicy,
}

impl LiveAvatarRenderer {
    /// Construct a live renderer.
    ///
    /// # Errors
    ///
    /// `MissingCredentials` when no credentials were provided or the key is
    /// empty; `Fatal` when the endpoint has no base URL.
    pub fn new(
        credentials: Option<AvatarCredentials>,
        endpoint: &ProviderEndpoint,
        retry: RetryPolicy,
    ) -> ReelsmithResult<Self> {
        let credentials = credentials.ok_or_else(|| {
            ProviderError::new(ProviderErrorKind::MissingCredentials(
                "avatar api key".to_string(),
            ))
        })?;
        if credentials.api_key.trim().is_empty() {
            return Err(ProviderError::new(ProviderErrorKind::MissingCredentials(
                "avatar api key".to_string(),
            ))
            .into());
        }
        if endpoint.base_url.trim().is_empty() {
            return Err(ProviderError::new(ProviderErrorKind::Fatal(
                "avatar provider base_url is not configured".to_string(),
            ))
            .into());
        }

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .map_err(|e| {
                ProviderError::new(ProviderErrorKind::Fatal(format!(
                    "failed to build http client: {e}"
                )))
            })?;

        tracing::warn!(
            provider = "avatar",
            base_url = %endpoint.base_url,
            "LIVE MODE ENABLED: avatar rendering will issue real provider calls"
        );

        Ok(Self {
            client,
            base_url: endpoint.base_url.trim_end_matches('/').to_string(),
            credentials,
            throttle: CallThrottle::new(endpoint.rpm, endpoint.max_concurrent),
            retry,
        })
    }

    async fn submit(&self, script: &ScriptArtifact, avatar_id: &str) -> Result<RenderJob, ProviderError> {
        let _guard = self.throttle.acquire().await?;
        let url = format!("{}/videos", self.base_url);
        tracing::warn!(provider = "avatar", endpoint = %url, "executing live provider call");

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.credentials.api_key)
            .json(&serde_json::json!({
                "script_text": script.text(),
                "avatar_id": avatar_id,
            }))
            .send()
            .await
            .map_err(|e| transport_error("avatar submit", &e))?;

        let accepted: RenderAccepted = crate::http::read_json("avatar", &self.throttle, response).await?;
        Ok(RenderJob::pending(accepted.video_id))
    }

    async fn fetch_status(&self, job: &RenderJob) -> Result<RenderJob, ProviderError> {
        let _guard = self.throttle.acquire().await?;
        let url = format!("{}/videos/{}", self.base_url, job.provider_request_id);
        tracing::warn!(provider = "avatar", endpoint = %url, "executing live provider call");

        let response = self
            .client
            .get(&url)
            .bearer_auth(&self.credentials.api_key)
            .send()
            .await
            .map_err(|e| transport_error("avatar status", &e))?;

        let status: RenderStatusResponse = crate::http::read_json("avatar", &self.throttle, response).await?;
        Ok(status.into_job(&job.provider_request_id))
    }
}

#[async_trait]
impl AvatarRenderer for LiveAvatarRenderer {
    async fn render_avatar(
        &self,
        script: &ScriptArtifact,
        avatar_id: &str,
    ) -> ReelsmithResult<RenderJob> {
        retry_with_policy(&self.retry, || self.submit(script, avatar_id))
            .await
            .map_err(Into::into)
    }

    async fn poll_status(&self, job: &RenderJob) -> ReelsmithResult<RenderJob> {
        retry_with_policy(&self.retry, || self.fetch_status(job))
            .await
            .map_err(Into::into)
    }

    fn provider_name(&self) -> &'static str {
        "live-avatar"
    }
}

#[derive(Debug, Deserialize)]
struct RenderAccepted {
    video_id: String,
}

#[derive(Debug, Deserialize)]
struct RenderStatusResponse {
    status: String,
    #[serde(default)]
    video_url: Option<String>,
}

impl RenderStatusResponse {
    fn into_job(self, id: &str) -> RenderJob {
        let status = match self.status.to_lowercase().as_str() {
            "pending" | "queued" | "waiting" => RenderStatus::Pending,
            "processing" | "rendering" | "in_progress" => RenderStatus::Processing,
            "complete" | "completed" | "done" => RenderStatus::Complete,
            _ => RenderStatus::Failed,
        };
        RenderJob {
            provider_request_id: id.to_string(),
            status,
            result_uri: self.video_url.filter(|_| status == RenderStatus::Complete),
        }
    }
}

pub(crate) fn synthetic_seed(parts: &[&str]) -> String {
    let mut hasher = Sha256::new();
    for part in parts {
        hasher.update(part.as_bytes());
    }
    let digest = format!("{:x}", hasher.finalize());
    digest[..10].to_string()
}
