//! Social upload adapters.

use crate::avatar::synthetic_seed;
use crate::credentials::UploadCredentials;
use crate::http::read_json;
use crate::retry::{RetryPolicy, retry_with_policy, transport_error};
use crate::settings::ProviderEndpoint;
use crate::throttle::CallThrottle;
use async_trait::async_trait;
use reelsmith_core::UploadResult;
use reelsmith_error::{ProviderError, ProviderErrorKind, ReelsmithResult};
use serde::Deserialize;
use std::collections::BTreeSet;
use std::path::Path;
use std::time::Duration;

/// Uploads finished videos to the social platform.
#[async_trait]
pub trait VideoUploader: Send + Sync {
    /// Upload the video at `video_path` with its caption and tags.
    async fn upload_video(
        &self,
        video_path: &Path,
        caption: &str,
        tags: &BTreeSet<String>,
    ) -> ReelsmithResult<UploadResult>;

    /// Adapter name for logs.
    fn provider_name(&self) -> &'static str;
}

/// Deterministic offline uploader.
///
/// Verifies the video file exists (so simulated runs exercise the same
/// precondition as live ones) and fabricates a stable upload id from the
/// inputs.
#[derive(Debug, Clone, Copy, Default)]
pub struct SimulatedUploader;

impl SimulatedUploader {
    /// A simulated uploader.
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl VideoUploader for SimulatedUploader {
    async fn upload_video(
        &self,
        video_path: &Path,
        caption: &str,
        _tags: &BTreeSet<String>,
    ) -> ReelsmithResult<UploadResult> {
        if tokio::fs::metadata(video_path).await.is_err() {
            return Err(ProviderError::new(ProviderErrorKind::Fatal(format!(
                "video file missing: {}",
                video_path.display()
            )))
            .into());
        }

        let path_text = video_path.to_string_lossy();
        let seed = synthetic_seed(&[path_text.as_ref(), caption]);
        let upload_id = format!("sim-upload-{seed}");
        tracing::debug!(upload_id = %upload_id, "simulated upload accepted");

        Ok(UploadResult {
            share_url: Some(format!("sim://uploads/{upload_id}")),
            upload_id,
            simulated: true,
        })
    }

    fn provider_name(&self) -> &'static str {
        "simulated-upload"
    }
}

/// Live social upload adapter.
///
/// Fails fast at construction when either credential is absent; a call
/// is never attempted with partial credentials.
pub struct LiveUploader {
    client: reqwest::Client,
    base_url: String,
    credentials: UploadCredentials,
    throttle: CallThrottle,
    retry: RetryPolicy,
}

impl LiveUploader {
    /// Construct a live uploader.
    ///
    /// # Errors
    ///
    /// `MissingCredentials` when the access token or open id is absent;
    /// `Fatal` when the endpoint has no base URL.
    pub fn new(
        credentials: Option<UploadCredentials>,
        endpoint: &ProviderEndpoint,
        retry: RetryPolicy,
    ) -> ReelsmithResult<Self> {
        let credentials = credentials.ok_or_else(|| {
            ProviderError::new(ProviderErrorKind::MissingCredentials(
                "upload access token and open id".to_string(),
            ))
        })?;
        if credentials.access_token.trim().is_empty() || credentials.open_id.trim().is_empty() {
            return Err(ProviderError::new(ProviderErrorKind::MissingCredentials(
                "upload access token and open id".to_string(),
            ))
            .into());
        }
        if endpoint.base_url.trim().is_empty() {
            return Err(ProviderError::new(ProviderErrorKind::Fatal(
                "upload provider base_url is not configured".to_string(),
            ))
            .into());
        }

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(60))
            .build()
            .map_err(|e| {
                ProviderError::new(ProviderErrorKind::Fatal(format!(
                    "failed to build http client: {e}"
                )))
            })?;

        tracing::warn!(
            provider = "upload",
            base_url = %endpoint.base_url,
            open_id = %credentials.open_id,
            "LIVE MODE ENABLED: uploads will publish to the real platform"
        );

        Ok(Self {
            client,
            base_url: endpoint.base_url.trim_end_matches('/').to_string(),
            credentials,
            throttle: CallThrottle::new(endpoint.rpm, endpoint.max_concurrent),
            retry,
        })
    }

    async fn init_upload(
        &self,
        caption: &str,
        tags: &BTreeSet<String>,
    ) -> Result<String, ProviderError> {
        let _guard = self.throttle.acquire().await?;
        let url = format!("{}/uploads", self.base_url);
        tracing::warn!(provider = "upload", endpoint = %url, "executing live provider call");

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.credentials.access_token)
            .json(&serde_json::json!({
                "open_id": self.credentials.open_id,
                "caption": caption,
                "tags": tags,
                "draft": true,
            }))
            .send()
            .await
            .map_err(|e| transport_error("upload init", &e))?;

        let accepted: UploadAccepted = read_json("upload", &self.throttle, response).await?;
        Ok(accepted.upload_id)
    }

    async fn send_content(&self, upload_id: &str, data: Vec<u8>) -> Result<(), ProviderError> {
        let _guard = self.throttle.acquire().await?;
        let url = format!("{}/uploads/{}/content", self.base_url, upload_id);
        tracing::warn!(provider = "upload", endpoint = %url, "executing live provider call");

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.credentials.access_token)
            .body(data)
            .send()
            .await
            .map_err(|e| transport_error("upload content", &e))?;

        let _: UploadStatusResponse = read_json("upload", &self.throttle, response).await?;
        Ok(())
    }

    async fn fetch_result(&self, upload_id: &str) -> Result<UploadResult, ProviderError> {
        let _guard = self.throttle.acquire().await?;
        let url = format!("{}/uploads/{}", self.base_url, upload_id);
        tracing::warn!(provider = "upload", endpoint = %url, "executing live provider call");

        let response = self
            .client
            .get(&url)
            .bearer_auth(&self.credentials.access_token)
            .send()
            .await
            .map_err(|e| transport_error("upload status", &e))?;

        let status: UploadStatusResponse = read_json("upload", &self.throttle, response).await?;
        Ok(UploadResult {
            upload_id: upload_id.to_string(),
            share_url: status.share_url,
            simulated: false,
        })
    }
}

#[async_trait]
impl VideoUploader for LiveUploader {
    async fn upload_video(
        &self,
        video_path: &Path,
        caption: &str,
        tags: &BTreeSet<String>,
    ) -> ReelsmithResult<UploadResult> {
        let data = tokio::fs::read(video_path).await.map_err(|e| {
            ProviderError::new(ProviderErrorKind::Fatal(format!(
                "video file unreadable: {}: {e}",
                video_path.display()
            )))
        })?;

        let upload_id = retry_with_policy(&self.retry, || self.init_upload(caption, tags)).await?;
        retry_with_policy(&self.retry, || self.send_content(&upload_id, data.clone())).await?;
        let result = retry_with_policy(&self.retry, || self.fetch_result(&upload_id)).await?;

        Ok(result)
    }

    fn provider_name(&self) -> &'static str {
        "live-upload"
    }
}

#[derive(Debug, Deserialize)]
struct UploadAccepted {
    upload_id: String,
}

#[derive(Debug, Deserialize)]
struct UploadStatusResponse {
    #[serde(default)]
    share_url: Option<String>,
}
