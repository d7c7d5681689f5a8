//! Avatar render job and upload result types.

use serde::{Deserialize, Serialize};

/// Lifecycle state of an asynchronous avatar render job.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, strum::Display, strum::EnumString,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum RenderStatus {
    /// Accepted by the provider, not yet started
    Pending,
    /// Provider is rendering
    Processing,
    /// Finished; `result_uri` is populated
    Complete,
    /// Provider reported a failure
    Failed,
    /// Polling budget exhausted before a terminal provider state
    TimedOut,
}

impl RenderStatus {
    /// Whether this state ends the job lifecycle.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Complete | Self::Failed | Self::TimedOut)
    }
}

/// An avatar render job tracked against a provider.
///
/// Created when rendering is requested; mutated only by polling the
/// provider. Terminal states are `complete`, `failed`, and `timed_out`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderJob {
    /// Provider-assigned job identifier, preserved for later re-attempts
    pub provider_request_id: String,
    /// Current lifecycle state
    pub status: RenderStatus,
    /// Location of the rendered video; present only when complete
    pub result_uri: Option<String>,
}

impl RenderJob {
    /// A freshly accepted job in the pending state.
    pub fn pending(provider_request_id: impl Into<String>) -> Self {
        Self {
            provider_request_id: provider_request_id.into(),
            status: RenderStatus::Pending,
            result_uri: None,
        }
    }

    /// This job with its status replaced.
    pub fn with_status(mut self, status: RenderStatus) -> Self {
        self.status = status;
        self
    }
}

/// Result of uploading a video to the social platform.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadResult {
    /// Provider-assigned upload identifier
    pub upload_id: String,
    /// Public share URL when the provider returns one
    pub share_url: Option<String>,
    /// Whether the upload was simulated
    pub simulated: bool,
}
