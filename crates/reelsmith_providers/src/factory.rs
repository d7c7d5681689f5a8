//! Adapter construction from explicit configuration.
//!
//! One place builds configured adapters for the pipeline, API, and CLI
//! layers. Mode is decided here from [`ProviderToggles`]; nothing deeper
//! in the call tree consults configuration or the environment.

use crate::avatar::{AvatarRenderer, LiveAvatarRenderer, SimulatedAvatarRenderer};
use crate::credentials::{AvatarCredentials, UploadCredentials};
use crate::retry::RetryPolicy;
use crate::settings::ProviderSettings;
use crate::toggles::{ProviderMode, ProviderToggles};
use crate::upload::{LiveUploader, SimulatedUploader, VideoUploader};
use reelsmith_error::ReelsmithResult;
use std::sync::Arc;

/// Build the avatar renderer for this run.
///
/// Live construction validates credentials and endpoint configuration up
/// front and fails with a distinguishable error before any call is made.
pub fn build_avatar_renderer(
    toggles: &ProviderToggles,
    settings: &ProviderSettings,
    credentials: Option<AvatarCredentials>,
    retry: RetryPolicy,
) -> ReelsmithResult<Arc<dyn AvatarRenderer>> {
    match toggles.effective_avatar() {
        ProviderMode::Simulated => {
            tracing::info!(provider = "avatar", "using simulated avatar renderer");
            Ok(Arc::new(SimulatedAvatarRenderer::new()))
        }
        ProviderMode::Live => Ok(Arc::new(LiveAvatarRenderer::new(
            credentials,
            &settings.avatar,
            retry,
        )?)),
    }
}

/// Build the video uploader for this run.
pub fn build_uploader(
    toggles: &ProviderToggles,
    settings: &ProviderSettings,
    credentials: Option<UploadCredentials>,
    retry: RetryPolicy,
) -> ReelsmithResult<Arc<dyn VideoUploader>> {
    match toggles.effective_upload() {
        ProviderMode::Simulated => {
            tracing::info!(provider = "upload", "using simulated uploader");
            Ok(Arc::new(SimulatedUploader::new()))
        }
        ProviderMode::Live => Ok(Arc::new(LiveUploader::new(
            credentials,
            &settings.upload,
            retry,
        )?)),
    }
}
