//! Tests for the simulated provider variants.

use reelsmith_core::{RenderStatus, ScriptArtifact};
use reelsmith_providers::{
    AvatarRenderer, SimulatedAvatarRenderer, SimulatedUploader, VideoUploader,
};
use std::collections::BTreeSet;

#[tokio::test]
async fn simulated_render_ids_are_deterministic() {
    let renderer = SimulatedAvatarRenderer::new();
    let script = ScriptArtifact::from_text("start-sit", "Bench him this week.");

    let first = renderer.render_avatar(&script, "presenter-1").await.unwrap();
    let second = renderer.render_avatar(&script, "presenter-1").await.unwrap();

    assert_eq!(first.provider_request_id, second.provider_request_id);
    assert_eq!(first.status, RenderStatus::Pending);
}

#[tokio::test]
async fn different_inputs_yield_different_ids() {
    let renderer = SimulatedAvatarRenderer::new();
    let script = ScriptArtifact::from_text("start-sit", "Bench him this week.");

    let one = renderer.render_avatar(&script, "presenter-1").await.unwrap();
    let two = renderer.render_avatar(&script, "presenter-2").await.unwrap();

    assert_ne!(one.provider_request_id, two.provider_request_id);
}

#[tokio::test]
async fn simulated_poll_completes_with_result_uri() {
    let renderer = SimulatedAvatarRenderer::new();
    let script = ScriptArtifact::from_text("start-sit", "Bench him this week.");

    let job = renderer.render_avatar(&script, "presenter-1").await.unwrap();
    let polled = renderer.poll_status(&job).await.unwrap();

    assert_eq!(polled.status, RenderStatus::Complete);
    let uri = polled.result_uri.expect("complete job must carry result uri");
    assert!(uri.starts_with("sim://avatar/"));
}

#[tokio::test]
async fn stall_marker_keeps_job_processing() {
    let renderer = SimulatedAvatarRenderer::with_stall_marker("glitch");
    let script = ScriptArtifact::from_text("start-sit", "A glitch in the matrix.");

    let job = renderer.render_avatar(&script, "presenter-1").await.unwrap();
    let polled = renderer.poll_status(&job).await.unwrap();
    let polled_again = renderer.poll_status(&polled).await.unwrap();

    assert_eq!(polled.status, RenderStatus::Processing);
    assert_eq!(polled_again.status, RenderStatus::Processing);
    assert!(polled_again.result_uri.is_none());
}

#[tokio::test]
async fn simulated_upload_requires_existing_file() {
    let uploader = SimulatedUploader::new();
    let missing = std::path::Path::new("/nonexistent/clip.mp4");

    let err = uploader
        .upload_video(missing, "caption", &BTreeSet::new())
        .await
        .unwrap_err();

    assert!(format!("{err}").contains("video file missing"));
}

#[tokio::test]
async fn simulated_upload_is_deterministic() {
    let dir = tempfile::tempdir().unwrap();
    let video = dir.path().join("clip.mp4");
    tokio::fs::write(&video, b"").await.unwrap();

    let uploader = SimulatedUploader::new();
    let tags = BTreeSet::from(["#Week5".to_string()]);

    let first = uploader.upload_video(&video, "caption", &tags).await.unwrap();
    let second = uploader.upload_video(&video, "caption", &tags).await.unwrap();

    assert!(first.simulated);
    assert_eq!(first.upload_id, second.upload_id);
    assert!(first.share_url.unwrap().starts_with("sim://uploads/"));
}
