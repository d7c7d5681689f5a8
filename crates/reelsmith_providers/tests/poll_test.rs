//! Polling driver tests using the deterministic manual clock.

use reelsmith_core::{RenderJob, RenderStatus, ScriptArtifact};
use reelsmith_providers::{
    AvatarRenderer, ManualClock, PollPolicy, SimulatedAvatarRenderer, await_completion,
};
use std::time::Duration;

#[tokio::test]
async fn completes_without_sleeping_when_job_finishes_first_poll() {
    let renderer = SimulatedAvatarRenderer::new();
    let script = ScriptArtifact::from_text("start-sit", "Quick turnaround.");
    let job = renderer.render_avatar(&script, "presenter-1").await.unwrap();

    let clock = ManualClock::new();
    let policy = PollPolicy::new(250, 5);
    let done = await_completion(&renderer, job, &policy, &clock).await.unwrap();

    assert_eq!(done.status, RenderStatus::Complete);
    assert!(clock.slept().is_empty());
}

#[tokio::test]
async fn stalled_job_times_out_after_attempt_budget() {
    let renderer = SimulatedAvatarRenderer::with_stall_marker("stall");
    let script = ScriptArtifact::from_text("start-sit", "Please stall forever.");
    let job = renderer.render_avatar(&script, "presenter-1").await.unwrap();

    let clock = ManualClock::new();
    let policy = PollPolicy::new(250, 4);
    let done = await_completion(&renderer, job, &policy, &clock).await.unwrap();

    assert_eq!(done.status, RenderStatus::TimedOut);
    // one recorded sleep per non-terminal poll, no real waiting
    assert_eq!(clock.slept(), vec![Duration::from_millis(250); 4]);
    assert!(done.provider_request_id.starts_with("sim-stalled-"));
}

#[tokio::test]
async fn terminal_job_is_returned_untouched() {
    let renderer = SimulatedAvatarRenderer::new();
    let clock = ManualClock::new();
    let policy = PollPolicy::default();

    let failed = RenderJob {
        provider_request_id: "render-123".to_string(),
        status: RenderStatus::Failed,
        result_uri: None,
    };
    let out = await_completion(&renderer, failed.clone(), &policy, &clock)
        .await
        .unwrap();

    assert_eq!(out, failed);
    assert!(clock.slept().is_empty());
}
