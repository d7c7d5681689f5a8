//! Bounded polling for asynchronous render jobs.

use crate::avatar::AvatarRenderer;
use crate::clock::Clock;
use reelsmith_core::{RenderJob, RenderStatus};
use reelsmith_error::ReelsmithResult;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Polling budget for asynchronous provider jobs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, derive_new::new)]
pub struct PollPolicy {
    /// Delay between polls in milliseconds
    pub interval_ms: u64,
    /// Maximum number of polls before giving up
    pub max_attempts: u32,
}

impl Default for PollPolicy {
    fn default() -> Self {
        Self {
            interval_ms: 2_000,
            max_attempts: 30,
        }
    }
}

/// Poll a job until it reaches a terminal state or the attempt budget is
/// exhausted.
///
/// The job state machine is `pending → processing → complete | failed`;
/// when the budget runs out the returned job carries `timed_out` instead
/// of blocking indefinitely. Waits go through the injected [`Clock`], so
/// tests can drive this without real sleeps.
pub async fn await_completion(
    renderer: &dyn AvatarRenderer,
    job: RenderJob,
    policy: &PollPolicy,
    clock: &dyn Clock,
) -> ReelsmithResult<RenderJob> {
    if job.status.is_terminal() {
        return Ok(job);
    }

    let mut current = job;
    for attempt in 1..=policy.max_attempts {
        current = renderer.poll_status(&current).await?;
        if current.status.is_terminal() {
            tracing::debug!(
                job_id = %current.provider_request_id,
                status = %current.status,
                attempt,
                "render job reached terminal state"
            );
            return Ok(current);
        }

        tracing::trace!(
            job_id = %current.provider_request_id,
            status = %current.status,
            attempt,
            "render job still in flight"
        );
        clock.sleep(Duration::from_millis(policy.interval_ms)).await;
    }

    tracing::warn!(
        job_id = %current.provider_request_id,
        attempts = policy.max_attempts,
        "render job polling budget exhausted"
    );
    Ok(current.with_status(RenderStatus::TimedOut))
}
