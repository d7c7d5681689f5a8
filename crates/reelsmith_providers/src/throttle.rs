//! Outbound call throttling.
//!
//! Combines a governor GCRA limiter (requests per minute) with a Tokio
//! semaphore (concurrent calls). Repeated 429-class responses within a
//! run grow a penalty window that is applied before every subsequent
//! call and never resets.

use governor::clock::DefaultClock;
use governor::state::{InMemoryState, NotKeyed};
use governor::{Quota, RateLimiter as GovernorRateLimiter};
use reelsmith_error::{ProviderError, ProviderErrorKind};
use std::num::NonZeroU32;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;
use tokio::sync::{OwnedSemaphorePermit, Semaphore};

type DirectRateLimiter = GovernorRateLimiter<NotKeyed, InMemoryState, DefaultClock>;

const INITIAL_PENALTY_MS: u64 = 500;
const MAX_PENALTY_MS: u64 = 60_000;

/// Throttle for one provider's outbound calls.
#[derive(Debug)]
pub struct CallThrottle {
    rpm_limiter: Option<Arc<DirectRateLimiter>>,
    concurrent: Arc<Semaphore>,
    penalty_ms: AtomicU64,
}

/// Held for the duration of one outbound call; releases the concurrency
/// slot on drop.
pub struct ThrottleGuard {
    _permit: OwnedSemaphorePermit,
}

impl CallThrottle {
    /// Build a throttle with an optional RPM ceiling and a concurrency cap.
    pub fn new(rpm: Option<u32>, max_concurrent: u32) -> Self {
        let rpm_limiter = rpm.and_then(NonZeroU32::new).map(|n| {
            let quota = Quota::per_minute(n);
            Arc::new(GovernorRateLimiter::direct(quota))
        });

        Self {
            rpm_limiter,
            concurrent: Arc::new(Semaphore::new(max_concurrent.max(1) as usize)),
            penalty_ms: AtomicU64::new(0),
        }
    }

    /// Acquire permission for one outbound call.
    ///
    /// Waits on the concurrency semaphore, any accumulated 429 penalty,
    /// and the GCRA limiter, in that order.
    pub async fn acquire(&self) -> Result<ThrottleGuard, ProviderError> {
        let permit = self
            .concurrent
            .clone()
            .acquire_owned()
            .await
            .map_err(|_| {
                ProviderError::new(ProviderErrorKind::Transient(
                    "concurrency limiter closed".to_string(),
                ))
            })?;

        let penalty = self.penalty_ms.load(Ordering::Relaxed);
        if penalty > 0 {
            tracing::debug!(penalty_ms = penalty, "applying rate-limit penalty window");
            tokio::time::sleep(Duration::from_millis(penalty)).await;
        }

        if let Some(limiter) = &self.rpm_limiter {
            limiter.until_ready().await;
        }

        Ok(ThrottleGuard { _permit: permit })
    }

    /// Record a 429-class response. Grows the penalty window; it never
    /// resets within a run.
    pub fn note_rate_limited(&self) {
        let result = self.penalty_ms.fetch_update(Ordering::Relaxed, Ordering::Relaxed, |p| {
            Some(if p == 0 {
                INITIAL_PENALTY_MS
            } else {
                p.saturating_mul(2).min(MAX_PENALTY_MS)
            })
        });
        if let Ok(previous) = result {
            tracing::warn!(
                previous_ms = previous,
                "provider rate limit hit, growing penalty window"
            );
        }
    }

    /// Current penalty window in milliseconds.
    pub fn current_penalty_ms(&self) -> u64 {
        self.penalty_ms.load(Ordering::Relaxed)
    }
}
