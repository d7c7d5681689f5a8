//! Injectable clock abstraction.
//!
//! Polling waits go through [`Clock`] so tests can advance time
//! deterministically instead of sleeping.

use async_trait::async_trait;
use std::sync::Mutex;
use std::time::Duration;

/// Source of sleeps for polling loops.
#[async_trait]
pub trait Clock: Send + Sync {
    /// Wait for the given duration.
    async fn sleep(&self, duration: Duration);
}

/// Real clock backed by the Tokio timer.
#[derive(Debug, Clone, Copy, Default)]
pub struct TokioClock;

#[async_trait]
impl Clock for TokioClock {
    async fn sleep(&self, duration: Duration) {
        tokio::time::sleep(duration).await;
    }
}

/// Deterministic clock for tests: records requested sleeps and returns
/// immediately.
#[derive(Debug, Default)]
pub struct ManualClock {
    slept: Mutex<Vec<Duration>>,
}

impl ManualClock {
    /// A fresh manual clock with no recorded sleeps.
    pub fn new() -> Self {
        Self::default()
    }

    /// Durations requested so far, in order.
    pub fn slept(&self) -> Vec<Duration> {
        self.slept.lock().expect("clock mutex poisoned").clone()
    }
}

#[async_trait]
impl Clock for ManualClock {
    async fn sleep(&self, duration: Duration) {
        self.slept
            .lock()
            .expect("clock mutex poisoned")
            .push(duration);
    }
}
