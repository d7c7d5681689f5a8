//! Bounded retry with exponential backoff.

use reelsmith_error::{ProviderError, ProviderErrorKind};
use std::future::Future;
use std::time::Duration;
use tokio_retry2::strategy::{ExponentialBackoff, jitter};
use tokio_retry2::{Retry, RetryError};

/// Retry budget for live provider calls.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct RetryPolicy {
    /// Total attempts including the first call
    pub max_attempts: u32,
    /// Initial backoff in milliseconds
    pub initial_backoff_ms: u64,
    /// Ceiling on any single backoff delay
    pub max_delay_secs: u64,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            initial_backoff_ms: 250,
            max_delay_secs: 8,
        }
    }
}

/// Run `operation` with bounded exponential backoff.
///
/// Transient and rate-limited errors are retried up to the policy's
/// attempt ceiling; everything else fails immediately without retry.
///
/// # Examples
///
/// ```no_run
/// use reelsmith_error::{ProviderError, ProviderErrorKind};
/// use reelsmith_providers::{RetryPolicy, retry_with_policy};
///
/// # async fn demo() -> Result<u32, ProviderError> {
/// retry_with_policy(&RetryPolicy::default(), || async {
///     Err::<u32, _>(ProviderError::new(ProviderErrorKind::Transient(
///         "connection reset".to_string(),
///     )))
/// })
/// .await
/// # }
/// ```
pub async fn retry_with_policy<T, F, Fut>(
    policy: &RetryPolicy,
    mut operation: F,
) -> Result<T, ProviderError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, ProviderError>>,
{
    if policy.max_attempts <= 1 {
        return operation().await;
    }

    let strategy = ExponentialBackoff::from_millis(policy.initial_backoff_ms.max(1))
        .factor(2)
        .max_delay(Duration::from_secs(policy.max_delay_secs))
        .map(jitter)
        .take(policy.max_attempts.saturating_sub(1) as usize);

    Retry::spawn(strategy, || {
        let attempt = operation();
        async move {
            match attempt.await {
                Ok(value) => Ok(value),
                Err(err) if err.kind.is_retryable() => {
                    tracing::warn!(error = %err, "transient provider failure, will retry");
                    Err(RetryError::Transient {
                        err,
                        retry_after: None,
                    })
                }
                Err(err) => {
                    tracing::warn!(error = %err, "permanent provider failure, not retrying");
                    Err(RetryError::Permanent(err))
                }
            }
        }
    })
    .await
}

/// Classify a transport-level error as transient.
pub(crate) fn transport_error(context: &str, err: &reqwest::Error) -> ProviderError {
    ProviderError::new(ProviderErrorKind::Transient(format!("{context}: {err}")))
}
