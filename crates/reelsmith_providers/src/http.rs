//! Shared response classification for live adapters.

use crate::throttle::CallThrottle;
use reelsmith_error::{ProviderError, ProviderErrorKind};

/// Classify a provider response and deserialize its JSON body.
///
/// 429 grows the throttle penalty and is retryable; 5xx is transient;
/// other 4xx are fatal; an unparseable body is fatal.
pub(crate) async fn read_json<T: serde::de::DeserializeOwned>(
    provider: &str,
    throttle: &CallThrottle,
    response: reqwest::Response,
) -> Result<T, ProviderError> {
    let status = response.status();
    if status.as_u16() == 429 {
        throttle.note_rate_limited();
        return Err(ProviderError::new(ProviderErrorKind::RateLimited(format!(
            "{provider} provider returned {status}"
        ))));
    }
    if status.is_server_error() {
        return Err(ProviderError::new(ProviderErrorKind::Transient(format!(
            "{provider} provider returned {status}"
        ))));
    }
    if status.is_client_error() {
        return Err(ProviderError::new(ProviderErrorKind::Fatal(format!(
            "{provider} provider rejected request: {status}"
        ))));
    }

    response.json::<T>().await.map_err(|e| {
        ProviderError::new(ProviderErrorKind::Fatal(format!(
            "malformed {provider} provider response: {e}"
        )))
    })
}
