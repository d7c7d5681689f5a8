//! Provider adapter error types.

/// Kinds of provider errors.
///
/// The transient/fatal split drives the retry policy: `Transient` and
/// `RateLimited` are retried with exponential backoff, everything else
/// fails immediately.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, derive_more::Display)]
pub enum ProviderErrorKind {
    /// Transient failure (network error, 5xx); eligible for retry
    #[display("Transient provider failure: {}", _0)]
    Transient(String),
    /// Permanent failure (malformed request, 4xx); never retried
    #[display("Provider rejected request: {}", _0)]
    Fatal(String),
    /// Required credentials absent; detected before any call attempt
    #[display("Missing credentials: {}", _0)]
    MissingCredentials(String),
    /// 429-class response; retried after a growing penalty window
    #[display("Rate limited by provider: {}", _0)]
    RateLimited(String),
    /// Async job polling exhausted its attempt budget
    #[display("Provider job '{}' timed out while polling", _0)]
    Timeout(String),
}

impl ProviderErrorKind {
    /// Whether this error kind is eligible for retry with backoff.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Transient(_) | Self::RateLimited(_))
    }
}

/// Provider error with location tracking.
///
/// # Examples
///
/// ```
/// use reelsmith_error::{ProviderError, ProviderErrorKind};
///
/// let err = ProviderError::new(ProviderErrorKind::MissingCredentials(
///     "upload access token".to_string(),
/// ));
/// assert!(!err.kind.is_retryable());
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Provider Error: {} at line {} in {}", kind, line, file)]
pub struct ProviderError {
    /// The kind of error that occurred
    pub kind: ProviderErrorKind,
    /// Line number where error was created
    pub line: u32,
    /// File where error was created
    pub file: &'static str,
}

impl ProviderError {
    /// Create a new provider error with automatic location tracking.
    #[track_caller]
    pub fn new(kind: ProviderErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }
}
