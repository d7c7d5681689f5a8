//! Top-level error wrapper types.

use crate::{
    ConfigError, EntityUnavailableError, ExportError, PolicyViolationError, ProviderError,
    StorageError,
};

/// The foundation error enum for the Reelsmith workspace.
///
/// Expected business conditions (`EntityUnavailable`, `PolicyViolation`)
/// carry their own variants so callers can match on them without string
/// inspection.
///
/// # Examples
///
/// ```
/// use reelsmith_error::{ReelsmithError, ReelsmithErrorKind, EntityUnavailableError};
///
/// let err: ReelsmithError = EntityUnavailableError::new("Sam Okafor", "status = ir").into();
/// assert!(matches!(err.kind(), ReelsmithErrorKind::EntityUnavailable(_)));
/// ```
#[derive(Debug, derive_more::From, derive_more::Display, derive_more::Error)]
pub enum ReelsmithErrorKind {
    /// Configuration error (bad plan request, missing template, bad settings)
    #[from(ConfigError)]
    Config(ConfigError),
    /// Entity flagged unavailable upstream
    #[from(EntityUnavailableError)]
    EntityUnavailable(EntityUnavailableError),
    /// Guardrail rule violated under fail mode
    #[from(PolicyViolationError)]
    PolicyViolation(PolicyViolationError),
    /// Provider adapter error (transient, fatal, credentials, timeout)
    #[from(ProviderError)]
    Provider(ProviderError),
    /// Artifact persistence error
    #[from(StorageError)]
    Storage(StorageError),
    /// Scheduler export error
    #[from(ExportError)]
    Export(ExportError),
}

/// Reelsmith error with kind discrimination.
///
/// # Examples
///
/// ```
/// use reelsmith_error::{ReelsmithResult, ConfigError};
///
/// fn might_fail() -> ReelsmithResult<()> {
///     Err(ConfigError::new("missing field"))?
/// }
///
/// assert!(might_fail().is_err());
/// ```
#[derive(Debug, derive_more::Display, derive_more::Error)]
#[display("Reelsmith Error: {}", _0)]
pub struct ReelsmithError(Box<ReelsmithErrorKind>);

impl ReelsmithError {
    /// Create a new error from a kind.
    pub fn new(kind: ReelsmithErrorKind) -> Self {
        Self(Box::new(kind))
    }

    /// Get the error kind.
    pub fn kind(&self) -> &ReelsmithErrorKind {
        &self.0
    }
}

// Generic From implementation for any type that converts to ReelsmithErrorKind
impl<T> From<T> for ReelsmithError
where
    T: Into<ReelsmithErrorKind>,
{
    fn from(err: T) -> Self {
        Self::new(err.into())
    }
}

/// Result type for Reelsmith operations.
///
/// # Examples
///
/// ```
/// use reelsmith_error::{ReelsmithResult, StorageError, StorageErrorKind};
///
/// fn read_manifest() -> ReelsmithResult<String> {
///     Err(StorageError::new(StorageErrorKind::NotFound("manifest.json".to_string())))?
/// }
/// ```
pub type ReelsmithResult<T> = std::result::Result<T, ReelsmithError>;
