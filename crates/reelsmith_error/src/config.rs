//! Configuration error types.

/// Configuration error with source location.
///
/// Covers bad plan requests (empty entity or kind lists), templates that
/// fail to resolve even after the default fallback, and invalid settings.
/// Fatal at planning time; at item scope it is recorded on the item's
/// manifest entry instead of aborting the batch.
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Configuration Error: {} at line {} in {}", message, line, file)]
pub struct ConfigError {
    /// Error message
    pub message: String,
    /// Line number where the error occurred
    pub line: u32,
    /// File where the error occurred
    pub file: &'static str,
}

impl ConfigError {
    /// Create a new ConfigError with the given message at the current location.
    ///
    /// # Examples
    ///
    /// ```
    /// use reelsmith_error::ConfigError;
    ///
    /// let err = ConfigError::new("no content kinds requested");
    /// assert!(err.message.contains("no content kinds"));
    /// ```
    #[track_caller]
    pub fn new(message: impl Into<String>) -> Self {
        let location = std::panic::Location::caller();
        Self {
            message: message.into(),
            line: location.line(),
            file: location.file(),
        }
    }
}
