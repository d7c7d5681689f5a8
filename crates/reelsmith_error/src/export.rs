//! Scheduler export error types.

/// Kinds of export errors.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, derive_more::Display)]
pub enum ExportErrorKind {
    /// Week manifest missing or unreadable
    #[display("Manifest not found: {}", _0)]
    MissingManifest(String),
    /// Timezone name did not resolve to a known IANA zone
    #[display("Unknown timezone: {}", _0)]
    InvalidTimezone(String),
    /// Local datetime does not exist in the target zone (DST gap)
    #[display("Invalid local time: {}", _0)]
    InvalidLocalTime(String),
    /// Failed to write the schedule artifact
    #[display("Failed to write schedule: {}", _0)]
    WriteFailed(String),
}

/// Export error with location tracking.
///
/// # Examples
///
/// ```
/// use reelsmith_error::{ExportError, ExportErrorKind};
///
/// let err = ExportError::new(ExportErrorKind::InvalidTimezone("Mars/Olympus".to_string()));
/// assert!(format!("{}", err).contains("Unknown timezone"));
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Export Error: {} at line {} in {}", kind, line, file)]
pub struct ExportError {
    /// The kind of error that occurred
    pub kind: ExportErrorKind,
    /// Line number where error was created
    pub line: u32,
    /// File where error was created
    pub file: &'static str,
}

impl ExportError {
    /// Create a new export error with automatic location tracking.
    #[track_caller]
    pub fn new(kind: ExportErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }
}
