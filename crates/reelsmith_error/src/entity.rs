//! Entity availability error types.

/// An entity (subject of a content item) is flagged unavailable upstream.
///
/// This is an expected business condition, not a failure: the pipeline
/// short-circuits the affected item to a `blocked` manifest entry and the
/// API layer can render a specific "entity unavailable" response. It is
/// never retried and never logged at error level.
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Entity '{}' unavailable: {}", entity, reason)]
pub struct EntityUnavailableError {
    /// The entity that was flagged unavailable
    pub entity: String,
    /// Upstream reason for the block
    pub reason: String,
}

impl EntityUnavailableError {
    /// Create a new error for a blocked entity.
    ///
    /// # Examples
    ///
    /// ```
    /// use reelsmith_error::EntityUnavailableError;
    ///
    /// let err = EntityUnavailableError::new("Jordan Reyes", "status = out");
    /// assert!(format!("{}", err).contains("unavailable"));
    /// ```
    pub fn new(entity: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            entity: entity.into(),
            reason: reason.into(),
        }
    }
}
