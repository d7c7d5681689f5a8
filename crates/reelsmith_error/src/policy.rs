//! Content policy violation error types.

/// A generated script violated a guardrail rule under `fail` mode.
///
/// Expected business condition: the item surfaces as a rejected (`failed`)
/// manifest entry naming the violated rule, distinguishable from generic
/// item failures so the API layer can render a "content policy violation"
/// response.
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Policy violation [{}]: {}", rule, detail)]
pub struct PolicyViolationError {
    /// Name of the violated rule (e.g. "length")
    pub rule: String,
    /// Human-readable violation detail
    pub detail: String,
}

impl PolicyViolationError {
    /// Create a new policy violation for the named rule.
    ///
    /// # Examples
    ///
    /// ```
    /// use reelsmith_error::PolicyViolationError;
    ///
    /// let err = PolicyViolationError::new("length", "84 words (max 70)");
    /// assert_eq!(err.rule, "length");
    /// ```
    pub fn new(rule: impl Into<String>, detail: impl Into<String>) -> Self {
        Self {
            rule: rule.into(),
            detail: detail.into(),
        }
    }
}
