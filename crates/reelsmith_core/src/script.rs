//! Script artifact type.

use serde::{Deserialize, Serialize};

/// A rendered script, derived from a [`crate::ContentRequest`] and a template.
///
/// Word count is computed at construction and kept consistent with the
/// text; the artifact is never mutated in place. Trimming produces a new
/// artifact.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, derive_getters::Getters)]
pub struct ScriptArtifact {
    text: String,
    word_count: usize,
    kind: String,
}

impl ScriptArtifact {
    /// Build an artifact from raw text, counting whitespace-separated words.
    ///
    /// # Examples
    ///
    /// ```
    /// use reelsmith_core::ScriptArtifact;
    ///
    /// let script = ScriptArtifact::from_text("top-performers", "Three names to watch this week.");
    /// assert_eq!(script.word_count(), &6);
    /// ```
    pub fn from_text(kind: impl Into<String>, text: impl Into<String>) -> Self {
        let text = text.into();
        let word_count = text.split_whitespace().count();
        Self {
            text,
            word_count,
            kind: kind.into(),
        }
    }
}
