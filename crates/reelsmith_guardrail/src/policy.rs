//! Guardrail policy types.

use serde::{Deserialize, Serialize};

/// What to do when a script exceeds the length threshold.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, strum::Display, strum::EnumString, Default,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum LengthMode {
    /// Reject the script; the item surfaces as a policy violation
    #[default]
    Fail,
    /// Truncate the script to the threshold word count
    Trim,
}

/// Length policy applied to generated scripts.
///
/// Caller-supplied per evaluation; never global state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LengthPolicy {
    /// Maximum allowed word count
    pub max_words: usize,
    /// Behavior on overflow
    pub mode: LengthMode,
}

impl Default for LengthPolicy {
    fn default() -> Self {
        Self {
            max_words: 70,
            mode: LengthMode::Fail,
        }
    }
}

impl LengthPolicy {
    /// A policy with the given threshold and mode.
    pub fn new(max_words: usize, mode: LengthMode) -> Self {
        Self { max_words, mode }
    }
}
