//! Guardrail verdict types.

use serde::{Deserialize, Serialize};

/// Action the guardrail evaluator took on a script.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, strum::Display, strum::EnumString, Default,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum GuardrailAction {
    /// Script left untouched
    #[default]
    None,
    /// Script truncated to the length threshold
    Trimmed,
    /// Item blocked before evaluation (entity unavailable)
    Blocked,
}

/// A single rule violation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Violation {
    /// Name of the violated rule
    pub rule: String,
    /// Human-readable detail
    pub detail: String,
}

impl Violation {
    /// Create a violation for the named rule.
    pub fn new(rule: impl Into<String>, detail: impl Into<String>) -> Self {
        Self {
            rule: rule.into(),
            detail: detail.into(),
        }
    }
}

/// Outcome of evaluating one script against policy.
///
/// Computed fresh per script; never cached across requests, because policy
/// configuration may change between calls.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GuardrailVerdict {
    /// Whether the script may proceed
    pub passed: bool,
    /// Ordered rule violations, empty when clean
    pub violations: Vec<Violation>,
    /// What the evaluator did to the script
    pub action_taken: GuardrailAction,
}

impl GuardrailVerdict {
    /// A passing verdict with no violations.
    pub fn clean() -> Self {
        Self {
            passed: true,
            violations: Vec::new(),
            action_taken: GuardrailAction::None,
        }
    }
}
