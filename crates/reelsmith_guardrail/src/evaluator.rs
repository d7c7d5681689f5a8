//! Length-rule evaluation.

use crate::{LengthMode, LengthPolicy};
use reelsmith_core::{GuardrailAction, GuardrailVerdict, ScriptArtifact, Violation};

/// Rule name recorded on length violations.
pub const LENGTH_RULE: &str = "length";

/// Evaluate a script against the length policy.
///
/// Pure function; computes a fresh verdict on every call. In `trim` mode
/// an over-length script still passes, with `action_taken = trimmed`; use
/// [`enforce`] to obtain the trimmed artifact.
///
/// # Examples
///
/// ```
/// use reelsmith_core::ScriptArtifact;
/// use reelsmith_guardrail::{LengthMode, LengthPolicy, evaluate};
///
/// let script = ScriptArtifact::from_text("start-sit", "Short and sweet.");
/// let verdict = evaluate(&script, &LengthPolicy::new(70, LengthMode::Fail));
/// assert!(verdict.passed);
/// ```
pub fn evaluate(script: &ScriptArtifact, policy: &LengthPolicy) -> GuardrailVerdict {
    if *script.word_count() <= policy.max_words {
        return GuardrailVerdict::clean();
    }

    let detail = format!(
        "{} words (max {})",
        script.word_count(),
        policy.max_words
    );

    match policy.mode {
        LengthMode::Fail => GuardrailVerdict {
            passed: false,
            violations: vec![Violation::new(LENGTH_RULE, detail)],
            action_taken: GuardrailAction::None,
        },
        LengthMode::Trim => GuardrailVerdict {
            passed: true,
            violations: vec![Violation::new(LENGTH_RULE, detail)],
            action_taken: GuardrailAction::Trimmed,
        },
    }
}

/// Evaluate a script and apply the policy's action.
///
/// Returns the artifact the pipeline should persist: unchanged when the
/// script is within the threshold or the mode is `fail`, truncated to
/// exactly `max_words` words when the mode is `trim` and the script is
/// over.
pub fn enforce(
    script: ScriptArtifact,
    policy: &LengthPolicy,
) -> (ScriptArtifact, GuardrailVerdict) {
    let verdict = evaluate(&script, policy);

    if verdict.action_taken != GuardrailAction::Trimmed {
        return (script, verdict);
    }

    let trimmed = script
        .text()
        .split_whitespace()
        .take(policy.max_words)
        .collect::<Vec<_>>()
        .join(" ");
    let kind = script.kind().clone();

    (ScriptArtifact::from_text(kind, trimmed), verdict)
}
