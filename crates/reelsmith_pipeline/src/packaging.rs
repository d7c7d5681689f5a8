//! Caption and tag packaging.

use reelsmith_core::ScriptArtifact;
use sha2::{Digest, Sha256};
use std::collections::BTreeSet;

const CAPTION_MAX_CHARS: usize = 120;

/// Title-case a content kind key: `"start-sit"` → `"Start Sit"`.
pub fn kind_title(kind: &str) -> String {
    kind.split('-')
        .filter(|part| !part.is_empty())
        .map(capitalize)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Build the publish caption for a script.
///
/// Simulated runs get a deterministic `[sim-<seed>]` marker so placeholder
/// content is recognizable downstream; the seed is stable for identical
/// inputs. Captions are capped at 120 characters.
pub fn build_caption(script: &ScriptArtifact, kind: &str, week: u32, simulated: bool) -> String {
    let base = format!("{} - Week {}", kind_title(kind), week);
    let caption = if simulated {
        let week_text = week.to_string();
        let seed = deterministic_seed(&[kind, week_text.as_str(), script.text().as_str()]);
        format!("[sim-{seed}] {base}")
    } else {
        base
    };
    caption.chars().take(CAPTION_MAX_CHARS).collect()
}

/// Build the publish tag set: configured base tags plus `#Week<N>` and a
/// camel-cased kind tag.
pub fn build_tags(kind: &str, week: u32, base_tags: &[String]) -> BTreeSet<String> {
    let mut tags: BTreeSet<String> = base_tags.iter().cloned().collect();
    tags.insert(format!("#Week{week}"));

    let camel: String = kind.split('-').map(capitalize).collect();
    if !camel.is_empty() {
        tags.insert(format!("#{camel}"));
    }
    tags
}

fn capitalize(part: &str) -> String {
    let mut chars = part.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}

fn deterministic_seed(parts: &[&str]) -> String {
    let mut hasher = Sha256::new();
    for part in parts {
        hasher.update(part.as_bytes());
    }
    let digest = format!("{:x}", hasher.finalize());
    digest[..10].to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_title_splits_on_dashes() {
        assert_eq!(kind_title("top-performers"), "Top Performers");
        assert_eq!(kind_title("start-sit"), "Start Sit");
    }

    #[test]
    fn tags_include_week_and_kind() {
        let tags = build_tags("waiver-wire", 5, &["#shorts".to_string()]);
        assert!(tags.contains("#Week5"));
        assert!(tags.contains("#WaiverWire"));
        assert!(tags.contains("#shorts"));
    }

    #[test]
    fn simulated_caption_is_deterministic() {
        let script = ScriptArtifact::from_text("start-sit", "Sit him.");
        let one = build_caption(&script, "start-sit", 5, true);
        let two = build_caption(&script, "start-sit", 5, true);
        assert_eq!(one, two);
        assert!(one.starts_with("[sim-"));
    }
}
