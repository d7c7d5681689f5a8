//! Batch planning.

use reelsmith_core::{ContentRequestBuilder, PlannedItem};
use reelsmith_error::{ConfigError, ReelsmithResult};

/// Map legacy kind aliases to their canonical keys.
pub fn normalize_kind(kind: &str) -> String {
    match kind.trim() {
        "performers" => "top-performers".to_string(),
        "busts" => "biggest-busts".to_string(),
        "waiver_wire" => "waiver-wire".to_string(),
        other => other.to_string(),
    }
}

/// Expand a week + content kinds + entity list into an ordered plan.
///
/// The plan is the cross product of entities × kinds, entity-major, in the
/// order the caller supplied them; entity order controls rendering
/// priority. Slugs are a pure function of item identity, so re-planning
/// the same inputs yields identical slugs and a re-run after a partial
/// failure is safe.
///
/// # Errors
///
/// Configuration error when the entity list or kind list is empty; an
/// empty plan is never a successful plan.
#[tracing::instrument(skip(content_kinds, entities), fields(kinds = content_kinds.len(), entities = entities.len()))]
pub fn plan(
    week_number: u32,
    content_kinds: &[String],
    entities: &[String],
) -> ReelsmithResult<Vec<PlannedItem>> {
    if entities.is_empty() {
        return Err(ConfigError::new("plan request has no entities").into());
    }
    if content_kinds.is_empty() {
        return Err(ConfigError::new("plan request has no content kinds").into());
    }

    let kinds: Vec<String> = content_kinds.iter().map(|k| normalize_kind(k)).collect();

    let mut items = Vec::with_capacity(entities.len() * kinds.len());
    for entity in entities {
        for kind in &kinds {
            let request = ContentRequestBuilder::default()
                .entity_name(entity.clone())
                .week_number(week_number)
                .content_kind(kind.clone())
                .build()
                .map_err(|e| ConfigError::new(format!("failed to build request: {e}")))?;
            items.push(PlannedItem::new(request));
        }
    }

    tracing::info!(count = items.len(), week_number, "plan assembled");
    Ok(items)
}
