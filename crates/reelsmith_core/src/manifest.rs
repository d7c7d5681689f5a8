//! Week manifest types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Terminal outcome of one planned item.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, strum::Display, strum::EnumString,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum EntryStatus {
    /// Item completed every requested stage
    Ok,
    /// Entity was unavailable; no content generated
    Blocked,
    /// A stage failed; detail recorded on the entry
    Failed,
}

/// One manifest record per planned item, written exactly once per run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManifestEntry {
    /// Deterministic item identifier; the manifest's merge key
    pub item_slug: String,
    /// Content kind key
    pub content_kind: String,
    /// Entity the content is about
    pub entity_name: String,
    /// Script file relative to the week directory; empty when no script
    /// was produced (blocked items, pre-script failures)
    pub script_path: String,
    /// Caption for publishing; empty for blocked items
    pub caption: String,
    /// Rendered video relative path, when the render stage ran
    pub video_path: Option<String>,
    /// Thumbnail relative path, when one exists
    pub thumbnail_path: Option<String>,
    /// Publish tags
    pub tags: BTreeSet<String>,
    /// Terminal outcome
    pub status: EntryStatus,
    /// Failure or block detail; `None` for ok entries
    pub error_detail: Option<String>,
}

/// Counts of terminal outcomes across one batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct BatchSummary {
    /// Items that completed every requested stage
    pub ok: usize,
    /// Items blocked by entity availability
    pub blocked: usize,
    /// Items that failed a stage
    pub failed: usize,
}

/// The ordered, persisted record of pipeline outcomes for one week.
///
/// Entry order always matches planning order. `partial` is set only when a
/// cancelled or timed-out run flushed the entries that had reached a
/// terminal state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeekManifest {
    /// Week the batch targets
    pub week_number: u32,
    /// When the manifest was assembled
    pub generated_at: DateTime<Utc>,
    /// Whether this manifest was flushed before all items finished
    #[serde(default)]
    pub partial: bool,
    /// One entry per planned item, in plan order
    pub entries: Vec<ManifestEntry>,
}

impl WeekManifest {
    /// Tally terminal outcomes.
    ///
    /// # Examples
    ///
    /// ```
    /// use reelsmith_core::{EntryStatus, WeekManifest};
    /// use chrono::Utc;
    ///
    /// let manifest = WeekManifest {
    ///     week_number: 5,
    ///     generated_at: Utc::now(),
    ///     partial: false,
    ///     entries: Vec::new(),
    /// };
    /// assert_eq!(manifest.summary().ok, 0);
    /// ```
    pub fn summary(&self) -> BatchSummary {
        let mut summary = BatchSummary::default();
        for entry in &self.entries {
            match entry.status {
                EntryStatus::Ok => summary.ok += 1,
                EntryStatus::Blocked => summary.blocked += 1,
                EntryStatus::Failed => summary.failed += 1,
            }
        }
        summary
    }
}
