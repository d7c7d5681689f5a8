//! Schedule row type.

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// One scheduler-ready posting slot, derived from an `ok` manifest entry.
///
/// Optional fields are emitted as empty strings in the export; the
/// downstream format has fixed columns.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, derive_new::new)]
pub struct ScheduleRow {
    /// Timezone-aware posting datetime
    pub scheduled_datetime: DateTime<FixedOffset>,
    /// Display title
    pub title: String,
    /// Publish caption
    pub caption: String,
    /// Video file path, empty when none was produced
    pub video_path: String,
    /// Thumbnail file path, empty when none exists
    pub thumbnail_path: String,
    /// Publish tags
    pub tags: BTreeSet<String>,
}
