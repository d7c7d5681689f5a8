//! Schedule computation.

use crate::cadence::CadencePolicy;
use chrono::{LocalResult, NaiveDate, TimeZone};
use chrono_tz::Tz;
use reelsmith_core::{EntryStatus, ScheduleRow, WeekManifest};
use reelsmith_error::{ExportError, ExportErrorKind, ReelsmithResult};
use std::str::FromStr;

/// Result of one export: the ordered rows plus the count of entries
/// skipped because they were blocked or failed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportOutcome {
    /// Scheduler rows, in exporter-assigned order
    pub rows: Vec<ScheduleRow>,
    /// Entries skipped (blocked or failed)
    pub skipped: usize,
}

/// Derive the posting schedule for a week manifest.
///
/// Only `ok` entries participate; they are taken in manifest order and
/// assigned slots deterministically: each day fills up to the policy's
/// quota at its configured times, then the schedule advances to the next
/// day. The same manifest and policy always produce the same rows.
///
/// # Errors
///
/// `InvalidTimezone` when `timezone` is not a known IANA name;
/// `InvalidLocalTime` when a computed local datetime does not exist in
/// the target zone.
#[tracing::instrument(skip(manifest, policy), fields(week = manifest.week_number, entries = manifest.entries.len()))]
pub fn export(
    manifest: &WeekManifest,
    start_date: NaiveDate,
    timezone: &str,
    policy: &CadencePolicy,
) -> ReelsmithResult<ExportOutcome> {
    let zone = Tz::from_str(timezone)
        .map_err(|_| ExportError::new(ExportErrorKind::InvalidTimezone(timezone.to_string())))?;

    let per_day = policy.per_day.max(1);
    let participating: Vec<_> = manifest
        .entries
        .iter()
        .filter(|entry| entry.status == EntryStatus::Ok)
        .collect();
    let skipped = manifest.entries.len() - participating.len();

    let mut rows = Vec::with_capacity(participating.len());
    for (index, entry) in participating.into_iter().enumerate() {
        let day_offset = (index / per_day) as i64;
        let date = start_date
            .checked_add_signed(chrono::Duration::days(day_offset))
            .ok_or_else(|| {
                ExportError::new(ExportErrorKind::InvalidLocalTime(format!(
                    "start date {start_date} + {day_offset} days overflows"
                )))
            })?;
        let naive = date.and_time(policy.time_for(index % per_day));

        let localized = match zone.from_local_datetime(&naive) {
            LocalResult::Single(dt) => dt,
            LocalResult::Ambiguous(earliest, _) => earliest,
            LocalResult::None => {
                return Err(ExportError::new(ExportErrorKind::InvalidLocalTime(format!(
                    "{naive} does not exist in {timezone}"
                )))
                .into());
            }
        };

        rows.push(ScheduleRow::new(
            localized.fixed_offset(),
            format!("{} - {}", entry.content_kind, entry.entity_name),
            entry.caption.clone(),
            entry.video_path.clone().unwrap_or_default(),
            entry.thumbnail_path.clone().unwrap_or_default(),
            entry.tags.clone(),
        ));
    }

    tracing::info!(rows = rows.len(), skipped, "schedule derived");
    Ok(ExportOutcome { rows, skipped })
}
