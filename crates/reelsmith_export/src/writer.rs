//! Schedule CSV writer.

use reelsmith_core::{ScheduleRow, format_row};
use reelsmith_error::{ExportError, ExportErrorKind, ReelsmithResult};
use std::path::{Path, PathBuf};

const HEADER: &str = "scheduled_datetime,title,caption,video_path,thumbnail_path,tags";

/// Write the fixed-column schedule CSV.
///
/// Column order is fixed; missing optional fields are emitted as empty
/// strings, never omitted. The tags column is a comma-delimited list in a
/// single (quoted) field.
pub async fn write_schedule_csv(path: &Path, rows: &[ScheduleRow]) -> ReelsmithResult<PathBuf> {
    let mut out = String::with_capacity(rows.len() * 128 + HEADER.len());
    out.push_str(HEADER);
    out.push('\n');

    for row in rows {
        let line = format_row(&[
            row.scheduled_datetime.to_rfc3339(),
            row.title.clone(),
            row.caption.clone(),
            row.video_path.clone(),
            row.thumbnail_path.clone(),
            row.tags.iter().cloned().collect::<Vec<_>>().join(","),
        ]);
        out.push_str(&line);
        out.push('\n');
    }

    if let Some(parent) = path.parent() {
        tokio::fs::create_dir_all(parent).await.map_err(|e| {
            ExportError::new(ExportErrorKind::WriteFailed(format!(
                "{}: {e}",
                parent.display()
            )))
        })?;
    }
    tokio::fs::write(path, out).await.map_err(|e| {
        ExportError::new(ExportErrorKind::WriteFailed(format!(
            "{}: {e}",
            path.display()
        )))
    })?;

    tracing::debug!(path = %path.display(), rows = rows.len(), "schedule written");
    Ok(path.to_path_buf())
}
