//! Week artifact persistence.
//!
//! All writes are atomic (temp file + rename) so a crashed run never
//! leaves a half-written manifest. Manifest saves merge by slug: existing
//! slugs are immutable keys that are overwritten in place, new slugs are
//! appended, and existing order is never disturbed.

use chrono::Utc;
use reelsmith_core::{EntryStatus, ManifestEntry, PlannedItem, UploadResult, WeekManifest, format_row};
use reelsmith_error::{ReelsmithResult, StorageError, StorageErrorKind};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use uuid::Uuid;

const MANIFEST_FILE: &str = "manifest.json";
const MANIFEST_CSV_FILE: &str = "manifest.csv";
const PLAN_FILE: &str = "plan.json";
const UPLOADS_FILE: &str = "uploads.json";
const AUDIT_LOG: &str = "audit/skipped.log";

/// One recorded upload, keyed by item slug.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadRecord {
    /// Slug of the uploaded item
    pub item_slug: String,
    /// Provider result
    pub result: UploadResult,
}

#[derive(Debug, Serialize, Deserialize)]
struct PlanArtifact {
    week_number: u32,
    items: Vec<PlannedItem>,
}

#[derive(Debug, Serialize, Deserialize)]
struct UploadsArtifact {
    uploads: Vec<UploadRecord>,
}

/// Persists week artifacts under `<out_root>/week-<N>/`.
#[derive(Debug, Clone)]
pub struct ManifestStore {
    out_root: PathBuf,
}

impl ManifestStore {
    /// A store rooted at `out_root`.
    pub fn new(out_root: impl Into<PathBuf>) -> Self {
        Self {
            out_root: out_root.into(),
        }
    }

    /// Directory holding one week's artifacts.
    pub fn week_dir(&self, week_number: u32) -> PathBuf {
        self.out_root.join(format!("week-{week_number}"))
    }

    /// Create the week directory (and its videos subdirectory).
    pub async fn ensure_week_dir(&self, week_number: u32) -> ReelsmithResult<PathBuf> {
        let dir = self.week_dir(week_number);
        tokio::fs::create_dir_all(dir.join("videos"))
            .await
            .map_err(|e| {
                StorageError::new(StorageErrorKind::DirectoryCreation(format!(
                    "{}: {e}",
                    dir.display()
                )))
            })?;
        Ok(dir)
    }

    /// Load the persisted manifest for a week, `None` when absent.
    pub async fn load(&self, week_number: u32) -> ReelsmithResult<Option<WeekManifest>> {
        let path = self.week_dir(week_number).join(MANIFEST_FILE);
        match tokio::fs::read(&path).await {
            Ok(bytes) => {
                let manifest: WeekManifest = serde_json::from_slice(&bytes).map_err(|e| {
                    StorageError::new(StorageErrorKind::Serialization(format!(
                        "{}: {e}",
                        path.display()
                    )))
                })?;
                Ok(Some(manifest))
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(StorageError::new(StorageErrorKind::FileRead(format!(
                "{}: {e}",
                path.display()
            )))
            .into()),
        }
    }

    /// Persist a manifest, merging with any existing one by slug.
    ///
    /// Returns the merged manifest as written. The JSON artifact and its
    /// CSV mirror are both replaced atomically.
    #[tracing::instrument(skip(self, manifest), fields(week = manifest.week_number, entries = manifest.entries.len()))]
    pub async fn save(&self, manifest: &WeekManifest) -> ReelsmithResult<WeekManifest> {
        let dir = self.ensure_week_dir(manifest.week_number).await?;

        let existing = self
            .load(manifest.week_number)
            .await?
            .map(|m| m.entries)
            .unwrap_or_default();
        let entries = merge_entries(existing, manifest.entries.clone());

        let merged = WeekManifest {
            week_number: manifest.week_number,
            generated_at: manifest.generated_at,
            partial: manifest.partial,
            entries,
        };

        let json = serde_json::to_vec_pretty(&merged).map_err(|e| {
            StorageError::new(StorageErrorKind::Serialization(e.to_string()))
        })?;
        write_atomic(&dir.join(MANIFEST_FILE), &json).await?;
        write_atomic(&dir.join(MANIFEST_CSV_FILE), manifest_csv(&merged).as_bytes()).await?;

        tracing::debug!(path = %dir.join(MANIFEST_FILE).display(), "manifest persisted");
        Ok(merged)
    }

    /// Persist the plan so a week can be resumed without re-planning.
    pub async fn save_plan(
        &self,
        week_number: u32,
        items: &[PlannedItem],
    ) -> ReelsmithResult<PathBuf> {
        let dir = self.ensure_week_dir(week_number).await?;
        let artifact = PlanArtifact {
            week_number,
            items: items.to_vec(),
        };
        let json = serde_json::to_vec_pretty(&artifact).map_err(|e| {
            StorageError::new(StorageErrorKind::Serialization(e.to_string()))
        })?;
        let path = dir.join(PLAN_FILE);
        write_atomic(&path, &json).await?;
        Ok(path)
    }

    /// Re-load a previously saved plan.
    pub async fn load_plan(&self, week_number: u32) -> ReelsmithResult<Vec<PlannedItem>> {
        let path = self.week_dir(week_number).join(PLAN_FILE);
        let bytes = tokio::fs::read(&path).await.map_err(|e| {
            StorageError::new(StorageErrorKind::NotFound(format!(
                "{}: {e}",
                path.display()
            )))
        })?;
        let artifact: PlanArtifact = serde_json::from_slice(&bytes).map_err(|e| {
            StorageError::new(StorageErrorKind::Serialization(format!(
                "{}: {e}",
                path.display()
            )))
        })?;
        Ok(artifact.items)
    }

    /// Persist upload records for the week.
    pub async fn save_uploads(
        &self,
        week_number: u32,
        uploads: &[UploadRecord],
    ) -> ReelsmithResult<PathBuf> {
        let dir = self.ensure_week_dir(week_number).await?;
        let artifact = UploadsArtifact {
            uploads: uploads.to_vec(),
        };
        let json = serde_json::to_vec_pretty(&artifact).map_err(|e| {
            StorageError::new(StorageErrorKind::Serialization(e.to_string()))
        })?;
        let path = dir.join(UPLOADS_FILE);
        write_atomic(&path, &json).await?;
        Ok(path)
    }

    /// Append a skipped (blocked or failed) entry to the audit log.
    pub async fn append_audit(
        &self,
        week_number: u32,
        entry: &ManifestEntry,
    ) -> ReelsmithResult<()> {
        let dir = self.week_dir(week_number);
        let path = dir.join(AUDIT_LOG);
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent).await.map_err(|e| {
                StorageError::new(StorageErrorKind::DirectoryCreation(format!(
                    "{}: {e}",
                    parent.display()
                )))
            })?;
        }

        let line = format!(
            "{}\t{}\t{}\t{}\n",
            Utc::now().to_rfc3339(),
            entry.item_slug,
            entry.status,
            entry.error_detail.as_deref().unwrap_or("")
        );
        let mut existing = tokio::fs::read_to_string(&path).await.unwrap_or_default();
        existing.push_str(&line);
        write_atomic(&path, existing.as_bytes()).await
    }
}

/// Merge fresh entries into existing ones by slug.
///
/// Existing entries keep their positions; matching slugs are overwritten
/// in place; new slugs append in their own order.
fn merge_entries(existing: Vec<ManifestEntry>, fresh: Vec<ManifestEntry>) -> Vec<ManifestEntry> {
    let mut merged = existing;
    let positions: HashMap<String, usize> = merged
        .iter()
        .enumerate()
        .map(|(i, e)| (e.item_slug.clone(), i))
        .collect();

    for entry in fresh {
        match positions.get(&entry.item_slug) {
            Some(&i) => merged[i] = entry,
            None => merged.push(entry),
        }
    }
    merged
}

fn manifest_csv(manifest: &WeekManifest) -> String {
    let mut out = String::new();
    out.push_str("item_slug,entity_name,content_kind,status,script_path,video_path,caption,tags,error_detail\n");
    for entry in &manifest.entries {
        let row = format_row(&[
            entry.item_slug.clone(),
            entry.entity_name.clone(),
            entry.content_kind.clone(),
            entry.status.to_string(),
            entry.script_path.clone(),
            entry.video_path.clone().unwrap_or_default(),
            entry.caption.clone(),
            entry.tags.iter().cloned().collect::<Vec<_>>().join(" "),
            entry.error_detail.clone().unwrap_or_default(),
        ]);
        out.push_str(&row);
        out.push('\n');
    }
    out
}

async fn write_atomic(path: &Path, bytes: &[u8]) -> ReelsmithResult<()> {
    let tmp = path.with_file_name(format!(
        ".{}.tmp-{}",
        path.file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "artifact".to_string()),
        Uuid::new_v4().simple()
    ));

    tokio::fs::write(&tmp, bytes).await.map_err(|e| {
        StorageError::new(StorageErrorKind::FileWrite(format!(
            "{}: {e}",
            tmp.display()
        )))
    })?;
    tokio::fs::rename(&tmp, path).await.map_err(|e| {
        StorageError::new(StorageErrorKind::FileWrite(format!(
            "{}: {e}",
            path.display()
        )))
    })?;
    Ok(())
}

/// Whether an entry should appear in the audit log.
pub(crate) fn is_skipped(entry: &ManifestEntry) -> bool {
    !matches!(entry.status, EntryStatus::Ok)
}
