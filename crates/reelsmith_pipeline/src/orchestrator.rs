//! Batch orchestration.
//!
//! Drives the item pipeline over every planned item on a bounded worker
//! pool. Items complete in any order; results land in a pre-sized slot
//! per item, so the emitted manifest always matches plan order. The
//! manifest is written only after every item reaches a terminal state,
//! except on cancellation or run timeout, where the terminal entries are
//! flushed in order and the manifest is marked partial.

use crate::entities::EntityDirectory;
use crate::item::{ItemContext, ItemOutcome, StageFlags, run_item};
use crate::manifest_store::{ManifestStore, UploadRecord, is_skipped};
use crate::settings::RunSettings;
use crate::templates::TemplateSource;
use chrono::Utc;
use reelsmith_core::{PlannedItem, WeekManifest};
use reelsmith_error::{ConfigError, ReelsmithResult};
use reelsmith_providers::{AvatarRenderer, Clock, TokioClock, VideoUploader};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{Semaphore, watch};
use tokio::task::JoinSet;

/// Runs one week's batch.
pub struct Orchestrator {
    settings: RunSettings,
    store: ManifestStore,
    templates: Arc<dyn TemplateSource>,
    entities: Arc<dyn EntityDirectory>,
    renderer: Arc<dyn AvatarRenderer>,
    uploader: Arc<dyn VideoUploader>,
    clock: Arc<dyn Clock>,
}

impl Orchestrator {
    /// Assemble an orchestrator from its collaborators.
    pub fn new(
        settings: RunSettings,
        templates: Arc<dyn TemplateSource>,
        entities: Arc<dyn EntityDirectory>,
        renderer: Arc<dyn AvatarRenderer>,
        uploader: Arc<dyn VideoUploader>,
    ) -> Self {
        let store = ManifestStore::new(settings.out_root.clone());
        Self {
            settings,
            store,
            templates,
            entities,
            renderer,
            uploader,
            clock: Arc::new(TokioClock),
        }
    }

    /// Replace the polling clock (tests inject a deterministic one).
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    /// The artifact store this orchestrator writes through.
    pub fn store(&self) -> &ManifestStore {
        &self.store
    }

    /// Run the batch to completion.
    pub async fn run(
        &self,
        items: Vec<PlannedItem>,
        flags: StageFlags,
    ) -> ReelsmithResult<WeekManifest> {
        self.run_with_cancel(items, flags, None).await
    }

    /// Run the batch, aborting early when `cancel` flips to `true`.
    ///
    /// On cancellation or run timeout, already-terminal items keep their
    /// entries, in-flight items are abandoned without partial artifacts,
    /// and the flushed manifest is marked partial.
    #[tracing::instrument(skip_all, fields(items = items.len()))]
    pub async fn run_with_cancel(
        &self,
        items: Vec<PlannedItem>,
        flags: StageFlags,
        mut cancel: Option<watch::Receiver<bool>>,
    ) -> ReelsmithResult<WeekManifest> {
        let week_number = *items
            .first()
            .ok_or_else(|| ConfigError::new("cannot run an empty plan"))?
            .request()
            .week_number();

        let week_dir = self.store.ensure_week_dir(week_number).await?;
        self.store.save_plan(week_number, &items).await?;

        let ctx = Arc::new(ItemContext {
            templates: self.templates.clone(),
            entities: self.entities.clone(),
            renderer: self.renderer.clone(),
            uploader: self.uploader.clone(),
            clock: self.clock.clone(),
            guardrail: self.settings.guardrail,
            poll: self.settings.poll,
            avatar_id: self.settings.avatar_id.clone(),
            base_tags: self.settings.base_tags.clone(),
            simulated: self.settings.toggles.fully_simulated(),
            week_dir,
        });

        let total = items.len();
        let semaphore = Arc::new(Semaphore::new(self.settings.worker_pool.max(1)));
        let mut join_set = JoinSet::new();

        for (index, item) in items.into_iter().enumerate() {
            let ctx = ctx.clone();
            let semaphore = semaphore.clone();
            join_set.spawn(async move {
                let _permit = semaphore.acquire_owned().await.ok();
                let outcome = run_item(&ctx, &item, flags).await;
                (index, outcome)
            });
        }

        // Each completion lands in its plan-order slot; nothing is
        // appended as-completed.
        let mut slots: Vec<Option<ItemOutcome>> = (0..total).map(|_| None).collect();
        let mut completed = 0usize;
        let mut partial = false;
        let deadline = self
            .settings
            .run_timeout_secs
            .map(|secs| tokio::time::Instant::now() + Duration::from_secs(secs));

        while completed < total {
            tokio::select! {
                joined = join_set.join_next() => match joined {
                    Some(Ok((index, outcome))) => {
                        slots[index] = Some(outcome);
                        completed += 1;
                    }
                    Some(Err(join_error)) => {
                        tracing::error!(error = %join_error, "item task aborted");
                        completed += 1;
                    }
                    None => break,
                },
                _ = cancelled(&mut cancel) => {
                    tracing::warn!("run cancelled; abandoning in-flight items");
                    partial = true;
                    break;
                }
                _ = deadline_elapsed(deadline) => {
                    tracing::warn!("run timeout reached; flushing terminal items");
                    partial = true;
                    break;
                }
            }
        }

        if partial {
            join_set.abort_all();
        }

        let mut entries = Vec::with_capacity(completed);
        let mut uploads: Vec<UploadRecord> = Vec::new();
        for outcome in slots.into_iter().flatten() {
            if let Some(result) = outcome.upload {
                uploads.push(UploadRecord {
                    item_slug: outcome.entry.item_slug.clone(),
                    result,
                });
            }
            entries.push(outcome.entry);
        }

        let manifest = WeekManifest {
            week_number,
            generated_at: Utc::now(),
            partial,
            entries,
        };

        let merged = self.store.save(&manifest).await?;

        for entry in manifest.entries.iter().filter(|e| is_skipped(e)) {
            self.store.append_audit(week_number, entry).await?;
        }

        if flags.upload {
            self.store.save_uploads(week_number, &uploads).await?;
        }

        let summary = merged.summary();
        tracing::info!(
            ok = summary.ok,
            blocked = summary.blocked,
            failed = summary.failed,
            partial,
            "batch complete"
        );

        Ok(merged)
    }
}

async fn cancelled(cancel: &mut Option<watch::Receiver<bool>>) {
    match cancel {
        Some(rx) => {
            if *rx.borrow() {
                return;
            }
            while rx.changed().await.is_ok() {
                if *rx.borrow() {
                    return;
                }
            }
            std::future::pending::<()>().await
        }
        None => std::future::pending::<()>().await,
    }
}

async fn deadline_elapsed(deadline: Option<tokio::time::Instant>) {
    match deadline {
        Some(at) => tokio::time::sleep_until(at).await,
        None => std::future::pending::<()>().await,
    }
}
