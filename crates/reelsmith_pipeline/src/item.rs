//! Per-item pipeline state machine.
//!
//! Stages run strictly sequentially within one item:
//! `planned → scripted → guardrail_checked → (rendered)? → (uploaded)? → recorded`.
//! Render and upload are skipped entirely when not requested; skipping a
//! stage is not an error. Every terminal outcome produces exactly one
//! manifest entry, and nothing below the item boundary escalates to the
//! batch.

use crate::entities::EntityDirectory;
use crate::packaging::{build_caption, build_tags};
use crate::templates::{TemplateSource, render_script, resolve_or_fallback};
use reelsmith_core::{
    EntityAvailability, EntryStatus, ManifestEntry, PlannedItem, RenderStatus, UploadResult,
};
use reelsmith_error::{
    EntityUnavailableError, PolicyViolationError, ProviderError, ProviderErrorKind,
    ReelsmithError, ReelsmithErrorKind, ReelsmithResult, StorageError, StorageErrorKind,
};
use reelsmith_guardrail::{LengthPolicy, enforce};
use reelsmith_providers::{AvatarRenderer, Clock, PollPolicy, VideoUploader, await_completion};
use std::collections::BTreeSet;
use std::path::PathBuf;
use std::sync::Arc;

/// Pipeline stages, in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::Display, strum::EnumString)]
#[strum(serialize_all = "snake_case")]
pub enum ItemStage {
    /// Item accepted from the plan
    Planned,
    /// Script rendered from the template
    Scripted,
    /// Guardrail policy applied
    GuardrailChecked,
    /// Avatar video rendered (optional)
    Rendered,
    /// Video uploaded (optional)
    Uploaded,
    /// Manifest entry produced
    Recorded,
}

/// Which optional stages run for this batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StageFlags {
    /// Run the avatar render stage
    pub render: bool,
    /// Run the upload stage
    pub upload: bool,
}

/// Shared, read-only dependencies for item execution.
///
/// Items share no mutable state; everything here is either immutable
/// configuration or an adapter that synchronizes internally.
#[derive(Clone)]
pub struct ItemContext {
    /// Template lookup
    pub templates: Arc<dyn TemplateSource>,
    /// Entity availability gate
    pub entities: Arc<dyn EntityDirectory>,
    /// Avatar rendering adapter (simulated or live)
    pub renderer: Arc<dyn AvatarRenderer>,
    /// Upload adapter (simulated or live)
    pub uploader: Arc<dyn VideoUploader>,
    /// Clock driving polling waits
    pub clock: Arc<dyn Clock>,
    /// Length guardrail for this invocation
    pub guardrail: LengthPolicy,
    /// Polling budget for render jobs
    pub poll: PollPolicy,
    /// Avatar presenter id
    pub avatar_id: String,
    /// Tags added to every item
    pub base_tags: Vec<String>,
    /// Whether this run is fully simulated (marks captions)
    pub simulated: bool,
    /// Week artifact directory
    pub week_dir: PathBuf,
}

/// Terminal result of one item: exactly one manifest entry, plus the
/// upload record when the upload stage ran.
#[derive(Debug, Clone)]
pub struct ItemOutcome {
    /// The item's manifest entry
    pub entry: ManifestEntry,
    /// Upload result when the upload stage completed
    pub upload: Option<UploadResult>,
}

/// Run one planned item to a terminal outcome.
///
/// This is the item boundary: any error from the stages below is caught
/// here and converted into a `blocked` or `failed` manifest entry; it
/// never propagates to sibling items.
#[tracing::instrument(skip(ctx, item), fields(slug = %item.slug()))]
pub async fn run_item(ctx: &ItemContext, item: &PlannedItem, flags: StageFlags) -> ItemOutcome {
    match execute(ctx, item, flags).await {
        Ok(outcome) => outcome,
        Err(err) => match err.kind() {
            ReelsmithErrorKind::EntityUnavailable(block) => {
                tracing::info!(reason = %block.reason, "item blocked by entity availability");
                ItemOutcome {
                    entry: terminal_entry(item, EntryStatus::Blocked, Some(block.to_string())),
                    upload: None,
                }
            }
            ReelsmithErrorKind::PolicyViolation(violation) => {
                tracing::info!(rule = %violation.rule, "item rejected by guardrail policy");
                ItemOutcome {
                    entry: terminal_entry(item, EntryStatus::Failed, Some(violation.to_string())),
                    upload: None,
                }
            }
            _ => {
                tracing::error!(error = %err, "item failed; isolated from batch");
                ItemOutcome {
                    entry: terminal_entry(item, EntryStatus::Failed, Some(err.to_string())),
                    upload: None,
                }
            }
        },
    }
}

async fn execute(
    ctx: &ItemContext,
    item: &PlannedItem,
    flags: StageFlags,
) -> ReelsmithResult<ItemOutcome> {
    let request = item.request();

    // Availability gate runs before any rendering; blocked entities never
    // reach the template or the guardrail.
    if let EntityAvailability::Unavailable { reason } =
        ctx.entities.availability(request.entity_name())
    {
        return Err(EntityUnavailableError::new(request.entity_name(), reason).into());
    }

    // planned -> scripted
    let template = resolve_or_fallback(ctx.templates.as_ref(), request.content_kind())?;
    let script = render_script(&template, request);
    tracing::debug!(stage = %ItemStage::Scripted, template = %template.name, words = script.word_count());

    // scripted -> guardrail_checked
    let (script, verdict) = enforce(script, &ctx.guardrail);
    if !verdict.passed {
        let violation = verdict
            .violations
            .first()
            .map(|v| PolicyViolationError::new(v.rule.clone(), v.detail.clone()))
            .unwrap_or_else(|| PolicyViolationError::new("policy", "script rejected"));
        return Err(violation.into());
    }
    tracing::debug!(stage = %ItemStage::GuardrailChecked, action = %verdict.action_taken);

    let script_file = format!("{}.md", item.slug());
    write_file(ctx, &script_file, script.text().as_bytes()).await?;

    let caption = build_caption(
        &script,
        request.content_kind(),
        *request.week_number(),
        ctx.simulated,
    );
    let tags = build_tags(request.content_kind(), *request.week_number(), &ctx.base_tags);

    // (rendered)? stage, skipped entirely unless requested
    let mut video_path: Option<String> = None;
    if flags.render {
        video_path = Some(render_stage(ctx, item, &script).await?);
        tracing::debug!(stage = %ItemStage::Rendered);
    }

    // (uploaded)? stage, skipped entirely unless requested
    let mut upload = None;
    if flags.upload {
        let relative = match &video_path {
            Some(path) => path.clone(),
            None => {
                // no render stage: upload a placeholder clip, as the
                // downstream draft review flow expects a file per item
                let fallback = format!("{}.mp4", item.slug());
                write_file(ctx, &fallback, b"").await?;
                fallback
            }
        };
        let result = ctx
            .uploader
            .upload_video(&ctx.week_dir.join(&relative), &caption, &tags)
            .await?;
        tracing::debug!(stage = %ItemStage::Uploaded, upload_id = %result.upload_id);
        upload = Some(result);
    }

    tracing::debug!(stage = %ItemStage::Recorded);
    Ok(ItemOutcome {
        entry: ManifestEntry {
            item_slug: item.slug().clone(),
            content_kind: request.content_kind().clone(),
            entity_name: request.entity_name().clone(),
            script_path: script_file,
            caption,
            video_path,
            thumbnail_path: None,
            tags,
            status: EntryStatus::Ok,
            error_detail: None,
        },
        upload,
    })
}

/// Submit the render job, poll it to a terminal state, and materialize
/// the video artifact. Timeouts preserve the provider job id so an
/// operator can re-attempt later.
async fn render_stage(
    ctx: &ItemContext,
    item: &PlannedItem,
    script: &reelsmith_core::ScriptArtifact,
) -> ReelsmithResult<String> {
    let job = ctx.renderer.render_avatar(script, &ctx.avatar_id).await?;
    let job = await_completion(ctx.renderer.as_ref(), job, &ctx.poll, ctx.clock.as_ref()).await?;

    match job.status {
        RenderStatus::Complete => {
            let receipt = serde_json::to_vec_pretty(&job).map_err(|e| {
                StorageError::new(StorageErrorKind::Serialization(e.to_string()))
            })?;
            write_file(ctx, &format!("{}.render.json", item.slug()), &receipt).await?;

            // placeholder artifact; both variants exercise the same
            // downstream path
            let relative = format!("videos/{}.mp4", item.slug());
            write_file(ctx, &relative, b"").await?;
            Ok(relative)
        }
        RenderStatus::TimedOut => Err(ProviderError::new(ProviderErrorKind::Timeout(
            job.provider_request_id,
        ))
        .into()),
        RenderStatus::Failed => Err(ProviderError::new(ProviderErrorKind::Fatal(format!(
            "render job '{}' failed at the provider",
            job.provider_request_id
        )))
        .into()),
        RenderStatus::Pending | RenderStatus::Processing => {
            Err(ProviderError::new(ProviderErrorKind::Fatal(format!(
                "render job '{}' returned non-terminal after polling",
                job.provider_request_id
            )))
            .into())
        }
    }
}

async fn write_file(ctx: &ItemContext, relative: &str, bytes: &[u8]) -> ReelsmithResult<()> {
    let path = ctx.week_dir.join(relative);
    if let Some(parent) = path.parent() {
        tokio::fs::create_dir_all(parent).await.map_err(|e| {
            StorageError::new(StorageErrorKind::DirectoryCreation(format!(
                "{}: {e}",
                parent.display()
            )))
        })?;
    }
    tokio::fs::write(&path, bytes).await.map_err(|e| {
        ReelsmithError::from(StorageError::new(StorageErrorKind::FileWrite(format!(
            "{}: {e}",
            path.display()
        ))))
    })
}

fn terminal_entry(
    item: &PlannedItem,
    status: EntryStatus,
    error_detail: Option<String>,
) -> ManifestEntry {
    ManifestEntry {
        item_slug: item.slug().clone(),
        content_kind: item.request().content_kind().clone(),
        entity_name: item.request().entity_name().clone(),
        script_path: String::new(),
        caption: String::new(),
        video_path: None,
        thumbnail_path: None,
        tags: BTreeSet::new(),
        status,
        error_detail,
    }
}
