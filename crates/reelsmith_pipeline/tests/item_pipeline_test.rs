//! Per-item pipeline state machine tests.

use reelsmith_core::EntryStatus;
use reelsmith_guardrail::{LengthMode, LengthPolicy};
use reelsmith_pipeline::{
    BundledTemplates, ItemContext, StageFlags, StaticEntityDirectory, Template, TemplateSource,
    plan, run_item,
};
use reelsmith_providers::{
    ManualClock, PollPolicy, SimulatedAvatarRenderer, SimulatedUploader,
};
use std::path::Path;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Template source that counts resolution attempts, so tests can assert
/// generation never started for blocked items.
struct CountingTemplates {
    inner: BundledTemplates,
    calls: Arc<AtomicUsize>,
}

impl TemplateSource for CountingTemplates {
    fn resolve(&self, kind: &str) -> Option<Template> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.inner.resolve(kind)
    }

    fn fallback(&self) -> Option<Template> {
        self.inner.fallback()
    }
}

fn context(
    week_dir: &Path,
    templates: Arc<dyn TemplateSource>,
    entities: StaticEntityDirectory,
    guardrail: LengthPolicy,
) -> ItemContext {
    ItemContext {
        templates,
        entities: Arc::new(entities),
        renderer: Arc::new(SimulatedAvatarRenderer::new()),
        uploader: Arc::new(SimulatedUploader::new()),
        clock: Arc::new(ManualClock::new()),
        guardrail,
        poll: PollPolicy::new(10, 5),
        avatar_id: "default-presenter".to_string(),
        base_tags: vec!["#shorts".to_string()],
        simulated: true,
        week_dir: week_dir.to_path_buf(),
    }
}

fn one_item(entity: &str) -> reelsmith_core::PlannedItem {
    plan(5, &["start-sit".to_string()], &[entity.to_string()])
        .unwrap()
        .remove(0)
}

#[tokio::test]
async fn happy_path_produces_ok_entry_and_script_file() {
    let dir = tempfile::tempdir().unwrap();
    let templates = Arc::new(
        BundledTemplates::new().with_template("start-sit", "{entity} is a week {week} start."),
    );
    let ctx = context(
        dir.path(),
        templates,
        StaticEntityDirectory::new(),
        LengthPolicy::default(),
    );
    let item = one_item("Jordan Reyes");

    let outcome = run_item(&ctx, &item, StageFlags::default()).await;

    assert_eq!(outcome.entry.status, EntryStatus::Ok);
    assert_eq!(outcome.entry.script_path, format!("{}.md", item.slug()));
    assert!(outcome.entry.video_path.is_none());
    assert!(outcome.entry.tags.contains("#Week5"));
    assert!(outcome.entry.tags.contains("#StartSit"));
    assert!(outcome.entry.error_detail.is_none());

    let written = std::fs::read_to_string(dir.path().join(&outcome.entry.script_path)).unwrap();
    assert_eq!(written, "Jordan Reyes is a week 5 start.");
}

#[tokio::test]
async fn blocked_entity_short_circuits_before_generation() {
    let dir = tempfile::tempdir().unwrap();
    let calls = Arc::new(AtomicUsize::new(0));
    let templates = Arc::new(CountingTemplates {
        inner: BundledTemplates::standard(),
        calls: calls.clone(),
    });
    let entities = StaticEntityDirectory::from_statuses([("Jordan Reyes", "OUT")]);
    let ctx = context(dir.path(), templates, entities, LengthPolicy::default());
    let item = one_item("Jordan Reyes");

    let outcome = run_item(&ctx, &item, StageFlags::default()).await;

    assert_eq!(outcome.entry.status, EntryStatus::Blocked);
    let detail = outcome.entry.error_detail.expect("blocked entry carries a reason");
    assert!(!detail.is_empty());
    assert!(detail.contains("unavailable"));
    // zero template resolutions and zero guardrail evaluations: the item
    // never reached the scripted stage
    assert_eq!(calls.load(Ordering::SeqCst), 0);
    assert!(outcome.entry.script_path.is_empty());
}

#[tokio::test]
async fn over_length_script_fails_in_fail_mode() {
    let dir = tempfile::tempdir().unwrap();
    let long_body = (0..40).map(|i| format!("word{i}")).collect::<Vec<_>>().join(" ");
    let templates =
        Arc::new(BundledTemplates::new().with_template("start-sit", long_body));
    let ctx = context(
        dir.path(),
        templates,
        StaticEntityDirectory::new(),
        LengthPolicy::new(10, LengthMode::Fail),
    );
    let item = one_item("Jordan Reyes");

    let outcome = run_item(&ctx, &item, StageFlags::default()).await;

    assert_eq!(outcome.entry.status, EntryStatus::Failed);
    let detail = outcome.entry.error_detail.unwrap();
    assert!(detail.contains("length"));
    assert!(detail.contains("40 words"));
}

#[tokio::test]
async fn over_length_script_is_trimmed_in_trim_mode() {
    let dir = tempfile::tempdir().unwrap();
    let long_body = (0..40).map(|i| format!("word{i}")).collect::<Vec<_>>().join(" ");
    let templates =
        Arc::new(BundledTemplates::new().with_template("start-sit", long_body));
    let ctx = context(
        dir.path(),
        templates,
        StaticEntityDirectory::new(),
        LengthPolicy::new(10, LengthMode::Trim),
    );
    let item = one_item("Jordan Reyes");

    let outcome = run_item(&ctx, &item, StageFlags::default()).await;

    assert_eq!(outcome.entry.status, EntryStatus::Ok);
    let written = std::fs::read_to_string(dir.path().join(&outcome.entry.script_path)).unwrap();
    assert_eq!(written.split_whitespace().count(), 10);
}

#[tokio::test]
async fn render_and_upload_stages_produce_artifacts() {
    let dir = tempfile::tempdir().unwrap();
    let templates = Arc::new(BundledTemplates::standard());
    let ctx = context(
        dir.path(),
        templates,
        StaticEntityDirectory::new(),
        LengthPolicy::default(),
    );
    let item = one_item("Jordan Reyes");

    let outcome = run_item(
        &ctx,
        &item,
        StageFlags {
            render: true,
            upload: true,
        },
    )
    .await;

    assert_eq!(outcome.entry.status, EntryStatus::Ok);
    let video_path = outcome.entry.video_path.clone().unwrap();
    assert_eq!(video_path, format!("videos/{}.mp4", item.slug()));
    assert!(dir.path().join(&video_path).exists());
    assert!(dir.path().join(format!("{}.render.json", item.slug())).exists());

    let upload = outcome.upload.expect("upload stage ran");
    assert!(upload.simulated);
    assert!(upload.upload_id.starts_with("sim-upload-"));
}

#[tokio::test]
async fn upload_without_render_uses_placeholder_clip() {
    let dir = tempfile::tempdir().unwrap();
    let templates = Arc::new(BundledTemplates::standard());
    let ctx = context(
        dir.path(),
        templates,
        StaticEntityDirectory::new(),
        LengthPolicy::default(),
    );
    let item = one_item("Jordan Reyes");

    let outcome = run_item(
        &ctx,
        &item,
        StageFlags {
            render: false,
            upload: true,
        },
    )
    .await;

    assert_eq!(outcome.entry.status, EntryStatus::Ok);
    assert!(outcome.entry.video_path.is_none());
    assert!(outcome.upload.is_some());
    assert!(dir.path().join(format!("{}.mp4", item.slug())).exists());
}
