//! End-to-end simulated week: plan → orchestrate → manifest → export.

use chrono::{NaiveDate, NaiveTime};
use reelsmith::{
    BundledTemplates, CadencePolicy, EntryStatus, Orchestrator, PollPolicy, RunSettings,
    SimulatedAvatarRenderer, SimulatedUploader, StageFlags, StaticEntityDirectory, export, plan,
    write_schedule_csv,
};
use std::sync::Arc;

fn strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|s| s.to_string()).collect()
}

#[tokio::test]
async fn simulated_week_round_trips_into_a_schedule() {
    let dir = tempfile::tempdir().unwrap();
    let settings = RunSettings {
        out_root: dir.path().to_path_buf(),
        worker_pool: 4,
        poll: PollPolicy::new(1, 5),
        base_tags: vec!["#shorts".to_string()],
        ..RunSettings::default()
    };

    let kinds = strings(&["start-sit", "waiver-wire"]);
    let entities = strings(&["Jordan Reyes", "Sam Okafor", "Lena Brooks"]);
    let items = plan(5, &kinds, &entities).unwrap();
    assert_eq!(items.len(), 6);

    let orchestrator = Orchestrator::new(
        settings,
        Arc::new(BundledTemplates::standard()),
        Arc::new(StaticEntityDirectory::from_statuses([(
            "Lena Brooks",
            "out",
        )])),
        Arc::new(SimulatedAvatarRenderer::new()),
        Arc::new(SimulatedUploader::new()),
    );

    let manifest = orchestrator
        .run(
            items.clone(),
            StageFlags {
                render: true,
                upload: true,
            },
        )
        .await
        .unwrap();

    // one entry per planned item, in plan order
    let expected_slugs: Vec<&String> = items.iter().map(|i| i.slug()).collect();
    let got_slugs: Vec<&String> = manifest.entries.iter().map(|e| &e.item_slug).collect();
    assert_eq!(got_slugs, expected_slugs);

    let summary = manifest.summary();
    assert_eq!((summary.ok, summary.blocked, summary.failed), (4, 2, 0));

    // artifacts on disk
    let week_dir = dir.path().join("week-5");
    assert!(week_dir.join("manifest.json").exists());
    assert!(week_dir.join("manifest.csv").exists());
    assert!(week_dir.join("plan.json").exists());
    assert!(week_dir.join("uploads.json").exists());

    // manifest read back from disk reproduces the same ok entries for
    // the exporter
    let reloaded = orchestrator.store().load(5).await.unwrap().unwrap();
    assert_eq!(reloaded, manifest);

    let policy = CadencePolicy {
        per_day: 2,
        times: vec![
            NaiveTime::from_hms_opt(10, 0, 0).unwrap(),
            NaiveTime::from_hms_opt(18, 0, 0).unwrap(),
        ],
    };
    let outcome = export(
        &reloaded,
        NaiveDate::from_ymd_opt(2025, 9, 29).unwrap(),
        "America/Los_Angeles",
        &policy,
    )
    .unwrap();

    assert_eq!(outcome.rows.len(), 4);
    assert_eq!(outcome.skipped, 2);

    let ok_captions: Vec<&String> = manifest
        .entries
        .iter()
        .filter(|e| e.status == EntryStatus::Ok)
        .map(|e| &e.caption)
        .collect();
    let row_captions: Vec<&String> = outcome.rows.iter().map(|r| &r.caption).collect();
    assert_eq!(row_captions, ok_captions);

    let csv_path = week_dir.join("scheduler_manifest.csv");
    write_schedule_csv(&csv_path, &outcome.rows).await.unwrap();
    let csv = std::fs::read_to_string(&csv_path).unwrap();
    assert_eq!(csv.lines().count(), 5);
    assert!(csv.lines().nth(1).unwrap().contains("-07:00"));
}

#[tokio::test]
async fn resumed_week_reuses_the_saved_plan() {
    let dir = tempfile::tempdir().unwrap();
    let settings = RunSettings {
        out_root: dir.path().to_path_buf(),
        ..RunSettings::default()
    };

    let items = plan(7, &strings(&["top-performers"]), &strings(&["Jordan Reyes"])).unwrap();

    let orchestrator = Orchestrator::new(
        settings,
        Arc::new(BundledTemplates::standard()),
        Arc::new(StaticEntityDirectory::new()),
        Arc::new(SimulatedAvatarRenderer::new()),
        Arc::new(SimulatedUploader::new()),
    );

    orchestrator
        .run(items.clone(), StageFlags::default())
        .await
        .unwrap();

    // a later invocation resumes the week from the plan artifact instead
    // of re-planning
    let resumed = orchestrator.store().load_plan(7).await.unwrap();
    assert_eq!(resumed, items);

    let manifest = orchestrator.run(resumed, StageFlags::default()).await.unwrap();
    assert_eq!(manifest.entries.len(), 1);
    assert_eq!(manifest.entries[0].status, EntryStatus::Ok);
}
