//! Manifest store persistence tests.

use chrono::Utc;
use reelsmith_core::{EntryStatus, ManifestEntry, WeekManifest};
use reelsmith_pipeline::{ManifestStore, plan};
use std::collections::BTreeSet;

fn entry(slug: &str, status: EntryStatus) -> ManifestEntry {
    ManifestEntry {
        item_slug: slug.to_string(),
        content_kind: "start-sit".to_string(),
        entity_name: "Jordan Reyes".to_string(),
        script_path: format!("{slug}.md"),
        caption: "Start Sit - Week 5".to_string(),
        video_path: None,
        thumbnail_path: None,
        tags: BTreeSet::from(["#Week5".to_string()]),
        status,
        error_detail: None,
    }
}

fn manifest(entries: Vec<ManifestEntry>) -> WeekManifest {
    WeekManifest {
        week_number: 5,
        generated_at: Utc::now(),
        partial: false,
        entries,
    }
}

#[tokio::test]
async fn save_and_load_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let store = ManifestStore::new(dir.path());

    let saved = store
        .save(&manifest(vec![entry("a--start-sit--w5", EntryStatus::Ok)]))
        .await
        .unwrap();
    let loaded = store.load(5).await.unwrap().unwrap();

    assert_eq!(saved, loaded);
    assert_eq!(loaded.entries.len(), 1);
}

#[tokio::test]
async fn load_missing_manifest_is_none() {
    let dir = tempfile::tempdir().unwrap();
    let store = ManifestStore::new(dir.path());

    assert!(store.load(9).await.unwrap().is_none());
}

#[tokio::test]
async fn merge_overwrites_by_slug_and_preserves_order() {
    let dir = tempfile::tempdir().unwrap();
    let store = ManifestStore::new(dir.path());

    store
        .save(&manifest(vec![
            entry("a--start-sit--w5", EntryStatus::Failed),
            entry("b--start-sit--w5", EntryStatus::Ok),
        ]))
        .await
        .unwrap();

    // second run: "a" recovered, "c" is new
    let merged = store
        .save(&manifest(vec![
            entry("a--start-sit--w5", EntryStatus::Ok),
            entry("c--start-sit--w5", EntryStatus::Ok),
        ]))
        .await
        .unwrap();

    let slugs: Vec<&str> = merged.entries.iter().map(|e| e.item_slug.as_str()).collect();
    assert_eq!(
        slugs,
        vec!["a--start-sit--w5", "b--start-sit--w5", "c--start-sit--w5"]
    );
    assert_eq!(merged.entries[0].status, EntryStatus::Ok);
}

#[tokio::test]
async fn csv_mirror_has_fixed_header() {
    let dir = tempfile::tempdir().unwrap();
    let store = ManifestStore::new(dir.path());

    store
        .save(&manifest(vec![entry("a--start-sit--w5", EntryStatus::Ok)]))
        .await
        .unwrap();

    let csv = std::fs::read_to_string(dir.path().join("week-5/manifest.csv")).unwrap();
    let mut lines = csv.lines();
    assert_eq!(
        lines.next().unwrap(),
        "item_slug,entity_name,content_kind,status,script_path,video_path,caption,tags,error_detail"
    );
    assert!(lines.next().unwrap().starts_with("a--start-sit--w5,"));
}

#[tokio::test]
async fn plan_artifact_round_trips() {
    let dir = tempfile::tempdir().unwrap();
    let store = ManifestStore::new(dir.path());

    let items = plan(
        5,
        &["start-sit".to_string()],
        &["Jordan Reyes".to_string(), "Sam Okafor".to_string()],
    )
    .unwrap();

    store.save_plan(5, &items).await.unwrap();
    let loaded = store.load_plan(5).await.unwrap();

    assert_eq!(items, loaded);
}

#[tokio::test]
async fn loading_a_missing_plan_fails() {
    let dir = tempfile::tempdir().unwrap();
    let store = ManifestStore::new(dir.path());

    assert!(store.load_plan(40).await.is_err());
}
