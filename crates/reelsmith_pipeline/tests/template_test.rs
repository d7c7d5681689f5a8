//! Template resolution and rendering tests.

use reelsmith_core::ContentRequestBuilder;
use reelsmith_error::ReelsmithErrorKind;
use reelsmith_pipeline::{BundledTemplates, render_script, resolve_or_fallback};

fn request(entity: &str, week: u32, kind: &str) -> reelsmith_core::ContentRequest {
    ContentRequestBuilder::default()
        .entity_name(entity)
        .week_number(week)
        .content_kind(kind)
        .build()
        .unwrap()
}

#[test]
fn placeholders_substitute_from_request() {
    let source = BundledTemplates::new()
        .with_template("start-sit", "{entity} outlook for week {week}: {kind}.");
    let template = resolve_or_fallback(&source, "start-sit").unwrap();
    let script = render_script(&template, &request("Jordan Reyes", 5, "start-sit"));

    assert_eq!(script.text(), "Jordan Reyes outlook for week 5: start-sit.");
}

#[test]
fn unknown_placeholders_render_empty() {
    let source = BundledTemplates::new().with_template("start-sit", "Hello {nobody}!");
    let template = resolve_or_fallback(&source, "start-sit").unwrap();
    let script = render_script(&template, &request("Jordan Reyes", 5, "start-sit"));

    assert_eq!(script.text(), "Hello !");
}

#[test]
fn extra_context_keys_are_available() {
    let request = ContentRequestBuilder::default()
        .entity_name("Jordan Reyes")
        .week_number(5u32)
        .content_kind("start-sit")
        .extra_context(std::collections::BTreeMap::from([(
            "matchup".to_string(),
            "road game".to_string(),
        )]))
        .build()
        .unwrap();
    let source = BundledTemplates::new().with_template("start-sit", "Context: {matchup}");
    let template = resolve_or_fallback(&source, "start-sit").unwrap();

    let script = render_script(&template, &request);
    assert_eq!(script.text(), "Context: road game");
}

#[test]
fn missing_kind_falls_back_to_default() {
    let source = BundledTemplates::standard();
    let template = resolve_or_fallback(&source, "unmapped-kind").unwrap();

    assert_eq!(template.name, "default");
}

#[test]
fn underscore_template_names_still_resolve() {
    let source = BundledTemplates::new().with_template("start_sit", "legacy body");
    let template = resolve_or_fallback(&source, "start-sit").unwrap();

    assert_eq!(template.body, "legacy body");
}

#[test]
fn no_template_and_no_fallback_is_a_configuration_error() {
    let source = BundledTemplates::new();
    let err = resolve_or_fallback(&source, "start-sit").unwrap_err();

    assert!(matches!(err.kind(), ReelsmithErrorKind::Config(_)));
}
