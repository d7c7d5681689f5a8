//! Content request and planned item types.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A request to generate one unit of content.
///
/// Immutable once planned. Identity is the triple
/// (week_number, entity_name, content_kind).
///
/// # Examples
///
/// ```
/// use reelsmith_core::ContentRequestBuilder;
///
/// let request = ContentRequestBuilder::default()
///     .entity_name("Jordan Reyes")
///     .week_number(5u32)
///     .content_kind("top-performers")
///     .build()
///     .unwrap();
///
/// assert_eq!(request.week_number(), &5);
/// ```
#[derive(
    Debug, Clone, PartialEq, Eq, Serialize, Deserialize, derive_builder::Builder, derive_getters::Getters,
)]
#[builder(setter(into))]
pub struct ContentRequest {
    /// Entity the content is about (player, creator, product line)
    entity_name: String,
    /// Calendar week the content targets
    week_number: u32,
    /// Content kind key (e.g. "top-performers", "waiver-wire")
    content_kind: String,
    /// Free-form key/value context made available to templates
    #[builder(default)]
    #[serde(default)]
    extra_context: BTreeMap<String, String>,
}

/// A [`ContentRequest`] paired with its deterministic slug identifier.
///
/// Created by the batch planner; consumed read-only by the item pipeline.
/// The slug is a pure function of the request identity, so re-planning the
/// same week yields identical slugs and artifacts can be safely
/// overwritten by key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, derive_getters::Getters)]
pub struct PlannedItem {
    request: ContentRequest,
    slug: String,
}

impl PlannedItem {
    /// Wrap a request, deriving the slug from its identity.
    ///
    /// # Examples
    ///
    /// ```
    /// use reelsmith_core::{ContentRequestBuilder, PlannedItem};
    ///
    /// let request = ContentRequestBuilder::default()
    ///     .entity_name("Jordan Reyes")
    ///     .week_number(5u32)
    ///     .content_kind("top-performers")
    ///     .build()
    ///     .unwrap();
    /// let item = PlannedItem::new(request);
    /// assert_eq!(item.slug(), "jordan-reyes--top-performers--w5");
    /// ```
    pub fn new(request: ContentRequest) -> Self {
        let slug = slug_for(
            *request.week_number(),
            request.entity_name(),
            request.content_kind(),
        );
        Self { request, slug }
    }
}

/// Derive the deterministic slug for a request identity.
///
/// Lowercased, whitespace collapsed to `-`, non-alphanumeric characters
/// dropped, joined as `<entity>--<kind>--w<week>`. Stable across runs.
pub fn slug_for(week_number: u32, entity_name: &str, content_kind: &str) -> String {
    format!(
        "{}--{}--w{}",
        slugify(entity_name),
        slugify(content_kind),
        week_number
    )
}

fn slugify(value: &str) -> String {
    value
        .trim()
        .to_lowercase()
        .split_whitespace()
        .map(|word| {
            word.chars()
                .filter(|c| c.is_ascii_alphanumeric() || *c == '-' || *c == '_')
                .collect::<String>()
        })
        .filter(|word| !word.is_empty())
        .collect::<Vec<_>>()
        .join("-")
}
