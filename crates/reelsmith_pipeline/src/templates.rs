//! Template resolution and script rendering.
//!
//! Template storage is an external collaborator; the pipeline only needs
//! the [`TemplateSource`] seam. [`BundledTemplates`] is the in-memory
//! source used for offline runs and tests.

use regex::Regex;
use reelsmith_core::{ContentRequest, ScriptArtifact};
use reelsmith_error::{ConfigError, ReelsmithResult};
use std::collections::HashMap;
use std::sync::LazyLock;

/// A named script template with `{placeholder}` substitution points.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Template {
    /// Template name, usually the content kind it serves
    pub name: String,
    /// Raw template body
    pub body: String,
}

impl Template {
    /// Wrap a name and body.
    pub fn new(name: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            body: body.into(),
        }
    }
}

/// Resolves content kinds to templates.
pub trait TemplateSource: Send + Sync {
    /// The template registered for `kind`, if any.
    fn resolve(&self, kind: &str) -> Option<Template>;

    /// The default template used when no kind-specific one resolves.
    fn fallback(&self) -> Option<Template> {
        None
    }
}

const GENERIC_TEMPLATE: &str = "# {kind}\n\nWeek {week} update for {entity}.";

/// In-memory template source.
#[derive(Debug, Clone, Default)]
pub struct BundledTemplates {
    templates: HashMap<String, String>,
    fallback_body: Option<String>,
}

impl BundledTemplates {
    /// An empty source with no fallback.
    pub fn new() -> Self {
        Self::default()
    }

    /// A source with only the generic fallback template.
    pub fn standard() -> Self {
        Self {
            templates: HashMap::new(),
            fallback_body: Some(GENERIC_TEMPLATE.to_string()),
        }
    }

    /// Register a template body for a kind.
    pub fn with_template(mut self, kind: impl Into<String>, body: impl Into<String>) -> Self {
        self.templates.insert(kind.into(), body.into());
        self
    }

    /// Set the fallback template body.
    pub fn with_fallback(mut self, body: impl Into<String>) -> Self {
        self.fallback_body = Some(body.into());
        self
    }
}

impl TemplateSource for BundledTemplates {
    fn resolve(&self, kind: &str) -> Option<Template> {
        if let Some(body) = self.templates.get(kind) {
            return Some(Template::new(kind, body.clone()));
        }
        // underscore variant kept for older template names
        let underscored = kind.replace('-', "_");
        self.templates
            .get(&underscored)
            .map(|body| Template::new(kind, body.clone()))
    }

    fn fallback(&self) -> Option<Template> {
        self.fallback_body
            .as_ref()
            .map(|body| Template::new("default", body.clone()))
    }
}

/// Resolve a template for `kind`, falling back to the source's default.
///
/// # Errors
///
/// Configuration error when neither a kind-specific template nor a
/// default resolves. At item scope this fails the item, not the batch.
pub fn resolve_or_fallback(source: &dyn TemplateSource, kind: &str) -> ReelsmithResult<Template> {
    source
        .resolve(kind)
        .or_else(|| source.fallback())
        .ok_or_else(|| {
            ConfigError::new(format!(
                "no template resolves for kind '{kind}' and no default template is configured"
            ))
            .into()
        })
}

static PLACEHOLDER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{([A-Za-z0-9_]+)\}").expect("placeholder pattern is valid"));

/// Render a request against a template.
///
/// Supports `{entity}`, `{week}`, `{kind}`, and any key from the
/// request's extra context. Unknown placeholders render as empty strings
/// rather than failing the item.
pub fn render_script(template: &Template, request: &ContentRequest) -> ScriptArtifact {
    let week = request.week_number().to_string();
    let rendered = PLACEHOLDER.replace_all(&template.body, |caps: &regex::Captures<'_>| {
        match &caps[1] {
            "entity" => request.entity_name().clone(),
            "week" => week.clone(),
            "kind" => request.content_kind().clone(),
            key => request
                .extra_context()
                .get(key)
                .cloned()
                .unwrap_or_default(),
        }
    });

    ScriptArtifact::from_text(request.content_kind().clone(), rendered.into_owned())
}
