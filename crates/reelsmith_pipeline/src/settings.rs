//! Run settings.
//!
//! Bundled defaults ship with the crate; a `reelsmith.toml` in the working
//! directory and `REELSMITH__*` environment variables layer on top, user
//! values taking precedence.

use config::{Config, Environment, File, FileFormat};
use reelsmith_error::{ConfigError, ReelsmithResult};
use reelsmith_guardrail::LengthPolicy;
use reelsmith_providers::{PollPolicy, ProviderSettings, ProviderToggles, RetryPolicy};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

const DEFAULT_SETTINGS: &str = include_str!("../defaults.toml");

/// Settings for one batch run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunSettings {
    /// Root directory for week artifacts
    pub out_root: PathBuf,
    /// Bounded worker pool size for concurrent item pipelines
    pub worker_pool: usize,
    /// Whether the render stage runs
    pub render: bool,
    /// Whether the upload stage runs
    pub upload: bool,
    /// Avatar presenter id passed to the render provider
    pub avatar_id: String,
    /// Tags added to every item in addition to the derived ones
    pub base_tags: Vec<String>,
    /// Optional whole-run timeout in seconds
    #[serde(default)]
    pub run_timeout_secs: Option<u64>,
    /// Length guardrail applied to every script
    pub guardrail: LengthPolicy,
    /// Polling budget for async render jobs
    pub poll: PollPolicy,
    /// Retry budget for live provider calls
    pub retry: RetryPolicy,
    /// Simulated/live selection per provider plus kill-switch
    #[serde(rename = "providers")]
    pub toggles: ProviderToggles,
    /// Live provider endpoints
    pub endpoints: ProviderSettings,
}

impl Default for RunSettings {
    fn default() -> Self {
        Self {
            out_root: PathBuf::from(".out"),
            worker_pool: 2,
            render: false,
            upload: false,
            avatar_id: "default-presenter".to_string(),
            base_tags: Vec::new(),
            run_timeout_secs: None,
            guardrail: LengthPolicy::default(),
            poll: PollPolicy::default(),
            retry: RetryPolicy::default(),
            toggles: ProviderToggles::default(),
            endpoints: ProviderSettings::default(),
        }
    }
}

impl RunSettings {
    /// Load settings: bundled defaults, then `./reelsmith.toml`, then
    /// `REELSMITH__*` environment variables.
    ///
    /// # Errors
    ///
    /// Returns a configuration error when a source fails to parse or a
    /// value does not deserialize.
    #[tracing::instrument]
    pub fn load() -> ReelsmithResult<Self> {
        dotenvy::dotenv().ok();

        let config = Config::builder()
            .add_source(File::from_str(DEFAULT_SETTINGS, FileFormat::Toml))
            .add_source(File::with_name("reelsmith").required(false))
            .add_source(Environment::with_prefix("REELSMITH").separator("__"))
            .build()
            .map_err(|e| ConfigError::new(format!("failed to load settings: {e}")))?;

        let settings: Self = config
            .try_deserialize()
            .map_err(|e| ConfigError::new(format!("invalid settings: {e}")))?;

        tracing::debug!(
            out_root = %settings.out_root.display(),
            worker_pool = settings.worker_pool,
            "settings loaded"
        );
        Ok(settings)
    }
}
