//! Reelsmith - weekly short-form video content pipeline.
//!
//! Reelsmith plans a week of content items, generates scripts against
//! templates, applies content-safety guardrails, optionally renders
//! avatar video and uploads it, and produces a deterministic week
//! manifest plus a scheduler-ready export. Providers are swappable
//! between simulated and live variants, selected by explicit
//! configuration, and one bad item never aborts a batch.
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use reelsmith::{
//!     BundledTemplates, Orchestrator, RunSettings, StageFlags, StaticEntityDirectory,
//!     SimulatedAvatarRenderer, SimulatedUploader, plan,
//! };
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let settings = RunSettings::load()?;
//!     let items = plan(5, &["start-sit".to_string()], &["Jordan Reyes".to_string()])?;
//!
//!     let orchestrator = Orchestrator::new(
//!         settings,
//!         Arc::new(BundledTemplates::standard()),
//!         Arc::new(StaticEntityDirectory::new()),
//!         Arc::new(SimulatedAvatarRenderer::new()),
//!         Arc::new(SimulatedUploader::new()),
//!     );
//!     let manifest = orchestrator.run(items, StageFlags::default()).await?;
//!     println!("{:?}", manifest.summary());
//!     Ok(())
//! }
//! ```
//!
//! # Architecture
//!
//! Reelsmith is organized as a workspace with focused crates:
//!
//! - `reelsmith_error` - Error types
//! - `reelsmith_core` - Core data types
//! - `reelsmith_guardrail` - Content-safety evaluation
//! - `reelsmith_providers` - Simulated/live provider adapters
//! - `reelsmith_pipeline` - Planning and batch orchestration
//! - `reelsmith_export` - Scheduler export
//!
//! This crate (`reelsmith`) re-exports everything for convenience.

#![forbid(unsafe_code)]

pub use reelsmith_core::*;
pub use reelsmith_error::*;
pub use reelsmith_export::*;
pub use reelsmith_guardrail::*;
pub use reelsmith_pipeline::*;
pub use reelsmith_providers::*;
