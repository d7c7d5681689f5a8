//! Core data types for the Reelsmith content pipeline.
//!
//! This crate provides the foundation data types shared across the
//! planner, item pipeline, orchestrator, providers, and exporter.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod csv;
mod entity;
mod manifest;
mod render;
mod request;
mod schedule;
mod script;
mod telemetry;
mod verdict;

pub use csv::{escape_field, format_row};
pub use entity::EntityAvailability;
pub use manifest::{BatchSummary, EntryStatus, ManifestEntry, WeekManifest};
pub use render::{RenderJob, RenderStatus, UploadResult};
pub use request::{ContentRequest, ContentRequestBuilder, PlannedItem, slug_for};
pub use schedule::ScheduleRow;
pub use script::ScriptArtifact;
pub use telemetry::init_telemetry;
pub use verdict::{GuardrailAction, GuardrailVerdict, Violation};
