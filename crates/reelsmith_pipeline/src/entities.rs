//! Entity availability gate.
//!
//! The upstream data collaborator reports availability as a tagged
//! result; the pipeline consumes it explicitly before rendering anything
//! for the entity.

use reelsmith_core::EntityAvailability;
use std::collections::HashMap;

/// Reports whether an entity may be featured in generated content.
pub trait EntityDirectory: Send + Sync {
    /// Availability of the named entity.
    fn availability(&self, entity_name: &str) -> EntityAvailability;
}

const BLOCKED_STATUSES: [&str; 3] = ["out", "ir", "injured reserve"];

/// Static directory backed by an in-memory block list.
///
/// Entities default to available; the block list is keyed
/// case-insensitively.
#[derive(Debug, Clone, Default)]
pub struct StaticEntityDirectory {
    unavailable: HashMap<String, String>,
}

impl StaticEntityDirectory {
    /// A directory where every entity is available.
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark an entity unavailable with the given reason.
    pub fn mark_unavailable(mut self, entity: impl Into<String>, reason: impl Into<String>) -> Self {
        self.unavailable.insert(normalize(&entity.into()), reason.into());
        self
    }

    /// Build from upstream status strings, blocking the statuses that
    /// must never be featured (out, injured reserve).
    pub fn from_statuses<I, S>(statuses: I) -> Self
    where
        I: IntoIterator<Item = (S, S)>,
        S: Into<String>,
    {
        let mut directory = Self::new();
        for (entity, status) in statuses {
            let status = status.into();
            if BLOCKED_STATUSES.contains(&status.trim().to_lowercase().as_str()) {
                directory = directory
                    .mark_unavailable(entity.into(), format!("entity status = {status}"));
            }
        }
        directory
    }
}

impl EntityDirectory for StaticEntityDirectory {
    fn availability(&self, entity_name: &str) -> EntityAvailability {
        match self.unavailable.get(&normalize(entity_name)) {
            Some(reason) => EntityAvailability::unavailable(reason.clone()),
            None => EntityAvailability::available(),
        }
    }
}

fn normalize(entity: &str) -> String {
    entity.trim().to_lowercase()
}
