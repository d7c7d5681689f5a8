//! Entity availability result type.

use serde::{Deserialize, Serialize};

/// Availability of an entity, as reported by the upstream directory.
///
/// A tagged result consumed explicitly by the pipeline's blocking check;
/// there is no sentinel value to probe for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "availability", rename_all = "snake_case")]
pub enum EntityAvailability {
    /// Entity may be featured in generated content
    Available {
        /// Optional upstream status note
        note: Option<String>,
    },
    /// Entity must not be featured; generation is blocked
    Unavailable {
        /// Why the entity is blocked
        reason: String,
    },
}

impl EntityAvailability {
    /// An available entity with no status note.
    pub fn available() -> Self {
        Self::Available { note: None }
    }

    /// An unavailable entity with the given reason.
    pub fn unavailable(reason: impl Into<String>) -> Self {
        Self::Unavailable {
            reason: reason.into(),
        }
    }
}
