//! Simulated/live mode selection.

use serde::{Deserialize, Serialize};

/// Which variant of a provider adapter to construct.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, strum::Display, strum::EnumString, Default,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum ProviderMode {
    /// Deterministic offline variant; no network I/O
    #[default]
    Simulated,
    /// Real provider calls
    Live,
}

/// Per-provider mode selection plus a global kill-switch.
///
/// The kill-switch forces every provider into simulated mode regardless of
/// the per-provider settings. This is an explicit configuration value
/// threaded into the adapter factories; deep call paths never read ambient
/// process state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct ProviderToggles {
    /// Avatar rendering provider mode
    #[serde(default)]
    pub avatar: ProviderMode,
    /// Social upload provider mode
    #[serde(default)]
    pub upload: ProviderMode,
    /// Force all providers into simulated mode
    #[serde(default)]
    pub kill_switch: bool,
}

impl ProviderToggles {
    /// Fully simulated toggles (the safe default).
    pub fn simulated() -> Self {
        Self::default()
    }

    /// Effective mode for the avatar provider.
    pub fn effective_avatar(&self) -> ProviderMode {
        self.effective(self.avatar)
    }

    /// Effective mode for the upload provider.
    pub fn effective_upload(&self) -> ProviderMode {
        self.effective(self.upload)
    }

    /// Whether every provider resolves to the simulated variant.
    pub fn fully_simulated(&self) -> bool {
        self.effective_avatar() == ProviderMode::Simulated
            && self.effective_upload() == ProviderMode::Simulated
    }

    fn effective(&self, mode: ProviderMode) -> ProviderMode {
        if self.kill_switch {
            ProviderMode::Simulated
        } else {
            mode
        }
    }
}
