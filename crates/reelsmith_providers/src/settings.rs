//! Provider endpoint settings.

use serde::{Deserialize, Serialize};

/// Connection settings for one live provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderEndpoint {
    /// API base URL; required for live mode, ignored when simulated
    #[serde(default)]
    pub base_url: String,
    /// Requests per minute ceiling; `None` disables the GCRA limiter
    #[serde(default = "default_rpm")]
    pub rpm: Option<u32>,
    /// Maximum concurrent outbound calls
    #[serde(default = "default_max_concurrent")]
    pub max_concurrent: u32,
}

fn default_rpm() -> Option<u32> {
    Some(30)
}

fn default_max_concurrent() -> u32 {
    2
}

impl Default for ProviderEndpoint {
    fn default() -> Self {
        Self {
            base_url: String::new(),
            rpm: default_rpm(),
            max_concurrent: default_max_concurrent(),
        }
    }
}

/// Settings for all live providers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct ProviderSettings {
    /// Avatar rendering endpoint
    #[serde(default)]
    pub avatar: ProviderEndpoint,
    /// Social upload endpoint
    #[serde(default)]
    pub upload: ProviderEndpoint,
}
