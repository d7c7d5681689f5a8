//! Named provider credentials.
//!
//! Credentials are opaque values resolved at the configuration boundary
//! and handed to live adapter constructors. Absence is detected there,
//! never mid-call.

/// Credentials for the avatar rendering provider.
#[derive(Clone, PartialEq, Eq)]
pub struct AvatarCredentials {
    /// API key sent as a bearer token
    pub api_key: String,
}

impl AvatarCredentials {
    /// Wrap an API key.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
        }
    }

    /// Read from `REELSMITH_AVATAR_API_KEY`; `None` when unset or empty.
    pub fn from_env() -> Option<Self> {
        read_secret("REELSMITH_AVATAR_API_KEY").map(Self::new)
    }
}

impl std::fmt::Debug for AvatarCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AvatarCredentials")
            .field("api_key", &"<redacted>")
            .finish()
    }
}

/// Credentials for the social upload provider.
#[derive(Clone, PartialEq, Eq)]
pub struct UploadCredentials {
    /// OAuth access token
    pub access_token: String,
    /// Account open id the token belongs to
    pub open_id: String,
}

impl UploadCredentials {
    /// Wrap an access token and open id.
    pub fn new(access_token: impl Into<String>, open_id: impl Into<String>) -> Self {
        Self {
            access_token: access_token.into(),
            open_id: open_id.into(),
        }
    }

    /// Read from `REELSMITH_UPLOAD_ACCESS_TOKEN` and
    /// `REELSMITH_UPLOAD_OPEN_ID`; `None` unless both are set.
    pub fn from_env() -> Option<Self> {
        let access_token = read_secret("REELSMITH_UPLOAD_ACCESS_TOKEN")?;
        let open_id = read_secret("REELSMITH_UPLOAD_OPEN_ID")?;
        Some(Self::new(access_token, open_id))
    }
}

impl std::fmt::Debug for UploadCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UploadCredentials")
            .field("access_token", &"<redacted>")
            .field("open_id", &self.open_id)
            .finish()
    }
}

fn read_secret(name: &str) -> Option<String> {
    std::env::var(name)
        .ok()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}
