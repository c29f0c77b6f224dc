//! Auth configuration types

use std::fmt;

/// Credentials attached to outgoing requests
#[derive(Clone, Default, PartialEq, Eq)]
pub enum AuthConfig {
    /// No authentication (telemetry CDN downloads)
    #[default]
    None,

    /// Bearer token authentication
    Bearer {
        /// The bearer token
        token: String,
    },
}

impl AuthConfig {
    /// Bearer auth with the given API key, as the PUBG API expects
    pub fn bearer(token: impl Into<String>) -> Self {
        Self::Bearer {
            token: token.into(),
        }
    }
}

// Never print credentials.
impl fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::None => f.write_str("None"),
            Self::Bearer { .. } => f
                .debug_struct("Bearer")
                .field("token", &"<redacted>")
                .finish(),
        }
    }
}
