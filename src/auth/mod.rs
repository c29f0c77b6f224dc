//! Authentication module
//!
//! The PUBG API takes its key as a bearer token. Telemetry downloads from the CDN go out without credentials.

mod authenticator;
mod types;

pub use authenticator::Authenticator;
pub use types::AuthConfig;
