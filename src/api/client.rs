//! Typed access to the remote API
//!
//! `ApiClient` owns the credentials and shard chosen at start-up and hands
//! back raw JSON documents for the extractor. The `try_*` variants absorb
//! transport failures into `None` so that one bad match never stops a batch.

use super::endpoints::Endpoint;
use crate::auth::AuthConfig;
use crate::config::{Settings, API_MEDIA_TYPE};
use crate::error::Result;
use crate::http::{HttpClient, HttpClientConfig, RequestConfig};
use crate::types::{JsonValue, Shard};
use tracing::warn;
use url::Url;

/// Client for the player, match, samples and telemetry resources
#[derive(Debug)]
pub struct ApiClient {
    http: HttpClient,
    base_url: Url,
    shard: Shard,
}

impl ApiClient {
    /// Build a client from settings; fails without an API key
    pub fn new(settings: &Settings) -> Result<Self> {
        let api = &settings.api;
        let mut builder = HttpClientConfig::builder()
            .timeout(api.timeout())
            .header("Accept", API_MEDIA_TYPE);
        builder = match &api.rate_limit {
            Some(limit) => builder.rate_limit(limit.clone()),
            None => builder.no_rate_limit(),
        };

        let http = HttpClient::with_auth(builder.build(), AuthConfig::bearer(settings.api_key()?))?;
        Ok(Self::from_parts(http, Url::parse(&api.base_url)?, api.shard))
    }

    /// Assemble a client from an existing HTTP client
    pub fn from_parts(http: HttpClient, base_url: Url, shard: Shard) -> Self {
        Self {
            http,
            base_url,
            shard,
        }
    }

    pub fn shard(&self) -> Shard {
        self.shard
    }

    /// Fetch any API resource on the configured shard
    pub async fn fetch(&self, endpoint: &Endpoint) -> Result<JsonValue> {
        let url = endpoint.url(&self.base_url, self.shard)?;
        self.http.get_json(url.as_str()).await
    }

    /// Player document for a display name
    pub async fn player(&self, name: &str) -> Result<JsonValue> {
        self.fetch(&Endpoint::PlayersByName(vec![name.to_string()]))
            .await
    }

    /// Match document
    pub async fn match_document(&self, match_id: &str) -> Result<JsonValue> {
        self.fetch(&Endpoint::Match(match_id.to_string())).await
    }

    /// Sample match list of the shard
    pub async fn samples(&self) -> Result<JsonValue> {
        self.fetch(&Endpoint::Samples).await
    }

    /// Telemetry events from the asset URL of a match
    ///
    /// The telemetry CDN is outside the API: no credentials, no throttle.
    /// The body is requested uncompressed.
    pub async fn telemetry(&self, url: &str) -> Result<JsonValue> {
        let config = RequestConfig::external()
            .header("Accept", API_MEDIA_TYPE)
            .header("Accept-Encoding", "identity");
        self.http.get_json_with_config(url, config).await
    }

    /// Match document, or `None` when the request failed
    pub async fn try_match_document(&self, match_id: &str) -> Option<JsonValue> {
        absorb(self.match_document(match_id).await, "match", match_id)
    }

    /// Telemetry, or `None` when the request failed
    pub async fn try_telemetry(&self, url: &str) -> Option<JsonValue> {
        absorb(self.telemetry(url).await, "telemetry", url)
    }
}

fn absorb(result: Result<JsonValue>, what: &str, target: &str) -> Option<JsonValue> {
    match result {
        Ok(doc) => Some(doc),
        Err(e) => {
            warn!("Fetching {what} {target} failed: {e}");
            None
        }
    }
}
