//! Resource URLs of the remote API
//!
//! Every resource lives under `{base}/shards/{shard}/`. Resources are either
//! addressed by id (`matches/{id}`), filtered (`players?filter[playerNames]=…`)
//! or listed (`samples`).

use crate::error::{Error, Result};
use crate::types::{MatchId, Shard};
use url::Url;

/// One API resource
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Endpoint {
    /// Players looked up by display name
    PlayersByName(Vec<String>),
    /// A single match
    Match(MatchId),
    /// Sample match ids for the shard
    Samples,
}

impl Endpoint {
    /// Resource type segment
    pub fn resource(&self) -> &'static str {
        match self {
            Endpoint::PlayersByName(_) => "players",
            Endpoint::Match(_) => "matches",
            Endpoint::Samples => "samples",
        }
    }

    /// Build the absolute URL for this resource on `shard`
    pub fn url(&self, base: &Url, shard: Shard) -> Result<Url> {
        let mut url = base.clone();
        {
            let mut segments = url
                .path_segments_mut()
                .map_err(|()| Error::config(format!("Base URL cannot have a path: {base}")))?;
            segments
                .pop_if_empty()
                .push("shards")
                .push(shard.as_str())
                .push(self.resource());
            if let Endpoint::Match(id) = self {
                segments.push(id);
            }
        }

        if let Endpoint::PlayersByName(names) = self {
            url.query_pairs_mut()
                .append_pair("filter[playerNames]", &names.join(","));
        }

        Ok(url)
    }
}
