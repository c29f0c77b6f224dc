//! Lookups over player and samples documents

use super::path::{require_array, require_str};
use super::types::{ExtractError, ExtractResult, MatchIds};
use crate::types::{MatchId, PlayerId};
use serde_json::Value;
use tracing::warn;

/// Account id of the first player in a `players?filter[playerNames]=` response
pub fn extract_player_id(doc: &Value) -> ExtractResult<PlayerId> {
    Ok(require_str(doc, "data[0].id")?.to_owned())
}

/// The first player's recent match ids, oldest first
pub fn match_ids(doc: &Value) -> ExtractResult<MatchIds<'_>> {
    let entries = require_array(doc, "data[0].relationships.matches.data")?;
    if let Some(bad) = entries.iter().position(|e| e.get("id").and_then(Value::as_str).is_none()) {
        return Err(ExtractError::malformed(
            format!("data[0].relationships.matches.data[{bad}].id"),
            "string",
        ));
    }
    Ok(MatchIds::new(entries))
}

/// Match ids listed by the `samples` endpoint, in response order
pub fn sample_match_ids(doc: &Value) -> ExtractResult<Vec<MatchId>> {
    require_array(doc, "data.relationships.matches.data")?
        .iter()
        .map(|entry| require_str(entry, "id").map(str::to_owned))
        .collect()
}

/// The ids that come after `last_seen`
///
/// Without a resume point, or when `last_seen` is not in the list, every id
/// is returned.
pub fn matches_after<'a>(ids: &'a [MatchId], last_seen: Option<&str>) -> &'a [MatchId] {
    let Some(last_seen) = last_seen else {
        return ids;
    };

    match ids.iter().position(|id| id == last_seen) {
        Some(index) => &ids[index + 1..],
        None => {
            warn!("Last seen match {last_seen} not in the player's recent matches; starting over");
            ids
        }
    }
}
