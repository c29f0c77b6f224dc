//! Lookups over a match document
//!
//! A match document has a `data` resource carrying the match attributes and
//! an `included` array of `participant`, `roster` and `asset` resources told
//! apart by their `type` field.

use super::path::{lookup, require_array, require_object, require_str};
use super::types::{ExtractError, ExtractResult};
use crate::types::{JsonObject, MatchInfo, ParticipantId, RosterId};
use serde_json::Value;
use tracing::debug;

const PARTICIPANT: &str = "participant";
const ROSTER: &str = "roster";
const ASSET: &str = "asset";

/// Included resources with the given `type` discriminator, in input order
fn included_of_type<'a>(
    doc: &'a Value,
    kind: &'a str,
) -> ExtractResult<impl Iterator<Item = &'a Value> + 'a> {
    let items = require_array(doc, "included")?;
    Ok(items
        .iter()
        .filter(move |item| item.get("type").and_then(Value::as_str) == Some(kind)))
}

/// First candidate in input order; duplicates are logged and ignored
fn first_of<'a>(
    mut candidates: impl Iterator<Item = &'a Value>,
    what: &str,
) -> ExtractResult<&'a Value> {
    let first = candidates
        .next()
        .ok_or_else(|| ExtractError::not_found(what))?;
    let extra = candidates.count();
    if extra > 0 {
        debug!("{} candidates for {what}, using the first", extra + 1);
    }
    Ok(first)
}

fn find_participant<'a>(doc: &'a Value, player_id: &str) -> ExtractResult<&'a Value> {
    let participants = included_of_type(doc, PARTICIPANT)?.filter(|p| {
        lookup(p, "attributes.stats.playerId").and_then(Value::as_str) == Some(player_id)
    });
    first_of(participants, &format!("participant for player {player_id}"))
}

/// Participant ids listed in a roster's relationships
fn roster_participant_ids(roster: &Value) -> ExtractResult<Vec<&str>> {
    require_array(roster, "relationships.participants.data")?
        .iter()
        .map(|entry| require_str(entry, "id"))
        .collect()
}

/// Read a roster's `won` flag, accepting booleans and boolean strings
fn roster_won(roster: &Value) -> ExtractResult<bool> {
    match lookup(roster, "attributes.won") {
        Some(Value::Bool(won)) => Ok(*won),
        Some(Value::String(s)) if s.eq_ignore_ascii_case("true") => Ok(true),
        Some(Value::String(s)) if s.eq_ignore_ascii_case("false") => Ok(false),
        Some(Value::Null) | None => Err(ExtractError::missing_field("attributes.won")),
        Some(_) => Err(ExtractError::malformed("attributes.won", "boolean")),
    }
}

/// Full attribute map of the match (`data.attributes`)
pub fn extract_match_attributes(doc: &Value) -> ExtractResult<&JsonObject> {
    require_object(doc, "data.attributes")
}

/// Map name and game mode of the match
pub fn extract_map_and_mode(doc: &Value) -> ExtractResult<MatchInfo> {
    extract_match_attributes(doc)?;
    Ok(MatchInfo {
        map_name: require_str(doc, "data.attributes.mapName")?.to_owned(),
        game_mode: require_str(doc, "data.attributes.gameMode")?.to_owned(),
    })
}

/// URL of the match's telemetry asset
///
/// If the document lists several assets the first one wins.
pub fn extract_telemetry_url(doc: &Value) -> ExtractResult<String> {
    let asset = first_of(included_of_type(doc, ASSET)?, "telemetry asset")?;
    Ok(require_str(asset, "attributes.URL")?.to_owned())
}

/// Stats of the participant played by `player_id`
pub fn extract_participant_stats<'a>(
    doc: &'a Value,
    player_id: &str,
) -> ExtractResult<&'a JsonObject> {
    let participant = find_participant(doc, player_id)?;
    require_object(participant, "attributes.stats")
}

/// Stats of the participant with the given participant id
pub fn extract_participant_stats_by_id<'a>(
    doc: &'a Value,
    participant_id: &str,
) -> ExtractResult<&'a JsonObject> {
    let participants = included_of_type(doc, PARTICIPANT)?
        .filter(|p| p.get("id").and_then(Value::as_str) == Some(participant_id));
    let participant = first_of(participants, &format!("participant {participant_id}"))?;
    require_object(participant, "attributes.stats")
}

/// Roster (team) that `player_id` played in
pub fn extract_roster_id(doc: &Value, player_id: &str) -> ExtractResult<RosterId> {
    let participant = find_participant(doc, player_id)?;
    let participant_id = require_str(participant, "id")?;

    for roster in included_of_type(doc, ROSTER)? {
        if roster_participant_ids(roster)?.contains(&participant_id) {
            return Ok(require_str(roster, "id")?.to_owned());
        }
    }

    Err(ExtractError::not_found(format!(
        "roster containing participant {participant_id}"
    )))
}

/// Participant ids of every roster marked as won
///
/// A match without a winning roster yields an empty list.
pub fn extract_winner_participant_ids(doc: &Value) -> ExtractResult<Vec<ParticipantId>> {
    let mut winners = Vec::new();
    for roster in included_of_type(doc, ROSTER)? {
        if roster_won(roster)? {
            winners.extend(roster_participant_ids(roster)?.into_iter().map(str::to_owned));
        }
    }
    Ok(winners)
}
