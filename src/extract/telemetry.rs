//! Telemetry event filtering and projection

use super::path::require_f64;
use super::types::{ExtractError, ExtractResult};
use crate::types::KillCoordinate;
use serde_json::Value;

/// Event type of a player kill
pub const KILL_EVENT: &str = "LogPlayerKill";

/// The `_T` discriminator of an event, if it has one
pub fn event_type(event: &Value) -> Option<&str> {
    event.get("_T").and_then(Value::as_str)
}

/// The event list of a telemetry document
pub fn telemetry_events(doc: &Value) -> ExtractResult<&[Value]> {
    doc.as_array()
        .map(Vec::as_slice)
        .ok_or_else(|| ExtractError::malformed("$", "array of events"))
}

/// Keep events whose type is one of `types`, in input order
///
/// Events without a string `_T` never match.
pub fn filter_telemetry<'a, I>(events: I, types: &[&str]) -> Vec<&'a Value>
where
    I: IntoIterator<Item = &'a Value>,
{
    events
        .into_iter()
        .filter(|event| event_type(event).is_some_and(|t| types.contains(&t)))
        .collect()
}

/// Victim positions of every kill event, in event order
///
/// All or nothing: a kill event without numeric `victim.location.x`/`y`
/// fails the whole extraction, even when other kills are well formed. The
/// telemetry is then treated as corrupt and the match yields no rows.
pub fn extract_kill_coordinates<'a, I>(events: I) -> ExtractResult<Vec<KillCoordinate>>
where
    I: IntoIterator<Item = &'a Value>,
{
    filter_telemetry(events, &[KILL_EVENT])
        .into_iter()
        .map(|kill| {
            Ok(KillCoordinate::new(
                require_f64(kill, "victim.location.x")?,
                require_f64(kill, "victim.location.y")?,
            ))
        })
        .collect()
}
