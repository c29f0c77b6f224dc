//! Record extractor module
//!
//! Pure lookups over the documents returned by the remote API. Every
//! function borrows the raw `serde_json::Value`, performs no I/O and
//! reports absence or a bad shape through [`ExtractError`].
//!
//! # Overview
//!
//! - Match documents: map/mode, telemetry URL, participant stats, rosters,
//!   winners
//! - Player and samples documents: account id, match id sequences
//! - Telemetry: event filtering and kill coordinate projection
//!
//! Scans that expect one element take the first candidate in input order
//! when the document holds several.

mod match_doc;
mod path;
mod player;
mod telemetry;
mod types;

pub use match_doc::{
    extract_map_and_mode, extract_match_attributes, extract_participant_stats,
    extract_participant_stats_by_id, extract_roster_id, extract_telemetry_url,
    extract_winner_participant_ids,
};
pub use player::{extract_player_id, match_ids, matches_after, sample_match_ids};
pub use telemetry::{
    event_type, extract_kill_coordinates, filter_telemetry, telemetry_events, KILL_EVENT,
};
pub use types::{ExtractError, ExtractResult, MatchIds};
