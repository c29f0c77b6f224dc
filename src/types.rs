//! Common types used throughout pubg-killmap
//!
//! This module contains shared type definitions, type aliases,
//! and the small value types that flow between the extractor,
//! the pipeline and the sink.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// ============================================================================
// Type Aliases
// ============================================================================

/// JSON value type (re-exported from serde_json)
pub type JsonValue = serde_json::Value;

/// JSON object type
pub type JsonObject = serde_json::Map<String, JsonValue>;

/// Opaque match identifier
pub type MatchId = String;

/// Opaque account identifier (`account.…`)
pub type PlayerId = String;

/// Opaque participant identifier, unique within one match
pub type ParticipantId = String;

/// Opaque roster identifier, unique within one match
pub type RosterId = String;

// ============================================================================
// Shards
// ============================================================================

/// Platform-region partition of the remote API
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Shard {
    #[default]
    #[serde(rename = "pc-kakao")]
    PcKakao,
    #[serde(rename = "pc-krjp")]
    PcKrjp,
    #[serde(rename = "pc-eu")]
    PcEu,
    #[serde(rename = "pc-na")]
    PcNa,
    #[serde(rename = "pc-as")]
    PcAs,
    #[serde(rename = "pc-oc")]
    PcOc,
    #[serde(rename = "pc-sea")]
    PcSea,
    #[serde(rename = "pc-sa")]
    PcSa,
    #[serde(rename = "pc-ru")]
    PcRu,
    #[serde(rename = "pc-jp")]
    PcJp,
}

impl Shard {
    /// Every known shard
    pub const ALL: [Shard; 10] = [
        Shard::PcKakao,
        Shard::PcKrjp,
        Shard::PcEu,
        Shard::PcNa,
        Shard::PcAs,
        Shard::PcOc,
        Shard::PcSea,
        Shard::PcSa,
        Shard::PcRu,
        Shard::PcJp,
    ];

    /// Path segment used by the API
    pub fn as_str(self) -> &'static str {
        match self {
            Shard::PcKakao => "pc-kakao",
            Shard::PcKrjp => "pc-krjp",
            Shard::PcEu => "pc-eu",
            Shard::PcNa => "pc-na",
            Shard::PcAs => "pc-as",
            Shard::PcOc => "pc-oc",
            Shard::PcSea => "pc-sea",
            Shard::PcSa => "pc-sa",
            Shard::PcRu => "pc-ru",
            Shard::PcJp => "pc-jp",
        }
    }
}

impl fmt::Display for Shard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Shard {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Shard::ALL
            .into_iter()
            .find(|shard| shard.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("unknown shard '{s}'"))
    }
}

// ============================================================================
// Extracted values
// ============================================================================

/// Map and game mode of one match
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchInfo {
    /// Internal map name (e.g. `Savage_Main`)
    pub map_name: String,
    /// Game mode (e.g. `solo`, `squad-fpp`)
    pub game_mode: String,
}

/// Victim position of one kill event; one CSV row
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct KillCoordinate {
    pub x: f64,
    pub y: f64,
}

impl KillCoordinate {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}
