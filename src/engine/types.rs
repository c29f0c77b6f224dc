//! Engine types
//!
//! Per-match outcomes, player summaries and run statistics.

use crate::types::{JsonObject, KillCoordinate, MatchId, MatchInfo, RosterId};
use serde::Serialize;

/// What happened to one match id
#[derive(Debug, Clone, PartialEq)]
pub enum MatchOutcome {
    /// Selected by the policy; kill rows extracted (possibly none)
    Kills(Vec<KillCoordinate>),
    /// Rejected by the selection policy
    Skipped(MatchInfo),
    /// A fetch or extraction failed; already logged
    Failed,
}

impl MatchOutcome {
    /// Rows to append for this match
    pub fn into_rows(self) -> Vec<KillCoordinate> {
        match self {
            Self::Kills(rows) => rows,
            Self::Skipped(_) | Self::Failed => Vec::new(),
        }
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, Self::Failed)
    }
}

/// One of a player's matches, as summarised for incremental player syncs
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlayerMatch {
    pub match_id: MatchId,
    /// The player's participant stats
    pub stats: JsonObject,
    /// Match attributes (map, mode, duration, ...)
    pub info: JsonObject,
    pub roster_id: RosterId,
    pub telemetry_url: String,
}

/// Statistics from a pipeline run
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RunStats {
    /// Match ids handed to workers
    pub matches_processed: usize,
    /// Matches accepted by the selection policy
    pub matches_selected: usize,
    /// Matches rejected by the selection policy
    pub matches_skipped: usize,
    /// Matches lost to fetch or extraction failures
    pub matches_failed: usize,
    /// Rows appended to the sink
    pub rows_written: usize,
    /// Completed batches
    pub batches: usize,
    /// Duration in milliseconds
    pub duration_ms: u64,
}

impl RunStats {
    pub fn new() -> Self {
        Self::default()
    }

    /// Count one match outcome
    pub fn record(&mut self, outcome: &MatchOutcome) {
        self.matches_processed += 1;
        match outcome {
            MatchOutcome::Kills(_) => self.matches_selected += 1,
            MatchOutcome::Skipped(_) => self.matches_skipped += 1,
            MatchOutcome::Failed => self.matches_failed += 1,
        }
    }

    /// Add appended rows
    pub fn add_rows(&mut self, count: usize) {
        self.rows_written += count;
    }

    /// Add a finished batch
    pub fn add_batch(&mut self) {
        self.batches += 1;
    }

    /// Set duration
    pub fn set_duration(&mut self, ms: u64) {
        self.duration_ms = ms;
    }
}
