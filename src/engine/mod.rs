//! Execution engine module
//!
//! Turns match ids into kill rows.
//!
//! # Overview
//!
//! The engine module provides:
//! - `KillPipeline` - per-match fetch/filter/extract and the batched worker pool
//! - `RunStats` - counters for one run
//! - Player and winner summaries built from the same documents
//!
//! Within a batch up to `workers` matches are in flight at once and finish in
//! any order. Rows are appended only after the whole batch is done, by the
//! caller's task, so the sink never sees concurrent writes.

mod types;

pub use types::{MatchOutcome, PlayerMatch, RunStats};

use crate::api::ApiClient;
use crate::config::{PipelineConfig, SelectionPolicy};
use crate::error::Result;
use crate::extract::{
    extract_kill_coordinates, extract_map_and_mode, extract_match_attributes,
    extract_participant_stats, extract_participant_stats_by_id, extract_player_id,
    extract_roster_id, extract_telemetry_url, extract_winner_participant_ids, match_ids,
    matches_after, sample_match_ids, telemetry_events,
};
use crate::output::CsvSink;
use crate::types::{JsonObject, JsonValue, KillCoordinate, MatchId};
use futures::stream::{self, StreamExt};
use std::time::Instant;
use tracing::{debug, info, warn};

/// Kill coordinate extraction over batches of matches
#[derive(Debug)]
pub struct KillPipeline {
    api: ApiClient,
    policy: SelectionPolicy,
    config: PipelineConfig,
}

impl KillPipeline {
    /// Create a pipeline with the default policy and pool size
    pub fn new(api: ApiClient) -> Self {
        Self {
            api,
            policy: SelectionPolicy::default(),
            config: PipelineConfig::default(),
        }
    }

    /// Set the selection policy
    #[must_use]
    pub fn with_policy(mut self, policy: SelectionPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Set the pool configuration
    #[must_use]
    pub fn with_config(mut self, config: PipelineConfig) -> Self {
        self.config = config;
        self
    }

    pub fn api(&self) -> &ApiClient {
        &self.api
    }

    pub fn policy(&self) -> &SelectionPolicy {
        &self.policy
    }

    /// Kill rows for one match; every failure yields no rows
    pub async fn process_match(&self, match_id: &str) -> Vec<KillCoordinate> {
        self.evaluate_match(match_id).await.into_rows()
    }

    /// Fetch, select and extract one match
    pub async fn evaluate_match(&self, match_id: &str) -> MatchOutcome {
        let Some(doc) = self.api.try_match_document(match_id).await else {
            return MatchOutcome::Failed;
        };

        let info = match extract_map_and_mode(&doc) {
            Ok(info) => info,
            Err(e) => {
                warn!("Match {match_id}: {e}");
                return MatchOutcome::Failed;
            }
        };

        if !self.policy.accepts(&info.game_mode, &info.map_name) {
            debug!(
                "Match {match_id}: skipping {} on {}",
                info.game_mode, info.map_name
            );
            return MatchOutcome::Skipped(info);
        }

        let url = match extract_telemetry_url(&doc) {
            Ok(url) => url,
            Err(e) => {
                warn!("Match {match_id}: {e}");
                return MatchOutcome::Failed;
            }
        };

        let Some(telemetry) = self.api.try_telemetry(&url).await else {
            return MatchOutcome::Failed;
        };

        match telemetry_events(&telemetry).and_then(extract_kill_coordinates) {
            Ok(kills) => {
                debug!("Match {match_id}: {} kills", kills.len());
                MatchOutcome::Kills(kills)
            }
            Err(e) => {
                warn!("Match {match_id}: telemetry {e}");
                MatchOutcome::Failed
            }
        }
    }

    /// Process `match_ids` batch by batch, appending rows to `sink`
    pub async fn run(&self, match_ids: &[MatchId], sink: &mut CsvSink) -> Result<RunStats> {
        let start = Instant::now();
        let mut stats = RunStats::new();

        let batch_size = self.config.batch_size.max(1);
        let workers = self.config.workers.max(1);
        let max_batches = self.config.max_batches.unwrap_or(usize::MAX);

        for (index, batch) in match_ids.chunks(batch_size).take(max_batches).enumerate() {
            let batch_start = Instant::now();

            let outcomes: Vec<MatchOutcome> = stream::iter(batch)
                .map(|id| self.evaluate_match(id))
                .buffer_unordered(workers)
                .collect()
                .await;

            info!("Batch #{index}: {} matches returned", outcomes.len());

            for outcome in outcomes {
                stats.record(&outcome);
                let written = sink.append(&outcome.into_rows())?;
                stats.add_rows(written);
            }
            stats.add_batch();

            info!(
                "Batch #{index} done, took {:.3} seconds",
                batch_start.elapsed().as_secs_f64()
            );
        }

        stats.set_duration(start.elapsed().as_millis() as u64);
        info!(
            "Processed {} matches in {} batches: {} selected, {} skipped, {} failed, {} rows",
            stats.matches_processed,
            stats.batches,
            stats.matches_selected,
            stats.matches_skipped,
            stats.matches_failed,
            stats.rows_written
        );
        Ok(stats)
    }

    /// Sample match ids of the configured shard
    pub async fn sample_ids(&self) -> Result<Vec<MatchId>> {
        let samples = self.api.samples().await?;
        let ids = sample_match_ids(&samples)?;
        info!("{} sample matches on {}", ids.len(), self.api.shard());
        Ok(ids)
    }

    /// Run the pipeline over the shard's sample matches
    pub async fn run_samples(&self, sink: &mut CsvSink) -> Result<RunStats> {
        let ids = self.sample_ids().await?;
        self.run(&ids, sink).await
    }

    /// Summaries of a player's matches played after `last_seen`
    ///
    /// Matches that cannot be fetched or lack the player's records are
    /// skipped with a warning.
    pub async fn player_matches(
        &self,
        player_name: &str,
        last_seen: Option<&str>,
    ) -> Result<Vec<PlayerMatch>> {
        let player = self.api.player(player_name).await?;
        let player_id = extract_player_id(&player)?;
        let ids = match_ids(&player)?.to_vec();

        if last_seen.is_none() {
            info!("No recorded matches for player {player_name} on {}", self.api.shard());
        }

        let mut summaries = Vec::new();
        for match_id in matches_after(&ids, last_seen) {
            let Some(doc) = self.api.try_match_document(match_id).await else {
                continue;
            };
            match summarize_player_match(match_id, &doc, &player_id) {
                Ok(summary) => summaries.push(summary),
                Err(e) => warn!("Match {match_id} for player {player_name}: {e}"),
            }
        }
        Ok(summaries)
    }

    /// Winner stats merged with match attributes, for up to `limit` sample matches
    pub async fn winner_stats(&self, limit: Option<usize>) -> Result<Vec<JsonObject>> {
        let ids = self.sample_ids().await?;
        let mut rows = Vec::new();

        for match_id in ids.iter().take(limit.unwrap_or(usize::MAX)) {
            let Some(doc) = self.api.try_match_document(match_id).await else {
                continue;
            };
            match winner_rows(&doc) {
                Ok(mut merged) => rows.append(&mut merged),
                Err(e) => warn!("Match {match_id}: {e}"),
            }
        }
        Ok(rows)
    }

    /// Telemetry URLs of up to `limit` sample matches
    pub async fn sample_telemetry_urls(&self, limit: Option<usize>) -> Result<Vec<String>> {
        let ids = self.sample_ids().await?;
        let mut urls = Vec::new();

        for match_id in ids.iter().take(limit.unwrap_or(usize::MAX)) {
            let Some(doc) = self.api.try_match_document(match_id).await else {
                continue;
            };
            match extract_telemetry_url(&doc) {
                Ok(url) => urls.push(url),
                Err(e) => warn!("Match {match_id}: {e}"),
            }
        }
        Ok(urls)
    }
}

fn summarize_player_match(
    match_id: &str,
    doc: &JsonValue,
    player_id: &str,
) -> crate::extract::ExtractResult<PlayerMatch> {
    Ok(PlayerMatch {
        match_id: match_id.to_string(),
        stats: extract_participant_stats(doc, player_id)?.clone(),
        info: extract_match_attributes(doc)?.clone(),
        roster_id: extract_roster_id(doc, player_id)?,
        telemetry_url: extract_telemetry_url(doc)?,
    })
}

/// Each winner's stats, overlaid with the match attributes
fn winner_rows(doc: &JsonValue) -> crate::extract::ExtractResult<Vec<JsonObject>> {
    let attributes = extract_match_attributes(doc)?;
    extract_winner_participant_ids(doc)?
        .iter()
        .map(|winner| {
            let mut row = extract_participant_stats_by_id(doc, winner)?.clone();
            row.extend(attributes.iter().map(|(k, v)| (k.clone(), v.clone())));
            Ok(row)
        })
        .collect()
}

#[cfg(test)]
mod tests;
