//! CLI runner - executes commands

use crate::api::ApiClient;
use crate::cli::commands::{Cli, Commands, OutputFormat};
use crate::config::Settings;
use crate::engine::KillPipeline;
use crate::error::Result;
use crate::output::CsvSink;
use serde_json::{json, Value};
use std::path::PathBuf;
use tracing::info;

/// CLI runner
pub struct Runner {
    cli: Cli,
}

impl Runner {
    /// Create a new runner
    pub fn new(cli: Cli) -> Self {
        Self { cli }
    }

    /// Run the CLI command
    pub async fn run(&self) -> Result<()> {
        let settings = self.settings()?;

        match &self.cli.command {
            Commands::Kills { .. } => self.kills(&settings).await,
            Commands::Player { name, last_match } => {
                self.player(&settings, name, last_match.as_deref()).await
            }
            Commands::Winners { limit } => self.winners(&settings, *limit).await,
            Commands::TelemetryUrls { limit } => self.telemetry_urls(&settings, *limit).await,
            Commands::Settings => self.show_settings(&settings),
        }
    }

    /// Settings file overlaid with command-line flags, validated
    pub fn settings(&self) -> Result<Settings> {
        let mut settings = match &self.cli.config {
            Some(path) => Settings::from_file(path)?,
            None => Settings::default(),
        };

        if let Some(key) = &self.cli.api_key {
            settings.api.api_key = Some(key.clone());
        }
        if let Some(shard) = self.cli.shard {
            settings.api.shard = shard;
        }

        if let Commands::Kills {
            output,
            batch_size,
            workers,
            max_batches,
            all_batches,
            header,
        } = &self.cli.command
        {
            if let Some(path) = output {
                settings.output.path = path.clone();
            }
            if let Some(size) = batch_size {
                settings.pipeline.batch_size = *size;
            }
            if let Some(workers) = workers {
                settings.pipeline.workers = *workers;
            }
            if *all_batches {
                settings.pipeline.max_batches = None;
            } else if max_batches.is_some() {
                settings.pipeline.max_batches = *max_batches;
            }
            if *header {
                settings.output.write_header = true;
            }
        }

        settings.validate()?;
        Ok(settings)
    }

    fn pipeline(settings: &Settings) -> Result<KillPipeline> {
        let api = ApiClient::new(settings)?;
        Ok(KillPipeline::new(api)
            .with_policy(settings.selection.clone())
            .with_config(settings.pipeline.clone()))
    }

    /// Append kill rows for the shard's sample matches
    async fn kills(&self, settings: &Settings) -> Result<()> {
        let pipeline = Self::pipeline(settings)?;
        let mut sink = CsvSink::open(&settings.output.path, settings.output.write_header)?;

        info!(
            "Writing {} kills on {} to {}",
            settings.selection.game_mode,
            settings.selection.map_name,
            sink.path().display()
        );

        let stats = pipeline.run_samples(&mut sink).await?;

        self.output_message(&json!({
            "type": "STATS",
            "output": sink.path(),
            "stats": stats,
        }));
        Ok(())
    }

    /// Print one summary per match of a player
    async fn player(&self, settings: &Settings, name: &str, last_match: Option<&str>) -> Result<()> {
        let pipeline = Self::pipeline(settings)?;
        for summary in pipeline.player_matches(name, last_match).await? {
            self.output_message(&serde_json::to_value(&summary)?);
        }
        Ok(())
    }

    /// Print winner stats of sample matches
    async fn winners(&self, settings: &Settings, limit: usize) -> Result<()> {
        let pipeline = Self::pipeline(settings)?;
        for row in pipeline.winner_stats(Some(limit)).await? {
            self.output_message(&Value::Object(row));
        }
        Ok(())
    }

    /// Print telemetry URLs of sample matches
    async fn telemetry_urls(&self, settings: &Settings, limit: Option<usize>) -> Result<()> {
        let pipeline = Self::pipeline(settings)?;
        for url in pipeline.sample_telemetry_urls(limit).await? {
            println!("{url}");
        }
        Ok(())
    }

    /// Print the effective settings, key redacted
    fn show_settings(&self, settings: &Settings) -> Result<()> {
        let mut shown = settings.clone();
        if shown.api.api_key.is_some() {
            shown.api.api_key = Some("<redacted>".to_string());
        }
        self.output_message(&serde_json::to_value(&shown)?);
        Ok(())
    }

    /// Output a message
    fn output_message(&self, msg: &Value) {
        match self.cli.format {
            OutputFormat::Json => {
                println!("{}", serde_json::to_string(msg).unwrap_or_default());
            }
            OutputFormat::Pretty => {
                println!("{}", serde_json::to_string_pretty(msg).unwrap_or_default());
            }
        }
    }

    /// CSV destination the `kills` command would write to
    pub fn output_path(&self) -> Result<PathBuf> {
        Ok(self.settings()?.output.path)
    }
}
