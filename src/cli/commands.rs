//! CLI commands and argument parsing

use crate::types::Shard;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// PUBG kill map extractor
#[derive(Parser, Debug)]
#[command(name = "pubg-killmap")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Settings file (YAML)
    #[arg(short = 'C', long, global = true)]
    pub config: Option<PathBuf>,

    /// Developer API key
    #[arg(long, global = true, env = "PUBG_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// Shard to query (e.g. pc-kakao, pc-eu)
    #[arg(long, global = true)]
    pub shard: Option<Shard>,

    /// Output format for printed records
    #[arg(short, long, global = true, default_value = "json")]
    pub format: OutputFormat,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Append kill coordinates of the shard's sample matches to a CSV file
    Kills {
        /// Destination CSV file (appended to)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Match ids per batch
        #[arg(long)]
        batch_size: Option<usize>,

        /// Matches processed concurrently
        #[arg(long)]
        workers: Option<usize>,

        /// Stop after this many batches
        #[arg(long, conflicts_with = "all_batches")]
        max_batches: Option<usize>,

        /// Process every batch
        #[arg(long)]
        all_batches: bool,

        /// Write an `x,y` header into a new file
        #[arg(long)]
        header: bool,
    },

    /// Print summaries of a player's matches
    Player {
        /// Player name
        name: String,

        /// Only matches played after this match id
        #[arg(long)]
        last_match: Option<String>,
    },

    /// Print winner stats of sample matches
    Winners {
        /// Number of sample matches to inspect
        #[arg(long, default_value = "5")]
        limit: usize,
    },

    /// Print telemetry URLs of sample matches
    TelemetryUrls {
        /// Number of sample matches to inspect
        #[arg(long)]
        limit: Option<usize>,
    },

    /// Print the effective settings
    Settings,
}

/// Output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// JSON output (one message per line)
    Json,
    /// Human-readable output
    Pretty,
}
