//! # PUBG Kill Map
//!
//! Batch extraction of kill positions from PUBG match telemetry.
//!
//! ## Features
//!
//! - **API Access**: Player, match, samples and telemetry resources per shard
//! - **Extraction**: Pure functions from raw JSON documents to typed values
//! - **Selection**: Only matches of one game mode on one map produce rows
//! - **Batching**: Bounded concurrency per batch, rows appended between batches
//! - **CSV Output**: Append-only `x,y` file of victim positions
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use pubg_killmap::{ApiClient, CsvSink, KillPipeline, Result, Settings};
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let mut settings = Settings::default();
//!     settings.api.api_key = Some("...".into());
//!
//!     let pipeline = KillPipeline::new(ApiClient::new(&settings)?);
//!     let mut sink = CsvSink::open("solo_savage_kills.csv", false)?;
//!     let stats = pipeline.run_samples(&mut sink).await?;
//!     println!("{} rows", stats.rows_written);
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌───────────────────────────────────────────────────────────────┐
//! │                         KillPipeline                          │
//! │   sample ids → batches → workers → MatchOutcome → CsvSink     │
//! └───────────────────────────────────────────────────────────────┘
//!                                │
//! ┌──────────┬───────────┬───────┴───────┬───────────┬───────────┐
//! │   Auth   │   HTTP    │      API      │  Extract  │  Output   │
//! ├──────────┼───────────┼───────────────┼───────────┼───────────┤
//! │ Bearer   │ GET       │ Players       │ Match     │ CSV       │
//! │          │ Timeout   │ Matches       │ Player    │           │
//! │          │ Rate Limit│ Samples       │ Telemetry │           │
//! │          │           │ Telemetry     │           │           │
//! └──────────┴───────────┴───────────────┴───────────┴───────────┘
//! ```

// ============================================================================
// Module declarations
// ============================================================================

/// Error types
pub mod error;

/// Common types and type aliases
pub mod types;

/// Authentication implementations
pub mod auth;

/// HTTP client with timeouts and rate limiting
pub mod http;

/// Remote API resources
pub mod api;

/// Field extraction from API documents
pub mod extract;

/// CSV output
pub mod output;

/// Main execution engine
pub mod engine;

/// Runtime settings
pub mod config;

/// Command-line interface
pub mod cli;

// ============================================================================
// Re-exports
// ============================================================================

pub use error::{Error, Result};
pub use types::*;

// Re-export commonly used types
pub use api::ApiClient;
pub use config::Settings;
pub use engine::{KillPipeline, RunStats};
pub use output::CsvSink;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name
pub const NAME: &str = env!("CARGO_PKG_NAME");
