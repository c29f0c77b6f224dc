//! CLI module
//!
//! Command-line interface for the kill map pipeline.
//!
//! # Commands
//!
//! - `kills` - Append kill coordinates of sample matches to a CSV file
//! - `player` - Summaries of a player's matches
//! - `winners` - Winner stats of sample matches
//! - `telemetry-urls` - Telemetry URLs of sample matches
//! - `settings` - Show the effective settings

mod commands;
mod runner;

pub use commands::{Cli, Commands, OutputFormat};
pub use runner::Runner;
