//! Output module
//!
//! Handles the tabular sink the pipeline appends to.
//!
//! # Overview
//!
//! - `CsvSink` appends `x,y` rows to a file, writing the header at most once
//! - `read_coordinates` reads a sink file back

mod writer;

pub use writer::{read_coordinates, CsvSink, HEADER};
