//! CSV file sink
//!
//! Appends kill coordinates to a flat file, one `x,y` row per kill.

use crate::error::{Error, Result, ResultExt};
use crate::types::KillCoordinate;
use std::fs::{File, OpenOptions};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Column names written when headers are enabled
pub const HEADER: [&str; 2] = ["x", "y"];

/// Append-only CSV sink
pub struct CsvSink {
    writer: csv::Writer<File>,
    path: PathBuf,
    rows_written: usize,
}

impl CsvSink {
    /// Open `path` for appending, creating it (and its directory) if needed
    ///
    /// The header is written only when `write_header` is set and the file
    /// is empty, so repeated runs never repeat it.
    pub fn open(path: impl AsRef<Path>, write_header: bool) -> Result<Self> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)
                    .with_context(|| format!("Failed to create {}", parent.display()))?;
            }
        }

        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .with_context(|| format!("Failed to open {}", path.display()))?;
        let is_empty = file
            .metadata()
            .with_context(|| format!("Failed to stat {}", path.display()))?
            .len()
            == 0;

        let mut writer = csv::WriterBuilder::new()
            .has_headers(false)
            .from_writer(file);

        if write_header && is_empty {
            writer.write_record(HEADER)?;
            writer.flush()?;
        }

        Ok(Self {
            writer,
            path: path.to_path_buf(),
            rows_written: 0,
        })
    }

    /// Append rows and flush; an empty slice leaves the file untouched
    pub fn append(&mut self, rows: &[KillCoordinate]) -> Result<usize> {
        if rows.is_empty() {
            return Ok(0);
        }

        for row in rows {
            self.writer.serialize(row)?;
        }
        self.writer.flush()?;

        self.rows_written += rows.len();
        debug!("Appended {} rows to {}", rows.len(), self.path.display());
        Ok(rows.len())
    }

    /// Rows appended through this sink
    #[must_use]
    pub fn rows_written(&self) -> usize {
        self.rows_written
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl std::fmt::Debug for CsvSink {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CsvSink")
            .field("path", &self.path)
            .field("rows_written", &self.rows_written)
            .finish_non_exhaustive()
    }
}

/// Read back every coordinate row of a sink file
pub fn read_coordinates(path: impl AsRef<Path>, has_header: bool) -> Result<Vec<KillCoordinate>> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(has_header)
        .from_path(path)?;

    reader
        .deserialize::<KillCoordinate>()
        .map(|row| row.map_err(Error::from))
        .collect()
}
