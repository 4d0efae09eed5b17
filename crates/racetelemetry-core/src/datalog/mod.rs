//! Data Logging
//!
//! Records telemetry snapshots for later export.

mod format;
mod recorder;

pub use format::{write_csv, write_json_lines, LogFormat};
pub use recorder::DataLogger;

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

use crate::snapshot::TelemetrySnapshot;

/// Errors that can occur while exporting a recording
#[derive(Error, Debug)]
pub enum DataLogError {
    /// Writing the file failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A snapshot could not be encoded
    #[error("Serialization error: {0}")]
    Serialize(#[from] serde_json::Error),

    /// The file extension names no supported format
    #[error("Unknown log format for '{}'", .0.display())]
    UnknownFormat(PathBuf),
}

/// A single log entry with timestamp and snapshot
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogEntry {
    /// Time from start of logging
    pub elapsed: Duration,
    /// Recorded snapshot
    pub snapshot: TelemetrySnapshot,
}

impl LogEntry {
    /// Create a new log entry
    pub fn new(elapsed: Duration, snapshot: TelemetrySnapshot) -> Self {
        Self { elapsed, snapshot }
    }
}
