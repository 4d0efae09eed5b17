//! Data logger / recorder
//!
//! Records telemetry snapshots as the dashboard polls them.

use std::collections::VecDeque;
use std::path::Path;
use std::time::Duration;

use chrono::{DateTime, Utc};

use super::format::{write_csv, write_json_lines, LogFormat};
use super::{DataLogError, LogEntry};
use crate::lap::seconds_since;
use crate::snapshot::{channel_names, TelemetrySnapshot};

/// Maximum entries to keep in memory; oldest entries are dropped first
const MAX_BUFFER_SIZE: usize = 10000;

/// Data logger state
pub struct DataLogger {
    /// In-memory log buffer
    buffer: VecDeque<LogEntry>,
    /// Timestamp of the first recorded snapshot
    start_time: Option<DateTime<Utc>>,
    /// Whether logging is active
    is_recording: bool,
    /// Target sample rate in Hz
    sample_rate: f64,
    /// Timestamp of the last recorded snapshot
    last_sample: Option<DateTime<Utc>>,
}

impl DataLogger {
    /// Create a new, stopped data logger
    pub fn new() -> Self {
        Self {
            buffer: VecDeque::with_capacity(MAX_BUFFER_SIZE),
            start_time: None,
            is_recording: false,
            sample_rate: 10.0, // Default 10 Hz
            last_sample: None,
        }
    }

    /// Set the target sample rate in Hz
    pub fn set_sample_rate(&mut self, rate: f64) {
        self.sample_rate = if rate.is_nan() {
            10.0
        } else {
            rate.clamp(1.0, 200.0)
        };
    }

    /// Get the sample rate
    pub fn sample_rate(&self) -> f64 {
        self.sample_rate
    }

    /// Start recording, discarding any previous entries
    pub fn start(&mut self) {
        self.start_time = None;
        self.is_recording = true;
        self.last_sample = None;
        self.buffer.clear();
    }

    /// Stop recording
    pub fn stop(&mut self) {
        self.is_recording = false;
    }

    /// Check if recording is active
    pub fn is_recording(&self) -> bool {
        self.is_recording
    }

    /// Record a snapshot.
    ///
    /// Snapshots arriving faster than the sample rate (by their own
    /// timestamps) are skipped. Returns whether the snapshot was stored.
    pub fn record(&mut self, snapshot: &TelemetrySnapshot) -> bool {
        if !self.is_recording {
            return false;
        }

        let now = snapshot.timestamp;

        // Check sample rate
        let min_interval = 1.0 / self.sample_rate;
        if let Some(last) = self.last_sample {
            if seconds_since(last, now) < min_interval {
                return false;
            }
        }

        let start = *self.start_time.get_or_insert(now);
        let elapsed = (now - start).to_std().unwrap_or_default();

        // Manage buffer size
        if self.buffer.len() >= MAX_BUFFER_SIZE {
            self.buffer.pop_front();
        }

        self.buffer.push_back(LogEntry::new(elapsed, snapshot.clone()));
        self.last_sample = Some(now);
        true
    }

    /// Get the number of recorded entries
    pub fn entry_count(&self) -> usize {
        self.buffer.len()
    }

    /// Get all entries
    pub fn entries(&self) -> impl Iterator<Item = &LogEntry> {
        self.buffer.iter()
    }

    /// Clear all recorded data
    pub fn clear(&mut self) {
        self.buffer.clear();
        self.start_time = None;
        self.last_sample = None;
    }

    /// Get the duration of the log
    pub fn duration(&self) -> Duration {
        self.buffer.back().map(|e| e.elapsed).unwrap_or_default()
    }

    /// Write the recording to `path`, choosing the format by extension
    pub fn export<P: AsRef<Path>>(&self, path: P) -> Result<(), DataLogError> {
        let path = path.as_ref();
        let format = LogFormat::from_extension(path)
            .ok_or_else(|| DataLogError::UnknownFormat(path.to_path_buf()))?;

        let entries: Vec<&LogEntry> = self.buffer.iter().collect();
        match format {
            LogFormat::Csv => write_csv(path, &channel_names(), &entries)?,
            LogFormat::JsonLines => write_json_lines(path, &entries)?,
        }

        tracing::info!(
            path = %path.display(),
            entries = entries.len(),
            format = format.extension(),
            "recording exported"
        );
        Ok(())
    }
}

impl Default for DataLogger {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generator::TelemetryGenerator;
    use chrono::Duration as ChronoDuration;

    #[test]
    fn test_logger_basic() {
        let mut generator = TelemetryGenerator::with_seed(5);
        let mut logger = DataLogger::new();

        assert!(!logger.is_recording());
        assert!(!logger.record(&generator.snapshot()));

        logger.start();
        assert!(logger.is_recording());

        assert!(logger.record(&generator.snapshot()));
        assert_eq!(logger.entry_count(), 1);

        logger.stop();
        assert!(!logger.is_recording());
    }

    #[test]
    fn test_sample_rate_throttles_by_timestamp() {
        let start = Utc::now();
        let mut generator = TelemetryGenerator::with_seed(9).started_at(start);
        let mut logger = DataLogger::new();
        logger.set_sample_rate(2.0);
        logger.start();

        // Frame loop at ~33 ms for one second
        for i in 0..30 {
            let snapshot = generator.snapshot_at(start + ChronoDuration::milliseconds(i * 33));
            logger.record(&snapshot);
        }

        assert_eq!(logger.entry_count(), 2);
        assert_eq!(logger.duration(), Duration::from_millis(528));
    }
}
