//! Log file formats
//!
//! Writes recorded snapshots as CSV channels or as JSON lines.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use super::{DataLogError, LogEntry};

/// Supported log file formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    /// Comma-separated flattened channels
    Csv,
    /// One JSON snapshot per line (.jsonl)
    JsonLines,
}

impl LogFormat {
    /// Detect format from file extension
    pub fn from_extension(path: &Path) -> Option<Self> {
        match path.extension()?.to_str()?.to_lowercase().as_str() {
            "csv" => Some(LogFormat::Csv),
            "jsonl" | "ndjson" => Some(LogFormat::JsonLines),
            _ => None,
        }
    }

    /// Get the file extension for this format
    pub fn extension(&self) -> &'static str {
        match self {
            LogFormat::Csv => "csv",
            LogFormat::JsonLines => "jsonl",
        }
    }
}

/// Write log entries to a CSV file.
///
/// Missing lap times are written as empty cells.
pub fn write_csv<P: AsRef<Path>>(
    path: P,
    channels: &[String],
    entries: &[&LogEntry],
) -> io::Result<()> {
    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);

    // Write header
    write!(writer, "Time")?;
    for channel in channels {
        write!(writer, ",{}", channel)?;
    }
    writeln!(writer)?;

    // Write data rows
    for entry in entries {
        write!(writer, "{:.3}", entry.elapsed.as_secs_f64())?;
        for value in entry.snapshot.channel_values() {
            if value.is_nan() {
                write!(writer, ",")?;
            } else {
                write!(writer, ",{:.4}", value)?;
            }
        }
        writeln!(writer)?;
    }

    writer.flush()?;
    Ok(())
}

/// Write each entry's snapshot as one JSON object per line
pub fn write_json_lines<P: AsRef<Path>>(path: P, entries: &[&LogEntry]) -> Result<(), DataLogError> {
    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);

    for entry in entries {
        serde_json::to_writer(&mut writer, &entry.snapshot)?;
        writeln!(writer)?;
    }

    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_detection() {
        assert_eq!(
            LogFormat::from_extension(Path::new("log.csv")),
            Some(LogFormat::Csv)
        );
        assert_eq!(
            LogFormat::from_extension(Path::new("session.JSONL")),
            Some(LogFormat::JsonLines)
        );
        assert_eq!(LogFormat::from_extension(Path::new("log.txt")), None);
        assert_eq!(LogFormat::from_extension(Path::new("log")), None);
    }
}
