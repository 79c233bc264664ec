//! JSONL file writer for comparison events.
//!
//! Each [`ComparisonEvent`] becomes one JSON line starting with `type` and
//! `timestamp`, followed by the payload fields. Runs append to the same file.

use promptlab_application::ports::comparison_logger::{ComparisonEvent, ComparisonLogger};
use serde_json::{Map, Value};
use std::fs::{File, OpenOptions};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing::{debug, warn};

/// JSONL comparison logger that writes one JSON object per line.
///
/// Thread-safe via `Mutex<BufWriter<File>>`. Flushes after every record and on `Drop`.
pub struct JsonlComparisonLogger {
    writer: Mutex<BufWriter<File>>,
    path: PathBuf,
}

impl JsonlComparisonLogger {
    /// Open (or create) the log at `path` in append mode.
    ///
    /// Parent directories are created as needed.
    pub fn open(path: impl AsRef<Path>) -> io::Result<Self> {
        let path = path.as_ref();

        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent)?;
        }

        let file = OpenOptions::new().create(true).append(true).open(path)?;
        debug!("Comparison log opened at {}", path.display());

        Ok(Self {
            writer: Mutex::new(BufWriter::new(file)),
            path: path.to_path_buf(),
        })
    }

    /// Get the path to the log file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn record(event: ComparisonEvent) -> Value {
        let timestamp = chrono::Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Millis, true);

        let mut record = Map::new();
        record.insert("type".to_string(), Value::from(event.event_type));
        record.insert("timestamp".to_string(), Value::from(timestamp));

        match event.payload {
            Value::Object(fields) => {
                for (key, value) in fields {
                    // type and timestamp are reserved
                    record.entry(key).or_insert(value);
                }
            }
            Value::Null => {}
            other => {
                record.insert("data".to_string(), other);
            }
        }

        Value::Object(record)
    }
}

impl ComparisonLogger for JsonlComparisonLogger {
    fn log(&self, event: ComparisonEvent) {
        let record = Self::record(event);

        let Ok(line) = serde_json::to_string(&record) else {
            return;
        };

        match self.writer.lock() {
            Ok(mut writer) => {
                if let Err(e) = writeln!(writer, "{}", line).and_then(|_| writer.flush()) {
                    warn!("Could not write comparison log {}: {}", self.path.display(), e);
                }
            }
            Err(_) => warn!("Comparison log writer poisoned, dropping event"),
        }
    }
}

impl Drop for JsonlComparisonLogger {
    fn drop(&mut self) {
        if let Ok(mut writer) = self.writer.lock() {
            let _ = writer.flush();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn read_lines(path: &Path) -> Vec<Value> {
        std::fs::read_to_string(path)
            .unwrap()
            .lines()
            .map(|line| serde_json::from_str(line).unwrap())
            .collect()
    }

    #[test]
    fn test_writes_one_record_per_event() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("compare.jsonl");
        let logger = JsonlComparisonLogger::open(&path).unwrap();

        logger.log(ComparisonEvent::new(
            "comparison_started",
            json!({"query": "What is S3?", "technique_a": "default", "technique_b": "cot"}),
        ));
        logger.log(ComparisonEvent::new(
            "side_completed",
            json!({"side": "B", "status": "error", "error_kind": "timeout"}),
        ));
        drop(logger);

        let records = read_lines(&path);
        assert_eq!(records.len(), 2);
        for record in &records {
            assert!(record["timestamp"].as_str().unwrap().ends_with('Z'));
        }
        assert_eq!(records[0]["type"], "comparison_started");
        assert_eq!(records[0]["technique_b"], "cot");
        assert_eq!(records[1]["type"], "side_completed");
        assert_eq!(records[1]["error_kind"], "timeout");
    }

    #[test]
    fn test_payload_cannot_override_type() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("compare.jsonl");
        let logger = JsonlComparisonLogger::open(&path).unwrap();

        logger.log(ComparisonEvent::new(
            "comparison_completed",
            json!({"type": "spoofed", "elapsed_ms": 12}),
        ));
        drop(logger);

        let records = read_lines(&path);
        assert_eq!(records[0]["type"], "comparison_completed");
        assert_eq!(records[0]["elapsed_ms"], 12);
    }

    #[test]
    fn test_non_object_payload_goes_under_data() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("compare.jsonl");
        let logger = JsonlComparisonLogger::open(&path).unwrap();

        logger.log(ComparisonEvent::new("note", json!("just a string")));
        drop(logger);

        let records = read_lines(&path);
        assert_eq!(records[0]["data"], "just a string");
    }

    #[test]
    fn test_appends_across_runs() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("compare.jsonl");

        for _ in 0..2 {
            let logger = JsonlComparisonLogger::open(&path).unwrap();
            logger.log(ComparisonEvent::new("comparison_started", json!({})));
        }

        assert_eq!(read_lines(&path).len(), 2);
    }

    #[test]
    fn test_open_fails_when_parent_is_a_file() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("blocker");
        std::fs::write(&blocker, "x").unwrap();

        assert!(JsonlComparisonLogger::open(blocker.join("compare.jsonl")).is_err());
    }
}
