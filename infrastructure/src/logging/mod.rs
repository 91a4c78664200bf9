//! JSONL file writer for transcript events.
//!
//! Each [`TranscriptEvent`] is serialized as a single JSON line with a
//! `type` field and `timestamp`, appended through a buffered writer.

use relay_application::ports::transcript_logger::{TranscriptEvent, TranscriptLogger};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing::warn;

/// Transcript logger that writes one JSON object per line.
///
/// Thread-safe via `Mutex<BufWriter<File>>`. Flushes on `Drop`. A logger
/// that cannot be created reports `None`; it never fails the run.
pub struct JsonlTranscriptLogger {
    writer: Mutex<BufWriter<File>>,
    path: PathBuf,
}

impl JsonlTranscriptLogger {
    /// Create a new logger writing to the given path, creating parent
    /// directories as needed.
    pub fn new(path: impl AsRef<Path>) -> Option<Self> {
        let path = path.as_ref();

        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
            && let Err(e) = std::fs::create_dir_all(parent)
        {
            warn!(
                "Could not create transcript directory {}: {}",
                parent.display(),
                e
            );
            return None;
        }

        let file = match File::create(path) {
            Ok(f) => f,
            Err(e) => {
                warn!("Could not create transcript file {}: {}", path.display(), e);
                return None;
            }
        };

        Some(Self {
            writer: Mutex::new(BufWriter::new(file)),
            path: path.to_path_buf(),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl TranscriptLogger for JsonlTranscriptLogger {
    fn log(&self, event: TranscriptEvent) {
        let timestamp = chrono::Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Millis, true);

        let record = if let serde_json::Value::Object(mut map) = event.payload {
            map.insert(
                "type".to_string(),
                serde_json::Value::String(event.event_type.clone()),
            );
            map.insert(
                "timestamp".to_string(),
                serde_json::Value::String(timestamp),
            );
            serde_json::Value::Object(map)
        } else {
            serde_json::json!({
                "type": event.event_type,
                "timestamp": timestamp,
                "data": event.payload,
            })
        };

        let Ok(line) = serde_json::to_string(&record) else {
            return;
        };

        if let Ok(mut writer) = self.writer.lock() {
            let _ = writeln!(writer, "{}", line);
            // Flush each line; the transcript doubles as a crash log
            let _ = writer.flush();
        }
    }
}

impl Drop for JsonlTranscriptLogger {
    fn drop(&mut self) {
        if let Ok(mut writer) = self.writer.lock() {
            let _ = writer.flush();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Read;

    #[test]
    fn test_writes_valid_jsonl_with_type_and_timestamp() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("run.transcript.jsonl");
        let logger = JsonlTranscriptLogger::new(&path).unwrap();

        logger.log(TranscriptEvent::new(
            "message",
            serde_json::json!({"circle": "c1", "body": "hello"}),
        ));
        logger.log(TranscriptEvent::new(
            "run_completed",
            serde_json::json!({"completed": 2, "failed": 0}),
        ));

        drop(logger);

        let mut content = String::new();
        File::open(&path)
            .unwrap()
            .read_to_string(&mut content)
            .unwrap();

        let lines: Vec<&str> = content.trim().lines().collect();
        assert_eq!(lines.len(), 2);
        for line in &lines {
            let value: serde_json::Value = serde_json::from_str(line).unwrap();
            assert!(value.get("type").is_some());
            assert!(value.get("timestamp").is_some());
        }

        let first: serde_json::Value = serde_json::from_str(lines[0]).unwrap();
        assert_eq!(first["type"], "message");
        assert_eq!(first["circle"], "c1");
    }

    #[test]
    fn test_non_object_payload_is_wrapped() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("wrapped.jsonl");
        let logger = JsonlTranscriptLogger::new(&path).unwrap();

        logger.log(TranscriptEvent::new(
            "note",
            serde_json::json!("just a string"),
        ));
        drop(logger);

        let content = std::fs::read_to_string(&path).unwrap();
        let value: serde_json::Value = serde_json::from_str(content.trim()).unwrap();
        assert_eq!(value["type"], "note");
        assert_eq!(value["data"], "just a string");
    }

    #[test]
    fn test_creates_parent_directories() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("deep").join("run.jsonl");
        let logger = JsonlTranscriptLogger::new(&path);
        assert!(logger.is_some());
        assert!(path.parent().unwrap().exists());
    }
}
