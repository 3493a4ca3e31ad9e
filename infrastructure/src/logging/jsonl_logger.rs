//! JSONL file writer for analysis trace events.
//!
//! Each [`AnalysisEvent`] is serialized as a single JSON line with a
//! `type` field and `timestamp`, appended to the file via a buffered writer.

use serde_json::{Map, Value, json};
use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tag_quorum_application::ports::analysis_logger::{AnalysisEvent, AnalysisLogger};
use tracing::warn;

/// JSONL analysis logger that appends one JSON object per line.
///
/// Thread-safe via `Mutex<BufWriter<File>>`. Flushes on `Drop`.
pub struct JsonlAnalysisLogger {
    writer: Mutex<BufWriter<File>>,
    path: PathBuf,
}

impl JsonlAnalysisLogger {
    /// Open (or create) the trace file at `path` for appending.
    ///
    /// Parent directories are created as needed. Returns `None` if the file
    /// cannot be opened; the run then continues without a trace.
    pub fn new(path: impl AsRef<Path>) -> Option<Self> {
        let path = path.as_ref();

        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
            && let Err(e) = std::fs::create_dir_all(parent)
        {
            warn!(
                "Could not create trace directory {}: {}",
                parent.display(),
                e
            );
            return None;
        }

        let file = match OpenOptions::new().create(true).append(true).open(path) {
            Ok(f) => f,
            Err(e) => {
                warn!("Could not open trace file {}: {}", path.display(), e);
                return None;
            }
        };

        Some(Self {
            writer: Mutex::new(BufWriter::new(file)),
            path: path.to_path_buf(),
        })
    }

    /// Get the path to the trace file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn record(event: AnalysisEvent) -> Value {
        let timestamp = chrono::Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Millis, true);

        match event.payload {
            Value::Object(payload) => {
                let mut map = Map::with_capacity(payload.len() + 2);
                map.insert("type".to_string(), Value::from(event.event_type));
                map.insert("timestamp".to_string(), Value::String(timestamp));
                map.extend(payload);
                Value::Object(map)
            }
            other => json!({
                "type": event.event_type,
                "timestamp": timestamp,
                "data": other,
            }),
        }
    }
}

impl AnalysisLogger for JsonlAnalysisLogger {
    fn log(&self, event: AnalysisEvent) {
        let Ok(line) = serde_json::to_string(&Self::record(event)) else {
            return;
        };

        if let Ok(mut writer) = self.writer.lock() {
            let _ = writeln!(writer, "{}", line);
            let _ = writer.flush();
        }
    }
}

impl Drop for JsonlAnalysisLogger {
    fn drop(&mut self) {
        if let Ok(mut writer) = self.writer.lock() {
            let _ = writer.flush();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tag_quorum_domain::{
        ConsensusReconciler, DegradedReason, EvaluatorOutput, EvaluatorScore,
        profile_from_plain_tags,
    };

    fn read_lines(path: &Path) -> Vec<Value> {
        std::fs::read_to_string(path)
            .unwrap()
            .lines()
            .map(|l| serde_json::from_str(l).unwrap())
            .collect()
    }

    #[test]
    fn test_writes_one_record_per_event() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("trace").join("run.jsonl");
        let logger = JsonlAnalysisLogger::new(&path).unwrap();

        let profile = profile_from_plain_tags(&["a", "b"], "u1");
        let output = EvaluatorOutput::new(
            "analyst",
            vec![EvaluatorScore::new("tag_001", 7.5)],
            "ok",
            "raw reply",
        );
        let ranking = ConsensusReconciler::reconcile(&[output.clone()], &profile, 5);

        logger.log(AnalysisEvent::evaluator_output("u1", &output));
        logger.log(AnalysisEvent::consensus("u1", &ranking));
        drop(logger);

        let lines = read_lines(&path);
        assert_eq!(lines.len(), 2);
        for line in &lines {
            assert!(line.get("timestamp").is_some());
            assert_eq!(line["subject_id"], "u1");
        }
        assert_eq!(lines[0]["type"], "evaluator_output");
        assert_eq!(lines[0]["raw_response"], "raw reply");
        assert_eq!(lines[0]["scores"][0]["score"], 7.5);
        assert_eq!(lines[1]["type"], "consensus");
        assert_eq!(lines[1]["source"], "evaluators");
        assert_eq!(lines[1]["entries"][0]["tag_id"], "tag_001");
    }

    #[test]
    fn test_appends_across_loggers() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("run.jsonl");

        let first = JsonlAnalysisLogger::new(&path).unwrap();
        first.log(AnalysisEvent::fallback("u1", "nothing scored"));
        drop(first);

        let second = JsonlAnalysisLogger::new(&path).unwrap();
        second.log(AnalysisEvent::evaluator_output(
            "u2",
            &EvaluatorOutput::degraded("strategist", DegradedReason::Timeout),
        ));
        drop(second);

        let lines = read_lines(&path);
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0]["type"], "fallback");
        assert_eq!(lines[1]["degraded"]["kind"], "timeout");
    }

    #[test]
    fn test_non_object_payload_is_wrapped() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("plain.jsonl");
        let logger = JsonlAnalysisLogger::new(&path).unwrap();

        logger.log(AnalysisEvent::new("fallback", json!("just a string")));
        drop(logger);

        let lines = read_lines(&path);
        assert_eq!(lines[0]["type"], "fallback");
        assert_eq!(lines[0]["data"], "just a string");
    }

    #[test]
    fn test_unopenable_path_returns_none() {
        let dir = tempfile::tempdir().unwrap();
        // A directory cannot be opened as a file
        assert!(JsonlAnalysisLogger::new(dir.path()).is_none());
    }
}
