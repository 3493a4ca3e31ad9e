//! Port for structured analysis tracing.
//!
//! Defines the [`AnalysisLogger`] trait for recording what happened during a
//! run (every evaluator output, the final ranking, fallbacks) to a structured
//! log.
//!
//! This is separate from `tracing`-based operation logs: tracing handles
//! human-readable diagnostic messages, while this port captures the full
//! evaluator transcript in a machine-readable format (JSONL).

use serde_json::{Value, json};
use tag_quorum_domain::{ConsensusRanking, EvaluatorOutput};

/// A structured analysis event for logging.
///
/// Each event has a type string and a JSON payload containing
/// event-specific fields. The timestamp is added by the writer.
#[derive(Debug, Clone)]
pub struct AnalysisEvent {
    /// Event type identifier ("evaluator_output", "consensus", "fallback").
    pub event_type: &'static str,
    /// JSON payload with event-specific data.
    pub payload: Value,
}

impl AnalysisEvent {
    pub fn new(event_type: &'static str, payload: Value) -> Self {
        Self {
            event_type,
            payload,
        }
    }

    /// One evaluator's complete output, raw reply included
    pub fn evaluator_output(subject_id: &str, output: &EvaluatorOutput) -> Self {
        Self::new(
            "evaluator_output",
            json!({
                "subject_id": subject_id,
                "evaluator": output.evaluator,
                "scores": output.scores,
                "overall_assessment": output.overall_assessment,
                "raw_response": output.raw_response,
                "degraded": output.degraded,
            }),
        )
    }

    /// The ranking that was handed to the assembler
    pub fn consensus(subject_id: &str, ranking: &ConsensusRanking) -> Self {
        Self::new(
            "consensus",
            json!({
                "subject_id": subject_id,
                "source": ranking.source,
                "summary": ranking.summary,
                "entries": ranking.entries,
            }),
        )
    }

    /// Consensus could not be reached and a substitute was used
    pub fn fallback(subject_id: &str, reason: &str) -> Self {
        Self::new(
            "fallback",
            json!({
                "subject_id": subject_id,
                "reason": reason,
            }),
        )
    }
}

/// Port for logging analysis events to a structured log.
///
/// Implementations write each event as a single record (e.g., one JSONL line).
/// The `log` method is synchronous and non-fallible; write failures are
/// dropped so they never affect the run.
pub trait AnalysisLogger: Send + Sync {
    /// Record an analysis event.
    fn log(&self, event: AnalysisEvent);
}

/// No-op implementation for tests and when tracing is disabled.
pub struct NoAnalysisLogger;

impl AnalysisLogger for NoAnalysisLogger {
    fn log(&self, _event: AnalysisEvent) {}
}

#[cfg(test)]
mod tests {
    use super::*;
    use tag_quorum_domain::DegradedReason;

    #[test]
    fn test_evaluator_output_event_payload() {
        let output = EvaluatorOutput::degraded("strategist", DegradedReason::Timeout);
        let event = AnalysisEvent::evaluator_output("u1", &output);

        assert_eq!(event.event_type, "evaluator_output");
        assert_eq!(event.payload["evaluator"], "strategist");
        assert_eq!(event.payload["degraded"]["kind"], "timeout");
        assert!(event.payload["scores"].as_array().unwrap().is_empty());
    }

    #[test]
    fn test_fallback_event_payload() {
        let event = AnalysisEvent::fallback("u9", "no evaluator scored a known tag");
        assert_eq!(event.event_type, "fallback");
        assert_eq!(event.payload["subject_id"], "u9");
    }
}
