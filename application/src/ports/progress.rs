//! Progress notification port
//!
//! Defines the interface for reporting progress during an analysis run.

use std::fmt;

/// Stages of one analysis run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnalysisPhase {
    /// Evaluators score the tags concurrently
    Evaluation,
    /// A moderator reconciles the evaluator outputs
    Moderation,
    /// Numeric reconciliation and result assembly
    Reconciliation,
}

impl AnalysisPhase {
    pub fn as_str(&self) -> &'static str {
        match self {
            AnalysisPhase::Evaluation => "evaluation",
            AnalysisPhase::Moderation => "moderation",
            AnalysisPhase::Reconciliation => "reconciliation",
        }
    }
}

impl fmt::Display for AnalysisPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Callback for progress updates during an analysis run
///
/// Implementations live in the presentation layer and can display
/// progress in various ways (progress bars, plain lines, etc.)
pub trait ProgressNotifier: Send + Sync {
    /// Called when a phase starts
    fn on_phase_start(&self, phase: &AnalysisPhase, total_tasks: usize);

    /// Called when one evaluator (or the moderator) finishes
    fn on_task_complete(&self, phase: &AnalysisPhase, evaluator: &str, success: bool);

    /// Called when a phase completes
    fn on_phase_complete(&self, phase: &AnalysisPhase);
}

/// No-op progress notifier for when progress reporting is not needed
pub struct NoProgress;

impl ProgressNotifier for NoProgress {
    fn on_phase_start(&self, _phase: &AnalysisPhase, _total_tasks: usize) {}
    fn on_task_complete(&self, _phase: &AnalysisPhase, _evaluator: &str, _success: bool) {}
    fn on_phase_complete(&self, _phase: &AnalysisPhase) {}
}
