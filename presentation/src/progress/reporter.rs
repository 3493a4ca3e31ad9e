//! Progress reporting for analysis runs

use colored::Colorize;
use indicatif::{MultiProgress, ProgressBar, ProgressStyle};
use std::sync::Mutex;
use tag_quorum_application::ports::progress::{AnalysisPhase, ProgressNotifier};

/// Reports progress during an analysis run with progress bars
pub struct ProgressReporter {
    multi: MultiProgress,
    phase_bar: Mutex<Option<ProgressBar>>,
}

impl ProgressReporter {
    pub fn new() -> Self {
        Self {
            multi: MultiProgress::new(),
            phase_bar: Mutex::new(None),
        }
    }

    fn phase_style() -> ProgressStyle {
        ProgressStyle::default_bar()
            .template("{spinner:.green} {prefix:.bold.cyan} [{bar:40.cyan/blue}] {pos}/{len} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("=>-")
    }

    fn phase_display_name(phase: &AnalysisPhase) -> &'static str {
        match phase {
            AnalysisPhase::Evaluation => "Evaluating tags",
            AnalysisPhase::Moderation => "Moderating",
            AnalysisPhase::Reconciliation => "Reconciling scores",
        }
    }

    fn phase_short_name(phase: &AnalysisPhase) -> &'static str {
        match phase {
            AnalysisPhase::Evaluation => "Evaluation",
            AnalysisPhase::Moderation => "Moderation",
            AnalysisPhase::Reconciliation => "Consensus",
        }
    }
}

impl Default for ProgressReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgressNotifier for ProgressReporter {
    fn on_phase_start(&self, phase: &AnalysisPhase, total_tasks: usize) {
        let pb = self.multi.add(ProgressBar::new(total_tasks as u64));
        pb.set_style(Self::phase_style());
        pb.set_prefix(Self::phase_display_name(phase));
        pb.set_message("Starting...");

        if let Ok(mut slot) = self.phase_bar.lock() {
            *slot = Some(pb);
        }
    }

    fn on_task_complete(&self, _phase: &AnalysisPhase, evaluator: &str, success: bool) {
        if let Ok(slot) = self.phase_bar.lock()
            && let Some(pb) = slot.as_ref()
        {
            let status = if success {
                format!("{} {}", "v".green(), evaluator)
            } else {
                format!("{} {} (degraded)", "x".red(), evaluator)
            };
            pb.set_message(status);
            pb.inc(1);
        }
    }

    fn on_phase_complete(&self, phase: &AnalysisPhase) {
        if let Ok(mut slot) = self.phase_bar.lock()
            && let Some(pb) = slot.take()
        {
            pb.finish_with_message(format!("{} complete!", Self::phase_short_name(phase).green()));
        }
    }
}

/// Simple text-based progress on stderr (no progress bars)
pub struct SimpleProgress;

impl ProgressNotifier for SimpleProgress {
    fn on_phase_start(&self, phase: &AnalysisPhase, total_tasks: usize) {
        eprintln!(
            "{} {} ({} tasks)",
            "->".cyan(),
            ProgressReporter::phase_display_name(phase).bold(),
            total_tasks
        );
    }

    fn on_task_complete(&self, _phase: &AnalysisPhase, evaluator: &str, success: bool) {
        if success {
            eprintln!("  {} {}", "v".green(), evaluator);
        } else {
            eprintln!("  {} {} (degraded)", "x".red(), evaluator);
        }
    }

    fn on_phase_complete(&self, _phase: &AnalysisPhase) {}
}
