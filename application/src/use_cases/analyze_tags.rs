//! Analyze Tags use case
//!
//! Orchestrates one analysis run: evaluator fan-out, consensus, assembly.

use crate::config::AnalysisParams;
use crate::evaluators::{ConsensusModerator, Evaluator};
use crate::ports::analysis_logger::{AnalysisEvent, AnalysisLogger, NoAnalysisLogger};
use crate::ports::progress::{AnalysisPhase, NoProgress, ProgressNotifier};
use std::sync::Arc;
use tag_quorum_domain::{
    AnalysisResult, ConsensusRanking, ConsensusReconciler, DegradedReason, DomainError,
    EngineMode, EvaluatorOutput, ResultAssembler, SubjectProfile,
};
use thiserror::Error;
use tokio::task::JoinSet;
use tracing::{debug, info, warn};

/// Errors that can occur during an analysis run
#[derive(Error, Debug)]
pub enum AnalyzeTagsError {
    #[error("Invalid input: {0}")]
    InvalidInput(#[from] DomainError),

    #[error("No evaluators configured")]
    NoEvaluators,
}

/// Input for the AnalyzeTags use case
#[derive(Debug, Clone)]
pub struct AnalyzeTagsInput {
    pub profile: SubjectProfile,
    /// Number of tags to return; the configured default when `None`
    pub max_tags: Option<usize>,
}

impl AnalyzeTagsInput {
    pub fn new(profile: SubjectProfile) -> Self {
        Self {
            profile,
            max_tags: None,
        }
    }

    pub fn with_max_tags(mut self, max_tags: usize) -> Self {
        self.max_tags = Some(max_tags);
        self
    }
}

/// Use case for ranking a subject's tags by multi-evaluator consensus
pub struct AnalyzeTagsUseCase {
    evaluators: Vec<Arc<dyn Evaluator>>,
    mode: EngineMode,
    params: AnalysisParams,
    moderator: Option<Arc<dyn ConsensusModerator>>,
    logger: Arc<dyn AnalysisLogger>,
}

impl AnalyzeTagsUseCase {
    pub fn new(evaluators: Vec<Arc<dyn Evaluator>>, mode: EngineMode) -> Self {
        Self {
            evaluators,
            mode,
            params: AnalysisParams::default(),
            moderator: None,
            logger: Arc::new(NoAnalysisLogger),
        }
    }

    pub fn with_params(mut self, params: AnalysisParams) -> Self {
        self.params = params;
        self
    }

    pub fn with_moderator(mut self, moderator: Arc<dyn ConsensusModerator>) -> Self {
        self.moderator = Some(moderator);
        self
    }

    pub fn with_logger(mut self, logger: Arc<dyn AnalysisLogger>) -> Self {
        self.logger = logger;
        self
    }

    pub fn mode(&self) -> EngineMode {
        self.mode
    }

    pub fn evaluator_ids(&self) -> Vec<&str> {
        self.evaluators.iter().map(|e| e.id()).collect()
    }

    /// Rank `profile`'s tags and return at most `max_tags` of them
    pub async fn analyze(
        &self,
        profile: SubjectProfile,
        max_tags: usize,
    ) -> Result<AnalysisResult, AnalyzeTagsError> {
        self.execute(AnalyzeTagsInput::new(profile).with_max_tags(max_tags))
            .await
    }

    /// Execute the use case with default (no-op) progress
    pub async fn execute(
        &self,
        input: AnalyzeTagsInput,
    ) -> Result<AnalysisResult, AnalyzeTagsError> {
        self.execute_with_progress(input, &NoProgress).await
    }

    /// Execute the use case with progress callbacks
    pub async fn execute_with_progress(
        &self,
        input: AnalyzeTagsInput,
        progress: &dyn ProgressNotifier,
    ) -> Result<AnalysisResult, AnalyzeTagsError> {
        let max_tags = input.max_tags.unwrap_or(self.params.default_max_tags);
        input.profile.validate()?;
        if max_tags == 0 {
            return Err(DomainError::InvalidMaxTags(max_tags).into());
        }
        if self.evaluators.is_empty() {
            return Err(AnalyzeTagsError::NoEvaluators);
        }

        info!(
            subject_id = %input.profile.subject_id,
            tags = input.profile.tags.len(),
            evaluators = self.evaluators.len(),
            mode = %self.mode,
            "Starting tag analysis"
        );

        let profile = Arc::new(input.profile);

        // Phase 1: every evaluator scores independently
        let outputs = self.phase_evaluation(&profile, progress).await;
        for output in &outputs {
            self.logger
                .log(AnalysisEvent::evaluator_output(&profile.subject_id, output));
        }

        // Phase 2: moderator (optional) or numeric consensus
        let ranking = self.phase_consensus(&profile, &outputs, max_tags, progress).await;
        if ranking.is_fallback() {
            warn!(
                subject_id = %profile.subject_id,
                "No evaluator produced usable scores, ranking by original relevance"
            );
            self.logger.log(AnalysisEvent::fallback(
                &profile.subject_id,
                "no evaluator scored a known tag",
            ));
        }
        self.logger
            .log(AnalysisEvent::consensus(&profile.subject_id, &ranking));

        let result = ResultAssembler::new(self.params.preview_chars).assemble(
            &profile,
            ranking,
            &outputs,
            self.mode,
            max_tags,
        );

        info!(
            subject_id = %result.subject_id,
            selected = result.selected_tags.len(),
            source = %result.source,
            "Tag analysis complete"
        );

        Ok(result)
    }

    /// Phase 1: run all evaluators concurrently.
    ///
    /// Outputs come back in configuration order. A task that panics is
    /// turned into a degraded output for that evaluator.
    async fn phase_evaluation(
        &self,
        profile: &Arc<SubjectProfile>,
        progress: &dyn ProgressNotifier,
    ) -> Vec<EvaluatorOutput> {
        info!("Phase 1: Evaluation");
        progress.on_phase_start(&AnalysisPhase::Evaluation, self.evaluators.len());

        let mut join_set = JoinSet::new();

        for (index, evaluator) in self.evaluators.iter().enumerate() {
            let evaluator = Arc::clone(evaluator);
            let profile = Arc::clone(profile);

            join_set.spawn(async move {
                let output = evaluator.score(&profile).await;
                (index, output)
            });
        }

        let mut slots: Vec<Option<EvaluatorOutput>> = vec![None; self.evaluators.len()];
        let mut join_failure = None;

        while let Some(result) = join_set.join_next().await {
            match result {
                Ok((index, output)) => {
                    let success = !output.is_degraded();
                    debug!(
                        evaluator = %output.evaluator,
                        scored = output.scores.len(),
                        success,
                        "Evaluator finished"
                    );
                    progress.on_task_complete(
                        &AnalysisPhase::Evaluation,
                        &output.evaluator,
                        success,
                    );
                    slots[index] = Some(output);
                }
                Err(e) => {
                    warn!("Evaluator task join error: {}", e);
                    join_failure = Some(e.to_string());
                }
            }
        }

        let outputs = slots
            .into_iter()
            .zip(&self.evaluators)
            .map(|(slot, evaluator)| {
                slot.unwrap_or_else(|| {
                    let reason = join_failure
                        .clone()
                        .unwrap_or_else(|| "task ended without output".to_string());
                    progress.on_task_complete(&AnalysisPhase::Evaluation, evaluator.id(), false);
                    EvaluatorOutput::degraded(evaluator.id(), DegradedReason::Crashed(reason))
                })
            })
            .collect();

        progress.on_phase_complete(&AnalysisPhase::Evaluation);
        outputs
    }

    /// Phase 2: reconcile outputs into one ranking.
    ///
    /// The moderator only runs in delegated mode when enabled, and only if
    /// at least one evaluator produced something. Its failure falls through
    /// to numeric reconciliation.
    async fn phase_consensus(
        &self,
        profile: &SubjectProfile,
        outputs: &[EvaluatorOutput],
        max_tags: usize,
        progress: &dyn ProgressNotifier,
    ) -> ConsensusRanking {
        if self.params.moderated_consensus
            && self.mode.is_delegated()
            && outputs.iter().any(|o| !o.is_degraded())
            && let Some(moderator) = &self.moderator
        {
            info!("Phase 2: Moderation");
            progress.on_phase_start(&AnalysisPhase::Moderation, 1);
            let moderated = moderator.moderate(profile, outputs, max_tags).await;
            progress.on_task_complete(&AnalysisPhase::Moderation, "moderator", moderated.is_some());
            progress.on_phase_complete(&AnalysisPhase::Moderation);

            match moderated {
                Some(ranking) => return ranking,
                None => warn!("Moderator gave no usable selection, using numeric consensus"),
            }
        }

        info!("Phase 2: Reconciliation");
        progress.on_phase_start(&AnalysisPhase::Reconciliation, 1);
        let ranking = ConsensusReconciler::reconcile(outputs, profile, max_tags);
        progress.on_task_complete(
            &AnalysisPhase::Reconciliation,
            "reconciler",
            !ranking.is_fallback(),
        );
        progress.on_phase_complete(&AnalysisPhase::Reconciliation);
        ranking
    }
}
