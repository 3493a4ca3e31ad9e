//! Moderated consensus: a backend session picks the final ranking.

use crate::config::CallPolicy;
use crate::ports::llm_gateway::LlmGateway;
use crate::use_cases::shared::ask_backend;
use async_trait::async_trait;
use std::sync::Arc;
use tag_quorum_domain::{
    ConsensusRanking, EvaluatorOutput, Model, ModeratorPayload, PayloadOutcome, PromptTemplate,
    SubjectProfile, parse_structured_reply, ranking_from_moderator,
};
use tracing::{info, warn};

/// Refines evaluator outputs into a ranking.
///
/// `None` means "no usable selection"; the caller keeps the numeric
/// reconciliation in that case.
#[async_trait]
pub trait ConsensusModerator: Send + Sync {
    async fn moderate(
        &self,
        profile: &SubjectProfile,
        outputs: &[EvaluatorOutput],
        max_tags: usize,
    ) -> Option<ConsensusRanking>;
}

/// Moderator backed by the text-generation backend
pub struct LlmModerator<G: LlmGateway + 'static> {
    gateway: Arc<G>,
    model: Model,
    policy: CallPolicy,
}

impl<G: LlmGateway + 'static> LlmModerator<G> {
    pub fn new(gateway: Arc<G>, model: Model) -> Self {
        Self {
            gateway,
            model,
            policy: CallPolicy::default(),
        }
    }

    pub fn with_policy(mut self, policy: CallPolicy) -> Self {
        self.policy = policy;
        self
    }
}

#[async_trait]
impl<G: LlmGateway + 'static> ConsensusModerator for LlmModerator<G> {
    async fn moderate(
        &self,
        profile: &SubjectProfile,
        outputs: &[EvaluatorOutput],
        max_tags: usize,
    ) -> Option<ConsensusRanking> {
        let prompt = PromptTemplate::consensus_prompt(outputs, max_tags);

        let reply = match ask_backend(
            self.gateway.as_ref(),
            &self.model,
            PromptTemplate::moderator_system(),
            &prompt,
            &self.policy,
            "moderator",
        )
        .await
        {
            Ok(reply) => reply,
            Err(reason) => {
                warn!("Moderator unavailable: {}", reason);
                return None;
            }
        };

        match parse_structured_reply::<ModeratorPayload>(&reply) {
            PayloadOutcome::Parsed { payload, .. } => {
                let ranking = ranking_from_moderator(payload, profile, max_tags);
                if let Some(ranking) = &ranking {
                    info!(selected = ranking.len(), "Moderator selected tags");
                }
                ranking
            }
            PayloadOutcome::Degraded { reason } => {
                warn!("Moderator reply unusable: {}", reason);
                None
            }
        }
    }
}
