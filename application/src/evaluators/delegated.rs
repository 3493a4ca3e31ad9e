//! Delegated evaluator: asks the text-generation backend to score the tags.

use super::Evaluator;
use crate::config::CallPolicy;
use crate::ports::llm_gateway::LlmGateway;
use crate::use_cases::shared::ask_backend;
use async_trait::async_trait;
use std::collections::HashSet;
use std::sync::Arc;
use tag_quorum_domain::{
    AnalysisPayload, DegradedReason, EvaluatorOutput, EvaluatorScore, Model, PayloadOutcome,
    PromptTemplate, SubjectProfile, parse_structured_reply,
};
use tracing::{debug, info, warn};

/// Evaluator whose judgement comes from an external backend.
///
/// The reply has no schema guarantee. It goes through extraction, a strict
/// parse and, if it looks truncated, one repair pass. Whatever happens, the
/// raw reply is kept on the output.
pub struct DelegatedEvaluator<G: LlmGateway + 'static> {
    gateway: Arc<G>,
    role: String,
    model: Model,
    policy: CallPolicy,
}

impl<G: LlmGateway + 'static> DelegatedEvaluator<G> {
    pub fn new(gateway: Arc<G>, role: impl Into<String>, model: Model) -> Self {
        Self {
            gateway,
            role: role.into(),
            model,
            policy: CallPolicy::default(),
        }
    }

    pub fn with_policy(mut self, policy: CallPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn model(&self) -> &Model {
        &self.model
    }

    /// Turn a reply into an output, dropping scores for unknown or repeated tags
    fn interpret(&self, reply: String, profile: &SubjectProfile) -> EvaluatorOutput {
        match parse_structured_reply::<AnalysisPayload>(&reply) {
            PayloadOutcome::Parsed { payload, repaired } => {
                if repaired {
                    info!(evaluator = %self.role, "Recovered truncated reply");
                }

                let mut seen = HashSet::new();
                let scores: Vec<EvaluatorScore> = payload
                    .analysis
                    .into_iter()
                    .filter(|s| {
                        if profile.tag(&s.tag_id).is_none() {
                            debug!(evaluator = %self.role, tag_id = %s.tag_id, "Dropping score for unknown tag");
                            return false;
                        }
                        s.score.is_finite() && seen.insert(s.tag_id.clone())
                    })
                    .collect();

                EvaluatorOutput::new(&self.role, scores, payload.overall_assessment, reply)
            }
            PayloadOutcome::Degraded { reason } => {
                warn!(evaluator = %self.role, "Unusable reply: {}", reason);
                let fallback = AnalysisPayload::parse_failed();
                EvaluatorOutput::new(
                    &self.role,
                    fallback.analysis,
                    fallback.overall_assessment,
                    reply,
                )
                .with_degraded(DegradedReason::MalformedPayload(reason))
            }
        }
    }
}

#[async_trait]
impl<G: LlmGateway + 'static> Evaluator for DelegatedEvaluator<G> {
    fn id(&self) -> &str {
        &self.role
    }

    async fn score(&self, profile: &SubjectProfile) -> EvaluatorOutput {
        let system_prompt = PromptTemplate::evaluator_system(&self.role);
        let prompt = PromptTemplate::analysis_prompt(profile);

        match ask_backend(
            self.gateway.as_ref(),
            &self.model,
            &system_prompt,
            &prompt,
            &self.policy,
            &self.role,
        )
        .await
        {
            Ok(reply) => self.interpret(reply, profile),
            Err(reason) => {
                warn!(evaluator = %self.role, "Evaluator degraded: {}", reason);
                EvaluatorOutput::degraded(&self.role, reason)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::llm_gateway::{GatewayError, LlmSession};
    use std::collections::VecDeque;
    use std::sync::Mutex;
    use std::time::Duration;
    use tag_quorum_domain::evaluation::{FAILURE_ASSESSMENT, PARSE_FAILED_ASSESSMENT};
    use tag_quorum_domain::profile_from_plain_tags;

    // ==================== Test Mocks ====================

    type Replies = Arc<Mutex<VecDeque<Result<String, GatewayError>>>>;

    struct ScriptedSession {
        replies: Replies,
        delay: Option<Duration>,
    }

    #[async_trait]
    impl LlmSession for ScriptedSession {
        async fn send(&self, _content: &str) -> Result<String, GatewayError> {
            if let Some(delay) = self.delay {
                tokio::time::sleep(delay).await;
            }
            self.replies
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or_else(|| Err(GatewayError::Other("No more replies".to_string())))
        }
    }

    struct ScriptedGateway {
        replies: Replies,
        delay: Option<Duration>,
        prompts: Mutex<Vec<String>>,
    }

    impl ScriptedGateway {
        fn new(replies: Vec<Result<String, GatewayError>>) -> Self {
            Self {
                replies: Arc::new(Mutex::new(VecDeque::from(replies))),
                delay: None,
                prompts: Mutex::new(Vec::new()),
            }
        }

        fn slow(mut self, delay: Duration) -> Self {
            self.delay = Some(delay);
            self
        }
    }

    #[async_trait]
    impl LlmGateway for ScriptedGateway {
        async fn create_session_with_system_prompt(
            &self,
            _model: &Model,
            system_prompt: &str,
        ) -> Result<Box<dyn LlmSession>, GatewayError> {
            self.prompts.lock().unwrap().push(system_prompt.to_string());
            Ok(Box::new(ScriptedSession {
                replies: Arc::clone(&self.replies),
                delay: self.delay,
            }))
        }
    }

    fn evaluator(gateway: ScriptedGateway) -> DelegatedEvaluator<ScriptedGateway> {
        DelegatedEvaluator::new(Arc::new(gateway), "analyst", Model::Gpt4oMini)
    }

    // ==================== Tests ====================

    #[tokio::test]
    async fn test_parses_fenced_reply() {
        let reply = r#"Here you go:
```json
{"analysis": [
  {"tag_id": "tag_002", "score": 9, "reasoning": "strong", "professional_insight": "key"},
  {"tag_id": "tag_001", "score": "6.5", "reasoning": "ok"}
], "overall_assessment": "solid"}
```"#;
        let gateway = ScriptedGateway::new(vec![Ok(reply.to_string())]);
        let evaluator = evaluator(gateway);
        let profile = profile_from_plain_tags(&["a", "b"], "u1");

        let output = evaluator.score(&profile).await;

        assert!(!output.is_degraded());
        assert_eq!(output.overall_assessment, "solid");
        assert_eq!(output.score_for("tag_002").unwrap().score, 9.0);
        assert_eq!(output.score_for("tag_002").unwrap().insight, "key");
        assert_eq!(output.score_for("tag_001").unwrap().score, 6.5);
        assert_eq!(output.raw_response, reply);
        assert!(
            evaluator.gateway.prompts.lock().unwrap()[0].contains("data analyst")
        );
    }

    #[tokio::test]
    async fn test_drops_unknown_and_repeated_tags() {
        let reply = r#"{"analysis": [
            {"tag_id": "tag_001", "score": 7},
            {"tag_id": "tag_404", "score": 9},
            {"tag_id": "tag_001", "score": 2}
        ], "overall_assessment": "x"}"#;
        let evaluator = evaluator(ScriptedGateway::new(vec![Ok(reply.to_string())]));
        let profile = profile_from_plain_tags(&["a"], "u1");

        let output = evaluator.score(&profile).await;

        assert_eq!(output.scores.len(), 1);
        assert_eq!(output.scores[0].score, 7.0);
    }

    #[tokio::test]
    async fn test_repairs_truncated_reply() {
        let reply = r#"```json
{"analysis": [
  {"tag_id": "tag_001", "score": 8, "reasoning": "good"},
  {"tag_id": "tag_002", "score": 5, "reasoning": "cut off mid..."#;
        let evaluator = evaluator(ScriptedGateway::new(vec![Ok(reply.to_string())]));
        let profile = profile_from_plain_tags(&["a", "b"], "u1");

        let output = evaluator.score(&profile).await;

        assert!(!output.is_degraded());
        assert_eq!(output.score_for("tag_001").unwrap().score, 8.0);
    }

    #[tokio::test]
    async fn test_keeps_scores_from_reply_cut_after_key() {
        let reply = r#"{"analysis": [{"tag_id": "tag_001", "score": 8}, {"tag_id""#;
        let evaluator = evaluator(ScriptedGateway::new(vec![Ok(reply.to_string())]));
        let profile = profile_from_plain_tags(&["a", "b"], "u1");

        let output = evaluator.score(&profile).await;

        assert!(!output.is_degraded());
        assert_eq!(output.scores.len(), 1);
        assert_eq!(output.score_for("tag_001").unwrap().score, 8.0);
    }

    #[tokio::test]
    async fn test_parses_object_followed_by_prose() {
        let reply = "{\"analysis\": [{\"tag_id\": \"tag_001\", \"score\": 8}], \"overall_assessment\": \"ok\"}\nHope this helps!";
        let evaluator = evaluator(ScriptedGateway::new(vec![Ok(reply.to_string())]));
        let profile = profile_from_plain_tags(&["a"], "u1");

        let output = evaluator.score(&profile).await;

        assert!(!output.is_degraded());
        assert_eq!(output.overall_assessment, "ok");
        assert_eq!(output.score_for("tag_001").unwrap().score, 8.0);
    }

    #[tokio::test]
    async fn test_unparseable_reply_degrades() {
        let evaluator = evaluator(ScriptedGateway::new(vec![Ok(
            "I would rather not answer in JSON".to_string(),
        )]));
        let profile = profile_from_plain_tags(&["a"], "u1");

        let output = evaluator.score(&profile).await;

        assert!(output.scores.is_empty());
        assert_eq!(output.overall_assessment, PARSE_FAILED_ASSESSMENT);
        assert_eq!(output.raw_response, "I would rather not answer in JSON");
        assert!(matches!(
            output.degraded,
            Some(DegradedReason::MalformedPayload(_))
        ));
    }

    #[tokio::test]
    async fn test_gateway_error_is_retried_then_degrades() {
        let gateway = ScriptedGateway::new(vec![
            Err(GatewayError::ConnectionError("refused".to_string())),
            Err(GatewayError::RequestFailed("503".to_string())),
        ]);
        let evaluator = evaluator(gateway);
        let profile = profile_from_plain_tags(&["a"], "u1");

        let output = evaluator.score(&profile).await;

        assert_eq!(output.overall_assessment, FAILURE_ASSESSMENT);
        assert!(output.scores.is_empty());
        assert_eq!(
            output.degraded,
            Some(DegradedReason::Backend("Request failed: 503".to_string()))
        );
        assert_eq!(evaluator.gateway.prompts.lock().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_retry_recovers_from_single_failure() {
        let gateway = ScriptedGateway::new(vec![
            Err(GatewayError::Timeout),
            Ok(r#"{"analysis": [{"tag_id": "tag_001", "score": 4}]}"#.to_string()),
        ]);
        let evaluator = evaluator(gateway);
        let profile = profile_from_plain_tags(&["a"], "u1");

        let output = evaluator.score(&profile).await;

        assert!(!output.is_degraded());
        assert_eq!(output.scores[0].score, 4.0);
    }

    #[tokio::test]
    async fn test_slow_backend_times_out() {
        let gateway = ScriptedGateway::new(vec![Ok("{}".to_string())])
            .slow(Duration::from_millis(500));
        let evaluator = evaluator(gateway).with_policy(CallPolicy {
            timeout: Duration::from_millis(20),
            max_retries: 0,
        });
        let profile = profile_from_plain_tags(&["a"], "u1");

        let output = evaluator.score(&profile).await;

        assert_eq!(output.degraded, Some(DegradedReason::Timeout));
        assert_eq!(output.overall_assessment, FAILURE_ASSESSMENT);
    }
}
