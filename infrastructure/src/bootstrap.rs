//! Engine bootstrap
//!
//! Resolves the engine mode once per process and wires the evaluator set,
//! moderator and trace logger into an [`AnalyzeTagsUseCase`]. A delegated
//! request that cannot be honoured degrades to heuristic mode here, so a
//! running process never switches modes between requests.

use crate::config::FileConfig;
use crate::logging::JsonlAnalysisLogger;
use std::sync::Arc;
use tag_quorum_application::{
    AnalysisParams, AnalyzeTagsUseCase, ConsensusModerator, Evaluator, HeuristicEvaluator,
};
use tag_quorum_domain::{EngineMode, HeuristicProfile};
use tracing::{info, warn};

/// Evaluators plus the optional moderator for one engine mode
type EvaluatorSet = (Vec<Arc<dyn Evaluator>>, Option<Arc<dyn ConsensusModerator>>);

/// Result of bootstrapping: the use case and the mode it actually runs in
pub struct EngineSetup {
    pub mode: EngineMode,
    pub use_case: AnalyzeTagsUseCase,
    /// Why a delegated request fell back to heuristic mode
    pub fallback_reason: Option<String>,
}

pub struct EngineBootstrap;

impl EngineBootstrap {
    pub fn resolve(config: &FileConfig) -> EngineSetup {
        let (requested, issues) = config.engine.parse_mode();
        for issue in issues {
            warn!("{}", issue);
        }

        let (mode, (evaluators, moderator), fallback_reason) = match requested {
            EngineMode::Heuristic => (EngineMode::Heuristic, Self::heuristic(config), None),
            EngineMode::Delegated => match Self::delegated(config) {
                Ok(set) => (EngineMode::Delegated, set, None),
                Err(reason) => {
                    warn!(
                        "Delegated mode unavailable ({}), using heuristic evaluators",
                        reason
                    );
                    (EngineMode::Heuristic, Self::heuristic(config), Some(reason))
                }
            },
        };

        let params = AnalysisParams::default()
            .with_default_max_tags(config.engine.max_tags)
            .with_preview_chars(config.engine.preview_len)
            .with_moderated_consensus(config.engine.moderated_consensus)
            .with_moderator_model(config.backend.moderator_model());

        let mut use_case = AnalyzeTagsUseCase::new(evaluators, mode).with_params(params);

        if let Some(moderator) = moderator {
            use_case = use_case.with_moderator(moderator);
        }

        if let Some(path) = config.logging.resolved_trace_file()
            && let Some(logger) = JsonlAnalysisLogger::new(&path)
        {
            info!("Analysis trace: {}", path.display());
            use_case = use_case.with_logger(Arc::new(logger));
        }

        info!(mode = %mode, evaluators = ?use_case.evaluator_ids(), "Engine ready");

        EngineSetup {
            mode,
            use_case,
            fallback_reason,
        }
    }

    /// One heuristic evaluator per configured role; seed + index when seeded
    fn heuristic(config: &FileConfig) -> EvaluatorSet {
        let evaluators = config
            .heuristic_profiles()
            .into_iter()
            .enumerate()
            .map(|(index, profile)| heuristic_evaluator(profile, config.engine.seed, index))
            .collect();
        (evaluators, None)
    }

    #[cfg(feature = "openai")]
    fn delegated(config: &FileConfig) -> Result<EvaluatorSet, String> {
        use crate::providers::openai::{OpenAiGateway, OpenAiSettings};
        use tag_quorum_application::{DelegatedEvaluator, LlmModerator};

        let backend = &config.backend;
        let api_key = backend.resolve_api_key().ok_or_else(|| {
            format!(
                "no API key in backend.api_key or ${}",
                backend.api_key_env
            )
        })?;

        let gateway = OpenAiGateway::new(OpenAiSettings::from_backend(backend, api_key))
            .map_err(|e| e.to_string())?;
        let gateway = Arc::new(gateway);
        let policy = backend.call_policy();
        let model = backend.evaluator_model();

        let evaluators = config
            .heuristic_profiles()
            .into_iter()
            .map(|profile| {
                Arc::new(
                    DelegatedEvaluator::new(Arc::clone(&gateway), profile.role, model.clone())
                        .with_policy(policy),
                ) as Arc<dyn Evaluator>
            })
            .collect();

        let moderator = config.engine.moderated_consensus.then(|| {
            Arc::new(
                LlmModerator::new(Arc::clone(&gateway), backend.moderator_model())
                    .with_policy(policy),
            ) as Arc<dyn ConsensusModerator>
        });

        Ok((evaluators, moderator))
    }

    #[cfg(not(feature = "openai"))]
    fn delegated(_config: &FileConfig) -> Result<EvaluatorSet, String> {
        Err("built without the `openai` feature".to_string())
    }
}

fn heuristic_evaluator(
    profile: HeuristicProfile,
    seed: Option<u64>,
    index: usize,
) -> Arc<dyn Evaluator> {
    match seed {
        Some(seed) => Arc::new(HeuristicEvaluator::with_seed(
            profile,
            seed.wrapping_add(index as u64),
        )),
        None => Arc::new(HeuristicEvaluator::new(profile)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{FileLoggingConfig, FileRoleConfig};
    use tag_quorum_domain::profile_from_plain_tags;

    fn delegated_config_without_key() -> FileConfig {
        let mut config = FileConfig::default();
        config.engine.mode = "delegated".to_string();
        config.backend.api_key = None;
        config.backend.api_key_env = "TAG_QUORUM_TEST_UNSET_KEY_VAR".to_string();
        config
    }

    #[test]
    fn test_default_config_is_heuristic_with_builtin_roles() {
        let setup = EngineBootstrap::resolve(&FileConfig::default());

        assert_eq!(setup.mode, EngineMode::Heuristic);
        assert!(setup.fallback_reason.is_none());
        assert_eq!(
            setup.use_case.evaluator_ids(),
            vec!["analyst", "psychologist", "strategist"]
        );
    }

    #[test]
    fn test_delegated_without_key_falls_back() {
        let setup = EngineBootstrap::resolve(&delegated_config_without_key());

        assert_eq!(setup.mode, EngineMode::Heuristic);
        assert_eq!(setup.use_case.mode(), EngineMode::Heuristic);
        assert!(setup.fallback_reason.is_some());
        assert_eq!(setup.use_case.evaluator_ids().len(), 3);
    }

    #[cfg(feature = "openai")]
    #[test]
    fn test_delegated_with_key() {
        let mut config = delegated_config_without_key();
        config.backend.api_key = Some("sk-test".to_string());
        config.engine.moderated_consensus = true;

        let setup = EngineBootstrap::resolve(&config);

        assert_eq!(setup.mode, EngineMode::Delegated);
        assert!(setup.fallback_reason.is_none());
        assert_eq!(
            setup.use_case.evaluator_ids(),
            vec!["analyst", "psychologist", "strategist"]
        );
    }

    #[test]
    fn test_custom_roles() {
        let config = FileConfig {
            roles: vec![
                FileRoleConfig {
                    role: "analyst".to_string(),
                    ..Default::default()
                },
                FileRoleConfig {
                    role: "curator".to_string(),
                    ..Default::default()
                },
            ],
            ..Default::default()
        };

        let setup = EngineBootstrap::resolve(&config);
        assert_eq!(setup.use_case.evaluator_ids(), vec!["analyst", "curator"]);
    }

    #[tokio::test]
    async fn test_seeded_runs_are_reproducible() {
        let mut config = FileConfig::default();
        config.engine.seed = Some(42);
        let profile = profile_from_plain_tags(&["hiking", "chess", "jazz", "coffee"], "u1");

        let first = EngineBootstrap::resolve(&config)
            .use_case
            .analyze(profile.clone(), 3)
            .await
            .unwrap();
        let second = EngineBootstrap::resolve(&config)
            .use_case
            .analyze(profile, 3)
            .await
            .unwrap();

        assert_eq!(first.selected_tags, second.selected_tags);
        assert_eq!(first.selected_tags.len(), 3);
    }

    #[tokio::test]
    async fn test_trace_file_receives_events() {
        let dir = tempfile::tempdir().unwrap();
        let trace = dir.path().join("trace").join("analysis.jsonl");
        let config = FileConfig {
            logging: FileLoggingConfig {
                trace_file: Some(trace.clone()),
            },
            ..Default::default()
        };

        let setup = EngineBootstrap::resolve(&config);
        setup
            .use_case
            .analyze(profile_from_plain_tags(&["a", "b"], "u1"), 2)
            .await
            .unwrap();
        drop(setup);

        let content = std::fs::read_to_string(&trace).unwrap();
        let types: Vec<String> = content
            .lines()
            .map(|line| {
                let value: serde_json::Value = serde_json::from_str(line).unwrap();
                value["type"].as_str().unwrap().to_string()
            })
            .collect();
        assert_eq!(types.len(), 4);
        assert_eq!(types.last().map(String::as_str), Some("consensus"));
    }
}
