//! Heuristic evaluator: local scoring from a [`HeuristicProfile`].

use super::Evaluator;
use async_trait::async_trait;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::sync::{Mutex, PoisonError};
use tag_quorum_domain::{
    EvaluatorOutput, EvaluatorScore, HeuristicProfile, JitterRange, SubjectProfile,
};
use tracing::debug;

/// Role-flavored local evaluator.
///
/// `score = min(10, relevance * boost + jitter)`, with boost and jitter
/// range chosen by whether the tag's category is in the profile's boost set.
pub struct HeuristicEvaluator {
    profile: HeuristicProfile,
    rng: Mutex<StdRng>,
}

impl HeuristicEvaluator {
    pub fn new(profile: HeuristicProfile) -> Self {
        Self {
            profile,
            rng: Mutex::new(StdRng::from_entropy()),
        }
    }

    /// Evaluator with a reproducible jitter stream
    pub fn with_seed(profile: HeuristicProfile, seed: u64) -> Self {
        Self {
            profile,
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }

    pub fn profile(&self) -> &HeuristicProfile {
        &self.profile
    }

    /// Draw a jitter value; empty or non-finite ranges yield their finite lower bound
    fn sample(&self, range: JitterRange) -> f64 {
        if !range.min.is_finite() || !range.max.is_finite() {
            return if range.min.is_finite() { range.min } else { 0.0 };
        }
        if range.min >= range.max {
            return range.min;
        }
        let mut rng = self.rng.lock().unwrap_or_else(PoisonError::into_inner);
        rng.gen_range(range.min..=range.max)
    }
}

#[async_trait]
impl Evaluator for HeuristicEvaluator {
    fn id(&self) -> &str {
        &self.profile.role
    }

    async fn score(&self, profile: &SubjectProfile) -> EvaluatorOutput {
        let scores: Vec<EvaluatorScore> = profile
            .tags
            .iter()
            .map(|tag| {
                let (_, range) = self.profile.parameters_for(&tag.category);
                let jitter = self.sample(range);
                let score = self
                    .profile
                    .score(tag.relevance_score, &tag.category, jitter);
                EvaluatorScore::new(&tag.tag_id, score)
                    .with_rationale(self.profile.rationale(&tag.name, &tag.category, score))
                    .with_insight(&self.profile.insight)
            })
            .collect();

        debug!(
            evaluator = %self.profile.role,
            scored = scores.len(),
            "Heuristic scoring complete"
        );

        EvaluatorOutput::new(
            &self.profile.role,
            scores,
            &self.profile.overall_assessment,
            &self.profile.description,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tag_quorum_domain::TagRecord;

    fn profile() -> SubjectProfile {
        SubjectProfile::new(
            "u1",
            "Ana",
            vec![
                TagRecord::new("t1", "Runs daily", "behavior", 8.0),
                TagRecord::new("t2", "Collects stamps", "hobby", 4.0),
                TagRecord::new("t3", "Night shopper", "Behavior", 9.8),
            ],
        )
    }

    #[tokio::test]
    async fn test_scores_every_tag_in_order() {
        let evaluator = HeuristicEvaluator::with_seed(HeuristicProfile::analyst(), 7);
        let output = evaluator.score(&profile()).await;

        assert_eq!(output.evaluator, "analyst");
        assert!(!output.is_degraded());
        let ids: Vec<_> = output.scores.iter().map(|s| s.tag_id.as_str()).collect();
        assert_eq!(ids, vec!["t1", "t2", "t3"]);
        assert_eq!(
            output.raw_response,
            HeuristicProfile::analyst().description
        );
    }

    #[tokio::test]
    async fn test_scores_stay_in_expected_ranges() {
        let evaluator = HeuristicEvaluator::with_seed(HeuristicProfile::analyst(), 42);
        let output = evaluator.score(&profile()).await;

        // behavior: 8.0 * 1.2 + [0.5, 1.5] = [10.1, 11.1] -> capped
        assert_eq!(output.score_for("t1").unwrap().score, 10.0);
        // hobby: 4.0 + [0, 1]
        let hobby = output.score_for("t2").unwrap().score;
        assert!((4.0..=5.0).contains(&hobby));
        // category match ignores case
        assert_eq!(output.score_for("t3").unwrap().score, 10.0);
    }

    #[tokio::test]
    async fn test_non_finite_jitter_does_not_panic() {
        let mut custom = HeuristicProfile::custom("curator");
        custom.default_jitter = JitterRange::new(0.0, f64::INFINITY);
        let evaluator = HeuristicEvaluator::with_seed(custom, 3);

        let output = evaluator.score(&profile()).await;

        assert!(!output.is_degraded());
        assert_eq!(output.score_for("t2").unwrap().score, 4.0);

        let mut nan = HeuristicProfile::custom("curator");
        nan.default_jitter = JitterRange::new(0.0, f64::NAN);
        let output = HeuristicEvaluator::with_seed(nan, 3).score(&profile()).await;
        assert_eq!(output.score_for("t2").unwrap().score, 4.0);
    }

    #[tokio::test]
    async fn test_same_seed_reproduces_scores() {
        let a = HeuristicEvaluator::with_seed(HeuristicProfile::strategist(), 99);
        let b = HeuristicEvaluator::with_seed(HeuristicProfile::strategist(), 99);

        assert_eq!(a.score(&profile()).await, b.score(&profile()).await);
    }

    #[tokio::test]
    async fn test_low_prior_may_go_negative() {
        let mut psych = HeuristicProfile::psychologist();
        psych.default_jitter = JitterRange::fixed(-0.5);
        let evaluator = HeuristicEvaluator::new(psych);
        let subject = SubjectProfile::new(
            "u2",
            "Bo",
            vec![TagRecord::new("t1", "Quiet", "hobby", 0.1)],
        );

        let output = evaluator.score(&subject).await;
        assert_eq!(output.scores[0].score, -0.4);
    }

    #[tokio::test]
    async fn test_rationale_and_insight_filled() {
        let evaluator = HeuristicEvaluator::with_seed(HeuristicProfile::psychologist(), 1);
        let output = evaluator.score(&profile()).await;
        let first = &output.scores[0];

        assert!(first.rationale.contains("Runs daily"));
        assert_eq!(first.insight, HeuristicProfile::psychologist().insight);
        assert_eq!(
            output.overall_assessment,
            HeuristicProfile::psychologist().overall_assessment
        );
    }
}
