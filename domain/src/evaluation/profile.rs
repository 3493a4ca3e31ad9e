//! Heuristic evaluator profiles.
//!
//! The analyst, psychologist and strategist evaluators share one scoring rule
//! and differ only in configuration:
//!
//! ```text
//! score = min(10, relevance_score * boost + jitter)
//! ```
//!
//! `boost` and the jitter range depend on whether the tag's category is in
//! the profile's boost set. There is no floor clamp: a negative jitter range
//! can push a low prior below zero and that is left as is.

use serde::{Deserialize, Serialize};

/// Upper bound applied to heuristic scores
pub const MAX_SCORE: f64 = 10.0;

/// Inclusive range a jitter sample is drawn from
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct JitterRange {
    pub min: f64,
    pub max: f64,
}

impl JitterRange {
    /// Create a range; bounds given in the wrong order are swapped.
    pub fn new(a: f64, b: f64) -> Self {
        if a <= b {
            Self { min: a, max: b }
        } else {
            Self { min: b, max: a }
        }
    }

    /// A range that always yields `value`
    pub fn fixed(value: f64) -> Self {
        Self {
            min: value,
            max: value,
        }
    }

    /// Map a unit sample in `[0, 1]` onto this range
    pub fn scale(&self, unit: f64) -> f64 {
        self.min + (self.max - self.min) * unit.clamp(0.0, 1.0)
    }

    pub fn contains(&self, value: f64) -> bool {
        (self.min..=self.max).contains(&value)
    }
}

/// Configuration of one role-flavored heuristic evaluator
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HeuristicProfile {
    /// Evaluator identity, e.g. "analyst"
    pub role: String,
    /// Categories that receive the boost (matched case-insensitively)
    pub boost_categories: Vec<String>,
    pub boost_multiplier: f64,
    /// Jitter for boosted categories
    pub boosted_jitter: JitterRange,
    /// Jitter for every other category
    pub default_jitter: JitterRange,
    /// Rationale template; `{name}`, `{category}` and `{score}` are substituted
    pub rationale_template: String,
    pub insight: String,
    pub overall_assessment: String,
    /// Short self-description kept as the raw response
    pub description: String,
}

impl HeuristicProfile {
    /// Data analyst: favours behavioral and preference signals
    pub fn analyst() -> Self {
        Self {
            role: "analyst".to_string(),
            boost_categories: vec!["behavior".into(), "preference".into(), "data".into()],
            boost_multiplier: 1.2,
            boosted_jitter: JitterRange::new(0.5, 1.5),
            default_jitter: JitterRange::new(0.0, 1.0),
            rationale_template:
                "Data relevance analysis rates this tag {score} within the {category} category"
                    .to_string(),
            insight: "From a data-driven angle this tag adds real value to the profile"
                .to_string(),
            overall_assessment: "From a data perspective the tag set is fairly complete"
                .to_string(),
            description: "Data analyst: tag importance assessed with statistical and data-mining methods"
                .to_string(),
        }
    }

    /// Psychologist: favours personality and emotional signals
    pub fn psychologist() -> Self {
        Self {
            role: "psychologist".to_string(),
            boost_categories: vec![
                "psychology".into(),
                "personality".into(),
                "emotion".into(),
                "behavior".into(),
            ],
            boost_multiplier: 1.3,
            boosted_jitter: JitterRange::new(0.5, 2.0),
            default_jitter: JitterRange::new(-0.5, 1.0),
            rationale_template:
                "From a psychological angle, {name} reflects the subject's {category} traits"
                    .to_string(),
            insight: "This tag helps explain the subject's underlying motivations".to_string(),
            overall_assessment: "The psychological tags form a representative picture"
                .to_string(),
            description: "Psychologist: tags weighed by their behavioral and psychological value"
                .to_string(),
        }
    }

    /// Strategist: favours commercially actionable signals
    pub fn strategist() -> Self {
        Self {
            role: "strategist".to_string(),
            boost_categories: vec![
                "consumption".into(),
                "preference".into(),
                "behavior".into(),
                "interest".into(),
            ],
            boost_multiplier: 1.1,
            boosted_jitter: JitterRange::new(1.0, 2.0),
            default_jitter: JitterRange::new(0.0, 1.5),
            rationale_template:
                "From a business strategy angle, {name} has an application value of {score}"
                    .to_string(),
            insight: "This tag is practical for targeted marketing and user operations"
                .to_string(),
            overall_assessment: "The tag set shows good commercial potential".to_string(),
            description: "Strategist: tags weighed by business applicability".to_string(),
        }
    }

    /// Neutral profile for a role with no built-in flavor
    pub fn custom(role: impl Into<String>) -> Self {
        let role = role.into();
        Self {
            description: format!("{}: tags weighed by their original relevance", role),
            role,
            boost_categories: Vec::new(),
            boost_multiplier: 1.0,
            boosted_jitter: JitterRange::new(0.0, 1.0),
            default_jitter: JitterRange::new(0.0, 1.0),
            rationale_template: "{name} ({category}) rated {score}".to_string(),
            insight: "No role-specific insight".to_string(),
            overall_assessment: "Tags rated by relevance".to_string(),
        }
    }

    /// The three built-in profiles, in their canonical order
    pub fn builtin() -> Vec<Self> {
        vec![Self::analyst(), Self::psychologist(), Self::strategist()]
    }

    /// Look up a built-in profile by role name
    pub fn builtin_by_role(role: &str) -> Option<Self> {
        match role.to_lowercase().as_str() {
            "analyst" => Some(Self::analyst()),
            "psychologist" => Some(Self::psychologist()),
            "strategist" => Some(Self::strategist()),
            _ => None,
        }
    }

    /// Whether `category` falls in this profile's boost set
    pub fn is_boosted(&self, category: &str) -> bool {
        self.boost_categories
            .iter()
            .any(|c| c.eq_ignore_ascii_case(category.trim()))
    }

    /// Multiplier and jitter range that apply to `category`
    pub fn parameters_for(&self, category: &str) -> (f64, JitterRange) {
        if self.is_boosted(category) {
            (self.boost_multiplier, self.boosted_jitter)
        } else {
            (1.0, self.default_jitter)
        }
    }

    /// Apply the scoring rule for a given jitter sample.
    ///
    /// The result is capped at [`MAX_SCORE`] and rounded to one decimal.
    pub fn score(&self, relevance: f64, category: &str, jitter: f64) -> f64 {
        let (boost, _) = self.parameters_for(category);
        let raw = (relevance * boost + jitter).min(MAX_SCORE);
        (raw * 10.0).round() / 10.0
    }

    /// Render the rationale for one tag
    pub fn rationale(&self, name: &str, category: &str, score: f64) -> String {
        self.rationale_template
            .replace("{name}", name)
            .replace("{category}", category)
            .replace("{score}", &format!("{:.1}", score))
    }
}
