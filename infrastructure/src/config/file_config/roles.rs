//! Evaluator role overrides from TOML (`[[roles]]` array)

use serde::{Deserialize, Serialize};
use tag_quorum_domain::{ConfigIssue, ConfigIssueCode, HeuristicProfile, JitterRange};

/// One evaluator role.
///
/// A role named after a built-in profile (analyst, psychologist, strategist)
/// starts from that profile; any other name starts from a neutral profile.
/// Every field given here replaces the starting value.
///
/// ```toml
/// [[roles]]
/// role = "analyst"
/// boost_multiplier = 1.5
///
/// [[roles]]
/// role = "curator"
/// boost_categories = ["interest", "hobby"]
/// boosted_jitter = [0.0, 2.0]
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileRoleConfig {
    pub role: String,
    pub boost_categories: Option<Vec<String>>,
    pub boost_multiplier: Option<f64>,
    pub boosted_jitter: Option<[f64; 2]>,
    pub default_jitter: Option<[f64; 2]>,
}

impl FileRoleConfig {
    pub fn to_profile(&self) -> HeuristicProfile {
        let role = self.role.trim();
        let mut profile = HeuristicProfile::builtin_by_role(role)
            .unwrap_or_else(|| HeuristicProfile::custom(role));

        if let Some(categories) = &self.boost_categories {
            profile.boost_categories = categories.clone();
        }
        if let Some(multiplier) = self.boost_multiplier {
            profile.boost_multiplier = multiplier;
        }
        if let Some([a, b]) = self.boosted_jitter {
            profile.boosted_jitter = JitterRange::new(a, b);
        }
        if let Some([a, b]) = self.default_jitter {
            profile.default_jitter = JitterRange::new(a, b);
        }

        profile
    }

    pub fn validate(&self, index: usize) -> Vec<ConfigIssue> {
        let mut issues = Vec::new();

        if self.role.trim().is_empty() {
            issues.push(ConfigIssue::error(
                ConfigIssueCode::EmptyValue {
                    field: format!("roles[{}].role", index),
                },
                format!("roles[{}].role: role name cannot be empty", index),
            ));
        }

        if let Some(multiplier) = self.boost_multiplier
            && (!multiplier.is_finite() || multiplier <= 0.0)
        {
            issues.push(ConfigIssue::warning(
                ConfigIssueCode::OutOfRange {
                    field: format!("roles[{}].boost_multiplier", index),
                },
                format!(
                    "roles[{}].boost_multiplier {} should be a positive number",
                    index, multiplier
                ),
            ));
        }

        for (name, jitter) in [
            ("boosted_jitter", self.boosted_jitter),
            ("default_jitter", self.default_jitter),
        ] {
            if let Some(bounds) = jitter
                && bounds.iter().any(|b| !b.is_finite())
            {
                issues.push(ConfigIssue::error(
                    ConfigIssueCode::OutOfRange {
                        field: format!("roles[{}].{}", index, name),
                    },
                    format!(
                        "roles[{}].{} [{}, {}] must hold two finite numbers",
                        index, name, bounds[0], bounds[1]
                    ),
                ));
            }
        }

        issues
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_override_builtin_role() {
        let config = FileRoleConfig {
            role: "Analyst".to_string(),
            boost_multiplier: Some(1.5),
            ..Default::default()
        };
        let profile = config.to_profile();
        assert_eq!(profile.role, "analyst");
        assert_eq!(profile.boost_multiplier, 1.5);
        assert_eq!(profile.boosted_jitter, JitterRange::new(0.5, 1.5));
    }

    #[test]
    fn test_custom_role() {
        let config = FileRoleConfig {
            role: "curator".to_string(),
            boost_categories: Some(vec!["hobby".to_string()]),
            boosted_jitter: Some([2.0, 0.0]),
            ..Default::default()
        };
        let profile = config.to_profile();
        assert_eq!(profile.role, "curator");
        assert!(profile.is_boosted("hobby"));
        assert_eq!(profile.boosted_jitter, JitterRange::new(0.0, 2.0));
    }

    #[test]
    fn test_validate_empty_role() {
        let issues = FileRoleConfig::default().validate(2);
        assert_eq!(issues.len(), 1);
        assert!(issues[0].message.contains("roles[2]"));
    }

    #[test]
    fn test_validate_non_finite_jitter() {
        let config = FileRoleConfig {
            role: "analyst".to_string(),
            boosted_jitter: Some([f64::NAN, 1.0]),
            default_jitter: Some([0.0, f64::INFINITY]),
            ..Default::default()
        };
        let issues = config.validate(0);
        assert_eq!(issues.len(), 2);
        assert!(issues.iter().all(ConfigIssue::is_error));
        assert!(issues[1].message.contains("roles[0].default_jitter"));
    }
}
