//! Output format value object

use serde::{Deserialize, Serialize};
use std::fmt;

/// How an analysis result is rendered
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Ranking, summary and the discussion trail (default)
    #[default]
    Full,
    /// Only the ranked tags
    Ranking,
    /// The complete result as JSON
    Json,
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputFormat::Full => write!(f, "full"),
            OutputFormat::Ranking => write!(f, "ranking"),
            OutputFormat::Json => write!(f, "json"),
        }
    }
}
