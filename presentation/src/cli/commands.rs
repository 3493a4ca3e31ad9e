//! CLI command definitions

use clap::{Parser, ValueEnum};
use std::path::PathBuf;
use tag_quorum_domain::{EngineMode, OutputFormat};

/// Output format for analysis results
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputArg {
    /// Ranking, summary and the evaluator discussion
    Full,
    /// Only the ranked tags
    Ranking,
    /// The complete result as JSON
    Json,
}

impl From<OutputArg> for OutputFormat {
    fn from(arg: OutputArg) -> Self {
        match arg {
            OutputArg::Full => OutputFormat::Full,
            OutputArg::Ranking => OutputFormat::Ranking,
            OutputArg::Json => OutputFormat::Json,
        }
    }
}

/// Engine mode requested on the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ModeArg {
    /// Local role-based scoring, no network calls
    Heuristic,
    /// Scoring by an OpenAI-compatible backend
    Delegated,
}

impl From<ModeArg> for EngineMode {
    fn from(arg: ModeArg) -> Self {
        match arg {
            ModeArg::Heuristic => EngineMode::Heuristic,
            ModeArg::Delegated => EngineMode::Delegated,
        }
    }
}

/// CLI arguments for tag-quorum
#[derive(Parser, Debug)]
#[command(name = "tag-quorum")]
#[command(author, version, about = "Tag Quorum - Several evaluators rank a subject's tags by consensus")]
#[command(long_about = r#"
Tag Quorum asks several independent evaluators (analyst, psychologist,
strategist) to score every tag of a subject, then reconciles their scores
into one ranked list with an agreement metric.

The process has two phases:
1. Evaluation: every evaluator scores the tags independently
2. Consensus: scores are averaged per tag (or, with --moderated in delegated
   mode, a moderator picks the final selection)

Configuration files are loaded from (in priority order):
1. TAG_QUORUM_* environment variables (e.g. TAG_QUORUM_ENGINE__MODE)
2. --config <path>     Explicit config file
3. ./tag-quorum.toml   Project-level config
4. ~/.config/tag-quorum/config.toml   Global config

Example:
  tag-quorum hiking chess "specialty coffee"
  tag-quorum --profile subject.json --max-tags 5 --output json
  tag-quorum --mode delegated --moderated hiking chess
"#)]
pub struct Cli {
    /// Plain tag names (mutually exclusive with --profile)
    #[arg(value_name = "TAG", conflicts_with = "profile")]
    pub tags: Vec<String>,

    /// JSON file holding a full subject profile
    #[arg(short, long, value_name = "PATH")]
    pub profile: Option<PathBuf>,

    /// Subject identifier used with plain tags
    #[arg(long, value_name = "ID", default_value = "cli")]
    pub subject_id: String,

    /// Number of tags to select
    #[arg(short = 'n', long, value_name = "N")]
    pub max_tags: Option<usize>,

    /// Engine mode (overrides the config file)
    #[arg(long, value_enum)]
    pub mode: Option<ModeArg>,

    /// Let a moderator pick the final selection (delegated mode only)
    #[arg(long)]
    pub moderated: bool,

    /// Output format (overrides the config file)
    #[arg(short, long, value_enum)]
    pub output: Option<OutputArg>,

    /// Append evaluator outputs and the ranking to this JSONL file
    #[arg(long, value_name = "PATH")]
    pub trace_file: Option<PathBuf>,

    /// Seed for the heuristic evaluators' jitter
    #[arg(long, value_name = "N")]
    pub seed: Option<u64>,

    /// Verbosity level (-v = info, -vv = debug, -vvv = trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress progress indicators
    #[arg(short, long)]
    pub quiet: bool,

    /// Path to configuration file
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Disable loading of configuration files
    #[arg(long)]
    pub no_config: bool,

    /// Show configuration file locations and exit
    #[arg(long)]
    pub show_config: bool,
}
