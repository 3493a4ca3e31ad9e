//! Console output formatter for analysis results

use colored::Colorize;
use tag_quorum_domain::{AnalysisResult, ConsensusEntry, OutputFormat};

/// Formats analysis results for console display
pub struct ConsoleFormatter;

impl ConsoleFormatter {
    /// Enable or disable ANSI colors for everything formatted afterwards
    pub fn set_color(enabled: bool) {
        colored::control::set_override(enabled);
    }

    /// Format the result in the requested format
    pub fn render(result: &AnalysisResult, format: OutputFormat) -> String {
        match format {
            OutputFormat::Full => Self::format(result),
            OutputFormat::Ranking => Self::format_ranking(result),
            OutputFormat::Json => Self::format_json(result),
        }
    }

    /// Format the complete result: ranking, summary and discussion trail
    pub fn format(result: &AnalysisResult) -> String {
        let mut output = String::new();

        output.push_str(&Self::header("Tag Consensus Results"));
        output.push('\n');

        output.push_str(&format!(
            "{} {}\n",
            "Subject:".cyan().bold(),
            result.subject_id
        ));
        output.push_str(&format!("{} {}\n", "Mode:".cyan().bold(), result.mode));
        output.push_str(&format!(
            "{} {}\n",
            "Source:".cyan().bold(),
            result.source
        ));

        if result.fallback {
            output.push_str(&format!(
                "\n{}\n",
                "No evaluator produced usable scores; tags are ranked by their original relevance."
                    .yellow()
            ));
        }

        output.push_str(&Self::section_header("Selected Tags"));
        if result.selected_tags.is_empty() {
            output.push_str("\n(none)\n");
        }
        for (index, entry) in result.selected_tags.iter().enumerate() {
            output.push('\n');
            output.push_str(&Self::ranking_line(index + 1, entry));
            output.push('\n');
            output.push_str(&Self::indent(&entry.rationale, "     "));
            output.push('\n');
        }

        output.push_str(&Self::section_header("Summary"));
        output.push_str(&format!("\n{}\n", result.summary));

        if !result.discussions.is_empty() {
            output.push_str(&Self::section_header("Evaluator Discussion"));
            for discussion in &result.discussions {
                let title = format!(
                    "── {} ({} tags scored) ──",
                    discussion.evaluator, discussion.scored_tags
                );
                match &discussion.degraded {
                    Some(reason) => {
                        output.push_str(&format!("\n{}\n", title.red().bold()));
                        output.push_str(&format!("{} {}\n", "Degraded:".red(), reason));
                    }
                    None => output.push_str(&format!("\n{}\n", title.yellow().bold())),
                }
                output.push_str(&format!("{}\n", discussion.overall_assessment));
                if !discussion.preview.is_empty() {
                    output.push_str(&format!(
                        "{}\n",
                        Self::indent(&discussion.preview, "  | ").dimmed()
                    ));
                }
            }
        }

        output.push_str(&Self::footer());

        output
    }

    /// Format only the ranked tags (concise output)
    pub fn format_ranking(result: &AnalysisResult) -> String {
        let mut output = String::new();

        output.push_str(&format!(
            "{}\n\n",
            "=== Selected Tags ===".cyan().bold()
        ));

        for (index, entry) in result.selected_tags.iter().enumerate() {
            output.push_str(&Self::ranking_line(index + 1, entry));
            output.push('\n');
        }

        output
    }

    /// Format as JSON
    pub fn format_json(result: &AnalysisResult) -> String {
        serde_json::to_string_pretty(result).unwrap_or_else(|_| "{}".to_string())
    }

    fn ranking_line(rank: usize, entry: &ConsensusEntry) -> String {
        format!(
            "{:>2}. {} [{}]  score {}  agreement {}",
            rank,
            entry.name.bold(),
            entry.tag_id,
            format!("{:.2}", entry.score).green(),
            Self::agreement_label(entry.agreement)
        )
    }

    fn agreement_label(agreement: f64) -> colored::ColoredString {
        let text = format!("{:.2}", agreement);
        if agreement >= 0.8 {
            text.green()
        } else if agreement >= 0.5 {
            text.yellow()
        } else {
            text.red()
        }
    }

    fn header(title: &str) -> String {
        let line = "=".repeat(60);
        format!("{}\n{:^60}\n{}", line.cyan(), title.bold(), line.cyan())
    }

    fn section_header(title: &str) -> String {
        format!("\n{}\n{}\n", title.cyan().bold(), "-".repeat(40))
    }

    fn footer() -> String {
        format!("\n{}\n", "=".repeat(60).cyan())
    }

    /// Indent a multi-line string
    pub fn indent(text: &str, prefix: &str) -> String {
        text.lines()
            .map(|line| format!("{}{}", prefix, line))
            .collect::<Vec<_>>()
            .join("\n")
    }
}
