//! Prompt templates for delegated evaluators and the moderator

use crate::core::string::preview;
use crate::evaluation::EvaluatorOutput;
use crate::tag::SubjectProfile;

/// Length of each evaluator excerpt handed to the moderator
pub const MODERATOR_EXCERPT_CHARS: usize = 500;

/// Templates for generating prompts at each stage
pub struct PromptTemplate;

impl PromptTemplate {
    /// System prompt for a delegated evaluator playing `role`
    pub fn evaluator_system(role: &str) -> String {
        let persona = match role {
            "analyst" => {
                "You are a data analyst. You judge tags by how much measurable, \
                 behavioral signal they carry and how useful they are for building a profile."
            }
            "psychologist" => {
                "You are a psychologist. You judge tags by what they reveal about \
                 personality, emotion and underlying motivation."
            }
            "strategist" => {
                "You are a business strategist. You judge tags by their value for \
                 targeted marketing, product decisions and user operations."
            }
            _ => "You are an expert evaluator with your own professional perspective.",
        };

        format!(
            "{}\nYou are one of several independent experts ranking a person's descriptive tags.\n\
             Score every tag you are given, never invent tag ids, and answer only with the JSON requested.",
            persona
        )
    }

    /// Human-readable description of the subject and its tags
    pub fn tags_context(profile: &SubjectProfile) -> String {
        let mut text = format!(
            "Subject:\n- id: {}\n- name: {}\n- background: {}\n\nTags:\n",
            profile.subject_id,
            profile.name,
            profile.context.as_deref().unwrap_or("none")
        );

        for tag in &profile.tags {
            text.push_str(&format!(
                "- tag_id: {}, name: {}, category: {}, description: {}, relevance: {}\n",
                tag.tag_id, tag.name, tag.category, tag.description, tag.relevance_score
            ));
        }

        text
    }

    /// User prompt asking an evaluator to score every tag
    pub fn analysis_prompt(profile: &SubjectProfile) -> String {
        format!(
            r#"Analyse the following tag data and rate the importance of each tag from your professional perspective:

{}
For every tag provide:
1. An importance score (1-10)
2. The reasoning behind the score
3. A unique insight from your professional angle

Return the result as JSON in exactly this shape:
```json
{{
    "analysis": [
        {{
            "tag_id": "tag id",
            "score": 8,
            "reasoning": "why this score",
            "professional_insight": "your insight"
        }}
    ],
    "overall_assessment": "overall assessment"
}}
```"#,
            Self::tags_context(profile)
        )
    }

    /// System prompt for the moderator
    pub fn moderator_system() -> &'static str {
        r#"You are a moderator reconciling several expert assessments into a final tag ranking.
Weigh how well each expert supports their view, the overall importance of each tag,
how complete the resulting profile is, and its practical value.
Only select tag ids that appear in the expert assessments."#
    }

    /// User prompt asking the moderator for the final selection
    pub fn consensus_prompt(outputs: &[EvaluatorOutput], max_tags: usize) -> String {
        let mut prompt = String::from("Summary of the expert assessments:\n");

        for output in outputs {
            prompt.push_str(&format!(
                "\n=== {} ===\n{}\n",
                output.evaluator.to_uppercase(),
                preview(&output.raw_response, MODERATOR_EXCERPT_CHARS)
            ));
        }

        prompt.push_str(&format!(
            r#"
Select the {} most important tags. For each provide a final priority score (1-10),
a combined reasoning and the level of expert agreement (0-1).

Return JSON in exactly this shape:
```json
{{
    "selected_tags": [
        {{"tag_id": "tag id", "score": 8, "reasoning": "combined reasoning", "consensus": 0.8}}
    ],
    "discussion_summary": "one-paragraph summary of the discussion"
}}
```"#,
            max_tags
        ));

        prompt
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tag::{TagRecord, profile_from_plain_tags};

    #[test]
    fn test_evaluator_system_per_role() {
        assert!(PromptTemplate::evaluator_system("psychologist").contains("psychologist"));
        assert!(PromptTemplate::evaluator_system("oracle").contains("expert evaluator"));
    }

    #[test]
    fn test_analysis_prompt_embeds_every_tag() {
        let profile = SubjectProfile::new(
            "u7",
            "Mia",
            vec![
                TagRecord::new("t1", "Night owl", "behavior", 7.0),
                TagRecord::new("t2", "Vegan", "preference", 5.5),
            ],
        )
        .with_context("Frequent traveller");

        let prompt = PromptTemplate::analysis_prompt(&profile);
        assert!(prompt.contains("tag_id: t1, name: Night owl"));
        assert!(prompt.contains("tag_id: t2, name: Vegan"));
        assert!(prompt.contains("Frequent traveller"));
        assert!(prompt.contains("\"overall_assessment\""));
        assert!(prompt.contains("```json"));
    }

    #[test]
    fn test_tags_context_without_background() {
        let profile = profile_from_plain_tags(&["a"], "u1");
        let mut profile = profile;
        profile.context = None;
        assert!(PromptTemplate::tags_context(&profile).contains("background: none"));
    }

    #[test]
    fn test_consensus_prompt_excerpts() {
        let outputs = vec![EvaluatorOutput::new("analyst", vec![], "", "y".repeat(800))];
        let prompt = PromptTemplate::consensus_prompt(&outputs, 3);
        assert!(prompt.contains("=== ANALYST ==="));
        assert!(prompt.contains("Select the 3 most important tags"));
        assert!(!prompt.contains(&"y".repeat(501)));
    }
}
