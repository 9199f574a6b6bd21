// src/prompt.rs

use crate::models::job::GenerationParams;

/// System instruction sent to every provider. The strict output contract
/// (one JSON array, fixed keys, lowercase answer label) is what the response
/// parser leans on.
pub const SYSTEM_PROMPT: &str =
    "You are an expert exam writer and pedagogue. Produce EXACTLY a single JSON array of \
     multiple-choice questions only — no commentary, no markdown fences, no extra text. \
     Each array item must be a JSON object with keys: text, option_a, option_b, option_c, \
     option_d, correct_option, explanation. correct_option must be 'a','b','c', or 'd' \
     (lowercase). Return exactly one JSON array and nothing else.";

/// Source excerpts are cut to this many characters before being embedded in
/// the task prompt.
pub const SOURCE_EXCERPT_CHARS: usize = 12_000;

/// Build the task prompt for one job. With a source text, the model is told
/// to answer strictly from the (truncated) excerpt and to return fewer items
/// rather than invent content; without one, the prompt carries an inline
/// shape example instead.
pub fn user_prompt(params: &GenerationParams, source_text: Option<&str>) -> String {
    let topic = params.topic.as_deref().unwrap_or("");

    match source_text {
        Some(source) => {
            let excerpt: String = source.chars().take(SOURCE_EXCERPT_CHARS).collect();
            format!(
                "Generate {} multiple-choice questions for a quiz titled '{}' on the topic '{}'. \
                 Difficulty: {}. Base the questions strictly on the source text provided and do \
                 not invent facts. If the source does not contain enough material, return fewer \
                 items rather than unrelated content.\n\nSOURCE:\n{}",
                params.num_questions, params.title, topic, params.difficulty, excerpt
            )
        }
        None => format!(
            "Generate {} multiple-choice questions for a quiz titled '{}' on the topic '{}'. \
             Difficulty: {}. Return EXACTLY a JSON array where each item looks like: \
             {{\"text\":\"...\",\"option_a\":\"...\",\"option_b\":\"...\",\"option_c\":\"...\",\
             \"option_d\":\"...\",\"correct_option\":\"b\",\"explanation\":\"...\"}}",
            params.num_questions, params.title, topic, params.difficulty
        ),
    }
}
