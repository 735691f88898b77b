//! Prompt construction for question generation.

use serde_json::json;

use crate::types::GenerationSettings;

const ROLE_PREAMBLE: &str = "You are an expert educator and assessment creator.";

const QUALITY_REQUIREMENTS: &str = "\
- Questions should test understanding, not just memorization
- Ensure questions are diverse and cover different aspects of the content
- Make questions clear and unambiguous
- Vary question types (factual, conceptual, analytical, application-based)";

const SINGLE_ONLY: &str =
    "- Each question should have exactly one correct answer (mark as \"type\": \"single\" with correctAnswer as a number)";

const MIXED_ANSWERS: &str = "\
- Some questions can have multiple correct answers (mark as \"type\": \"multiple\" and provide correctAnswer as an array)
- Mix single correct answer questions (mark as \"type\": \"single\" with correctAnswer as a number) and multiple correct answer questions
- For multiple correct questions, ensure at least 2 options are correct
- Clearly indicate in the question when multiple answers are expected (e.g., \"Select all that apply\", \"Which of the following are correct?\")";

const JSON_ONLY: &str = "Important: Return ONLY the JSON array, no additional text or formatting.";

/// Build the instruction prompt for `content` under `settings`.
pub fn build_prompt(content: &str, settings: &GenerationSettings) -> String {
    let answer_rules = if settings.allow_multiple_correct {
        MIXED_ANSWERS
    } else {
        SINGLE_ONLY
    };
    let hint_rule = if settings.include_hints {
        "- Include helpful hints for each question"
    } else {
        "- Do not include hints"
    };
    let explanation_rule = if settings.include_explanations {
        "- Include detailed explanations for correct answers"
    } else {
        "- Do not include explanations"
    };

    format!(
        "{preamble} Generate {count} multiple choice questions based on the following content.

Content: \"{content}\"

Requirements:
- Difficulty level: {difficulty}
- Each question should have exactly {options} options
{quality}
{answer_rules}
{hint_rule}
{explanation_rule}

Format your response as a JSON array of objects with this exact structure.

For single correct answer questions:
{single}

For multiple correct answer questions (if enabled):
{multiple}

{json_only}
",
        preamble = ROLE_PREAMBLE,
        count = settings.num_questions,
        content = content,
        difficulty = settings.difficulty,
        options = settings.num_answers,
        quality = QUALITY_REQUIREMENTS,
        answer_rules = answer_rules,
        hint_rule = hint_rule,
        explanation_rule = explanation_rule,
        single = example_record(settings, false),
        multiple = example_record(settings, true),
        json_only = JSON_ONLY,
    )
}

/// Placeholder label for the option at `index` ("Option A", "Option B", ...).
fn option_label(index: usize) -> String {
    match u8::try_from(index).ok().filter(|i| *i < 26) {
        Some(i) => format!("Option {}", (b'A' + i) as char),
        None => format!("Option {}", index + 1),
    }
}

fn example_record(settings: &GenerationSettings, multiple: bool) -> String {
    let options: Vec<String> = (0..settings.num_answers.max(2)).map(option_label).collect();
    let (question, correct, kind) = if multiple {
        let second = 2.min(options.len() - 1);
        ("Select all that apply: Question text here", json!([0, second]), "multiple")
    } else {
        ("Question text here", json!(0), "single")
    };

    // Keys in reading order
    let mut fields = vec![
        ("question", json!(question)),
        ("options", json!(options)),
        ("correctAnswer", correct),
        ("type", json!(kind)),
        ("difficulty", json!(settings.difficulty.as_str())),
    ];
    if settings.include_hints {
        fields.push(("hint", json!("Helpful hint here")));
    }
    if settings.include_explanations {
        fields.push(("explanation", json!("Detailed explanation here")));
    }

    let body: Vec<String> = fields
        .into_iter()
        .map(|(key, value)| format!("  \"{}\": {}", key, value))
        .collect();
    format!("{{\n{}\n}}", body.join(",\n"))
}
