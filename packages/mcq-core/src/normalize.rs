//! Turning raw model output into validated question records.
//!
//! Models wrap JSON in markdown fences, add chatter around it, mislabel
//! single/multiple questions and occasionally invent option indices. The
//! pipeline here is:
//!
//! 1. strip ```` ```json ```` fences and trim
//! 2. parse as JSON, falling back to the outermost `[...]` span
//! 3. require a top-level array
//! 4. keep at most `numQuestions` elements
//! 5. repair each record's `type`/`correctAnswer` shape, then validate it
//!
//! Records that cannot be repaired are dropped with a warning. Normalizing
//! an already-normalized list returns it unchanged.

use std::sync::LazyLock;

use regex::Regex;
use serde_json::{Map, Value};
use tracing::{debug, warn};

use crate::error::BackendError;
use crate::types::{CorrectAnswer, GenerationSettings, Mcq, QuestionType};

pub const UNPARSEABLE_REPLY: &str = "Could not parse JSON response from AI";
pub const NOT_AN_ARRAY: &str = "Invalid response format from AI - expected array";
pub const NO_VALID_RECORDS: &str = "No valid questions in AI response";

static CODE_FENCE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"```json\n?|\n?```").expect("code fence regex is valid"));

static BRACKETED: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)\[.*\]").expect("bracket regex is valid"));

/// Remove markdown code fences and surrounding whitespace.
pub fn strip_code_fences(raw: &str) -> String {
    CODE_FENCE.replace_all(raw, "").trim().to_string()
}

/// Parse model output into the elements of its top-level JSON array.
pub fn parse_reply(raw: &str) -> Result<Vec<Value>, BackendError> {
    let cleaned = strip_code_fences(raw);

    let parsed = match serde_json::from_str::<Value>(&cleaned) {
        Ok(value) => value,
        Err(_) => {
            let span = BRACKETED
                .find(&cleaned)
                .ok_or_else(|| BackendError::Parse(UNPARSEABLE_REPLY.into()))?;
            serde_json::from_str(span.as_str())
                .map_err(|e| BackendError::Parse(format!("{}: {}", UNPARSEABLE_REPLY, e)))?
        }
    };

    match parsed {
        Value::Array(items) => Ok(items),
        _ => Err(BackendError::Format(NOT_AN_ARRAY.into())),
    }
}

/// Truncate, repair and validate decoded records.
///
/// Fails only when a non-empty input yields no valid record at all.
pub fn normalize_records(
    items: Vec<Value>,
    settings: &GenerationSettings,
) -> Result<Vec<Mcq>, BackendError> {
    let received = items.len();

    let mcqs: Vec<Mcq> = items
        .into_iter()
        .take(settings.num_questions)
        .enumerate()
        .filter_map(|(index, item)| match normalize_record(item, settings) {
            Ok(mcq) => Some(mcq),
            Err(reason) => {
                warn!(index, reason = %reason, "Dropping invalid question record");
                None
            }
        })
        .collect();

    if mcqs.is_empty() && received > 0 {
        return Err(BackendError::Format(NO_VALID_RECORDS.into()));
    }
    Ok(mcqs)
}

/// Parse and normalize in one step.
pub fn normalize_reply(raw: &str, settings: &GenerationSettings) -> Result<Vec<Mcq>, BackendError> {
    normalize_records(parse_reply(raw)?, settings)
}

/// Repair and validate a single decoded record.
///
/// `difficulty` always echoes the requested setting. Hints and explanations
/// are kept only when requested.
pub fn normalize_record(value: Value, settings: &GenerationSettings) -> Result<Mcq, String> {
    let Value::Object(record) = value else {
        return Err("record is not an object".into());
    };

    let question = non_empty_str(&record, "question").ok_or("missing question text")?;
    let options = read_options(&record)?;

    let raw_answer = record
        .get("correctAnswer")
        .filter(|v| !v.is_null())
        .ok_or("missing correctAnswer")?;

    let declared = record
        .get("type")
        .and_then(Value::as_str)
        .and_then(|t| match t.trim().to_ascii_lowercase().as_str() {
            "single" => Some(QuestionType::Single),
            "multiple" => Some(QuestionType::Multiple),
            _ => None,
        });
    let shape = if raw_answer.is_array() {
        QuestionType::Multiple
    } else {
        QuestionType::Single
    };
    let question_type = declared.unwrap_or(shape);
    if question_type != shape {
        debug!(
            declared = question_type.as_str(),
            "Repairing correctAnswer shape to match question type"
        );
    }

    let correct_answer = match question_type {
        QuestionType::Single => {
            // A list under "single" keeps only its first element
            let first = match raw_answer {
                Value::Array(list) => list.first().ok_or("empty correctAnswer list")?,
                scalar => scalar,
            };
            CorrectAnswer::Single(option_index(first, options.len())?)
        }
        QuestionType::Multiple => {
            let listed: Vec<&Value> = match raw_answer {
                Value::Array(list) => list.iter().collect(),
                scalar => vec![scalar],
            };
            let mut indices = Vec::with_capacity(listed.len());
            for value in listed {
                let index = option_index(value, options.len())?;
                if !indices.contains(&index) {
                    indices.push(index);
                }
            }
            match indices.len() {
                0 => return Err("empty correctAnswer list".into()),
                1 => CorrectAnswer::Single(indices[0]),
                _ => CorrectAnswer::Multiple(indices),
            }
        }
    };
    let question_type = match correct_answer {
        CorrectAnswer::Single(_) => QuestionType::Single,
        CorrectAnswer::Multiple(_) => QuestionType::Multiple,
    };

    let hint = if settings.include_hints {
        non_empty_str(&record, "hint")
    } else {
        None
    };
    let explanation = if settings.include_explanations {
        non_empty_str(&record, "explanation")
    } else {
        None
    };

    Ok(Mcq {
        question,
        options,
        correct_answer,
        question_type,
        difficulty: settings.difficulty,
        hint,
        explanation,
    })
}

fn non_empty_str(record: &Map<String, Value>, key: &str) -> Option<String> {
    record
        .get(key)
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

fn read_options(record: &Map<String, Value>) -> Result<Vec<String>, String> {
    let list = record
        .get("options")
        .and_then(Value::as_array)
        .ok_or("missing options list")?;

    let options = list
        .iter()
        .map(|option| match option {
            Value::String(s) => Ok(s.clone()),
            Value::Number(n) => Ok(n.to_string()),
            other => Err(format!("option is not text: {}", other)),
        })
        .collect::<Result<Vec<_>, _>>()?;

    if options.len() < 2 {
        return Err(format!("needs at least 2 options, got {}", options.len()));
    }
    Ok(options)
}

/// Read an option index, accepting integral numbers and numeric strings.
fn option_index(value: &Value, option_count: usize) -> Result<usize, String> {
    let index = match value {
        Value::Number(n) => n
            .as_u64()
            .or_else(|| n.as_f64().filter(|f| f.fract() == 0.0 && *f >= 0.0).map(|f| f as u64)),
        Value::String(s) => s.trim().parse::<u64>().ok(),
        _ => None,
    }
    .ok_or_else(|| format!("correctAnswer entry is not an option index: {}", value))?;

    usize::try_from(index)
        .ok()
        .filter(|i| *i < option_count)
        .ok_or_else(|| format!("correctAnswer index {} out of range for {} options", index, option_count))
}
