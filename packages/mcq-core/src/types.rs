//! Question records and generation settings.
//!
//! Field names on the wire are camelCase (`correctAnswer`, `numQuestions`)
//! because browser front-ends and the generation service share this shape.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::McqError;

/// Smallest question count offered by front-ends.
pub const MIN_QUESTIONS: usize = 3;

/// Largest question count offered by front-ends.
pub const MAX_QUESTIONS: usize = 15;

/// Option counts offered by front-ends.
pub const ANSWER_OPTION_CHOICES: [usize; 3] = [3, 4, 5];

/// Question difficulty.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    #[default]
    Medium,
    Hard,
}

impl Difficulty {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Easy => "easy",
            Self::Medium => "medium",
            Self::Hard => "hard",
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Difficulty {
    type Err = McqError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "easy" => Ok(Self::Easy),
            "medium" => Ok(Self::Medium),
            "hard" => Ok(Self::Hard),
            other => Err(McqError::InvalidSettings(format!(
                "unknown difficulty '{}' (expected easy, medium or hard)",
                other
            ))),
        }
    }
}

/// Whether a question has one or several correct options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QuestionType {
    Single,
    Multiple,
}

impl QuestionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Single => "single",
            Self::Multiple => "multiple",
        }
    }
}

/// Zero-based index (or indices) of the correct option(s).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CorrectAnswer {
    Single(usize),
    Multiple(Vec<usize>),
}

impl CorrectAnswer {
    /// All correct indices, in order.
    pub fn indices(&self) -> Vec<usize> {
        match self {
            Self::Single(index) => vec![*index],
            Self::Multiple(indices) => indices.clone(),
        }
    }

    pub fn contains(&self, index: usize) -> bool {
        match self {
            Self::Single(correct) => *correct == index,
            Self::Multiple(indices) => indices.contains(&index),
        }
    }
}

/// A multiple-choice question.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Mcq {
    pub question: String,

    pub options: Vec<String>,

    /// Scalar for `single`, two or more indices for `multiple`
    pub correct_answer: CorrectAnswer,

    #[serde(rename = "type")]
    pub question_type: QuestionType,

    pub difficulty: Difficulty,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hint: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub explanation: Option<String>,
}

impl Mcq {
    /// Single-answer question.
    pub fn single<I, S>(question: impl Into<String>, options: I, correct: usize, difficulty: Difficulty) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            question: question.into(),
            options: options.into_iter().map(Into::into).collect(),
            correct_answer: CorrectAnswer::Single(correct),
            question_type: QuestionType::Single,
            difficulty,
            hint: None,
            explanation: None,
        }
    }

    /// Multiple-answer question.
    pub fn multiple<I, S>(
        question: impl Into<String>,
        options: I,
        correct: Vec<usize>,
        difficulty: Difficulty,
    ) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            question: question.into(),
            options: options.into_iter().map(Into::into).collect(),
            correct_answer: CorrectAnswer::Multiple(correct),
            question_type: QuestionType::Multiple,
            difficulty,
            hint: None,
            explanation: None,
        }
    }

    /// Set the hint.
    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }

    /// Set the explanation.
    pub fn with_explanation(mut self, explanation: impl Into<String>) -> Self {
        self.explanation = Some(explanation.into());
        self
    }

    /// Whether the option at `index` is correct.
    pub fn is_correct(&self, index: usize) -> bool {
        self.correct_answer.contains(index)
    }
}

/// Per-request generation settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationSettings {
    /// Desired question count; the result may be shorter, never longer
    pub num_questions: usize,

    pub difficulty: Difficulty,

    /// Options per question
    pub num_answers: usize,

    /// Sampling creativity in `[0, 1]`
    pub temperature: f32,

    pub include_hints: bool,

    pub include_explanations: bool,

    /// Absent in requests from older front-ends
    #[serde(default)]
    pub allow_multiple_correct: bool,
}

impl Default for GenerationSettings {
    fn default() -> Self {
        Self {
            num_questions: 5,
            difficulty: Difficulty::Medium,
            num_answers: 4,
            temperature: 0.7,
            include_hints: true,
            include_explanations: true,
            allow_multiple_correct: false,
        }
    }
}

impl GenerationSettings {
    pub fn with_num_questions(mut self, n: usize) -> Self {
        self.num_questions = n;
        self
    }

    pub fn with_difficulty(mut self, difficulty: Difficulty) -> Self {
        self.difficulty = difficulty;
        self
    }

    pub fn with_num_answers(mut self, n: usize) -> Self {
        self.num_answers = n;
        self
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    pub fn with_hints(mut self, include: bool) -> Self {
        self.include_hints = include;
        self
    }

    pub fn with_explanations(mut self, include: bool) -> Self {
        self.include_explanations = include;
        self
    }

    pub fn with_multiple_correct(mut self, allow: bool) -> Self {
        self.allow_multiple_correct = allow;
        self
    }

    /// Reject settings no backend can satisfy.
    ///
    /// Front-end bounds ([`MIN_QUESTIONS`]..=[`MAX_QUESTIONS`]) are not
    /// enforced here; any positive count is accepted.
    pub fn validate(&self) -> Result<(), McqError> {
        if self.num_questions == 0 {
            return Err(McqError::InvalidSettings(
                "numQuestions must be at least 1".into(),
            ));
        }
        if self.num_answers < 2 {
            return Err(McqError::InvalidSettings(format!(
                "numAnswers must be at least 2, got {}",
                self.num_answers
            )));
        }
        if !self.temperature.is_finite() || !(0.0..=1.0).contains(&self.temperature) {
            return Err(McqError::InvalidSettings(format!(
                "temperature must be between 0 and 1, got {}",
                self.temperature
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_mcq_wire_shape() {
        let mcq = Mcq::multiple("Select all that apply: primes?", ["2", "4", "5"], vec![0, 2], Difficulty::Easy)
            .with_hint("Divisible only by one and itself");

        let value = serde_json::to_value(&mcq).unwrap();
        assert_eq!(
            value,
            json!({
                "question": "Select all that apply: primes?",
                "options": ["2", "4", "5"],
                "correctAnswer": [0, 2],
                "type": "multiple",
                "difficulty": "easy",
                "hint": "Divisible only by one and itself"
            })
        );
    }

    #[test]
    fn test_correct_answer_untagged() {
        let single: CorrectAnswer = serde_json::from_value(json!(1)).unwrap();
        assert_eq!(single, CorrectAnswer::Single(1));

        let multiple: CorrectAnswer = serde_json::from_value(json!([0, 3])).unwrap();
        assert!(multiple.contains(3));
        assert!(!multiple.contains(1));
    }

    #[test]
    fn test_settings_accept_legacy_payload() {
        let settings: GenerationSettings = serde_json::from_value(json!({
            "numQuestions": 5,
            "difficulty": "hard",
            "numAnswers": 4,
            "temperature": 0.7,
            "includeHints": true,
            "includeExplanations": false
        }))
        .unwrap();

        assert_eq!(settings.difficulty, Difficulty::Hard);
        assert!(!settings.allow_multiple_correct);
    }

    #[test]
    fn test_settings_validation() {
        assert!(GenerationSettings::default().validate().is_ok());
        assert!(GenerationSettings::default().with_num_questions(0).validate().is_err());
        assert!(GenerationSettings::default().with_num_answers(1).validate().is_err());
        assert!(GenerationSettings::default().with_temperature(1.5).validate().is_err());
        assert!(GenerationSettings::default().with_temperature(f32::NAN).validate().is_err());
        assert!(GenerationSettings::default().with_temperature(0.0).validate().is_ok());
    }

    #[test]
    fn test_difficulty_parse() {
        assert_eq!("HARD".parse::<Difficulty>().unwrap(), Difficulty::Hard);
        assert!("extreme".parse::<Difficulty>().is_err());
    }
}
